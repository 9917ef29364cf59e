use std::path::PathBuf;

use crate::cli::{Cli, ImportArgs, OutputFormat, ReportArgs};
use crate::config::default_db_path;
use crate::core::{DateFilter, ProjectFilter, ProjectNamer, aggregate, combine_projects};
use crate::error::{AppError, AppResult};
use crate::output::{ReportOptions, header_label, render_json, render_table, render_text};
use crate::source::{ClaudeSource, ImportSummary, Importer};
use crate::store::Store;
use crate::utils::{Timezone, parse_date, parse_range_arg};

/// Settings shared by every subcommand, resolved once from CLI and config
pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) db_path: PathBuf,
    pub(crate) timezone: Timezone,
}

impl<'a> CommandContext<'a> {
    pub(crate) fn new(cli: &'a Cli) -> AppResult<Self> {
        Ok(Self {
            cli,
            db_path: cli.db.clone().unwrap_or_else(default_db_path),
            timezone: Timezone::parse(cli.timezone.as_deref())?,
        })
    }
}

fn print_import_summary(summary: &ImportSummary, stored: usize, ctx: &CommandContext<'_>) {
    println!(
        "Imported {} new messages from {} files ({} already stored, {} lines skipped)",
        summary.inserted, summary.files, summary.duplicates, summary.skipped
    );
    if summary.failed_files > 0 {
        println!("{} files could not be read", summary.failed_files);
    }
    if !ctx.cli.quiet {
        eprintln!("Database: {} ({} messages)", ctx.db_path.display(), stored);
    }
}

pub(crate) fn handle_import(args: &ImportArgs, ctx: &CommandContext<'_>) -> AppResult<()> {
    let root = args
        .projects_dir
        .clone()
        .or_else(|| ctx.cli.config_projects_dir.clone())
        .or_else(ClaudeSource::default_root)
        .ok_or_else(|| AppError::ProjectsDirNotFound {
            path: PathBuf::from("~/.claude/projects"),
        })?;
    let source = ClaudeSource::new(root);

    let mut store = Store::open(&ctx.db_path)?;
    if args.fresh {
        let removed = store.clear()?;
        if !ctx.cli.quiet {
            eprintln!("Cleared {} stored messages", removed);
        }
    }

    let mut importer = Importer::new(&source, &mut store, ctx.cli.quiet);
    let summary = match &args.file {
        Some(file) => importer.import_file(file)?,
        None => importer.import_all()?,
    };

    print_import_summary(&summary, store.count()?, ctx);
    Ok(())
}

pub(crate) fn handle_report(args: &ReportArgs, ctx: &CommandContext<'_>) -> AppResult<()> {
    let tz = ctx.timezone;
    let today = tz.today();

    let mut range = parse_range_arg(args.range.as_deref(), today)?;
    if let Some(until) = &args.until {
        range = range.with_until(parse_date(until.trim())?)?;
    }

    let filter = ProjectFilter::new(args.project.as_deref(), args.exclude.as_deref())?;
    let namer = ProjectNamer::for_current_user(&ctx.cli.strip_prefixes);

    let store = Store::open_read_only(&ctx.db_path)?;
    let events = store.query_events(
        &DateFilter::new(Some(range.since), range.until),
        tz,
        &filter,
        &namer,
    )?;

    let mut sheet = aggregate(&events, tz);
    if args.group_time {
        sheet = combine_projects(sheet);
    }

    let options = ReportOptions {
        title: header_label(&range, today, &filter, args.group_time),
        since: range.since,
        until: range.until.unwrap_or(today),
        order: args.order.or(ctx.cli.config_order).unwrap_or_default(),
        use_color: ctx.cli.use_color(),
    };

    let format = args.format.or(ctx.cli.config_format).unwrap_or_default();
    let rendered = match format {
        OutputFormat::Text => render_text(&sheet, &options),
        OutputFormat::Table => render_table(&sheet, &options),
        OutputFormat::Json => render_json(&sheet, &options),
    };
    println!("{rendered}");
    Ok(())
}
