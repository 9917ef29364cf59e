//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode, ConfigOutputFormat, ConfigSortOrder};

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub(crate) enum SortOrder {
    /// Oldest first
    Asc,
    /// Newest first (default)
    #[default]
    Desc,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    /// Classic 80-column timesheet (default)
    #[default]
    Text,
    /// Boxed table
    Table,
    /// Machine-readable JSON
    Json,
}

#[derive(Parser)]
#[command(name = "cctimesheet")]
#[command(
    about = "Billable-time timesheets from Claude Code conversation logs",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Path to the message database
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) db: Option<PathBuf>,

    /// Timezone for day and block boundaries (e.g., "UTC", "local", "America/New_York")
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Enable debug output (show processing details)
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Suppress status messages on stderr
    #[arg(short, long, global = true)]
    pub(crate) quiet: bool,

    /// Root of the Claude projects directory, from config only
    #[arg(skip)]
    pub(crate) config_projects_dir: Option<PathBuf>,

    /// Path prefixes hidden from project names, from config only
    #[arg(skip)]
    pub(crate) strip_prefixes: Vec<String>,

    /// Report defaults from config, applied when the flags are not given
    #[arg(skip)]
    pub(crate) config_order: Option<SortOrder>,
    #[arg(skip)]
    pub(crate) config_format: Option<OutputFormat>,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        // For boolean flags, config only applies if CLI is false (default)
        if !self.debug && config.debug {
            self.debug = true;
        }

        if let Some(color) = config.color
            && matches!(self.color, ColorMode::Auto)
        {
            self.color = match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            };
        }

        self.config_order = config.order.map(|order| match order {
            ConfigSortOrder::Asc => SortOrder::Asc,
            ConfigSortOrder::Desc => SortOrder::Desc,
        });
        self.config_format = config.format.map(|format| match format {
            ConfigOutputFormat::Text => OutputFormat::Text,
            ConfigOutputFormat::Table => OutputFormat::Table,
            ConfigOutputFormat::Json => OutputFormat::Json,
        });

        // String options: only apply if CLI didn't set them
        if self.db.is_none() {
            self.db = config.db.clone();
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        self.config_projects_dir = config.projects_dir.clone();
        self.strip_prefixes = config.strip_prefixes.clone();

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Commands;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["cctimesheet"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn report_defaults() {
        let cli = parse(&["report"]);
        let Commands::Report(report) = &cli.command else {
            panic!("expected report");
        };
        assert!(report.range.is_none());
        assert!(report.format.is_none());
        assert!(report.order.is_none());
        assert!(!report.group_time);
        assert!(!cli.debug);
    }

    #[test]
    fn report_with_all_flags() {
        let cli = parse(&[
            "report", "30", "-p", "*acme*", "-x", "*sandbox*", "--until", "20250131", "-g",
            "--format", "json", "--order", "asc", "--timezone", "UTC", "--db", "/tmp/x.db",
        ]);
        let Commands::Report(report) = &cli.command else {
            panic!("expected report");
        };
        assert_eq!(report.range.as_deref(), Some("30"));
        assert_eq!(report.project.as_deref(), Some("*acme*"));
        assert_eq!(report.exclude.as_deref(), Some("*sandbox*"));
        assert_eq!(report.until.as_deref(), Some("20250131"));
        assert!(report.group_time);
        assert_eq!(report.format, Some(OutputFormat::Json));
        assert_eq!(report.order, Some(SortOrder::Asc));
        assert_eq!(cli.timezone.as_deref(), Some("UTC"));
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
    }

    #[test]
    fn import_flags() {
        let cli = parse(&["import", "--projects-dir", "/logs", "--fresh", "-q"]);
        let Commands::Import(import) = &cli.command else {
            panic!("expected import");
        };
        assert!(import.file.is_none());
        assert_eq!(import.projects_dir, Some(PathBuf::from("/logs")));
        assert!(import.fresh);
        assert!(cli.quiet);
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["cctimesheet"]).is_err());
    }

    #[test]
    fn config_fills_unset_values_only() {
        let config: Config = toml::from_str(
            r#"
            db = "/data/messages.db"
            timezone = "Asia/Tokyo"
            color = "never"
            order = "asc"
            format = "table"
            debug = true
            strip_prefixes = ["/Users/alice/Code"]
            "#,
        )
        .unwrap();

        let cli = parse(&["--timezone", "UTC", "report"]).with_config(&config);
        assert_eq!(cli.timezone.as_deref(), Some("UTC"));
        assert_eq!(cli.db, Some(PathBuf::from("/data/messages.db")));
        assert_eq!(cli.color, ColorMode::Never);
        assert_eq!(cli.config_order, Some(SortOrder::Asc));
        assert_eq!(cli.config_format, Some(OutputFormat::Table));
        assert!(cli.debug);
        assert_eq!(cli.strip_prefixes, ["/Users/alice/Code"]);
        assert!(!cli.use_color());
    }

    #[test]
    fn no_color_wins() {
        let cli = parse(&["--color", "always", "--no-color", "report"]);
        assert!(!cli.use_color());
        let cli = parse(&["--color", "always", "report"]);
        assert!(cli.use_color());
    }
}
