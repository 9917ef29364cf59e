mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod output;
mod source;
mod store;
mod utils;

use clap::Parser;

use app::{CommandContext, handle_import, handle_report};
use cli::{Cli, Commands};
use config::Config;
use error::AppResult;
use utils::set_debug;

fn run(cli: &Cli) -> AppResult<()> {
    let ctx = CommandContext::new(cli)?;
    match &cli.command {
        Commands::Import(args) => handle_import(args, &ctx),
        Commands::Report(args) => handle_report(args, &ctx),
    }
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load(cli.quiet);
    let cli = cli.with_config(&config);
    set_debug(cli.debug);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
