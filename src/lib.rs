pub mod chart_type;
pub mod cli;
pub mod dashboard;
pub mod filter;
pub mod form;
pub mod formatters;
pub mod logging;
pub mod models;
pub mod palette;
pub mod seed;
pub mod store;

use anyhow::{Context, Result};
use cli::{Cli, Commands, OutputFormat, ShowArgs};
use colored::Colorize;
use models::Dashboard;
use seed::SeedSource;
use std::time::Duration;
use tracing::info;

const DEFAULT_TICK_MS: u64 = 250;

pub fn run(cli: Cli) -> Result<()> {
    let (dashboard, source) = seed::load_seed(cli.seed.as_deref()).context("failed to load seed")?;

    match &source {
        SeedSource::File(path) => info!(path = %path.display(), "loaded seed"),
        SeedSource::Embedded => info!("loaded built-in seed"),
    }

    match cli.command {
        None => dashboard::run_dashboard(dashboard, Duration::from_millis(DEFAULT_TICK_MS)),
        Some(Commands::Dashboard { tick_ms }) => {
            dashboard::run_dashboard(dashboard, Duration::from_millis(tick_ms))
        }
        Some(Commands::Show(args)) => show(&dashboard, &args),
    }
}

fn show(dashboard: &Dashboard, args: &ShowArgs) -> Result<()> {
    let query = args.query.as_deref().unwrap_or("");
    let categories = filter::filter_categories(&dashboard.categories, query);

    if categories.is_empty() {
        println!("{}", "No widgets found".yellow());
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => {
            println!("{}", formatters::format_table(&categories, args.summary));
        }
        OutputFormat::Csv => {
            print!("{}", formatters::format_csv(&categories)?);
        }
        OutputFormat::Json => {
            println!("{}", formatters::format_json(&categories)?);
        }
        OutputFormat::Markdown => {
            print!("{}", formatters::format_markdown(&categories, args.summary));
        }
    }

    if args.summary && args.format != OutputFormat::Table {
        formatters::print_summary(&categories);
    }

    Ok(())
}
