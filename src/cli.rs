use clap::{Args, Parser, Subcommand, ValueEnum};

fn parse_tick_ms(s: &str) -> Result<u64, String> {
    s.parse::<u64>()
        .map_err(|_| "Invalid tick interval".to_string())
        .and_then(|v| {
            if (10..=5000).contains(&v) {
                Ok(v)
            } else {
                Err("Tick interval must be between 10 and 5000 ms".to_string())
            }
        })
}

#[derive(Parser, Debug)]
#[command(name = "cnapp-dash")]
#[command(about = "Terminal analytics dashboard with searchable, editable chart widgets")]
#[command(version)]
pub struct Cli {
    /// Path to the seed document (defaults to the user config dir, then the built-in seed)
    #[arg(long, global = true, env = "CNAPP_DASH_SEED")]
    pub seed: Option<String>,

    /// Write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive dashboard (default)
    #[command(visible_aliases = &["dash", "d"])]
    Dashboard {
        /// Input poll interval in milliseconds
        #[arg(long, default_value = "250", value_parser = parse_tick_ms)]
        tick_ms: u64,
    },

    /// Print categories and widgets without the interactive UI
    #[command(visible_alias = "ls")]
    Show(ShowArgs),
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Only widgets whose name contains this text (case-insensitive)
    #[arg(short, long)]
    pub query: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Show summary statistics
    #[arg(long)]
    pub summary: bool,
}

#[derive(Debug, Clone, ValueEnum, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}
