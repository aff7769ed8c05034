pub mod scenario_config;

#[cfg(feature = "cli")]
use crate::core::report::ReportFormat;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "small-bank")]
#[command(about = "Run deposit, withdraw and transfer scenarios against in-memory accounts")]
pub struct CliConfig {
    /// Path to a TOML scenario file; the built-in demo runs when omitted
    #[arg(short, long)]
    pub scenario: Option<String>,

    /// Report format: table, json or csv (overrides the scenario file)
    #[arg(short, long)]
    pub format: Option<ReportFormat>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    /// Validate and list the operations without applying them
    #[arg(long)]
    pub dry_run: bool,
}
