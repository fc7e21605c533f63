/// CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// spacequota — show space quotas of the targeted organization.
#[derive(Debug, Parser)]
#[command(
    name = "spacequota",
    about = "Resolve and display a space quota for the targeted organization",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output format. `auto` is the table layout; JSON only when requested.
    #[arg(long, global = true, value_name = "FORMAT", default_value = "auto")]
    pub output: OutputFormat,

    /// Shorthand for --output json.
    #[arg(long, global = true, conflicts_with = "output")]
    pub json: bool,

    /// Session file (defaults to the per-user config directory).
    #[arg(long, global = true, value_name = "PATH", env = "SPACEQUOTA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log requests and phase timings to stderr.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Table layout, on a terminal or piped.
    #[default]
    Auto,
    /// JSON object (pretty-printed).
    Json,
    /// Compact single-line JSON.
    Compact,
    /// Aligned `label: value` rows (human-readable).
    Table,
}

/// All subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the limits of a space quota in the targeted organization.
    SpaceQuota(SpaceQuotaArgs),
}

/// Arguments for `spacequota space-quota`.
#[derive(Debug, Parser)]
pub struct SpaceQuotaArgs {
    /// Name of the space quota.
    #[arg(
        value_name = "SPACE_QUOTA",
        value_parser = clap::builder::NonEmptyStringValueParser::new()
    )]
    pub name: String,
}
