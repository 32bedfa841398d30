use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};

use fpl_munger::aggregator::SecondaryMetric;
use fpl_munger::data_fetcher::LeagueKind;

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Fantasy Premier League head-to-head table exporter
///
/// Fetches every match of a head-to-head league (draft or classic game),
/// totals scores and results per round and writes two cumulative CSV tables:
/// raw points and a secondary metric (win points or carried totals).
///
/// Without --league, `run` processes every [[jobs]] entry of the config file.
#[derive(Parser, Debug)]
#[command(author = "Niko Salonen", version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Read configuration from this file instead of the default location.
    #[arg(long = "config", global = true, value_name = "PATH", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", global = true, value_name = "PATH", help_heading = "Logging")]
    pub log_file: Option<String>,

    /// Log only to the log file, not to stdout.
    #[arg(short, long, global = true, help_heading = "Logging")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch, aggregate and export league tables
    Run(RunArgs),
    /// Show or create the configuration file
    Config(ConfigArgs),
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// League game: draft or classic
    #[arg(long, value_parser = parse_kind)]
    pub kind: Option<LeagueKind>,

    /// League id to process instead of the configured jobs
    #[arg(long, requires = "kind")]
    pub league: Option<String>,

    /// Secondary table metric: win-points or carried-total.
    /// Defaults to win-points for draft and carried-total for classic.
    #[arg(long, value_parser = parse_metric)]
    pub metric: Option<SecondaryMetric>,

    /// Write tables under this directory instead of the configured one
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Print tables to stdout instead of writing files
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(clap::Args, Debug)]
pub struct ConfigArgs {
    /// List current configuration settings
    #[arg(short, long)]
    pub list: bool,

    /// Write a default configuration file if none exists
    #[arg(long)]
    pub init: bool,
}

fn parse_kind(value: &str) -> Result<LeagueKind, String> {
    value.parse()
}

fn parse_metric(value: &str) -> Result<SecondaryMetric, String> {
    value.parse()
}
