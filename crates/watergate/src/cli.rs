//! Clap derive structures for the `watergate` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use watergate_api::models::ValveState;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// watergate -- talk to a Watergate Sonic over its local API
#[derive(Debug, Parser)]
#[command(
    name = "watergate",
    version,
    about = "Monitor and control a Watergate Sonic water valve",
    long_about = "Monitor and control a Watergate Sonic smart water valve through\n\
        the local HTTP API it serves on your network.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Device profile to use
    #[arg(long, short = 'p', env = "WATERGATE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Device URL, e.g. http://192.168.1.20 (overrides profile)
    #[arg(long, short = 'd', env = "WATERGATE_DEVICE", global = true)]
    pub device: Option<String>,

    /// Path to the configuration file
    #[arg(long, env = "WATERGATE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "WATERGATE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Per-request timeout in seconds (overrides profile)
    #[arg(long, env = "WATERGATE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Field/value table (default)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show valve, power, and water meter state
    #[command(alias = "st")]
    State(StateArgs),

    /// Show Wi-Fi and MQTT connectivity
    #[command(alias = "net")]
    Networking,

    /// Show live flow, pressure, and temperature
    #[command(alias = "tel")]
    Telemetry,

    /// Inspect and configure auto shut-off
    #[command(alias = "aso")]
    AutoShutOff(AutoShutOffArgs),

    /// Configure or decode webhook events
    Webhook(WebhookArgs),

    /// Open or close the valve
    Valve(ValveArgs),

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── State ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StateArgs {
    /// Request the v2 representation (split positive/negative meter)
    #[arg(long)]
    pub v2: bool,
}

// ── Auto shut-off ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AutoShutOffArgs {
    #[command(subcommand)]
    pub command: AutoShutOffCommand,
}

#[derive(Debug, Subcommand)]
pub enum AutoShutOffCommand {
    /// Show the current configuration
    Show,

    /// Show the last auto shut-off report
    Report,

    /// Change settings; only the given flags are sent
    Set(AutoShutOffSetArgs),
}

#[derive(Debug, Args)]
pub struct AutoShutOffSetArgs {
    /// Enable or disable auto shut-off
    #[arg(long)]
    pub enabled: Option<bool>,

    /// Duration threshold in minutes
    #[arg(long)]
    pub duration: Option<u32>,

    /// Volume threshold in liters
    #[arg(long)]
    pub volume: Option<u32>,
}

// ── Webhook ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WebhookArgs {
    #[command(subcommand)]
    pub command: WebhookCommand,
}

#[derive(Debug, Subcommand)]
pub enum WebhookCommand {
    /// Set the URL the device pushes events to
    Set {
        /// Receiver URL
        url: String,
    },

    /// Decode a webhook event body (reads stdin when FILE is omitted)
    Parse {
        /// JSON file holding one event envelope
        file: Option<PathBuf>,
    },
}

// ── Valve ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ValveArgs {
    /// Target valve position
    pub action: ValveAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValveAction {
    Open,
    #[value(alias = "closed")]
    Close,
}

impl From<ValveAction> for ValveState {
    fn from(action: ValveAction) -> Self {
        match action {
            ValveAction::Open => Self::Open,
            ValveAction::Close => Self::Closed,
        }
    }
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the configuration file path
    Path,

    /// Print the effective configuration
    Show,

    /// Add or update a device profile
    SetDevice {
        /// Device URL, e.g. http://192.168.1.20
        url: String,

        /// Profile name
        #[arg(long, default_value = "default")]
        name: String,

        /// Per-request timeout in seconds for this profile
        #[arg(long = "profile-timeout")]
        profile_timeout: Option<u64>,

        /// Make this the default profile
        #[arg(long)]
        make_default: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
