//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use luxon_cli::config::Config;

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    /// Resolve format: explicit flag overrides config, then text.
    pub fn resolve(explicit: Option<OutputFormat>, config: &Config) -> OutputFormat {
        explicit
            .or_else(|| {
                config
                    .format
                    .as_deref()
                    .and_then(|f| OutputFormat::from_str(f, true).ok())
            })
            .unwrap_or_default()
    }
}

/// Reusable sensor selection arguments
#[derive(Debug, Clone, Args)]
pub struct SensorArgs {
    /// IIO device directory, or use LUXON_SENSOR env var (auto-discovered if omitted)
    #[arg(short, long, env = "LUXON_SENSOR")]
    pub sensor: Option<PathBuf>,

    /// Use the simulated sensor instead of hardware
    #[arg(long)]
    pub demo: bool,
}

#[derive(Parser)]
#[command(name = "luxon")]
#[command(author, version, about = "Ambient light assistant for your workspace", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Write output to file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read and classify the current light level
    Read {
        #[command(flatten)]
        sensor: SensorArgs,

        /// Classify this lux value instead of reading the sensor
        #[arg(short, long, allow_negative_numbers = true)]
        lux: Option<f32>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Continuously monitor the light level
    Watch {
        #[command(flatten)]
        sensor: SensorArgs,

        /// Poll interval in milliseconds (defaults to config, then 200)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Number of readings to take before exiting (0 for unlimited)
        #[arg(short = 'n', long, default_value = "0")]
        count: u32,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Omit header row in CSV output (useful for appending)
        #[arg(long)]
        no_header: bool,
    },

    /// Show recommendations for the current light level
    Recommend {
        #[command(flatten)]
        sensor: SensorArgs,

        /// Give recommendations for this lux value instead of reading the sensor
        #[arg(short, long, allow_negative_numbers = true)]
        lux: Option<f32>,

        /// Output format (text, json)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// About Luxon and the recommended light levels
    Info,

    /// Launch the interactive terminal dashboard
    #[cfg(feature = "tui")]
    Dashboard {
        #[command(flatten)]
        sensor: SensorArgs,

        /// Start in test mode at this lux value
        #[arg(short, long)]
        test: Option<f32>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Configuration subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Show configuration file path
    Path,
    /// Initialize default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
