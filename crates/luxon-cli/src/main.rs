mod cli;
mod commands;
mod format;
mod util;

use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, OutputFormat, SensorArgs};
use commands::{ReadArgs, RecommendArgs, WatchArgs};
use format::FormatOptions;
use luxon_cli::config::{Config, resolve_poll_interval, resolve_sensor};
use luxon_cli::sensor::SensorSource;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "luxon", &mut io::stdout());
        return Ok(());
    }

    let config = Config::load();

    #[cfg(feature = "tui")]
    if let Commands::Dashboard { sensor, test } = cli.command {
        // The dashboard owns the terminal; logs go to a file instead.
        luxon_cli::tui::init_logging(cli.verbose)?;
        let options = luxon_cli::tui::DashboardOptions {
            source: sensor_source(sensor, &config),
            poll_interval: config.poll_interval(),
            test_value: luxon_cli::config::resolve_test_value(test, &config),
            start_in_test: test.is_some(),
        };
        return luxon_cli::tui::run(options).await;
    }

    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let no_color = cli.no_color || config.no_color;
    let opts = FormatOptions::new(no_color);
    let output = cli.output.as_ref();

    match cli.command {
        Commands::Read {
            sensor,
            lux,
            format,
        } => {
            commands::cmd_read(ReadArgs {
                source: sensor_source(sensor, &config),
                lux,
                format: OutputFormat::resolve(format, &config),
                output,
                opts: &opts,
            })
            .await
        }
        Commands::Watch {
            sensor,
            interval,
            count,
            format,
            no_header,
        } => {
            let opts = opts.with_no_header(no_header);
            commands::cmd_watch(WatchArgs {
                source: sensor_source(sensor, &config),
                interval: resolve_poll_interval(interval, &config),
                count,
                format: OutputFormat::resolve(format, &config),
                output,
                quiet: cli.quiet,
                opts: &opts,
            })
            .await
        }
        Commands::Recommend {
            sensor,
            lux,
            format,
        } => {
            commands::cmd_recommend(RecommendArgs {
                source: sensor_source(sensor, &config),
                lux,
                format: OutputFormat::resolve(format, &config),
                output,
                opts: &opts,
            })
            .await
        }
        Commands::Info => commands::cmd_info(output, &opts),
        Commands::Config { action } => commands::cmd_config(action, cli.quiet),
        #[cfg(feature = "tui")]
        Commands::Dashboard { .. } => unreachable!("dashboard is handled before logging setup"),
        Commands::Completions { .. } => unreachable!("completions are handled before config load"),
    }
}

fn sensor_source(args: SensorArgs, config: &Config) -> SensorSource {
    SensorSource::new(resolve_sensor(args.sensor, config), args.demo)
}
