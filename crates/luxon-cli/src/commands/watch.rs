//! Watch command implementation.
//!
//! Registers with the sensor once and prints every sample the poller
//! delivers. The registration is released on exit, including Ctrl+C.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use luxon_cli::sensor::SensorSource;
use luxon_core::{InputMode, LightMonitor, LightSensor, SensorStatus, StreamOptions};
use owo_colors::OwoColorize;

use super::NO_SENSOR_HELP;
use crate::cli::OutputFormat;
use crate::format::{
    FormatOptions, ReadingReport, format_reading_json, format_watch_csv_header,
    format_watch_csv_line, format_watch_line,
};
use crate::util::OutputSink;

/// The feed is considered lost after this many failed reads in a row.
const MAX_CONSECUTIVE_FAILURES: u32 = 10;

/// Arguments for the watch command.
pub struct WatchArgs<'a> {
    pub source: SensorSource,
    pub interval: Duration,
    pub count: u32,
    pub format: OutputFormat,
    pub output: Option<&'a PathBuf>,
    pub quiet: bool,
    pub opts: &'a FormatOptions,
}

pub async fn cmd_watch(args: WatchArgs<'_>) -> Result<()> {
    let WatchArgs {
        source,
        interval,
        count,
        format,
        output,
        quiet,
        opts,
    } = args;

    let options = StreamOptions::builder()
        .poll_interval(interval)
        .max_consecutive_failures(MAX_CONSECUTIVE_FAILURES)
        .build();
    let mut monitor = LightMonitor::new(source.open()?, options);
    monitor.start().await.context("Invalid watch options")?;
    if monitor.sensor_status() == SensorStatus::Unavailable {
        bail!("{}", NO_SENSOR_HELP);
    }

    let mut sink = OutputSink::open(output)?;
    if !quiet {
        let name = monitor.sensor().name();
        let header = if opts.no_color {
            format!("Watching: {}", name)
        } else {
            format!("Watching: {}", name.green())
        };
        eprintln!("{}", header);
        if count > 0 {
            eprintln!(
                "Interval: {}ms | Count: {} | Press Ctrl+C to stop",
                interval.as_millis(),
                count
            );
        } else {
            eprintln!("Interval: {}ms | Press Ctrl+C to stop", interval.as_millis());
        }
        eprintln!("{}", "-".repeat(50));
    }

    let json_opts = opts.with_compact(true);
    let mut header_written = opts.no_header;
    let mut readings_taken: u32 = 0;

    while count == 0 || readings_taken < count {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                if !quiet {
                    eprintln!("\nShutting down...");
                }
                break;
            }
            sample = monitor.next_reading() => {
                let Some(sample) = sample else {
                    bail!("Light sensor stopped responding after {} readings", readings_taken);
                };
                readings_taken += 1;
                let report = ReadingReport::new(sample, InputMode::Live);
                let content = match format {
                    OutputFormat::Text => format_watch_line(&report, opts),
                    OutputFormat::Json => format_reading_json(&report, &json_opts)?,
                    OutputFormat::Csv => {
                        let mut out = String::new();
                        if !header_written {
                            out.push_str(&format_watch_csv_header());
                            header_written = true;
                        }
                        out.push_str(&format_watch_csv_line(&report));
                        out
                    }
                };
                sink.write(&content)?;
            }
        }
    }

    monitor.shutdown();
    if count > 0 && readings_taken >= count && !quiet {
        eprintln!("Completed {} readings.", readings_taken);
    }
    Ok(())
}
