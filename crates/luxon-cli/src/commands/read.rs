//! Read command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use luxon_core::{InputMode, LightSensor, LuxSample};
use luxon_cli::sensor::SensorSource;
use tracing::debug;

use super::NO_SENSOR_HELP;
use crate::cli::OutputFormat;
use crate::format::{
    FormatOptions, ReadingReport, format_reading_csv, format_reading_json, format_reading_text,
};
use crate::util::write_output;

/// Arguments for the read command.
pub struct ReadArgs<'a> {
    pub source: SensorSource,
    pub lux: Option<f32>,
    pub format: OutputFormat,
    pub output: Option<&'a PathBuf>,
    pub opts: &'a FormatOptions,
}

pub async fn cmd_read(args: ReadArgs<'_>) -> Result<()> {
    let ReadArgs {
        source,
        lux,
        format,
        output,
        opts,
    } = args;

    // A value given on the command line is a simulated reading.
    let report = match lux {
        Some(lux) => ReadingReport::new(LuxSample::now(lux), InputMode::Test),
        None => ReadingReport::new(read_sensor(&source).await?, InputMode::Live),
    };

    let content = match format {
        OutputFormat::Text => format_reading_text(&report, opts),
        OutputFormat::Json => format_reading_json(&report, opts)?,
        OutputFormat::Csv => format_reading_csv(&report, opts),
    };
    write_output(output, &content)
}

/// Take one reading from the selected sensor.
pub async fn read_sensor(source: &SensorSource) -> Result<LuxSample> {
    let sensor = source.open()?;
    match sensor.read_once().await {
        Ok(sample) => {
            debug!(sensor = sensor.name(), lux = sample.lux, "Read light level");
            Ok(sample)
        }
        Err(e) if e.is_sensor_missing() => bail!("{}", NO_SENSOR_HELP),
        Err(e) => {
            Err(e).with_context(|| format!("Failed to read light sensor '{}'", sensor.name()))
        }
    }
}
