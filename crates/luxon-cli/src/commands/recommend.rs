//! Recommend command implementation.

use std::path::PathBuf;

use anyhow::{Result, bail};
use luxon_cli::sensor::SensorSource;

use super::read_sensor;
use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_recommendations_json, format_recommendations_text};
use crate::util::write_output;

/// Arguments for the recommend command.
pub struct RecommendArgs<'a> {
    pub source: SensorSource,
    pub lux: Option<f32>,
    pub format: OutputFormat,
    pub output: Option<&'a PathBuf>,
    pub opts: &'a FormatOptions,
}

pub async fn cmd_recommend(args: RecommendArgs<'_>) -> Result<()> {
    let RecommendArgs {
        source,
        lux,
        format,
        output,
        opts,
    } = args;

    if format == OutputFormat::Csv {
        bail!("CSV output is not available for recommendations. Use --format text or json.");
    }

    let lux = match lux {
        Some(lux) => lux,
        None => read_sensor(&source).await?.lux,
    };

    let content = match format {
        OutputFormat::Json => format_recommendations_json(lux, opts)?,
        _ => format_recommendations_text(lux, opts),
    };
    write_output(output, &content)
}
