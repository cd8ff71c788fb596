//! Output formatting utilities for text, JSON, and CSV output.

use anyhow::Result;
use luxon_core::advice::{INFO_BODY, INFO_HEADLINE, INFO_TITLE, RECOMMENDATIONS_TITLE};
use luxon_core::{
    InputMode, LightCategory, LightStatus, LuxSample, Rgb, classify, current_level_line,
    progress, recommendation_lines, recommendations,
};
use owo_colors::OwoColorize;
use serde::Serialize;
use time::OffsetDateTime;

/// Width of the text progress bar in cells.
const BAR_WIDTH: usize = 20;

/// Formatting options for output.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
    /// Omit header row in CSV output.
    pub no_header: bool,
    /// Use compact JSON output (no pretty-printing).
    pub compact: bool,
}

impl FormatOptions {
    pub fn new(no_color: bool) -> Self {
        Self {
            no_color,
            ..Default::default()
        }
    }

    /// Create with no_header option for CSV output.
    pub fn with_no_header(mut self, no_header: bool) -> Self {
        self.no_header = no_header;
        self
    }

    /// Create with compact JSON option.
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Serialize value to JSON string, respecting compact option.
    pub fn as_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        Ok(json + "\n")
    }

    fn paint(&self, text: &str, color: Rgb) -> String {
        if self.no_color {
            text.to_string()
        } else {
            text.truecolor(color.r, color.g, color.b).to_string()
        }
    }
}

/// A classified reading, as written by `read` and `watch`.
#[derive(Debug, Clone, Serialize)]
pub struct ReadingReport {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub lux: f32,
    pub category: LightCategory,
    pub message: &'static str,
    pub description: &'static str,
    pub color: Rgb,
    pub progress: f32,
    pub mode: InputMode,
}

impl ReadingReport {
    pub fn new(sample: LuxSample, mode: InputMode) -> Self {
        let status = classify(sample.lux);
        Self {
            timestamp: sample.captured_at,
            lux: sample.lux,
            category: status.category,
            message: status.message,
            description: status.description,
            color: status.accent_color,
            progress: progress(sample.lux),
            mode,
        }
    }

    /// The reading as displayed: truncated toward zero.
    pub fn whole_lux(&self) -> i32 {
        self.lux as i32
    }

    fn status(&self) -> LightStatus {
        classify(self.lux)
    }
}

/// Format a category tag like `[IDEAL]`, colored by category.
pub fn format_category(category: LightCategory, no_color: bool) -> String {
    let tag = format!("[{}]", category.label().to_uppercase());
    let status = luxon_core::status_for(category);
    FormatOptions::new(no_color).paint(&tag, status.accent_color)
}

/// Render a fraction in `[0, 1]` as a fixed-width bar.
pub fn progress_bar(fraction: f32, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f32).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "???".to_string())
}

fn format_clock(ts: OffsetDateTime) -> String {
    format!("{:02}:{:02}:{:02}", ts.hour(), ts.minute(), ts.second())
}

pub fn format_reading_text(report: &ReadingReport, opts: &FormatOptions) -> String {
    let status = report.status();
    let value = format!("{} lux", report.whole_lux());
    let mut out = format!(
        "{}  {}",
        opts.paint(&value, status.accent_color),
        format_category(report.category, opts.no_color)
    );
    if report.mode.is_test() {
        out.push_str("  (test)");
    }
    out.push('\n');
    out.push_str(&opts.paint(status.message, status.text_color));
    out.push('\n');
    out.push_str(status.description);
    out.push('\n');
    out.push_str(&format!(
        "{} {:>3.0}%\n",
        opts.paint(&progress_bar(report.progress, BAR_WIDTH), status.accent_color),
        report.progress * 100.0
    ));
    out
}

pub fn format_reading_json(report: &ReadingReport, opts: &FormatOptions) -> Result<String> {
    opts.as_json(report)
}

pub fn format_reading_csv(report: &ReadingReport, opts: &FormatOptions) -> String {
    let mut out = String::new();
    if !opts.no_header {
        out.push_str(&format_watch_csv_header());
    }
    out.push_str(&format_watch_csv_line(report));
    out
}

/// One line per reading for `watch`.
pub fn format_watch_line(report: &ReadingReport, opts: &FormatOptions) -> String {
    let status = report.status();
    format!(
        "[{}] {:>5} lux {} {}\n",
        format_clock(report.timestamp),
        report.whole_lux(),
        format_category(report.category, opts.no_color),
        opts.paint(status.message, status.text_color)
    )
}

pub fn format_watch_csv_header() -> String {
    "timestamp,lux,category,progress,mode\n".to_string()
}

pub fn format_watch_csv_line(report: &ReadingReport) -> String {
    format!(
        "{},{:.1},{},{:.3},{}\n",
        format_timestamp(report.timestamp),
        report.lux,
        report.category,
        report.progress,
        report.mode
    )
}

#[derive(Debug, Serialize)]
struct RecommendationReport {
    lux: i32,
    category: LightCategory,
    recommendations: Vec<&'static str>,
}

pub fn format_recommendations_text(lux: f32, opts: &FormatOptions) -> String {
    let status = classify(lux);
    let mut out = String::new();
    if opts.no_color {
        out.push_str(RECOMMENDATIONS_TITLE);
    } else {
        out.push_str(&RECOMMENDATIONS_TITLE.bold().to_string());
    }
    out.push('\n');
    out.push_str(&opts.paint(&current_level_line(lux), status.accent_color));
    out.push_str("\n\n");
    for line in recommendation_lines(lux) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub fn format_recommendations_json(lux: f32, opts: &FormatOptions) -> Result<String> {
    let category = classify(lux).category;
    opts.as_json(&RecommendationReport {
        lux: lux as i32,
        category,
        recommendations: recommendations(category).to_vec(),
    })
}

pub fn format_info_text(opts: &FormatOptions) -> String {
    let (title, headline) = if opts.no_color {
        (INFO_TITLE.to_string(), INFO_HEADLINE.to_string())
    } else {
        (
            INFO_TITLE.bold().to_string(),
            INFO_HEADLINE.bold().to_string(),
        )
    };
    format!("{}\n\n{}\n\n{}\n", title, headline, INFO_BODY)
}
