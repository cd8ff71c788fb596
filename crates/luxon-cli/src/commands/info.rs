//! Info command implementation.

use std::path::PathBuf;

use anyhow::Result;

use crate::format::{FormatOptions, format_info_text};
use crate::util::write_output;

pub fn cmd_info(output: Option<&PathBuf>, opts: &FormatOptions) -> Result<()> {
    write_output(output, &format_info_text(opts))
}
