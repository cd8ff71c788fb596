//! Utility functions for CLI operations.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Write output to file or stdout
pub fn write_output(output: Option<&PathBuf>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }
        None => {
            print!("{}", content);
            io::stdout().flush()?;
        }
    }
    Ok(())
}

/// Line-oriented output for streaming commands.
///
/// Each write is flushed so `watch` output can be tailed.
pub struct OutputSink {
    writer: Box<dyn Write>,
}

impl OutputSink {
    /// Open `output` for appending, or use stdout.
    pub fn open(output: Option<&PathBuf>) -> Result<Self> {
        let writer: Box<dyn Write> = match output {
            Some(path) => {
                let file = File::options()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("Failed to open {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(io::stdout()),
        };
        Ok(Self { writer })
    }

    pub fn write(&mut self, content: &str) -> Result<()> {
        self.writer.write_all(content.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}
