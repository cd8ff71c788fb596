//! Command-line interface and terminal dashboard for Luxon.
//!
//! Luxon reads the host's ambient light sensor and classifies the level as
//! too dark, ideal, or too bright for desk work.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `read` | One classified reading |
//! | `watch` | Stream classified readings |
//! | `recommend` | Recommendations for the current level |
//! | `info` | About Luxon and the ideal light levels |
//! | `dashboard` | Interactive terminal dashboard |
//! | `config` | Manage CLI configuration |
//! | `completions` | Generate shell completions |
//!
//! # Configuration
//!
//! The CLI stores configuration in `~/.config/luxon/config.toml` (or platform equivalent):
//!
//! - `sensor`: IIO device directory (auto-discovered when unset)
//! - `poll_interval_ms`: Sensor poll interval
//! - `test_value`: Initial test-mode value
//! - `format`: Default output format
//! - `no_color`: Disable colored output
//!
//! # Environment Variables
//!
//! - `LUXON_SENSOR`: Sensor device directory (overridden by `--sensor`)
//! - `NO_COLOR`: Disable colored output when set
//!
//! # Examples
//!
//! ```bash
//! luxon read
//! luxon read --lux 120 --format json
//! luxon watch --demo -n 10 --format csv --output light.csv
//! luxon dashboard --demo
//! ```

pub use luxon_core;
pub use luxon_types;

pub mod config;
pub mod sensor;

// TUI module - publicly exposed for the luxon-tui crate to use
#[cfg(feature = "tui")]
pub mod tui;
