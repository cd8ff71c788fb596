//! Command implementations for the CLI.

mod config;
mod info;
mod read;
mod recommend;
mod watch;

pub use config::cmd_config;
pub use info::cmd_info;
pub use read::{ReadArgs, cmd_read, read_sensor};
pub use recommend::{RecommendArgs, cmd_recommend};
pub use watch::{WatchArgs, cmd_watch};

/// Shown when no light sensor could be opened.
const NO_SENSOR_HELP: &str = "No ambient light sensor found.\n\
     Pass --sensor <DIR> (an IIO device such as /sys/bus/iio/devices/iio:device0),\n\
     use --demo for simulated readings, or --lux <VALUE> to classify a value.";
