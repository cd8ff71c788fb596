use std::env;
use std::path::PathBuf;

use anyhow::Result;
use luxon_cli::config::{Config, resolve_sensor, resolve_test_value};
use luxon_cli::sensor::SensorSource;
use luxon_cli::tui::{self, DashboardOptions};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let verbose = args.iter().any(|arg| arg == "-v" || arg == "--verbose");
    let demo = args.iter().any(|arg| arg == "--demo");

    tui::init_logging(verbose)?;

    let config = Config::load();
    let sensor = env::var_os("LUXON_SENSOR")
        .filter(|s| !s.is_empty())
        .map(PathBuf::from);
    let options = DashboardOptions {
        source: SensorSource::new(resolve_sensor(sensor, &config), demo),
        poll_interval: config.poll_interval(),
        test_value: resolve_test_value(None, &config),
        start_in_test: false,
    };

    tui::run(options).await
}
