//! Linux Industrial I/O (IIO) ambient light sensors.
//!
//! Light sensors on Linux show up as `/sys/bus/iio/devices/iio:deviceN/`.
//! A device either exposes a processed value in lux
//! (`in_illuminance_input`) or a raw count that must be scaled:
//!
//! ```text
//! lux = (in_illuminance_raw + in_illuminance_offset) * in_illuminance_scale
//! ```
//!
//! Offset defaults to 0 and scale to 1 when the attributes are absent.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use luxon_types::{LuxSample, ParseError, ParseResult};

use crate::error::{Error, Result};
use crate::streaming::{SensorSubscription, StreamOptions};
use crate::traits::LightSensor;

/// Where the kernel lists IIO devices.
pub const IIO_DEVICES_DIR: &str = "/sys/bus/iio/devices";

const INPUT_ATTR: &str = "in_illuminance_input";
const RAW_ATTR: &str = "in_illuminance_raw";
const SCALE_ATTR: &str = "in_illuminance_scale";
const OFFSET_ATTR: &str = "in_illuminance_offset";

/// Parse a sysfs numeric attribute.
pub fn parse_value(text: &str) -> ParseResult<f64> {
    let trimmed = text.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ParseError::InvalidNumber(trimmed.to_string()))?;
    if !value.is_finite() {
        return Err(ParseError::NotFinite(value));
    }
    Ok(value)
}

/// How a device reports illuminance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IlluminanceSource {
    /// `in_illuminance_input`, already in lux.
    Processed,
    /// `in_illuminance_raw` with calibration applied.
    Raw { scale: f64, offset: f64 },
}

impl IlluminanceSource {
    fn attribute(&self) -> &'static str {
        match self {
            IlluminanceSource::Processed => INPUT_ATTR,
            IlluminanceSource::Raw { .. } => RAW_ATTR,
        }
    }

    /// Convert an attribute value to lux.
    pub fn to_lux(&self, value: f64) -> f64 {
        match *self {
            IlluminanceSource::Processed => value,
            IlluminanceSource::Raw { scale, offset } => (value + offset) * scale,
        }
    }
}

/// An ambient light sensor exposed through sysfs.
#[derive(Debug, Clone)]
pub struct IioSensor {
    device_dir: PathBuf,
    name: String,
    source: IlluminanceSource,
}

impl IioSensor {
    /// Open the IIO device at `device_dir`.
    ///
    /// Fails with [`Error::SensorNotFound`] if the directory has no
    /// illuminance channel.
    pub fn open(device_dir: impl AsRef<Path>) -> Result<Self> {
        let device_dir = device_dir.as_ref().to_path_buf();

        let source = if device_dir.join(INPUT_ATTR).is_file() {
            IlluminanceSource::Processed
        } else if device_dir.join(RAW_ATTR).is_file() {
            IlluminanceSource::Raw {
                scale: read_optional(&device_dir.join(SCALE_ATTR))?.unwrap_or(1.0),
                offset: read_optional(&device_dir.join(OFFSET_ATTR))?.unwrap_or(0.0),
            }
        } else {
            return Err(Error::SensorNotFound(format!(
                "{} has no illuminance channel",
                device_dir.display()
            )));
        };

        let name = std::fs::read_to_string(device_dir.join("name"))
            .map(|n| n.trim().to_string())
            .ok()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| {
                device_dir
                    .file_name()
                    .map(|f| f.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "iio".to_string())
            });

        info!(name = %name, path = %device_dir.display(), ?source, "Opened light sensor");
        Ok(Self {
            device_dir,
            name,
            source,
        })
    }

    /// Find the first light sensor under [`IIO_DEVICES_DIR`].
    pub fn discover() -> Result<Self> {
        Self::discover_in(IIO_DEVICES_DIR)
    }

    /// Find the first light sensor under `root`, in device-name order.
    pub fn discover_in(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let entries = match std::fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(path = %root.display(), error = %e, "IIO device directory unreadable");
                return Err(Error::SensorNotFound(format!(
                    "{} is not available",
                    root.display()
                )));
            }
        };

        let mut candidates: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().starts_with("iio:device"))
            .map(|entry| entry.path())
            .collect();
        candidates.sort();

        candidates
            .iter()
            .find_map(|dir| Self::open(dir).ok())
            .ok_or_else(|| {
                Error::SensorNotFound(format!("no illuminance channel under {}", root.display()))
            })
    }

    pub fn device_dir(&self) -> &Path {
        &self.device_dir
    }

    pub fn source(&self) -> IlluminanceSource {
        self.source
    }

    /// Read the sensor synchronously.
    pub fn read_lux(&self) -> Result<f32> {
        let path = self.device_dir.join(self.source.attribute());
        let text = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        Ok(self.source.to_lux(parse_value(&text)?) as f32)
    }
}

fn read_optional(path: &Path) -> Result<Option<f64>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(parse_value(&text)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

#[async_trait]
impl LightSensor for IioSensor {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_once(&self) -> Result<LuxSample> {
        let path = self.device_dir.join(self.source.attribute());
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| Error::io(&path, e))?;
        let lux = self.source.to_lux(parse_value(&text)?) as f32;
        debug!(lux, "IIO sample");
        Ok(LuxSample::now(lux))
    }

    async fn subscribe(&self, options: StreamOptions) -> Result<SensorSubscription> {
        options.validate()?;
        let sensor = self.clone();
        Ok(SensorSubscription::polling(options, move || {
            let sensor = sensor.clone();
            async move { sensor.read_once().await }
        }))
    }
}

/// Runs IIO discovery on every registration.
///
/// Used when no device path is configured: a sensor that appears while the
/// session is in test mode is picked up when live mode resumes.
#[derive(Debug, Clone)]
pub struct IioDiscovery {
    root: PathBuf,
}

impl Default for IioDiscovery {
    fn default() -> Self {
        Self::new(IIO_DEVICES_DIR)
    }
}

impl IioDiscovery {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl LightSensor for IioDiscovery {
    fn name(&self) -> &str {
        "iio"
    }

    async fn read_once(&self) -> Result<LuxSample> {
        IioSensor::discover_in(&self.root)?.read_once().await
    }

    async fn subscribe(&self, options: StreamOptions) -> Result<SensorSubscription> {
        let sensor = IioSensor::discover_in(&self.root)?;
        sensor.subscribe(options).await
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn device(root: &Path, name: &str, attrs: &[(&str, &str)]) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        for (attr, value) in attrs {
            fs::write(dir.join(attr), value).unwrap();
        }
        dir
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("312\n"), Ok(312.0));
        assert_eq!(parse_value(" 0.250000 "), Ok(0.25));
        assert_eq!(
            parse_value("abc"),
            Err(ParseError::InvalidNumber("abc".to_string()))
        );
        assert!(matches!(parse_value("inf"), Err(ParseError::NotFinite(_))));
    }

    #[test]
    fn test_open_processed_channel() {
        let tmp = TempDir::new().unwrap();
        let dir = device(
            tmp.path(),
            "iio:device0",
            &[("name", "acpi-als\n"), (INPUT_ATTR, "412\n")],
        );

        let sensor = IioSensor::open(&dir).unwrap();
        assert_eq!(sensor.name(), "acpi-als");
        assert_eq!(sensor.source(), IlluminanceSource::Processed);
        assert_eq!(sensor.read_lux().unwrap(), 412.0);
    }

    #[test]
    fn test_open_raw_channel_with_calibration() {
        let tmp = TempDir::new().unwrap();
        let dir = device(
            tmp.path(),
            "iio:device1",
            &[(RAW_ATTR, "1000\n"), (SCALE_ATTR, "0.5\n"), (OFFSET_ATTR, "20\n")],
        );

        let sensor = IioSensor::open(&dir).unwrap();
        assert_eq!(sensor.read_lux().unwrap(), 510.0);
        // No name attribute: falls back to the directory name.
        assert_eq!(sensor.name(), "iio:device1");
    }

    #[test]
    fn test_raw_channel_defaults() {
        let tmp = TempDir::new().unwrap();
        let dir = device(tmp.path(), "iio:device0", &[(RAW_ATTR, "77")]);

        let sensor = IioSensor::open(&dir).unwrap();
        assert_eq!(
            sensor.source(),
            IlluminanceSource::Raw {
                scale: 1.0,
                offset: 0.0
            }
        );
        assert_eq!(sensor.read_lux().unwrap(), 77.0);
    }

    #[test]
    fn test_open_without_channel_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let dir = device(tmp.path(), "iio:device0", &[("in_accel_x_raw", "1")]);
        assert!(IioSensor::open(&dir).unwrap_err().is_sensor_missing());
    }

    #[test]
    fn test_discover_skips_non_light_devices() {
        let tmp = TempDir::new().unwrap();
        device(tmp.path(), "iio:device0", &[("in_accel_x_raw", "1")]);
        device(tmp.path(), "trigger0", &[(INPUT_ATTR, "5")]);
        device(tmp.path(), "iio:device2", &[(INPUT_ATTR, "250")]);

        let sensor = IioSensor::discover_in(tmp.path()).unwrap();
        assert!(sensor.device_dir().ends_with("iio:device2"));
    }

    #[test]
    fn test_discover_missing_root() {
        let tmp = TempDir::new().unwrap();
        let err = IioSensor::discover_in(tmp.path().join("nope")).unwrap_err();
        assert!(err.is_sensor_missing());
    }

    #[test]
    fn test_read_garbage_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let dir = device(tmp.path(), "iio:device0", &[(INPUT_ATTR, "n/a")]);
        let sensor = IioSensor::open(&dir).unwrap();
        assert!(matches!(sensor.read_lux(), Err(Error::Parse(_))));
    }

    #[tokio::test]
    async fn test_subscription_reads_current_value() {
        let tmp = TempDir::new().unwrap();
        let dir = device(tmp.path(), "iio:device0", &[(INPUT_ATTR, "180")]);
        let sensor = IioSensor::open(&dir).unwrap();

        let mut sub = sensor.subscribe(StreamOptions::default()).await.unwrap();
        let sample = sub.recv().await.unwrap().unwrap();
        assert_eq!(sample.lux, 180.0);
        sub.release();
    }

    #[tokio::test]
    async fn test_discovery_picks_up_late_sensor() {
        let tmp = TempDir::new().unwrap();
        let discovery = IioDiscovery::new(tmp.path());
        let err = discovery
            .subscribe(StreamOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_sensor_missing());

        device(tmp.path(), "iio:device0", &[(INPUT_ATTR, "42")]);
        assert_eq!(discovery.read_once().await.unwrap().lux, 42.0);
        let mut sub = discovery.subscribe(StreamOptions::default()).await.unwrap();
        assert_eq!(sub.recv().await.unwrap().unwrap().lux, 42.0);
    }
}
