//! Background worker for sensor operations.
//!
//! The [`MonitorWorker`] owns the [`LightMonitor`] and with it the sensor
//! registration. It communicates with the UI thread via channels:
//!
//! - Receives [`Command`]s from the UI to switch modes or move the slider
//! - Sends [`MonitorUpdate`]s back for every change the monitor reports
//!
//! # Architecture
//!
//! The worker runs in a separate Tokio task and uses `tokio::select!` to handle:
//! - Incoming commands from the UI
//! - Monitor events, translated into updates
//! - Sensor samples while live

use luxon_core::{Command, LightEvent, LightMonitor, LightSensor, MonitorUpdate};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};

/// Background worker that drives a light monitor.
pub struct MonitorWorker<S: LightSensor> {
    monitor: LightMonitor<S>,
    /// Receiver for commands from the UI thread.
    command_rx: mpsc::Receiver<Command>,
    /// Sender for updates back to the UI thread.
    update_tx: mpsc::Sender<MonitorUpdate>,
}

impl<S: LightSensor> MonitorWorker<S> {
    pub fn new(
        monitor: LightMonitor<S>,
        command_rx: mpsc::Receiver<Command>,
        update_tx: mpsc::Sender<MonitorUpdate>,
    ) -> Self {
        Self {
            monitor,
            command_rx,
            update_tx,
        }
    }

    /// Run the worker's main loop.
    ///
    /// This method consumes the worker and runs until a [`Command::Shutdown`]
    /// is received or the command channel is closed. The sensor is released
    /// before [`MonitorUpdate::Stopped`] is sent.
    pub async fn run(mut self) {
        info!(sensor = self.monitor.sensor().name(), "MonitorWorker started");

        let mut events = self.monitor.events();
        if let Err(e) = self.monitor.start().await {
            error!(error = %e, "Failed to start light monitor");
        }
        self.send(MonitorUpdate::Reading {
            lux: self.monitor.reading(),
            mode: self.monitor.mode(),
        })
        .await;

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(Command::Shutdown) => {
                            info!("MonitorWorker received shutdown command");
                            break;
                        }
                        Some(cmd) => self.handle_command(cmd).await,
                        None => {
                            info!("Command channel closed, shutting down worker");
                            break;
                        }
                    }
                }
                event = events.recv() => {
                    match event {
                        Ok(event) => {
                            if let Some(update) = self.translate(event) {
                                self.send(update).await;
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!(skipped, "UI fell behind monitor events");
                            self.send(MonitorUpdate::Reading {
                                lux: self.monitor.reading(),
                                mode: self.monitor.mode(),
                            })
                            .await;
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
                reading = self.monitor.next_reading() => {
                    if reading.is_none() {
                        debug!("Sensor feed ended");
                    }
                }
            }
        }

        self.monitor.shutdown();
        let _ = self.update_tx.send(MonitorUpdate::Stopped).await;
        info!("MonitorWorker stopped");
    }

    async fn handle_command(&mut self, cmd: Command) {
        debug!(?cmd, "Handling command");
        match cmd {
            Command::EnterTest { test_value } => self.monitor.enter_test(test_value),
            Command::ExitTest => self.monitor.exit_test().await,
            Command::SetTestValue { value } => {
                if !self.monitor.set_test_value(value) {
                    debug!(value, "Test value ignored outside test mode");
                }
            }
            Command::Shutdown => {
                // Handled in run() loop
            }
        }
    }

    fn translate(&self, event: LightEvent) -> Option<MonitorUpdate> {
        match event {
            LightEvent::Reading { lux, mode, .. } => Some(MonitorUpdate::Reading { lux, mode }),
            LightEvent::ModeChanged { mode, test_value } => {
                Some(MonitorUpdate::ModeChanged { mode, test_value })
            }
            LightEvent::SensorStatus { status } => Some(MonitorUpdate::SensorStatus {
                status,
                sensor: self.monitor.sensor().name().to_string(),
            }),
            _ => None,
        }
    }

    async fn send(&self, update: MonitorUpdate) {
        if self.update_tx.send(update).await.is_err() {
            debug!("UI channel closed, dropping update");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use luxon_core::{
        InputMode, MockSensor, SensorStatus, StreamOptions, UNAVAILABLE_AFTER_FAILURES,
    };
    use tokio::task::JoinHandle;

    use super::*;

    struct Harness {
        sensor: Arc<MockSensor>,
        cmd_tx: mpsc::Sender<Command>,
        update_rx: mpsc::Receiver<MonitorUpdate>,
        handle: JoinHandle<()>,
    }

    fn spawn(sensor: MockSensor) -> Harness {
        let sensor = Arc::new(sensor);
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let (update_tx, update_rx) = mpsc::channel(64);
        let monitor = LightMonitor::new(Arc::clone(&sensor), StreamOptions::default());
        let handle = tokio::spawn(MonitorWorker::new(monitor, cmd_rx, update_tx).run());
        Harness {
            sensor,
            cmd_tx,
            update_rx,
            handle,
        }
    }

    /// Receive updates until one matches, failing after a second.
    async fn wait_for(
        rx: &mut mpsc::Receiver<MonitorUpdate>,
        pred: impl Fn(&MonitorUpdate) -> bool,
    ) -> MonitorUpdate {
        tokio::time::timeout(Duration::from_secs(1), async {
            loop {
                let update = rx.recv().await.expect("worker hung up");
                if pred(&update) {
                    return update;
                }
            }
        })
        .await
        .expect("timed out waiting for update")
    }

    #[tokio::test]
    async fn test_forwards_live_readings() {
        let mut h = spawn(MockSensor::new("desk"));
        let update = wait_for(&mut h.update_rx, |u| {
            matches!(u, MonitorUpdate::SensorStatus { .. })
        })
        .await;
        assert_eq!(
            update,
            MonitorUpdate::SensorStatus {
                status: SensorStatus::Available,
                sensor: "desk".to_string(),
            }
        );

        h.sensor.push(712.0);
        let update = wait_for(&mut h.update_rx, |u| {
            matches!(u, MonitorUpdate::Reading { lux, .. } if *lux == 712.0)
        })
        .await;
        assert_eq!(
            update,
            MonitorUpdate::Reading {
                lux: 712.0,
                mode: InputMode::Live,
            }
        );

        h.cmd_tx.send(Command::Shutdown).await.unwrap();
        h.handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_test_mode_releases_sensor() {
        let mut h = spawn(MockSensor::new("desk"));
        wait_for(&mut h.update_rx, |u| {
            matches!(u, MonitorUpdate::SensorStatus { .. })
        })
        .await;
        assert_eq!(h.sensor.active_subscriptions(), 1);

        h.cmd_tx
            .send(Command::EnterTest { test_value: 300.0 })
            .await
            .unwrap();
        let update = wait_for(&mut h.update_rx, |u| {
            matches!(u, MonitorUpdate::ModeChanged { .. })
        })
        .await;
        assert_eq!(
            update,
            MonitorUpdate::ModeChanged {
                mode: InputMode::Test,
                test_value: 300.0,
            }
        );
        assert_eq!(h.sensor.active_subscriptions(), 0);

        h.cmd_tx
            .send(Command::SetTestValue { value: 100.0 })
            .await
            .unwrap();
        wait_for(&mut h.update_rx, |u| {
            *u == MonitorUpdate::Reading {
                lux: 100.0,
                mode: InputMode::Test,
            }
        })
        .await;

        h.cmd_tx.send(Command::ExitTest).await.unwrap();
        wait_for(&mut h.update_rx, |u| {
            matches!(u, MonitorUpdate::SensorStatus { status: SensorStatus::Available, .. })
        })
        .await;
        assert_eq!(h.sensor.active_subscriptions(), 1);

        h.cmd_tx.send(Command::Shutdown).await.unwrap();
        h.handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_sensor_reported() {
        let mut h = spawn(MockSensor::unavailable("iio"));
        let update = wait_for(&mut h.update_rx, |u| {
            matches!(u, MonitorUpdate::SensorStatus { .. })
        })
        .await;
        assert_eq!(
            update,
            MonitorUpdate::SensorStatus {
                status: SensorStatus::Unavailable,
                sensor: "iio".to_string(),
            }
        );

        drop(h.cmd_tx);
        h.handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_failing_sensor_reported_unavailable() {
        let mut h = spawn(MockSensor::new("desk"));
        wait_for(&mut h.update_rx, |u| {
            matches!(u, MonitorUpdate::SensorStatus { status: SensorStatus::Available, .. })
        })
        .await;

        for _ in 0..UNAVAILABLE_AFTER_FAILURES {
            h.sensor.push_failure("read timed out");
        }
        let update = wait_for(&mut h.update_rx, |u| {
            matches!(u, MonitorUpdate::SensorStatus { .. })
        })
        .await;
        assert_eq!(
            update,
            MonitorUpdate::SensorStatus {
                status: SensorStatus::Unavailable,
                sensor: "desk".to_string(),
            }
        );

        h.sensor.push(410.0);
        wait_for(&mut h.update_rx, |u| {
            matches!(u, MonitorUpdate::SensorStatus { status: SensorStatus::Available, .. })
        })
        .await;

        h.cmd_tx.send(Command::Shutdown).await.unwrap();
        h.handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_closed_command_channel_stops_worker() {
        let mut h = spawn(MockSensor::new("desk"));
        wait_for(&mut h.update_rx, |u| {
            matches!(u, MonitorUpdate::SensorStatus { .. })
        })
        .await;
        assert_eq!(h.sensor.active_subscriptions(), 1);

        drop(h.cmd_tx);
        wait_for(&mut h.update_rx, |u| *u == MonitorUpdate::Stopped).await;
        h.handle.await.unwrap();
        assert_eq!(h.sensor.active_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_shutdown_releases_and_reports_stopped() {
        let mut h = spawn(MockSensor::new("desk"));
        wait_for(&mut h.update_rx, |u| {
            matches!(u, MonitorUpdate::SensorStatus { .. })
        })
        .await;

        h.cmd_tx.send(Command::Shutdown).await.unwrap();
        wait_for(&mut h.update_rx, |u| *u == MonitorUpdate::Stopped).await;
        h.handle.await.unwrap();
        assert_eq!(h.sensor.active_subscriptions(), 0);
    }
}
