//! Sensor subscriptions.
//!
//! Registering for sensor samples hands back a [`SensorSubscription`]. The
//! handle owns the registration: [`SensorSubscription::release`] stops the
//! feed, can be called any number of times, and runs automatically on drop,
//! so every exit path unregisters.
//!
//! Polling sensors use [`SensorSubscription::polling`], which spawns a
//! background task reading the sensor at [`StreamOptions::poll_interval`]
//! until the subscription is released.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::stream::Stream;
use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use luxon_types::LuxSample;

use crate::error::{Error, Result};

/// Result type for subscription items.
pub type SampleResult = std::result::Result<LuxSample, Error>;

/// Options for sensor subscriptions.
///
/// ```
/// use std::time::Duration;
/// use luxon_core::StreamOptions;
///
/// let options = StreamOptions::builder()
///     .poll_interval(Duration::from_millis(500))
///     .max_consecutive_failures(5)
///     .build();
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct StreamOptions {
    /// Polling interval for sensors without push notifications.
    /// Default: 200 ms.
    pub poll_interval: Duration,
    /// Buffer size for the sample channel.
    /// Default: 16 samples.
    pub buffer_size: usize,
    /// Whether failed reads are delivered as `Err` items.
    ///
    /// When `false` (default), read errors are logged and skipped.
    pub include_errors: bool,
    /// Stop polling after this many consecutive read failures.
    /// `None` (default) keeps polling indefinitely.
    pub max_consecutive_failures: Option<u32>,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(200),
            buffer_size: 16,
            include_errors: false,
            max_consecutive_failures: None,
        }
    }
}

impl StreamOptions {
    /// Create a new builder for StreamOptions.
    pub fn builder() -> StreamOptionsBuilder {
        StreamOptionsBuilder::default()
    }

    /// Create options with a specific poll interval.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            poll_interval: interval,
            ..Default::default()
        }
    }

    /// Validate the options and return an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            return Err(Error::InvalidConfig("buffer_size must be > 0".to_string()));
        }
        if self.poll_interval.is_zero() {
            return Err(Error::InvalidConfig(
                "poll_interval must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for StreamOptions.
#[derive(Debug, Clone, Default)]
pub struct StreamOptionsBuilder {
    options: StreamOptions,
}

impl StreamOptionsBuilder {
    /// Set the polling interval.
    #[must_use]
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.options.poll_interval = interval;
        self
    }

    /// Set the buffer size.
    #[must_use]
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.options.buffer_size = size;
        self
    }

    /// Set whether to include errors in the stream.
    #[must_use]
    pub fn include_errors(mut self, include: bool) -> Self {
        self.options.include_errors = include;
        self
    }

    /// Set the maximum consecutive failures before the poller stops.
    #[must_use]
    pub fn max_consecutive_failures(mut self, max: u32) -> Self {
        self.options.max_consecutive_failures = Some(max);
        self
    }

    /// Build the StreamOptions.
    #[must_use]
    pub fn build(self) -> StreamOptions {
        self.options
    }
}

/// A registration for sensor samples.
///
/// Samples arrive through [`recv`](Self::recv), [`try_recv`](Self::try_recv)
/// or the [`Stream`] implementation. The stream ends when the sensor stops
/// delivering (for example after too many failures) or after release.
#[derive(Debug)]
pub struct SensorSubscription {
    receiver: mpsc::Receiver<SampleResult>,
    cancel_token: CancellationToken,
    released: bool,
}

impl SensorSubscription {
    /// Wrap a channel fed by a push-based sensor.
    ///
    /// The sensor should stop sending once `cancel_token` is cancelled or the
    /// channel is closed.
    pub fn new(receiver: mpsc::Receiver<SampleResult>, cancel_token: CancellationToken) -> Self {
        Self {
            receiver,
            cancel_token,
            released: false,
        }
    }

    /// Spawn a task that calls `read` every poll interval.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn polling<F, Fut>(options: StreamOptions, mut read: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<LuxSample>> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(options.buffer_size);
        let cancel_token = CancellationToken::new();
        let task_token = cancel_token.clone();

        tokio::spawn(async move {
            let mut ticker = interval(options.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut consecutive_failures: u32 = 0;

            loop {
                tokio::select! {
                    _ = task_token.cancelled() => {
                        debug!("Subscription released, stopping poller");
                        break;
                    }
                    _ = ticker.tick() => {
                        match read().await {
                            Ok(sample) => {
                                consecutive_failures = 0;
                                if tx.send(Ok(sample)).await.is_err() {
                                    debug!("Subscriber gone, stopping poller");
                                    break;
                                }
                            }
                            Err(e) => {
                                consecutive_failures += 1;
                                if consecutive_failures == 1 {
                                    warn!(error = %e, "Sensor read failed");
                                } else {
                                    debug!(error = %e, consecutive_failures, "Sensor read failed again");
                                }
                                if options.include_errors && tx.send(Err(e)).await.is_err() {
                                    break;
                                }
                                if let Some(max) = options.max_consecutive_failures
                                    && consecutive_failures >= max
                                {
                                    warn!(max, "Too many consecutive sensor failures, stopping poller");
                                    break;
                                }
                            }
                        }
                    }
                }
            }
        });

        Self::new(rx, cancel_token)
    }

    /// Wait for the next sample. Returns `None` once the feed has ended.
    pub async fn recv(&mut self) -> Option<SampleResult> {
        self.receiver.recv().await
    }

    /// Take a buffered sample without waiting.
    pub fn try_recv(&mut self) -> Option<SampleResult> {
        self.receiver.try_recv().ok()
    }

    /// Stop receiving samples. Safe to call repeatedly.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.cancel_token.cancel();
        self.receiver.close();
        debug!("Sensor subscription released");
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Token cancelled on release, for sensors that push samples.
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }
}

impl Stream for SensorSubscription {
    type Item = SampleResult;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

impl Drop for SensorSubscription {
    fn drop(&mut self) {
        self.release();
    }
}
