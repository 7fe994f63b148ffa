//! Telemetry source abstraction.
//!
//! The supervisor never acquires telemetry itself; it samples whatever
//! source it was given, once per tick.

use std::fmt::Debug;

use tokio::sync::watch;

use huntwatch_types::TelemetrySnapshot;

/// Produces the per-tick telemetry snapshot.
///
/// `sample` must be non-blocking and must return the *latest* view every
/// time it is called: an unchanged snapshot is still a valid tick, because
/// a flat sample carries information (it resets the reversal reference
/// sign). `None` means telemetry is not available this tick - a normal
/// transient condition, not an error.
pub trait TelemetrySource: Send + Debug {
    /// The latest snapshot, or `None` if telemetry is unavailable.
    fn sample(&mut self) -> Option<TelemetrySnapshot>;

    /// Human-readable description of the source, for logs.
    fn description(&self) -> &str;
}

/// Telemetry fed through a tokio watch channel.
///
/// The host pushes snapshots from wherever it acquires telemetry; the
/// supervisor samples the most recent one on its own cadence. Until the
/// first push the source reports unavailable.
#[derive(Debug)]
pub struct WatchSource {
    receiver: watch::Receiver<Option<TelemetrySnapshot>>,
    description: String,
}

impl WatchSource {
    pub fn new(receiver: watch::Receiver<Option<TelemetrySnapshot>>, description: &str) -> Self {
        Self {
            receiver,
            description: format!("watch: {description}"),
        }
    }

    /// Create a sender/source pair.
    ///
    /// The sender side belongs to the host; pushing `None` signals a
    /// telemetry outage without tearing the channel down.
    pub fn create(description: &str) -> (watch::Sender<Option<TelemetrySnapshot>>, Self) {
        let (tx, rx) = watch::channel(None);
        let source = Self::new(rx, description);
        (tx, source)
    }
}

impl TelemetrySource for WatchSource {
    fn sample(&mut self) -> Option<TelemetrySnapshot> {
        self.receiver.borrow_and_update().clone()
    }

    fn description(&self) -> &str {
        &self.description
    }
}
