//! Background runner: owns the supervisor and ticks it on a fixed cadence
//! until told to stop.

use std::time::Instant;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use huntwatch_types::MonitorEvent;

use crate::supervisor::{Supervisor, TickOutcome};

/// Drives a [`Supervisor`] from a tokio interval.
///
/// Build one with [`Monitor::builder`], then call [`start`](Monitor::start)
/// to spawn the loop. Every tick outcome is logged; transition events can
/// additionally be forwarded over an mpsc channel.
#[derive(Debug)]
pub struct Monitor {
    supervisor: Supervisor,
    interval: std::time::Duration,
    events: Option<mpsc::Sender<MonitorEvent>>,
}

impl Monitor {
    pub fn builder(supervisor: Supervisor) -> MonitorBuilder {
        MonitorBuilder {
            interval: supervisor.config().tick_period(),
            supervisor,
            events: None,
        }
    }

    /// Spawn the tick loop on the current runtime.
    pub fn start(mut self) -> MonitorHandle {
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            // A stalled runtime should not be followed by a burst of
            // catch-up ticks; reversal timing only makes sense against
            // real elapsed time.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        self.run_tick();
                    }
                    _ = stop_rx.changed() => {
                        if *stop_rx.borrow() {
                            tracing::debug!("monitor stopping");
                            break;
                        }
                    }
                }
            }
        });

        MonitorHandle { stop_tx, task }
    }

    fn run_tick(&mut self) {
        let report = self.supervisor.tick(Instant::now());

        match &report.outcome {
            TickOutcome::Completed => {}
            TickOutcome::Skipped(reason) => {
                tracing::trace!(?reason, "tick skipped");
            }
            TickOutcome::Failed(message) => {
                tracing::warn!(%message, "tick failed");
            }
        }

        if let Some(events) = &self.events {
            for event in report.events {
                // Best effort: a slow consumer drops events, never stalls
                // the tick loop.
                if let Err(err) = events.try_send(event) {
                    tracing::debug!(error = %err, "event channel full, dropping");
                }
            }
        }
    }
}

/// Builder for a [`Monitor`].
#[derive(Debug)]
pub struct MonitorBuilder {
    supervisor: Supervisor,
    interval: std::time::Duration,
    events: Option<mpsc::Sender<MonitorEvent>>,
}

impl MonitorBuilder {
    /// Override the tick interval. Defaults to the supervisor
    /// configuration's tick period.
    pub fn interval(mut self, interval: std::time::Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Forward transition events to this channel, best effort.
    pub fn events(mut self, sender: mpsc::Sender<MonitorEvent>) -> Self {
        self.events = Some(sender);
        self
    }

    pub fn build(self) -> Monitor {
        Monitor {
            supervisor: self.supervisor,
            interval: self.interval,
            events: self.events,
        }
    }
}

/// Handle to a running monitor task.
#[derive(Debug)]
pub struct MonitorHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl MonitorHandle {
    /// Ask the loop to stop after its current tick.
    pub fn stop(&self) {
        let _ = self.stop_tx.send(true);
    }

    /// Wait for the loop to exit.
    pub async fn stopped(self) {
        let _ = self.task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MonitorConfig;
    use crate::sink::SharedGains;
    use crate::source::WatchSource;
    use huntwatch_types::{Gains, TelemetrySnapshot};

    fn snapshot(signal: f64) -> TelemetrySnapshot {
        let mut snap = TelemetrySnapshot {
            autopilot_engaged: true,
            airspeed: 150.0,
            aircraft: Some("c172".into()),
            ..Default::default()
        };
        snap.signals.insert("pitch".to_string(), signal);
        snap
    }

    #[tokio::test(start_paused = true)]
    async fn detects_oscillation_and_emits_event() {
        let (telemetry, source) = WatchSource::create("test");
        let pid = SharedGains::new(Gains::new(2.0, 0.2, 0.02));

        let mut supervisor = Supervisor::new(MonitorConfig::default(), Box::new(source));
        supervisor
            .attach_axis("pitch", Box::new(pid.clone()))
            .unwrap();

        let (event_tx, mut event_rx) = mpsc::channel(16);
        let handle = Monitor::builder(supervisor).events(event_tx).build().start();

        // Sustained alternating swings past the 100-unit threshold, one
        // per tick period under paused time. Enough periods that the loop
        // observes at least two qualifying reversals regardless of how
        // sends interleave with ticks.
        let mut signal = 150.0;
        for _ in 0..20 {
            telemetry.send(Some(snapshot(signal))).unwrap();
            signal = -signal;
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }

        let event = event_rx.recv().await.unwrap();
        assert!(matches!(
            event,
            MonitorEvent::OscillationDetected { ref axis, .. } if axis == "pitch"
        ));
        assert_eq!(pid.read(), Some(Gains::new(0.001, 0.001, 0.001)));

        handle.stop();
        handle.stopped().await;
    }

    #[tokio::test(start_paused = true)]
    async fn stop_terminates_the_loop() {
        let (_telemetry, source) = WatchSource::create("test");
        let supervisor = Supervisor::new(MonitorConfig::default(), Box::new(source));

        let handle = Monitor::builder(supervisor).build().start();
        tokio::time::sleep(std::time::Duration::from_millis(250)).await;

        handle.stop();
        handle.stopped().await;
    }
}
