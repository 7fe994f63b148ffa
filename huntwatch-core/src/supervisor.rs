//! The supervisor: one detector/damping pair per axis, driven from a
//! shared telemetry snapshot each tick.

use std::collections::BTreeMap;
use std::time::Instant;

use huntwatch_types::{AircraftId, Gains, MonitorEvent, TelemetrySnapshot};

use crate::config::MonitorConfig;
use crate::damping::{DampingController, GainSink};
use crate::detector::SignFlipDetector;
use crate::error::MonitorError;
use crate::source::TelemetrySource;
use crate::state::AxisState;

/// Why a tick performed no axis work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The telemetry source produced no snapshot.
    TelemetryUnavailable,
    /// The host's flight recorder is replaying; state is frozen, not
    /// reset, so detection resumes with pre-replay history intact.
    ReplayActive,
    /// At least one axis controller is not present.
    ControllerUnavailable,
}

/// Outcome of one supervisor tick.
///
/// Unavailable dependencies and execution faults are ordinary outcomes,
/// not thrown control flow: the loop always proceeds to the next tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Every axis was updated.
    Completed,
    /// The tick was a no-op; no axis state was mutated.
    Skipped(SkipReason),
    /// A fault interrupted axis updates. Gains are wherever the last
    /// successful write left them and the next tick retries normally.
    Failed(String),
}

/// Everything one tick produced.
#[derive(Debug)]
pub struct TickReport {
    pub outcome: TickOutcome,
    pub events: Vec<MonitorEvent>,
}

#[derive(Debug)]
struct AxisRuntime {
    detector: SignFlipDetector,
    controller: DampingController,
    state: AxisState,
    sink: Box<dyn GainSink>,
}

/// Supervisory monitor over all configured axes.
///
/// Owns every piece of mutable per-axis state and is the sole writer of
/// gain overrides; the host must not mutate gains concurrently. Driven by
/// exactly one caller (usually a [`Monitor`](crate::Monitor) task), one
/// synchronous `tick` at a time.
#[derive(Debug)]
pub struct Supervisor {
    config: MonitorConfig,
    source: Box<dyn TelemetrySource>,
    axes: BTreeMap<String, AxisRuntime>,
    /// Outer `None`: no identity observed yet. The first observation is
    /// recorded silently; only a subsequent change resets state.
    last_aircraft: Option<Option<AircraftId>>,
}

impl Supervisor {
    pub fn new(config: MonitorConfig, source: Box<dyn TelemetrySource>) -> Self {
        tracing::debug!(source = source.description(), "supervisor created");
        Self {
            config,
            source,
            axes: BTreeMap::new(),
            last_aircraft: None,
        }
    }

    /// Attach the gain sink for a configured axis, creating its runtime.
    ///
    /// Axes present in the configuration but never attached are simply
    /// not monitored.
    pub fn attach_axis(&mut self, axis: &str, sink: Box<dyn GainSink>) -> Result<(), MonitorError> {
        let axis_config = self
            .config
            .axes
            .get(axis)
            .ok_or_else(|| MonitorError::UnknownAxis {
                axis: axis.to_string(),
            })?;
        if self.axes.contains_key(axis) {
            return Err(MonitorError::AxisAlreadyAttached {
                axis: axis.to_string(),
            });
        }

        self.axes.insert(
            axis.to_string(),
            AxisRuntime {
                detector: SignFlipDetector::new(axis_config.flip_threshold, axis_config.flip_window()),
                controller: DampingController::new(
                    axis,
                    axis_config.damped_gains,
                    axis_config.release_margin,
                    self.config.trigger_count,
                ),
                state: AxisState::default(),
                sink,
            },
        );
        Ok(())
    }

    /// The configuration this supervisor was built with.
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Names of the axes currently monitored.
    pub fn monitored_axes(&self) -> impl Iterator<Item = &str> {
        self.axes.keys().map(String::as_str)
    }

    /// Inspect one axis's state, for diagnostics and tests.
    pub fn axis_state(&self, axis: &str) -> Option<&AxisState> {
        self.axes.get(axis).map(|runtime| &runtime.state)
    }

    /// Run one supervision tick at `now`.
    pub fn tick(&mut self, now: Instant) -> TickReport {
        let Some(snapshot) = self.source.sample() else {
            return TickReport {
                outcome: TickOutcome::Skipped(SkipReason::TelemetryUnavailable),
                events: Vec::new(),
            };
        };

        if snapshot.replaying {
            return TickReport {
                outcome: TickOutcome::Skipped(SkipReason::ReplayActive),
                events: Vec::new(),
            };
        }

        let mut events = Vec::new();
        let outcome = self.update_axes(&snapshot, now, &mut events);

        // The identity check runs whenever an identity is observed, even
        // on controller-unavailable or failed ticks.
        self.check_aircraft(&snapshot, &mut events);

        TickReport { outcome, events }
    }

    fn update_axes(
        &mut self,
        snapshot: &TelemetrySnapshot,
        now: Instant,
        events: &mut Vec<MonitorEvent>,
    ) -> TickOutcome {
        // Read every controller's live gains up front: if any axis is
        // unavailable the whole tick must be a no-op with nothing mutated.
        let mut live = BTreeMap::new();
        for (name, runtime) in &self.axes {
            match runtime.sink.current() {
                Some(gains) => {
                    live.insert(name.clone(), gains);
                }
                None => return TickOutcome::Skipped(SkipReason::ControllerUnavailable),
            }
        }

        for (name, runtime) in &mut self.axes {
            let AxisRuntime {
                detector,
                controller,
                state,
                sink,
            } = runtime;

            let signal = snapshot.signal(name);
            detector.update(state, signal, now);

            let gains: Gains = live[name.as_str()];
            match controller.update(state, sink.as_mut(), gains, snapshot) {
                Ok(Some(event)) => events.push(event),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(
                        axis = %name,
                        error = format!("{err:#}"),
                        "tick fault, leaving gains as they are"
                    );
                    return TickOutcome::Failed(format!("axis {name}: {err:#}"));
                }
            }
        }

        TickOutcome::Completed
    }

    fn check_aircraft(&mut self, snapshot: &TelemetrySnapshot, events: &mut Vec<MonitorEvent>) {
        let current = snapshot.aircraft.clone();
        match &self.last_aircraft {
            None => {
                self.last_aircraft = Some(current);
            }
            Some(previous) if *previous != current => {
                tracing::info!(
                    previous = previous.as_ref().map(|id| id.0.as_str()),
                    current = current.as_ref().map(|id| id.0.as_str()),
                    "aircraft changed, resetting axis state"
                );
                for runtime in self.axes.values_mut() {
                    runtime.state.reset();
                }
                events.push(MonitorEvent::AircraftChanged {
                    previous: previous.clone(),
                    current: current.clone(),
                });
                self.last_aircraft = Some(current);
            }
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::SharedGains;
    use crate::source::WatchSource;

    fn snapshot(signal: f64, autopilot: bool, airspeed: f64) -> TelemetrySnapshot {
        let mut snap = TelemetrySnapshot {
            autopilot_engaged: autopilot,
            airspeed,
            aircraft: Some("c172".into()),
            ..Default::default()
        };
        snap.signals.insert("pitch".to_string(), signal);
        snap
    }

    fn pitch_only_supervisor() -> (
        tokio::sync::watch::Sender<Option<TelemetrySnapshot>>,
        SharedGains,
        Supervisor,
    ) {
        let (tx, source) = WatchSource::create("test");
        let pid = SharedGains::new(Gains::new(2.0, 0.2, 0.02));
        let mut supervisor = Supervisor::new(MonitorConfig::default(), Box::new(source));
        supervisor
            .attach_axis("pitch", Box::new(pid.clone()))
            .unwrap();
        (tx, pid, supervisor)
    }

    #[test]
    fn attach_rejects_unknown_axis() {
        let (_tx, source) = WatchSource::create("test");
        let mut supervisor = Supervisor::new(MonitorConfig::default(), Box::new(source));

        let err = supervisor
            .attach_axis("rudder", Box::new(SharedGains::detached()))
            .unwrap_err();
        assert!(matches!(err, MonitorError::UnknownAxis { axis } if axis == "rudder"));
    }

    #[test]
    fn attach_rejects_duplicates() {
        let (_tx, _pid, mut supervisor) = pitch_only_supervisor();

        let err = supervisor
            .attach_axis("pitch", Box::new(SharedGains::detached()))
            .unwrap_err();
        assert!(matches!(err, MonitorError::AxisAlreadyAttached { .. }));
    }

    #[test]
    fn no_telemetry_skips_without_identity_observation() {
        let (tx, _pid, mut supervisor) = pitch_only_supervisor();

        let report = supervisor.tick(Instant::now());
        assert_eq!(
            report.outcome,
            TickOutcome::Skipped(SkipReason::TelemetryUnavailable)
        );

        // First real tick records the identity silently: no change event
        // even though we went from "nothing observed" to an id.
        tx.send(Some(snapshot(0.0, true, 140.0))).unwrap();
        let report = supervisor.tick(Instant::now());
        assert_eq!(report.outcome, TickOutcome::Completed);
        assert!(report.events.is_empty());
    }

    #[test]
    fn replay_freezes_state() {
        let (tx, _pid, mut supervisor) = pitch_only_supervisor();
        let base = Instant::now();

        tx.send(Some(snapshot(0.0, true, 140.0))).unwrap();
        supervisor.tick(base);
        tx.send(Some(snapshot(150.0, true, 140.0))).unwrap();
        supervisor.tick(base + std::time::Duration::from_millis(100));

        let before = supervisor.axis_state("pitch").unwrap().clone();

        let mut replaying = snapshot(-150.0, true, 140.0);
        replaying.replaying = true;
        tx.send(Some(replaying)).unwrap();
        let report = supervisor.tick(base + std::time::Duration::from_millis(200));

        assert_eq!(report.outcome, TickOutcome::Skipped(SkipReason::ReplayActive));
        let after = supervisor.axis_state("pitch").unwrap();
        assert_eq!(after.last_signal, before.last_signal);
        assert_eq!(after.last_sign, before.last_sign);
        assert_eq!(after.flip_count, before.flip_count);
    }

    #[test]
    fn missing_controller_skips_but_still_checks_identity() {
        let (tx, pid, mut supervisor) = pitch_only_supervisor();

        tx.send(Some(snapshot(0.0, true, 140.0))).unwrap();
        supervisor.tick(Instant::now());

        pid.remove();
        let mut changed = snapshot(150.0, true, 140.0);
        changed.aircraft = Some("a320".into());
        tx.send(Some(changed)).unwrap();

        let report = supervisor.tick(Instant::now());
        assert_eq!(
            report.outcome,
            TickOutcome::Skipped(SkipReason::ControllerUnavailable)
        );
        assert_eq!(
            report.events,
            vec![MonitorEvent::AircraftChanged {
                previous: Some("c172".into()),
                current: Some("a320".into()),
            }]
        );
        // The skipped tick mutated no detector state.
        assert_eq!(supervisor.axis_state("pitch").unwrap().last_signal, 0.0);
    }

    #[test]
    fn identity_change_to_absent_counts_as_change() {
        let (tx, _pid, mut supervisor) = pitch_only_supervisor();

        tx.send(Some(snapshot(0.0, true, 140.0))).unwrap();
        supervisor.tick(Instant::now());

        let mut unloaded = snapshot(0.0, true, 140.0);
        unloaded.aircraft = None;
        tx.send(Some(unloaded)).unwrap();

        let report = supervisor.tick(Instant::now());
        assert_eq!(
            report.events,
            vec![MonitorEvent::AircraftChanged {
                previous: Some("c172".into()),
                current: None,
            }]
        );
    }
}
