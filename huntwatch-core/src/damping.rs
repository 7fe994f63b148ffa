//! The two-state damping machine and the gain-sink seam.

use std::fmt::Debug;

use anyhow::Result;

use huntwatch_types::{GainOverride, Gains, MonitorEvent, TelemetrySnapshot};

use crate::state::AxisState;

/// Read/write access to one live controller's gain triple.
///
/// This is the only seam between the damping machine and the host: the
/// machine never learns what object actually holds the gains. `current`
/// returning `None` means the controller is not present this tick, and the
/// supervisor skips the whole tick without mutating any state.
pub trait GainSink: Send + Debug {
    /// The live gains, or `None` if the controller is unavailable.
    fn current(&self) -> Option<Gains>;

    /// Overwrite the live gains.
    fn apply(&mut self, gains: Gains) -> Result<()>;
}

/// Two-state (Nominal/Damped) gain-override machine for one axis.
///
/// Cycles indefinitely: each damping episode captures the pre-override
/// gains once, and release writes them back verbatim.
#[derive(Debug, Clone)]
pub struct DampingController {
    axis: String,
    damped_gains: GainOverride,
    release_margin: f64,
    trigger_count: u32,
}

impl DampingController {
    pub fn new(
        axis: &str,
        damped_gains: GainOverride,
        release_margin: f64,
        trigger_count: u32,
    ) -> Self {
        Self {
            axis: axis.to_string(),
            damped_gains,
            release_margin,
            trigger_count,
        }
    }

    /// Run both transitions for one tick.
    ///
    /// `live` is the gain triple read from the sink before any axis work
    /// this tick, so a capture always sees pre-override values. Host
    /// writes happen before any state is committed: a failed write leaves
    /// the axis exactly as it was and the next tick retries.
    pub fn update(
        &self,
        state: &mut AxisState,
        sink: &mut dyn GainSink,
        live: Gains,
        snapshot: &TelemetrySnapshot,
    ) -> Result<Option<MonitorEvent>> {
        // Nominal -> Damped
        if state.flip_count >= self.trigger_count && snapshot.autopilot_engaged && !state.damped {
            sink.apply(self.damped_gains.apply(live))?;

            // Capture-once: never overwrite a capture already pending
            // restore.
            if state.saved_gains.is_none() {
                state.saved_gains = Some(live);
            }
            state.critical_speed = Some(snapshot.airspeed);
            state.damped = true;

            tracing::warn!(
                axis = %self.axis,
                airspeed = snapshot.airspeed,
                "oscillation detected, damping gains"
            );
            return Ok(Some(MonitorEvent::OscillationDetected {
                axis: self.axis.clone(),
                airspeed: snapshot.airspeed,
            }));
        }

        // Damped -> Nominal
        if state.damped && self.release_due(state, snapshot) {
            if let Some(original) = state.saved_gains {
                sink.apply(original)?;
            }
            state.saved_gains = None;
            state.damped = false;
            state.critical_speed = None;
            state.flip_count = 0;

            tracing::info!(axis = %self.axis, "restored original gains");
            return Ok(Some(MonitorEvent::GainsRestored {
                axis: self.axis.clone(),
            }));
        }

        Ok(None)
    }

    /// Release when the autopilot disengages (unconditional safe release)
    /// or once airspeed has fallen strictly below the critical speed minus
    /// the margin.
    fn release_due(&self, state: &AxisState, snapshot: &TelemetrySnapshot) -> bool {
        if !snapshot.autopilot_engaged {
            return true;
        }
        match state.critical_speed {
            Some(critical) => snapshot.airspeed < critical - self.release_margin,
            None => false,
        }
    }
}
