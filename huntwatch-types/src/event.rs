//! Diagnostic events emitted by the supervisor.

use crate::AircraftId;

/// Something the supervisor did that an integrator may want to surface.
///
/// Events are emitted at most a handful per tick and carry everything
/// needed to log or display them without further lookups.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MonitorEvent {
    /// Oscillation was detected on an axis and its gains were overridden
    /// with the axis's damped policy.
    OscillationDetected {
        axis: String,
        /// Airspeed at the moment of detection; becomes the reference
        /// point for hysteresis-based release.
        airspeed: f64,
    },

    /// An axis's pre-damping gains were written back to the controller.
    GainsRestored { axis: String },

    /// The monitored aircraft identity changed; all axis state was reset
    /// and any saved gains were discarded.
    AircraftChanged {
        previous: Option<AircraftId>,
        current: Option<AircraftId>,
    },
}

impl MonitorEvent {
    /// The axis this event concerns, if it is axis-scoped.
    pub fn axis(&self) -> Option<&str> {
        match self {
            MonitorEvent::OscillationDetected { axis, .. } => Some(axis),
            MonitorEvent::GainsRestored { axis } => Some(axis),
            MonitorEvent::AircraftChanged { .. } => None,
        }
    }
}
