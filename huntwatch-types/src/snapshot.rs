//! Per-tick telemetry snapshots.

use std::collections::BTreeMap;
use std::fmt;

/// Opaque identity of the monitored aircraft.
///
/// The supervisor only ever compares identities for equality; the content
/// is whatever token the host uses (a record id, a registration, a path).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AircraftId(pub String);

impl fmt::Display for AircraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AircraftId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for AircraftId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Read-only view of host telemetry for one supervision tick.
///
/// Produced once per tick by a telemetry source and shared by every axis.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TelemetrySnapshot {
    /// Monitored signal values keyed by axis name.
    pub signals: BTreeMap<String, f64>,

    /// Whether the autopilot is currently engaged.
    pub autopilot_engaged: bool,

    /// Current airspeed, in the same units as each axis's release margin.
    pub airspeed: f64,

    /// Identity of the current aircraft. `None` (no aircraft loaded) is
    /// itself a distinct identity value.
    pub aircraft: Option<AircraftId>,

    /// True while the host's flight recorder is replaying. The supervisor
    /// freezes all state until replay ends.
    pub replaying: bool,
}

impl TelemetrySnapshot {
    /// Signal value for an axis. A configured axis missing from the map
    /// reads as `0.0`, matching a host that reports absent channels as
    /// zero rather than omitting the tick.
    pub fn signal(&self, axis: &str) -> f64 {
        self.signals.get(axis).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_signal_reads_zero() {
        let snapshot = TelemetrySnapshot::default();
        assert_eq!(snapshot.signal("pitch"), 0.0);
    }

    #[test]
    fn present_signal_reads_through() {
        let mut snapshot = TelemetrySnapshot::default();
        snapshot.signals.insert("bank".to_string(), -4.5);
        assert_eq!(snapshot.signal("bank"), -4.5);
    }

    #[test]
    fn aircraft_identity_compares_by_value() {
        let a: AircraftId = "c172".into();
        let b = AircraftId::from("c172".to_string());
        assert_eq!(a, b);
        assert_ne!(a, AircraftId::from("a320"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn snapshot_deserializes_with_defaults() {
        let json = r#"{
            "signals": { "pitch": 150.0 },
            "airspeed": 145.0,
            "aircraft": "c172"
        }"#;

        let snapshot: TelemetrySnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.signal("pitch"), 150.0);
        assert_eq!(snapshot.airspeed, 145.0);
        assert_eq!(snapshot.aircraft, Some("c172".into()));
        assert!(!snapshot.autopilot_engaged);
        assert!(!snapshot.replaying);
    }
}
