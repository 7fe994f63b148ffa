//! Per-axis mutable supervision state.

use std::time::Instant;

use huntwatch_types::Gains;

/// Everything the supervisor remembers about one axis between ticks.
///
/// Owned by the supervisor and handed to the detector and damping logic by
/// exclusive reference. Axes never share counters or gain storage, so a
/// reset on one axis cannot disturb another.
#[derive(Debug, Clone, Default)]
pub struct AxisState {
    /// Signal value from the previous tick.
    pub last_signal: f64,

    /// Sign of the previous tick's delta: -1, 0, or +1. Zero means the
    /// last sample was flat (or this is the first tick), and the next
    /// sign change cannot count as a reversal.
    pub last_sign: i8,

    /// When the most recent qualifying reversal was seen. `None` until
    /// the first reversal, so idle decay can never fire early.
    pub last_flip: Option<Instant>,

    /// Qualifying reversals observed inside the trailing window.
    pub flip_count: u32,

    /// Whether the damped-gain override is currently active.
    pub damped: bool,

    /// Airspeed recorded at the moment damping engaged. Set iff `damped`.
    pub critical_speed: Option<f64>,

    /// Gains captured just before the first override of the current
    /// damping episode; present iff the episode has not yet had its
    /// originals written back.
    pub saved_gains: Option<Gains>,
}

impl AxisState {
    /// Return to the freshly-created state, discarding any in-progress
    /// damping episode and its saved gains.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_clears_everything() {
        let mut state = AxisState {
            last_signal: 150.0,
            last_sign: 1,
            last_flip: Some(Instant::now()),
            flip_count: 3,
            damped: true,
            critical_speed: Some(180.0),
            saved_gains: Some(Gains::new(2.0, 0.2, 0.02)),
        };

        state.reset();

        assert_eq!(state.last_signal, 0.0);
        assert_eq!(state.last_sign, 0);
        assert!(state.last_flip.is_none());
        assert_eq!(state.flip_count, 0);
        assert!(!state.damped);
        assert!(state.critical_speed.is_none());
        assert!(state.saved_gains.is_none());
    }
}
