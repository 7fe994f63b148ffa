//! Signal-reversal ("flip") detection.
//!
//! A flip is a change in the sign of the signal's tick-to-tick delta whose
//! magnitude clears the axis threshold. Enough flips inside a sliding time
//! window means the control loop is hunting rather than converging.

use std::time::{Duration, Instant};

use crate::state::AxisState;

/// Per-axis reversal counter.
///
/// Holds only tuning; the mutable counters live in [`AxisState`] so the
/// supervisor can reset every axis uniformly on aircraft change.
#[derive(Debug, Clone)]
pub struct SignFlipDetector {
    threshold: f64,
    window: Duration,
}

impl SignFlipDetector {
    pub fn new(threshold: f64, window: Duration) -> Self {
        Self { threshold, window }
    }

    /// Feed one sample and return the updated flip count.
    ///
    /// A reversal only qualifies when the previous delta had a definite
    /// sign, the new delta's sign differs, and the magnitude strictly
    /// exceeds the threshold. Reversals closer together than the window
    /// accumulate; a reversal after the window restarts the count at 1;
    /// twice the window with no reversal decays the count to 0.
    ///
    /// A zero delta resets the reference sign, which can mask a reversal
    /// that spans a momentarily flat sample. That matches the deployed
    /// behavior and is pinned by `flat_sample_masks_spanning_reversal`
    /// below.
    pub fn update(&self, state: &mut AxisState, signal: f64, now: Instant) -> u32 {
        let delta = signal - state.last_signal;
        let sign: i8 = if delta > 0.0 {
            1
        } else if delta < 0.0 {
            -1
        } else {
            0
        };

        if state.last_sign != 0 && sign != state.last_sign && delta.abs() > self.threshold {
            state.flip_count = match state.last_flip {
                Some(prev) if now.duration_since(prev) < self.window => state.flip_count + 1,
                _ => 1,
            };
            state.last_flip = Some(now);
        }

        // Idle decay, checked every tick: twice the window with no
        // reversal forgets the streak.
        if let Some(prev) = state.last_flip {
            if now.duration_since(prev) > self.window * 2 {
                state.flip_count = 0;
            }
        }

        state.last_sign = sign;
        state.last_signal = signal;
        state.flip_count
    }
}
