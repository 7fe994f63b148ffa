//! Controller gain triples and partial damped-gain policies.

/// Proportional/integral/derivative gains of one controller.
///
/// Values are arbitrary finite reals; the supervisor treats them as opaque
/// and only ever copies them whole - captured when damping engages,
/// written back verbatim when it releases.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

impl Gains {
    pub const fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }
}

/// A damped-gain policy: the terms to force while an axis is damped.
///
/// `None` terms leave the live value untouched. The partiality is
/// deliberate - one axis may clamp all three terms while another clamps
/// only the proportional term, and that asymmetry is tuning carried in
/// configuration, not something to unify in code.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GainOverride {
    pub kp: Option<f64>,
    pub ki: Option<f64>,
    pub kd: Option<f64>,
}

impl GainOverride {
    /// Force all three terms to the same value.
    pub const fn uniform(value: f64) -> Self {
        Self {
            kp: Some(value),
            ki: Some(value),
            kd: Some(value),
        }
    }

    /// Force only the proportional term.
    pub const fn proportional(kp: f64) -> Self {
        Self {
            kp: Some(kp),
            ki: None,
            kd: None,
        }
    }

    /// Merge this policy onto the current live gains.
    pub fn apply(&self, current: Gains) -> Gains {
        Gains {
            kp: self.kp.unwrap_or(current.kp),
            ki: self.ki.unwrap_or(current.ki),
            kd: self.kd.unwrap_or(current.kd),
        }
    }
}
