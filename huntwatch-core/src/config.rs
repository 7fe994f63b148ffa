//! Monitor configuration.
//!
//! All tuning lives here rather than in code: per-axis reversal thresholds,
//! flip windows, release margins, and damped-gain policies, plus the global
//! tick period and trigger count. [`MonitorConfig::default`] carries the
//! shipped tuning; [`MonitorConfig::load`] layers a config file and
//! `HUNTWATCH_*` environment variables on top.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use huntwatch_types::GainOverride;

use crate::error::MonitorError;

/// Detection and damping tuning for one monitored axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    /// Minimum |delta| between consecutive samples for a sign change to
    /// count as a reversal, in the axis signal's own units.
    pub flip_threshold: f64,

    /// Maximum time between reversals for them to accumulate, in ms.
    pub flip_window_ms: u64,

    /// Required airspeed deficit below the critical speed before gains
    /// are restored. Acts as a buffer against re-trigger chatter while
    /// decelerating through the detection speed.
    pub release_margin: f64,

    /// Gain terms forced while this axis is damped.
    pub damped_gains: GainOverride,
}

impl AxisConfig {
    /// The flip window as a `Duration`.
    pub fn flip_window(&self) -> Duration {
        Duration::from_millis(self.flip_window_ms)
    }
}

/// Complete monitor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Supervisor tick period, in ms.
    pub tick_period_ms: u64,

    /// Number of qualifying reversals within the window that declares
    /// oscillation.
    pub trigger_count: u32,

    /// Monitored axes, keyed by axis name.
    pub axes: BTreeMap<String, AxisConfig>,
}

impl Default for MonitorConfig {
    /// The shipped tuning: a vertical-speed pitch proxy and a bank-angle
    /// axis. Pitch clamps all three gain terms; bank clamps only the
    /// proportional term. The asymmetry is deliberate per-axis tuning.
    fn default() -> Self {
        let mut axes = BTreeMap::new();
        axes.insert(
            "pitch".to_string(),
            AxisConfig {
                flip_threshold: 100.0, // fpm swing to count as a reversal
                flip_window_ms: 2000,
                release_margin: 30.0, // knots below critical speed
                damped_gains: GainOverride::uniform(0.001),
            },
        );
        axes.insert(
            "bank".to_string(),
            AxisConfig {
                flip_threshold: 3.0, // degrees
                flip_window_ms: 2000,
                release_margin: 30.0,
                damped_gains: GainOverride::proportional(0.1),
            },
        );

        Self {
            tick_period_ms: 100,
            trigger_count: 2,
            axes,
        }
    }
}

impl MonitorConfig {
    /// The tick period as a `Duration`.
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// Load configuration from a file with `HUNTWATCH_*` environment
    /// variables layered on top. Fields missing from both fall back to
    /// the shipped defaults.
    pub fn load(path: &Path) -> Result<Self, MonitorError> {
        let settings = Config::builder()
            .add_source(File::from(path))
            .add_source(Environment::with_prefix("HUNTWATCH"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
