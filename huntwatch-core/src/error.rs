//! Error types for the supervisor.

use thiserror::Error;

/// Errors that can occur while setting up or running the monitor.
///
/// Per-tick conditions (missing telemetry, absent controller, host write
/// faults) are deliberately *not* errors at the tick boundary - they are
/// ordinary [`TickOutcome`](crate::TickOutcome) values. This type covers
/// setup and configuration, where failing loudly is the right call.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Configuration could not be loaded or deserialized.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A gain sink was attached for an axis the configuration does not
    /// name.
    #[error("unknown axis: {axis}")]
    UnknownAxis { axis: String },

    /// A gain sink is already attached for this axis.
    #[error("axis already attached: {axis}")]
    AxisAlreadyAttached { axis: String },
}
