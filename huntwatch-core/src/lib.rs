//! # huntwatch-core
//!
//! A supervisory monitor that watches a closed-loop attitude autopilot for
//! self-induced oscillation ("hunting") and temporarily reduces controller
//! gains to suppress it, restoring the originals once the aircraft is back
//! in a safe regime.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Monitor                             │
//! │   (tokio interval, one tick every tick_period, never stops   │
//! │    on a bad tick)                                            │
//! │        │                                                     │
//! │        ▼                                                     │
//! │   ┌───────────┐  snapshot  ┌──────────────────────────────┐  │
//! │   │ Telemetry │───────────▶│          Supervisor          │  │
//! │   │  Source   │            │  per axis:                   │  │
//! │   └───────────┘            │   SignFlipDetector           │  │
//! │                            │        │ flip count          │  │
//! │                            │        ▼                     │  │
//! │                            │   DampingController ────────▶│──┼──▶ GainSink
//! │                            │   (Nominal ⇄ Damped)         │  │    (live PID)
//! │                            └──────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: the [`TelemetrySource`] trait and a watch-channel
//!   implementation for hosts that push telemetry
//! - **[`detector`]**: per-axis signal-reversal counting within a sliding
//!   time window
//! - **[`damping`]**: the two-state gain-override machine and the
//!   [`GainSink`] seam to the live controller
//! - **[`supervisor`]**: drives every axis from one shared snapshot per
//!   tick and resets all state when the aircraft identity changes
//! - **[`monitor`]**: background runner with a stop handle and optional
//!   event forwarding
//! - **[`config`]**: externalized tuning - thresholds, windows, release
//!   margins, damped-gain policies
//!
//! ## Usage
//!
//! ```
//! use huntwatch_core::{
//!     Gains, MonitorConfig, SharedGains, Supervisor, WatchSource,
//! };
//!
//! let (telemetry, source) = WatchSource::create("sim");
//! let pitch_pid = SharedGains::new(Gains::new(2.0, 0.2, 0.02));
//! let bank_pid = SharedGains::new(Gains::new(1.0, 0.1, 0.01));
//!
//! let mut supervisor = Supervisor::new(MonitorConfig::default(), Box::new(source));
//! supervisor.attach_axis("pitch", Box::new(pitch_pid.clone())).unwrap();
//! supervisor.attach_axis("bank", Box::new(bank_pid.clone())).unwrap();
//!
//! // Tick it yourself, or hand it to a `Monitor` for a background loop.
//! let report = supervisor.tick(std::time::Instant::now());
//! assert!(report.events.is_empty());
//! ```

pub mod config;
pub mod damping;
pub mod detector;
pub mod error;
pub mod monitor;
pub mod sink;
pub mod source;
pub mod state;
pub mod supervisor;

pub use config::{AxisConfig, MonitorConfig};
pub use damping::{DampingController, GainSink};
pub use detector::SignFlipDetector;
pub use error::MonitorError;
pub use monitor::{Monitor, MonitorBuilder, MonitorHandle};
pub use sink::SharedGains;
pub use source::{TelemetrySource, WatchSource};
pub use state::AxisState;
pub use supervisor::{SkipReason, Supervisor, TickOutcome, TickReport};

// Re-export the shared vocabulary so integrators need one import path.
pub use huntwatch_types::{AircraftId, GainOverride, Gains, MonitorEvent, TelemetrySnapshot};
