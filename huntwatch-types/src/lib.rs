//! # huntwatch-types
//!
//! Core types for autopilot gain-hunting supervision. This crate defines
//! the vocabulary shared between a host flight system and the huntwatch
//! supervisor: controller gain triples, per-tick telemetry snapshots, and
//! the diagnostic events the supervisor emits.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: the types work without any
//!   serialization framework
//! - **Optional serialization**: enable the `serde` feature to derive
//!   `Serialize`/`Deserialize` on every type
//! - **Host agnostic**: nothing here assumes a particular simulator or
//!   autopilot implementation
//!
//! ## Example
//!
//! ```rust
//! use huntwatch_types::{GainOverride, Gains};
//!
//! let live = Gains::new(2.0, 0.2, 0.02);
//!
//! // A damping policy that clamps only the proportional term.
//! let policy = GainOverride::proportional(0.1);
//! let damped = policy.apply(live);
//!
//! assert_eq!(damped, Gains::new(0.1, 0.2, 0.02));
//! ```

mod event;
mod gains;
mod snapshot;

pub use event::*;
pub use gains::*;
pub use snapshot::*;
