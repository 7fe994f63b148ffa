//! In-process gain storage shared between a host and the supervisor.

use std::sync::Arc;

use anyhow::{bail, Result};
use parking_lot::RwLock;

use huntwatch_types::Gains;

use crate::damping::GainSink;

/// A [`GainSink`] backed by shared in-process storage.
///
/// Clones share the same slot, so the host keeps one handle to read and
/// install gains while the supervisor holds another as the axis sink.
/// An empty slot models "controller not present yet": the sink reports
/// unavailable and the supervisor skips the tick.
#[derive(Debug, Clone, Default)]
pub struct SharedGains {
    slot: Arc<RwLock<Option<Gains>>>,
}

impl SharedGains {
    /// Storage holding the given live gains.
    pub fn new(gains: Gains) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(gains))),
        }
    }

    /// Storage with no controller present yet.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Install or replace the live gains (host side).
    pub fn install(&self, gains: Gains) {
        *self.slot.write() = Some(gains);
    }

    /// Remove the controller, making the sink report unavailable.
    pub fn remove(&self) {
        *self.slot.write() = None;
    }

    /// Read the live gains (host side).
    pub fn read(&self) -> Option<Gains> {
        *self.slot.read()
    }
}

impl GainSink for SharedGains {
    fn current(&self) -> Option<Gains> {
        *self.slot.read()
    }

    fn apply(&mut self, gains: Gains) -> Result<()> {
        let mut slot = self.slot.write();
        match slot.as_mut() {
            Some(live) => {
                *live = gains;
                Ok(())
            }
            None => bail!("controller not present"),
        }
    }
}
