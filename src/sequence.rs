//! Load Sequencing
//!
//! Every load takes a ticket from a generation counter. Only the newest
//! ticket may write to the view, so a slow load that finishes after a newer
//! one is discarded instead of overwriting fresher data.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct LoadSequencer {
    latest: Arc<AtomicU64>,
}

/// Generation handed to one load
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl LoadSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load, superseding every earlier ticket
    pub fn begin(&self) -> LoadTicket {
        LoadTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

impl LoadTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}
