//! Message Slot
//!
//! The message area is a single timed slot. Every new message supersedes the
//! previous one, and a hide scheduled for an older message becomes a no-op.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::view::{DomPatch, MessageKind};

/// Default time a message stays visible
pub const DEFAULT_MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// A message currently shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub kind: MessageKind,
}

#[derive(Debug, Default)]
struct SlotState {
    generation: u64,
    visible: Option<Message>,
}

/// Shared handle to the message slot
#[derive(Debug, Clone, Default)]
pub struct MessageSlot {
    state: Arc<Mutex<SlotState>>,
}

impl MessageSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a message. Returns the patch to apply and the hide that belongs
    /// to this message.
    pub fn show(&self, text: impl Into<String>, kind: MessageKind) -> (DomPatch, PendingHide) {
        let text = text.into();
        let mut state = self.lock();
        state.generation += 1;
        state.visible = Some(Message {
            text: text.clone(),
            kind,
        });

        let pending = PendingHide {
            slot: self.clone(),
            generation: state.generation,
        };
        (DomPatch::ShowMessage { text, kind }, pending)
    }

    /// The message currently visible, if any
    pub fn current(&self) -> Option<Message> {
        self.lock().visible.clone()
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        // A panic while holding the lock cannot leave the slot half-written
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Hide scheduled for one particular message
#[derive(Debug)]
pub struct PendingHide {
    slot: MessageSlot,
    generation: u64,
}

impl PendingHide {
    /// Hide the message if it is still the one on screen. Returns the patch
    /// to apply, or `None` when a newer message has taken the slot.
    pub fn fire(self) -> Option<DomPatch> {
        let mut state = self.slot.lock();
        if state.generation != self.generation {
            tracing::trace!(
                scheduled = self.generation,
                current = state.generation,
                "Skipping hide for superseded message"
            );
            return None;
        }
        state.visible = None;
        Some(DomPatch::HideMessage)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
