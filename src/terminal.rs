//! Terminal Surface
//!
//! Prints board patches to stdout and asks confirmations on the terminal.

use std::time::Duration;

use crate::board::Surface;
use crate::message::PendingHide;
use crate::view::{self, DomPatch, MessageKind, ACTIVITIES_LIST_ID};

pub struct TerminalSurface {
    /// Answer every confirmation with yes
    assume_yes: bool,
}

impl TerminalSurface {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

/// Text printed for one patch, if it has a terminal form
pub fn render_patch(patch: &DomPatch) -> Option<String> {
    match patch {
        DomPatch::ReplaceChildren { target, nodes } if *target == ACTIVITIES_LIST_ID => {
            if nodes.is_empty() {
                Some("No activities.\n".to_string())
            } else {
                Some(view::to_text(nodes))
            }
        }
        DomPatch::ShowMessage { text, kind } => {
            let icon = match kind {
                MessageKind::Success => "✓",
                MessageKind::Error => "✕",
            };
            Some(format!("{} {}\n", icon, text))
        }
        // The select, form and message visibility have no terminal counterpart
        _ => None,
    }
}

impl Surface for TerminalSurface {
    fn apply(&self, patches: &[DomPatch]) {
        for patch in patches {
            match (render_patch(patch), patch) {
                (Some(text), DomPatch::ShowMessage { kind: MessageKind::Error, .. }) => {
                    eprint!("{}", text)
                }
                (Some(text), _) => print!("{}", text),
                (None, _) => {}
            }
        }
    }

    fn confirm(&self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        dialoguer::Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .unwrap_or_else(|e| {
                tracing::warn!("Confirmation prompt failed: {}", e);
                false
            })
    }

    fn schedule_hide(&self, hide: PendingHide, delay: Duration) {
        // Printed lines stay on screen, so the hide is dropped
        tracing::trace!(generation = hide.generation(), ?delay, "Message hide not scheduled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageSlot;
    use crate::view::{Node, ACTIVITY_SELECT_ID, SIGNUP_FORM_ID};

    #[test]
    fn test_messages_get_icons() {
        let ok = DomPatch::ShowMessage {
            text: "Signed up!".to_string(),
            kind: MessageKind::Success,
        };
        let err = DomPatch::ShowMessage {
            text: "Already signed up".to_string(),
            kind: MessageKind::Error,
        };
        assert_eq!(render_patch(&ok).unwrap(), "✓ Signed up!\n");
        assert_eq!(render_patch(&err).unwrap(), "✕ Already signed up\n");
    }

    #[test]
    fn test_list_only() {
        let list = DomPatch::ReplaceChildren {
            target: ACTIVITIES_LIST_ID,
            nodes: vec![Node::element("p").child(Node::text("hello"))],
        };
        let select = DomPatch::ReplaceChildren {
            target: ACTIVITY_SELECT_ID,
            nodes: vec![Node::element("option").child(Node::text("x"))],
        };
        assert_eq!(render_patch(&list).unwrap(), "hello\n");
        assert_eq!(render_patch(&select), None);
        assert_eq!(render_patch(&DomPatch::HideMessage), None);
        assert_eq!(
            render_patch(&DomPatch::ResetForm {
                target: SIGNUP_FORM_ID
            }),
            None
        );
    }

    #[test]
    fn test_empty_list() {
        let list = DomPatch::ReplaceChildren {
            target: ACTIVITIES_LIST_ID,
            nodes: Vec::new(),
        };
        assert_eq!(render_patch(&list).unwrap(), "No activities.\n");
    }

    #[test]
    fn test_assume_yes_skips_prompt() {
        assert!(TerminalSurface::new(true).confirm("Really?"));
    }

    #[test]
    fn test_hide_is_dropped() {
        let slot = MessageSlot::new();
        let (_, hide) = slot.show("Signed up!", MessageKind::Success);

        TerminalSurface::new(false).schedule_hide(hide, Duration::ZERO);

        let message = slot.current().unwrap();
        assert_eq!(message.text, "Signed up!");
    }
}
