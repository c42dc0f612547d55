//! Board State
//!
//! Reactive page state and the surface that writes the board's patches
//! into it.

use leptos::html;
use leptos::*;
use std::rc::Rc;
use std::time::Duration;

use activity_board::view::{Node, ACTIVITIES_LIST_ID, ACTIVITY_SELECT_ID, HIDDEN_CLASS};
use activity_board::{ActivityBoard, BoardOptions, DomPatch, PendingHide, Surface};
use gloo_timers::callback::Timeout;

use crate::api::{get_api_base, GlooApi};

/// The board shared by every component
pub type Board = Rc<ActivityBoard<GlooApi, DomSurface>>;

/// Signals the page renders from
#[derive(Clone, Copy)]
pub struct DomSurface {
    /// Children of the activity list
    pub list: RwSignal<Vec<Node>>,
    /// Options of the activity select
    pub options: RwSignal<Vec<Node>>,
    pub message_text: RwSignal<String>,
    pub message_class: RwSignal<String>,
    pub form: NodeRef<html::Form>,
    /// Hide timer of the visible message. Replacing it cancels the old one.
    pending_hide: StoredValue<Option<Timeout>>,
}

impl DomSurface {
    fn new() -> Self {
        Self {
            list: create_rw_signal(vec![
                Node::element("p").child(Node::text("Loading activities..."))
            ]),
            options: create_rw_signal(Vec::new()),
            message_text: create_rw_signal(String::new()),
            message_class: create_rw_signal(HIDDEN_CLASS.to_string()),
            form: create_node_ref(),
            pending_hide: store_value(None),
        }
    }
}

impl Surface for DomSurface {
    fn apply(&self, patches: &[DomPatch]) {
        for patch in patches {
            match patch {
                DomPatch::ReplaceChildren { target, nodes } if *target == ACTIVITIES_LIST_ID => {
                    self.list.set(nodes.clone());
                }
                DomPatch::ReplaceChildren { target, nodes } if *target == ACTIVITY_SELECT_ID => {
                    self.options.set(nodes.clone());
                }
                DomPatch::ReplaceChildren { target, .. } => {
                    let warning = format!("No element for patch target {}", target);
                    web_sys::console::warn_1(&warning.into());
                }
                DomPatch::ShowMessage { text, kind } => {
                    self.message_text.set(text.clone());
                    self.message_class.set(kind.class().to_string());
                }
                DomPatch::HideMessage => {
                    self.message_class.update(|class| {
                        if !class.split_whitespace().any(|c| c == HIDDEN_CLASS) {
                            class.push(' ');
                            class.push_str(HIDDEN_CLASS);
                        }
                    });
                }
                DomPatch::ResetForm { .. } => {
                    if let Some(form) = self.form.get_untracked() {
                        form.reset();
                    }
                }
            }
        }
    }

    fn confirm(&self, question: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(question).ok())
            .unwrap_or(false)
    }

    fn schedule_hide(&self, hide: PendingHide, delay: Duration) {
        let surface = *self;
        let timeout = Timeout::new(delay.as_millis() as u32, move || {
            if let Some(patch) = hide.fire() {
                surface.apply(&[patch]);
            }
        });
        self.pending_hide.set_value(Some(timeout));
    }
}

/// Create the board and provide it (and its surface) to the component tree
pub fn provide_board() -> Board {
    let surface = DomSurface::new();
    let board = Rc::new(ActivityBoard::new(
        GlooApi::new(get_api_base()),
        surface,
        BoardOptions::default(),
    ));

    provide_context(surface);
    provide_context(Rc::clone(&board));
    board
}
