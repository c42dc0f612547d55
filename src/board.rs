//! Activity Board Controller
//!
//! Orchestrates the load, display, mutate, reload cycle. The controller owns
//! no document: it hands [`DomPatch`]es to a [`Surface`] and talks to the
//! service through an [`ActivityApi`].
//!
//! ```text
//! idle -> request in flight -> success: message shown, data reloaded
//!                           -> failure: message shown, data unchanged
//! ```
//!
//! The board returns to idle when the message's hide fires.

use std::time::Duration;

use crate::api::{ActivityApi, Mutation};
use crate::message::{Message, MessageSlot, PendingHide, DEFAULT_MESSAGE_TIMEOUT};
use crate::sequence::LoadSequencer;
use crate::view::{self, BoardView, DomPatch, MessageKind, RemovalTarget, SIGNUP_FORM_ID};

/// Where the board's output goes
pub trait Surface {
    /// Apply patches in order
    fn apply(&self, patches: &[DomPatch]);

    /// Blocking yes/no question
    fn confirm(&self, question: &str) -> bool;

    /// Arrange for `hide` to fire after `delay`. Pass the result of
    /// [`PendingHide::fire`] back to [`Surface::apply`].
    ///
    /// A surface that cannot take a message back once displayed (printed
    /// output, for one) may drop `hide` without firing it.
    fn schedule_hide(&self, hide: PendingHide, delay: Duration);
}

/// Board behavior switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardOptions {
    /// Render removal affordances and accept removal requests
    pub allow_removal: bool,
    /// How long a message stays visible
    pub message_timeout: Duration,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            allow_removal: true,
            message_timeout: DEFAULT_MESSAGE_TIMEOUT,
        }
    }
}

/// Values read from the signup form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub activity: String,
}

/// Result of one load
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Rendered(BoardView),
    Failed,
    /// A newer load started before this one finished; nothing was applied
    Superseded,
}

/// Result of one signup or removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Succeeded(String),
    Failed(String),
    /// The user declined the confirmation
    Cancelled,
    /// Removal was requested on a read-only board
    Disabled,
}

pub struct ActivityBoard<A, S> {
    api: A,
    surface: S,
    options: BoardOptions,
    loads: LoadSequencer,
    message: MessageSlot,
}

impl<A: ActivityApi, S: Surface> ActivityBoard<A, S> {
    pub fn new(api: A, surface: S, options: BoardOptions) -> Self {
        Self {
            api,
            surface,
            options,
            loads: LoadSequencer::new(),
            message: MessageSlot::new(),
        }
    }

    pub fn options(&self) -> BoardOptions {
        self.options
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The message currently on screen
    pub fn message(&self) -> Option<Message> {
        self.message.current()
    }

    /// Fetch the activity map and re-render the list and the select.
    ///
    /// On failure only the list is replaced, with an error notice. Results of
    /// a load that has been superseded by a newer one are dropped.
    pub async fn load_activities(&self) -> LoadOutcome {
        let ticket = self.loads.begin();
        tracing::debug!(generation = ticket.generation(), "Loading activities");

        let result = self.api.fetch_activities().await;

        if !self.loads.is_current(ticket) {
            tracing::debug!(
                generation = ticket.generation(),
                latest = self.loads.latest(),
                "Discarding stale load"
            );
            return LoadOutcome::Superseded;
        }

        match result {
            Ok(activities) => {
                let board = BoardView::build(&activities, self.options.allow_removal);
                self.surface.apply(&view::render(&board));
                tracing::debug!(activities = board.cards.len(), "Rendered activities");
                LoadOutcome::Rendered(board)
            }
            Err(e) => {
                tracing::warn!("Failed to load activities: {}", e);
                self.surface.apply(&[view::render_load_failure()]);
                LoadOutcome::Failed
            }
        }
    }

    /// Sign `form.email` up for `form.activity`.
    ///
    /// Input is passed through as typed; the page's input types are the only
    /// validation.
    pub async fn submit_signup(&self, form: &SignupForm) -> ActionOutcome {
        let result = self.api.signup(&form.activity, &form.email).await;
        let outcome = self.finish(Mutation::Signup, result).await;

        if let ActionOutcome::Succeeded(_) = outcome {
            self.surface.apply(&[DomPatch::ResetForm {
                target: SIGNUP_FORM_ID,
            }]);
        }
        outcome
    }

    /// Remove a participant after the user confirms
    pub async fn remove_participant(&self, target: &RemovalTarget) -> ActionOutcome {
        if !self.options.allow_removal {
            tracing::debug!(activity = %target.activity, "Removal is disabled");
            return ActionOutcome::Disabled;
        }

        if !self.surface.confirm(&target.confirmation_prompt()) {
            tracing::debug!(activity = %target.activity, "Removal cancelled");
            return ActionOutcome::Cancelled;
        }

        let result = self.api.unregister(&target.activity, &target.email).await;
        self.finish(Mutation::Unregister, result).await
    }

    /// Show a message and schedule its hide
    pub fn show_message(&self, text: &str, kind: MessageKind) {
        let (patch, hide) = self.message.show(text, kind);
        self.surface.apply(&[patch]);
        self.surface.schedule_hide(hide, self.options.message_timeout);
    }

    /// Fire a hide on this board's surface
    pub fn hide_message(&self, hide: PendingHide) {
        if let Some(patch) = hide.fire() {
            self.surface.apply(&[patch]);
        }
    }

    async fn finish(
        &self,
        mutation: Mutation,
        result: Result<String, crate::api::ApiError>,
    ) -> ActionOutcome {
        match result {
            Ok(message) => {
                tracing::info!(?mutation, "{}", message);
                self.show_message(&message, MessageKind::Success);
                // Reload before returning so the message never sits next to stale data
                self.load_activities().await;
                ActionOutcome::Succeeded(message)
            }
            Err(e) => {
                tracing::warn!(?mutation, "Request failed: {}", e);
                let text = e.user_message(mutation);
                self.show_message(&text, MessageKind::Error);
                ActionOutcome::Failed(text)
            }
        }
    }
}
