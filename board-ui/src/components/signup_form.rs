//! Signup Form Component
//!
//! Email input plus activity select. The select's options come from the
//! same load as the activity cards.

use leptos::html;
use leptos::*;

use activity_board::view::{ACTIVITY_SELECT_ID, SIGNUP_FORM_ID};
use activity_board::{ActionOutcome, SignupForm};

use crate::components::nodes_view;
use crate::state::{Board, DomSurface};

#[component]
pub fn SignupPanel() -> impl IntoView {
    let surface = use_context::<DomSurface>().expect("DomSurface not found");
    let board = use_context::<Board>().expect("Board not found");

    let email_ref = create_node_ref::<html::Input>();
    let activity_ref = create_node_ref::<html::Select>();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let (Some(email), Some(activity)) = (email_ref.get(), activity_ref.get()) else {
            return;
        };
        let form = SignupForm {
            email: email.value(),
            activity: activity.value(),
        };

        let board = board.clone();
        spawn_local(async move {
            if let ActionOutcome::Failed(reason) = board.submit_signup(&form).await {
                web_sys::console::warn_1(&format!("Signup failed: {}", reason).into());
            }
        });
    };

    view! {
        <section id="signup-container">
            <h3>"Sign Up for an Activity"</h3>
            <form id=SIGNUP_FORM_ID node_ref=surface.form on:submit=on_submit>
                <div class="form-group">
                    <label for="email">"Student Email:"</label>
                    <input
                        type="email"
                        id="email"
                        required
                        placeholder="your-email@mergington.edu"
                        node_ref=email_ref
                    />
                </div>
                <div class="form-group">
                    <label for=ACTIVITY_SELECT_ID>"Select Activity:"</label>
                    <select id=ACTIVITY_SELECT_ID required node_ref=activity_ref>
                        {move || surface.options.with(|nodes| nodes_view(nodes))}
                    </select>
                </div>
                <button type="submit">"Sign Up"</button>
            </form>
        </section>
    }
}
