//! Message Area Component
//!
//! The single region for transient success and error feedback.

use leptos::*;

use activity_board::view::MESSAGE_ID;

use crate::state::DomSurface;

#[component]
pub fn MessageArea() -> impl IntoView {
    let surface = use_context::<DomSurface>().expect("DomSurface not found");

    view! {
        <div id=MESSAGE_ID class=move || surface.message_class.get()>
            {move || surface.message_text.get()}
        </div>
    }
}
