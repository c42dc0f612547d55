//! Activity List Component
//!
//! Shows the activity cards. Removal clicks are picked up once, on the
//! container, since the cards are re-rendered on every load.

use leptos::*;
use wasm_bindgen::JsCast;

use activity_board::view::{ACTIVITIES_LIST_ID, DELETE_ICON_CLASS};
use activity_board::{ActionOutcome, RemovalTarget};

use crate::components::nodes_view;
use crate::state::{Board, DomSurface};

#[component]
pub fn ActivityList() -> impl IntoView {
    let surface = use_context::<DomSurface>().expect("DomSurface not found");
    let board = use_context::<Board>().expect("Board not found");

    let on_click = move |ev: web_sys::MouseEvent| {
        let Some(target) = removal_target(&ev) else {
            return;
        };

        let board = board.clone();
        spawn_local(async move {
            if let ActionOutcome::Failed(reason) = board.remove_participant(&target).await {
                web_sys::console::warn_1(&format!("Unregister failed: {}", reason).into());
            }
        });
    };

    view! {
        <section id="activities-container">
            <h3>"Available Activities"</h3>
            <div id=ACTIVITIES_LIST_ID on:click=on_click>
                {move || surface.list.with(|nodes| nodes_view(nodes))}
            </div>
        </section>
    }
}

/// The (activity, email) a click on a delete icon points at
fn removal_target(ev: &web_sys::MouseEvent) -> Option<RemovalTarget> {
    let element = ev.target()?.dyn_into::<web_sys::Element>().ok()?;
    let icon = element
        .closest(&format!(".{}", DELETE_ICON_CLASS))
        .ok()
        .flatten()?;

    Some(RemovalTarget::new(
        icon.get_attribute("data-activity")?,
        icon.get_attribute("data-email")?,
    ))
}
