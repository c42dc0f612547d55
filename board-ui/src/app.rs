//! App Root Component
//!
//! Page shell, board provider and the initial load.

use leptos::*;

use activity_board::LoadOutcome;

use crate::components::{ActivityList, MessageArea, SignupPanel};
use crate::state::provide_board;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let board = provide_board();

    // Initial load once the page is mounted
    create_effect(move |_| {
        let board = board.clone();
        spawn_local(async move {
            if board.load_activities().await == LoadOutcome::Failed {
                web_sys::console::error_1(&"Failed to load activities".into());
            }
        });
    });

    view! {
        <header>
            <h1>"Mergington High School"</h1>
            <h2>"Extracurricular Activities"</h2>
        </header>

        <main>
            <ActivityList />
            <SignupPanel />
            <MessageArea />
        </main>

        <footer>
            <p>"© 2023 Mergington High School"</p>
        </footer>
    }
}
