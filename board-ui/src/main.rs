//! Activity Board
//!
//! Browser front end for the school activities signup service, built with
//! Leptos (WASM).
//!
//! # Features
//!
//! - Activity cards with capacity and participant rosters
//! - Signup form
//! - Participant removal with confirmation
//! - Transient success and error messages
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. The load/mutate/reload cycle lives in the `activity-board`
//! crate; this crate supplies the page, a `gloo-net` implementation of the
//! service API, and a surface that applies the board's patches to signals.

use leptos::*;

mod api;
mod app;
mod components;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
