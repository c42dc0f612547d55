//! # Activity Board
//!
//! Client for the school activities signup service. Loads the activity map,
//! renders it, signs participants up or removes them, and reloads after
//! every change.
//!
//! ## Modules
//!
//! - [`model`]: Activity map and wire types
//! - [`view`]: View models and the render-to-patches function
//! - [`message`]: Single timed message slot
//! - [`sequence`]: Load generations
//! - [`api`]: Service seam and, natively, the `reqwest` client
//! - [`board`]: The controller tying it together
//!
//! With the default `native` feature the crate also carries configuration,
//! a terminal surface and the `activity-board` binary. The browser front end
//! in `board-ui/` builds on this crate with default features off.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use activity_board::api::{client::HttpClientConfig, HttpClient};
//! use activity_board::board::{ActivityBoard, BoardOptions, SignupForm};
//! use activity_board::terminal::TerminalSurface;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = HttpClient::new(HttpClientConfig::default())?;
//!     let board = ActivityBoard::new(api, TerminalSurface::new(false), BoardOptions::default());
//!
//!     board.load_activities().await;
//!     board
//!         .submit_signup(&SignupForm {
//!             email: "emma@mergington.edu".to_string(),
//!             activity: "Chess Club".to_string(),
//!         })
//!         .await;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod board;
pub mod message;
pub mod model;
pub mod sequence;
pub mod view;

#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod terminal;

// Re-export top-level types for convenience
pub use api::{ActivityApi, ApiError, Mutation};
pub use board::{ActionOutcome, ActivityBoard, BoardOptions, LoadOutcome, SignupForm, Surface};
pub use message::{Message, MessageSlot, PendingHide};
pub use model::{Activities, Activity};
pub use view::{BoardView, DomPatch, MessageKind, RemovalTarget};
