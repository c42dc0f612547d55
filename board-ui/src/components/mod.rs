//! UI Components
//!
//! Leptos components for the activity board page.

pub mod activity_list;
pub mod message;
pub mod nodes;
pub mod signup_form;

pub use activity_list::ActivityList;
pub use message::MessageArea;
pub use nodes::nodes_view;
pub use signup_form::SignupPanel;
