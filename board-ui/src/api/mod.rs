//! API Layer

pub mod client;

pub use client::{get_api_base, GlooApi};
