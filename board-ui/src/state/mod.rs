//! State Management
//!
//! The shared board and the signals its patches write to.

pub mod board;

pub use board::{provide_board, Board, DomSurface};
