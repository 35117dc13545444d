//! # tolyan-memory
//!
//! Per-conversation rolling dialogue windows, in memory only.

mod store;

pub use store::{DialogStore, Turn, CONTEXT_CHAR_CAP, MAX_TURNS, TURN_CHAR_CAP};
