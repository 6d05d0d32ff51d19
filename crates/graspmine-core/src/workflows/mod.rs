//! # Workflows Module
//!
//! The user-facing layer tying the core data model and the engine session
//! together into complete mining procedures.

pub mod mine;

pub use mine::{MiningOutcome, run};
