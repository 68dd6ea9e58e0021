//! An interactive terminal to-do list manager.
//!
//! Tasks live in memory for the length of one session. Every change to the
//! list is recorded as a full snapshot so it can be undone and redone.

pub mod config;
pub mod error;
pub mod planner;

pub use error::{Error, Result};
