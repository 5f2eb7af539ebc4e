//! # Rosteria Core
//!
//! Domain types and logic for the Rosteria roster-management service:
//! availability filtering, roster authoring, invitation lifecycle rules,
//! schedule validation, and participation statistics. Everything in this
//! crate is I/O-free; persistence and HTTP live in the sibling crates.

pub mod availability;
pub mod errors;
pub mod models;
pub mod roster;
pub mod stats;
