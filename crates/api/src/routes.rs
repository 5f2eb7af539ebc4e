//! Route definitions for the API.
//!
//! Each module wires one resource's endpoints to its handlers. The
//! routers are merged into the application router in [`start_server`].
//!
//! [`start_server`]: crate::start_server

pub mod auth;
pub mod availability;
pub mod health;
pub mod invitation;
pub mod musician;
pub mod reference;
pub mod schedule;
pub mod stats;
pub mod unavailability;
