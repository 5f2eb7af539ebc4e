pub mod account;
pub mod assignment;
pub mod instrument;
pub mod invitation;
pub mod location;
pub mod musician;
pub mod schedule;
pub mod unavailability;
