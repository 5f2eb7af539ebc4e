pub mod invitation;
pub mod musician;
pub mod reference;
pub mod schedule;
pub mod unavailability;
