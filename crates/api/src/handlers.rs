//! Request handlers for the API.
//!
//! Handlers translate HTTP requests into repository calls and core
//! domain logic, and map failures through [`AppError`]. Every handler
//! that requires a signed-in caller takes a [`Principal`] parameter.
//!
//! [`AppError`]: crate::middleware::error_handling::AppError
//! [`Principal`]: crate::middleware::auth::Principal

/// Sign-in, current-user, and password management
pub mod auth;
/// The date-eligibility filter
pub mod availability;
/// Invitation lifecycle: issue, verify, accept, resend
pub mod invitation;
/// Musician administration and profile management
pub mod musician;
/// Reference data: instruments and locations
pub mod reference;
/// Schedule CRUD, status transitions, and responses
pub mod schedule;
/// Dashboard and personal statistics
pub mod stats;
/// A musician's own unavailability periods
pub mod unavailability;

use rosteria_core::models::musician::Musician;
use rosteria_core::models::unavailability::UnavailabilityPeriod;
use rosteria_db::models::{DbMusician, DbUnavailability};

/// Lifts a musician row into the domain model.
pub(crate) fn musician_from_row(row: DbMusician) -> Musician {
    Musician {
        id: row.id,
        name: row.name,
        whatsapp: row.whatsapp,
        email: row.email,
        active: row.active,
        account_id: row.account_id,
        created_at: row.created_at,
    }
}

/// Lifts an unavailability row into the domain model.
pub(crate) fn period_from_row(row: DbUnavailability) -> UnavailabilityPeriod {
    UnavailabilityPeriod {
        id: row.id,
        musician_id: row.musician_id,
        start_date: row.start_date,
        end_date: row.end_date,
        reason: row.reason,
    }
}
