//! # Authentication Module
//!
//! This module provides authentication-related utilities for the Rosteria
//! API: password hashing and verification, opaque session tokens, and the
//! [`Principal`] extractor that identifies the authenticated caller.
//!
//! The implementation uses Argon2, a secure password hashing algorithm,
//! to protect user passwords from common attacks like rainbow tables
//! and brute force attempts.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use axum::{extract::FromRequestParts, http::request::Parts};
use eyre::Result;
use rand::{distributions::Alphanumeric, Rng};
use rosteria_core::errors::RosterError;
use std::sync::Arc;
use uuid::Uuid;

use crate::middleware::error_handling::AppError;
use crate::ApiState;

/// Length of generated session tokens, in characters.
const SESSION_TOKEN_LEN: usize = 48;

/// Hashes a password using the Argon2 algorithm
///
/// This function securely hashes passwords before storage in the database,
/// automatically generating a random salt and using industry-standard
/// parameters for Argon2.
///
/// # Security Notes
///
/// - Uses a random salt for each password
/// - Uses default Argon2 parameters (memory: 19MiB, iterations: 3, parallelism: 4)
/// - Returns password in PHC string format (includes algorithm, version, parameters, salt, and hash)
pub fn hash_password(password: &str) -> Result<String> {
    // Generate a fresh, random salt
    let salt = SaltString::generate(&mut OsRng);

    // Create default Argon2 instance
    let argon2 = Argon2::default();

    // Hash the password with salt
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Verifies a plain text password against a stored PHC-format hash.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| eyre::eyre!("Invalid stored password hash: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Generates an opaque session token.
pub fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// The authenticated caller of a request.
///
/// Handlers take a `Principal` parameter instead of consulting any
/// ambient current-user state; authorization decisions always act on
/// this explicit value.
#[derive(Debug, Clone, Copy)]
pub struct Principal {
    pub account_id: Uuid,
    pub is_admin: bool,
}

impl Principal {
    /// Rejects non-administrator callers.
    pub fn require_admin(&self) -> Result<(), RosterError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(RosterError::Authorization(
                "Administrator access required".to_string(),
            ))
        }
    }
}

/// Extracts the `Principal` from the `Authorization: Bearer <token>`
/// header by resolving the session token against the database.
#[axum::async_trait]
impl FromRequestParts<Arc<ApiState>> for Principal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError(RosterError::Authentication(
                    "Missing authorization header".to_string(),
                ))
            })?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError(RosterError::Authentication(
                "Malformed authorization header".to_string(),
            ))
        })?;

        let account = rosteria_db::repositories::account::find_by_session(&state.db_pool, token)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| {
                AppError(RosterError::Authentication(
                    "Invalid or expired session".to_string(),
                ))
            })?;

        Ok(Principal {
            account_id: account.id,
            is_admin: account.is_admin,
        })
    }
}
