/// Password hashing, session tokens, and the request `Principal`
pub mod auth;
/// Error handling middleware for standardized error responses
pub mod error_handling;
