//! Error types and error handling for the application
//!
//! Only login can fail in the domain sense. Every other store operation is
//! total: unknown ids are silent no-ops, never errors.

use thiserror::Error;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// The credential exchange rejected the login
    #[error("Authentication failed: {0}")]
    AuthenticationFailure(String),

    /// Error occurred while reading or writing the identity record
    #[error("Persistence error: {0}")]
    Persistence(#[from] crate::state::PersistenceError),

    /// Fixture data could not be loaded
    #[error("Fixture data error: {0}")]
    Fixtures(String),
}

impl AppError {
    /// Message suitable for a user-facing notification
    pub fn user_message(&self) -> String {
        match self {
            AppError::AuthenticationFailure(_) => {
                "Login failed. Please check your credentials and try again.".to_string()
            }
            AppError::Persistence(_) => "Could not access local storage.".to_string(),
            AppError::Fixtures(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}
