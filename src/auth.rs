//! Credential exchange
//!
//! There is no real identity provider. `SimulatedAuthenticator` waits for a
//! fixed delay to stand in for the network round trip, then accepts any
//! non-empty email/password pair.

use crate::error::AppError;
use crate::state::User;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Exchanges credentials for a user identity
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Authenticate and return the synthesized user
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError>;
}

/// Authenticator with a fixed artificial latency
#[derive(Debug, Clone)]
pub struct SimulatedAuthenticator {
    delay: Duration,
}

impl SimulatedAuthenticator {
    /// Create an authenticator that waits `delay` before answering
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Authenticator for SimulatedAuthenticator {
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError> {
        debug!(delay_ms = self.delay.as_millis(), "Simulating credential exchange");
        tokio::time::sleep(self.delay).await;

        if email.is_empty() {
            return Err(AppError::AuthenticationFailure(
                "email is empty".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(AppError::AuthenticationFailure(
                "password is empty".to_string(),
            ));
        }

        Ok(User::from_email(email))
    }
}
