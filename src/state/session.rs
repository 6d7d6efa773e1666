//! Session and user identity

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role given to every freshly synthesized user
pub const DEFAULT_ROLE: &str = "user";

/// Signed-in user identity
///
/// This is the record persisted across restarts. The role is informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: String,
    /// Email used to sign in
    pub email: String,
    /// Display name
    pub name: String,
    /// Informational role
    pub role: String,
}

impl User {
    /// Synthesize a user from an email address
    ///
    /// The id is fresh, the name is the local part of the email (the whole
    /// string when there is no `@`), and the role is `"user"`.
    pub fn from_email(email: &str) -> Self {
        let name = email.split('@').next().unwrap_or(email).to_string();
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            name,
            role: DEFAULT_ROLE.to_string(),
        }
    }
}

/// Authentication session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    /// Whether a user is signed in
    pub is_logged_in: bool,
    /// The signed-in user, if any
    pub user: Option<User>,
}

impl Session {
    /// Session for a signed-in user
    pub fn signed_in(user: User) -> Self {
        Self {
            is_logged_in: true,
            user: Some(user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_email() {
        let user = User::from_email("a@b.com");
        assert_eq!(user.name, "a");
        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.role, "user");
        assert!(!user.id.is_empty());
    }

    #[test]
    fn test_user_from_email_without_at() {
        let user = User::from_email("plainname");
        assert_eq!(user.name, "plainname");
    }

    #[test]
    fn test_user_ids_are_fresh() {
        assert_ne!(User::from_email("a@b.com").id, User::from_email("a@b.com").id);
    }

    #[test]
    fn test_default_session_is_signed_out() {
        let session = Session::default();
        assert!(!session.is_logged_in);
        assert!(session.user.is_none());
    }
}
