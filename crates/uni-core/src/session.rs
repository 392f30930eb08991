//! Signed-in user as held by the session context.

use serde::{Deserialize, Serialize};

use crate::enums::UserRole;

/// The user attached to an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    /// Display name; falls back to the email when the profile has none.
    #[serde(default)]
    pub username: String,
}

impl SessionUser {
    #[must_use]
    pub fn new(email: impl Into<String>, role: UserRole, username: Option<String>) -> Self {
        let email = email.into();
        let username = username
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| email.clone());
        Self {
            email,
            role,
            username,
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_username_falls_back_to_email() {
        let user = SessionUser::new("a@b.edu", UserRole::User, Some("  ".into()));
        assert_eq!(user.username, "a@b.edu");
        assert!(!user.is_admin());
        assert!(SessionUser::new("x@y", UserRole::Admin, None).is_admin());
    }
}
