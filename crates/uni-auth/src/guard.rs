//! Route guard: who may reach which screen.

use crate::context::SessionContext;
use crate::error::AuthError;

/// Access level required by a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Any signed-in user (dashboard and entity pages).
    Authenticated,
    /// Administrators only (data upload).
    AdminOnly,
}

/// Where a rejected visitor is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Login,
    Dashboard,
}

/// Why the guard refused entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    LoginRequired,
    AdminRequired,
}

impl Denial {
    #[must_use]
    pub const fn redirect(self) -> Redirect {
        match self {
            Self::LoginRequired => Redirect::Login,
            Self::AdminRequired => Redirect::Dashboard,
        }
    }
}

impl From<Denial> for AuthError {
    fn from(denial: Denial) -> Self {
        match denial {
            Denial::LoginRequired => Self::LoginRequired,
            Denial::AdminRequired => Self::AdminRequired,
        }
    }
}

/// Decide whether `session` may enter a route requiring `access`.
///
/// # Errors
///
/// Returns the [`Denial`] when the session is not signed in, or is signed in
/// without the admin role on an admin-only route.
pub fn check(session: &SessionContext, access: Access) -> Result<(), Denial> {
    if !session.is_authenticated() {
        return Err(Denial::LoginRequired);
    }
    if access == Access::AdminOnly && !session.is_admin() {
        return Err(Denial::AdminRequired);
    }
    Ok(())
}
