//! Login, logout, and profile endpoints.

use serde_json::json;
use uni_core::responses::{LoginResponse, Profile};
use uni_core::session::SessionUser;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::{Method, Transport};

const LOGIN_PATH: &str = "/auth/login/";
const LOGOUT_PATH: &str = "/auth/logout/";
const PROFILE_PATH: &str = "/auth/profile/";

impl<T: Transport> ApiClient<T> {
    /// Sign in and persist the session.
    ///
    /// The token is attached to the session first so the profile request is
    /// authenticated. If the profile cannot be fetched the session is rolled
    /// back; a half-signed-in state is never persisted.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if either request fails or the session file
    /// cannot be written.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser, ApiError> {
        let login: LoginResponse = self
            .send_json(
                Method::Post,
                LOGIN_PATH,
                json!({ "email": email, "password": password }),
            )
            .await?;
        self.session().set_token(login.access_token);

        let profile = match self.profile().await {
            Ok(profile) => profile,
            Err(error) => {
                tracing::warn!(%error, "profile fetch failed after login; rolling back");
                if let Err(error) = self.session().clear() {
                    tracing::warn!(%error, "failed to clear session");
                }
                return Err(error);
            }
        };

        let user = SessionUser::new(login.user.email, profile.role, profile.username);
        self.session().set_user(user.clone())?;
        tracing::info!(email = %user.email, role = %user.role, "signed in");
        Ok(user)
    }

    /// Fetch the signed-in user's profile (role and display name).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn profile(&self) -> Result<Profile, ApiError> {
        self.get_json(PROFILE_PATH).await
    }

    /// Fill in the session user when only a token is known (for example a
    /// token supplied through the environment).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the profile request fails.
    pub async fn restore_user(&self) -> Result<Option<SessionUser>, ApiError> {
        if let Some(user) = self.session().user() {
            return Ok(Some(user));
        }
        if self.session().token().is_none() {
            return Ok(None);
        }
        let profile = self.profile().await?;
        let Some(email) = profile.email.clone() else {
            return Err(ApiError::Decode("profile has no email".into()));
        };
        let user = SessionUser::new(email, profile.role, profile.username);
        self.session().set_user(user.clone())?;
        Ok(Some(user))
    }

    /// Sign out. The backend call is best effort; the local session is
    /// cleared regardless of its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Session`] only if the session file cannot be removed.
    pub async fn logout(&self) -> Result<(), ApiError> {
        if self.session().token().is_some()
            && let Err(error) = self.send_empty(Method::Post, LOGOUT_PATH).await
        {
            tracing::warn!(%error, "logout request failed; clearing local session anyway");
        }
        self.session().clear()?;
        tracing::info!("signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use pretty_assertions::assert_eq;
    use uni_auth::SessionContext;
    use uni_core::enums::UserRole;

    fn client(mock: MockTransport) -> ApiClient<MockTransport> {
        ApiClient::new(mock, SessionContext::in_memory())
    }

    #[tokio::test]
    async fn login_sets_token_then_user() {
        let mock = MockTransport::new();
        mock.reply(
            Method::Post,
            LOGIN_PATH,
            200,
            json!({"access_token": "jwt-1", "refresh_token": "r", "user": {"id": "u1", "email": "admin@uni.edu"}}),
        );
        mock.reply(
            Method::Get,
            PROFILE_PATH,
            200,
            json!({"id": "u1", "role": "admin", "username": "Dean"}),
        );
        let client = client(mock);

        let user = client.login("admin@uni.edu", "secret1").await.unwrap();
        assert_eq!(user.username, "Dean");
        assert_eq!(user.role, UserRole::Admin);
        assert!(client.session().is_admin());

        let requests = client.transport().requests();
        assert_eq!(requests[0].bearer, None);
        assert_eq!(requests[1].path, PROFILE_PATH);
        assert_eq!(requests[1].bearer.as_deref(), Some("jwt-1"));
    }

    #[tokio::test]
    async fn failed_profile_rolls_back_token() {
        let mock = MockTransport::new();
        mock.reply(
            Method::Post,
            LOGIN_PATH,
            200,
            json!({"access_token": "jwt-1", "user": {"email": "a@uni.edu"}}),
        );
        mock.reply(Method::Get, PROFILE_PATH, 404, json!({"message": "no role"}));
        let client = client(mock);

        let err = client.login("a@uni.edu", "secret1").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(client.session().token(), None);
        assert!(!client.session().is_authenticated());
    }

    #[tokio::test]
    async fn bad_credentials_surface_server_message() {
        let mock = MockTransport::new();
        mock.reply(
            Method::Post,
            LOGIN_PATH,
            401,
            json!({"message": "invalid credentials", "code": "INVALID_CREDENTIALS"}),
        );
        let client = client(mock);
        let err = client.login("a@uni.edu", "wrong-pw").await.unwrap_err();
        assert_eq!(err.server_message(), Some("invalid credentials"));
    }

    #[tokio::test]
    async fn logout_clears_even_when_backend_fails() {
        let mock = MockTransport::new();
        mock.unreachable(Method::Post, LOGOUT_PATH);
        let session = SessionContext::in_memory();
        session.set_token("t");
        session
            .set_user(SessionUser::new("a@uni.edu", UserRole::User, None))
            .unwrap();
        let client = ApiClient::new(mock, session.clone());

        client.logout().await.unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(client.transport().count(Method::Post, LOGOUT_PATH), 1);
    }

    #[tokio::test]
    async fn restore_user_fetches_profile_for_bare_token() {
        let mock = MockTransport::new();
        mock.reply(
            Method::Get,
            PROFILE_PATH,
            200,
            json!({"role": "user", "username": "", "email": "ta@uni.edu"}),
        );
        let session = SessionContext::in_memory();
        session.set_token("env-token");
        let client = ApiClient::new(mock, session.clone());

        let user = client.restore_user().await.unwrap().unwrap();
        assert_eq!(user.username, "ta@uni.edu");
        assert!(session.is_authenticated());
        assert!(!session.is_admin());
    }
}
