//! Process-wide session handle.
//!
//! `SessionContext` is a cheap, cloneable handle. Every clone sees the same
//! state, so the API client, pages, and commands all agree on who is signed
//! in. `is_authenticated` is derived from the presence of a user, so it can
//! never disagree with it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use uni_core::session::SessionUser;

use crate::error::AuthError;
use crate::refresh::is_expired;
use crate::store::{PersistedSession, SessionStore};

/// Env var consulted when no persisted session holds a token.
pub const TOKEN_ENV_VAR: &str = "UNIDASH_AUTH__TOKEN";

/// Where the current token came from, for `auth status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Session,
    Env,
}

impl TokenSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Session => "session file",
            Self::Env => "env",
        }
    }
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    source: Option<TokenSource>,
    user: Option<SessionUser>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    state: Arc<Mutex<SessionState>>,
    store: Option<SessionStore>,
}

impl SessionContext {
    /// An empty session that is never persisted.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Restore the session from `store`, falling back to [`TOKEN_ENV_VAR`].
    #[must_use]
    pub fn hydrate(store: SessionStore) -> Self {
        let env_token = std::env::var(TOKEN_ENV_VAR).ok();
        Self::hydrate_with(store, env_token)
    }

    /// [`hydrate`](Self::hydrate) with an explicit env token.
    ///
    /// Priority: persisted session, then `env_token`. A token whose `exp` is
    /// in the past counts as absent; an expired persisted session is removed.
    #[must_use]
    pub fn hydrate_with(store: SessionStore, env_token: Option<String>) -> Self {
        let now = Utc::now();
        let mut state = SessionState::default();

        if let Some(persisted) = store.load() {
            match persisted.token {
                Some(token) if !token.is_empty() && !is_expired(&token, now) => {
                    state.token = Some(token);
                    state.source = Some(TokenSource::Session);
                    state.user = persisted.user;
                }
                Some(_) => {
                    tracing::info!("persisted session expired; discarding");
                    if let Err(error) = store.delete() {
                        tracing::warn!(%error, "failed to remove expired session");
                    }
                }
                None => {}
            }
        }

        if state.token.is_none()
            && let Some(token) = env_token.filter(|t| !t.is_empty())
        {
            if is_expired(&token, now) {
                tracing::warn!("{TOKEN_ENV_VAR} holds an expired token; ignoring it");
            } else {
                state.token = Some(token);
                state.source = Some(TokenSource::Env);
            }
        }

        Self {
            state: Arc::new(Mutex::new(state)),
            store: Some(store),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    #[must_use]
    pub fn token_source(&self) -> Option<TokenSource> {
        self.lock().source
    }

    #[must_use]
    pub fn user(&self) -> Option<SessionUser> {
        self.lock().user.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock().user.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.lock().user.as_ref().is_some_and(SessionUser::is_admin)
    }

    /// Attach a freshly issued token. Not persisted until a user is set.
    pub fn set_token(&self, token: impl Into<String>) {
        let mut state = self.lock();
        state.token = Some(token.into());
        state.source = Some(TokenSource::Session);
    }

    /// Attach the signed-in user and persist the session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStoreError` if the session file cannot be written.
    pub fn set_user(&self, user: SessionUser) -> Result<(), AuthError> {
        let snapshot = {
            let mut state = self.lock();
            state.user = Some(user);
            PersistedSession {
                token: state.token.clone(),
                user: state.user.clone(),
            }
        };
        match &self.store {
            Some(store) => store.save(&snapshot),
            None => Ok(()),
        }
    }

    /// Drop the session from memory and disk.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStoreError` if the session file cannot be
    /// removed. Memory is cleared regardless.
    pub fn clear(&self) -> Result<(), AuthError> {
        *self.lock() = SessionState::default();
        match &self.store {
            Some(store) => store.delete(),
            None => Ok(()),
        }
    }
}
