use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("login required: run `unidash auth login`")]
    LoginRequired,

    #[error("this action is available to administrators only")]
    AdminRequired,

    #[error("session token expired: run `unidash auth login` again")]
    TokenExpired,

    #[error("session store error: {0}")]
    SessionStoreError(String),

    #[error("{0}")]
    Other(String),
}
