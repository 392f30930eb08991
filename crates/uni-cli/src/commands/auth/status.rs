use serde::Serialize;
use uni_api::Transport;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    admin: bool,
    email: Option<String>,
    username: Option<String>,
    role: Option<String>,
    token_source: Option<&'static str>,
    note: Option<String>,
}

pub async fn handle<T: Transport>(ctx: &AppContext<T>, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.session();
    let note = match ctx.client.restore_user().await {
        Ok(Some(_)) => None,
        Ok(None) => Some("not signed in".to_string()),
        Err(error) => Some(error.to_string()),
    };
    let user = session.user();

    output(
        &AuthStatusResponse {
            authenticated: session.is_authenticated(),
            admin: session.is_admin(),
            email: user.as_ref().map(|u| u.email.clone()),
            username: user.as_ref().map(|u| u.username.clone()),
            role: user.as_ref().map(|u| u.role.to_string()),
            token_source: session.token_source().map(|source| source.as_str()),
            note,
        },
        flags.format,
    )
}
