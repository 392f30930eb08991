use anyhow::{Context, bail};
use serde::Serialize;
use uni_api::Transport;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::commands::shared::prompt;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    email: String,
    username: String,
    role: String,
}

pub async fn handle<T: Transport>(
    args: &AuthLoginArgs,
    ctx: &AppContext<T>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let email = args.email.trim();
    if email.is_empty() {
        bail!("auth login: --email must not be empty");
    }
    let password = match &args.password {
        Some(password) => password.clone(),
        None => prompt::read_line("Password: ")?,
    };
    if password.is_empty() {
        bail!("auth login: password must not be empty");
    }

    let user = ctx
        .client
        .login(email, &password)
        .await
        .context("login failed")?;

    output(
        &AuthLoginResponse {
            authenticated: true,
            email: user.email,
            username: user.username,
            role: user.role.to_string(),
        },
        flags.format,
    )
}
