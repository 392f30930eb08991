use serde::Serialize;
use uni_api::Transport;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
}

pub async fn handle<T: Transport>(ctx: &AppContext<T>, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.client.logout().await?;
    output(&AuthLogoutResponse { cleared: true }, flags.format)
}
