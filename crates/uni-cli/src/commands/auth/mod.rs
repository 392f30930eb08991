mod login;
mod logout;
mod status;

use uni_api::Transport;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::context::AppContext;

/// Handle `unidash auth <subcommand>`.
pub async fn handle<T: Transport>(
    action: &AuthCommands,
    ctx: &AppContext<T>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login::handle(args, ctx, flags).await,
        AuthCommands::Logout => logout::handle(ctx, flags).await,
        AuthCommands::Status => status::handle(ctx, flags).await,
    }
}
