use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Sign in with email and password.
    Login(AuthLoginArgs),
    /// Sign out and remove the stored session.
    Logout,
    /// Show the current session.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    #[arg(long)]
    pub email: String,
    /// Read from `UNIDASH_PASSWORD`, or prompted for when absent.
    #[arg(long, env = "UNIDASH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}
