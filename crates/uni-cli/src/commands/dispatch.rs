use uni_api::Transport;
use uni_core::entities::{
    College, Department, DepartmentKpi, ProjectExpense, Publication, ResearchProject, Student,
};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch<T: Transport>(
    command: Commands,
    ctx: &AppContext<T>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => commands::auth::handle(&action, ctx, flags).await,
        Commands::Dashboard => commands::dashboard::handle(ctx, flags).await,
        Commands::College { action } => {
            commands::entity::handle::<College, T>(&action, ctx, flags).await
        }
        Commands::Department { action } => {
            commands::entity::handle::<Department, T>(&action, ctx, flags).await
        }
        Commands::Student { action } => {
            commands::entity::handle::<Student, T>(&action, ctx, flags).await
        }
        Commands::Kpi { action } => {
            commands::entity::handle::<DepartmentKpi, T>(&action, ctx, flags).await
        }
        Commands::Publication { action } => {
            commands::entity::handle::<Publication, T>(&action, ctx, flags).await
        }
        Commands::Project { action } => {
            commands::entity::handle::<ResearchProject, T>(&action, ctx, flags).await
        }
        Commands::Expense { action } => {
            commands::entity::handle::<ProjectExpense, T>(&action, ctx, flags).await
        }
        Commands::Upload(args) => commands::upload::handle(&args, ctx, flags).await,
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
