use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::cli::subcommands::{AuthCommands, EntityCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign out, and show the current session.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Summary panels: department performance, publications, students, budget.
    Dashboard,
    /// Colleges.
    College {
        #[command(subcommand)]
        action: EntityCommands,
    },
    /// Departments (belong to a college).
    Department {
        #[command(subcommand)]
        action: EntityCommands,
    },
    /// Students (belong to a department).
    Student {
        #[command(subcommand)]
        action: EntityCommands,
    },
    /// Yearly department KPIs.
    Kpi {
        #[command(subcommand)]
        action: EntityCommands,
    },
    /// Publications.
    Publication {
        #[command(subcommand)]
        action: EntityCommands,
    },
    /// Research projects.
    Project {
        #[command(subcommand)]
        action: EntityCommands,
    },
    /// Research project expenses.
    Expense {
        #[command(subcommand)]
        action: EntityCommands,
    },
    /// Replace backend data from spreadsheets (administrators only).
    Upload(UploadArgs),
    /// Print the JSON Schema of a record type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct UploadArgs {
    /// Spreadsheets to upload; more than one is sent as a batch.
    #[arg(required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Accept `.csv` files as well as `.xlsx` / `.xls`.
    #[arg(long)]
    pub csv: bool,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Record type.
    pub entity: SchemaTarget,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaTarget {
    College,
    Department,
    Student,
    Kpi,
    Publication,
    Project,
    Expense,
    Summary,
}
