use clap::Subcommand;

/// Commands shared by every managed entity.
#[derive(Clone, Debug, Subcommand)]
pub enum EntityCommands {
    /// List all records.
    List,
    /// Show one record.
    Get { id: i64 },
    /// Create a record from `field=value` pairs.
    Create {
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
    },
    /// Replace a record: unset fields keep their current values.
    Update {
        id: i64,
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
    },
    /// Change only the given fields.
    Patch {
        id: i64,
        #[arg(long = "set", value_name = "FIELD=VALUE", required = true)]
        set: Vec<String>,
    },
    /// Delete a record.
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    /// List parent records usable as the foreign key.
    Options,
}
