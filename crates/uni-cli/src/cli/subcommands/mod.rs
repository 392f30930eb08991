pub mod auth;
pub mod entity;

pub use auth::AuthCommands;
pub use entity::EntityCommands;
