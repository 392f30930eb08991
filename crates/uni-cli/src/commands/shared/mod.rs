pub mod assign;
pub mod prompt;
