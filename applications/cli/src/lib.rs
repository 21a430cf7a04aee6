/// Employee CLI - terminal front end for the employee directory
pub mod config;
pub mod error;
pub mod prompt;
pub mod render;
