pub mod commands;
pub mod errors;
pub mod help;
pub mod output;
pub mod prompts;
pub mod registry;
pub mod render;
mod shell;
pub mod shell_context;

pub use shell::{run_cli, SCRIPT_MODE_ENV};
