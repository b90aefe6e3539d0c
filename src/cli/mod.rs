//! CLI command handlers.
//!
//! Testable command handlers invoked by main.rs. Each handler implements
//! the logic for one subcommand and returns a process exit code.

mod render;

pub use render::run_render;

// Re-export config types used by handlers
pub use crate::config::RenderConfig;
