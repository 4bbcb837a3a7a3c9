//! # dbot-cli
//!
//! Argument parsing, config loading and bot assembly for the `dbot` binary.

pub mod app;
pub mod cli;

pub use app::{base_registry, build_context, run};
pub use cli::{load_config, mask_token, Cli, Commands};
