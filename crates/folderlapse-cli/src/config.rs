//! Layered launcher configuration.
//!
//! Values are merged in increasing priority: built-in [`defaults`], the TOML
//! [`file`], `--set KEY=VALUE` overrides, then explicit command-line flags.
//! The result is an [`models::AppConfig`] produced by [`builder::build_config`].

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;

pub use builder::build_config;
pub use models::AppConfig;
