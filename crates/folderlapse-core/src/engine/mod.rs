//! # Engine Module
//!
//! The interactive logic of a launch session.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Resolver profiles, prompt styles and defaults
//! - **Collaborators** ([`collaborators`]) - Traits for the folder picker, the prompt
//!   source and the renderer process
//! - **Resolution** ([`resolver`]) - Turning prompts into a `ParameterSet`
//! - **Session Tracking** ([`session`]) - The launch state machine
//! - **Progress Monitoring** ([`progress`]) - Progress reporting to the front end
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod collaborators;
pub mod config;
pub mod error;
pub mod progress;
pub mod resolver;
pub mod session;
