//! # Folderlapse Core Library
//!
//! Interactive parameter resolution for folder-based timelapse rendering.
//! The library collects everything an external renderer needs (source folder,
//! frame rate, optional time-of-day window, overwrite and overlay switches),
//! applies the defaulting rules, and renders the result into the exact
//! argument vector the renderer understands.
//!
//! ## Architectural Philosophy
//!
//! The library mirrors a three-layer split so that the interactive front end
//! and the subprocess plumbing stay swappable:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`ParameterSet`,
//!   `FrameRate`, `TimeWindow`), path derivation, input validation and the
//!   argument builder. Nothing here touches a console.
//!
//! - **[`engine`]: The Logic Core.** The `ParameterResolver`, its
//!   configuration, the collaborator traits (`FolderPicker`, `Prompter`,
//!   `Renderer`), the session state machine and progress reporting.
//!
//! - **[`workflows`]: The Public API.** `workflows::launch::run` drives one
//!   complete session from folder selection to the renderer's exit code.

pub mod core;
pub mod engine;
pub mod workflows;
