//! # Core Module
//!
//! Stateless building blocks shared by the engine and the workflows.
//!
//! - **Models** ([`models`]) - The resolved `ParameterSet` and its value types
//! - **Paths** ([`paths`]) - Label and output derivation, local-path mapping
//! - **Validation** ([`validation`]) - Optional checks for free-text answers
//! - **Arguments** ([`args`]) - Rendering a `ParameterSet` into renderer flags

pub mod args;
pub mod models;
pub mod paths;
pub mod validation;
