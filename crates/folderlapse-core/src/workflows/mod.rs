//! # Workflows Module
//!
//! Top-level entry points that run a complete launch session.
//!
//! - **Launch Workflow** ([`launch`]) - Folder selection, parameter resolution,
//!   argument construction and renderer invocation, in that order.

pub mod launch;
