//! Data models describing one timelapse rendering request.
//!
//! A [`params::ParameterSet`] is assembled exactly once per interactive
//! session through [`params::ParameterSetBuilder`] and is immutable afterwards.

pub mod params;
