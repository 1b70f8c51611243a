//! Core operations.
//!
//! This module contains the business logic for dtscompat commands,
//! separated from CLI argument parsing and output rendering.

pub mod fix;

pub use fix::{FixRequest, fix};
