//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod fix;
mod output;

pub use fix::FixReport;
pub use output::{Report, TerminalOutput};
