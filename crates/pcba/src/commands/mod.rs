//! Command implementations for the pcba CLI.
//!
//! Each submodule implements the logic for a command group.

pub mod line;
pub mod rag;
