//! pcba-core - Core library for the PCBA line orchestrator
//!
//! This crate provides the shared process logic between the pcba CLI and
//! pcba-server:
//!
//! - **catalog**: the fixed block-type catalog and the recipe table
//! - **sequence**: the 5-slot sequence state, its mutators, and validation
//! - **error**: error types

pub mod catalog;
pub mod error;
pub mod sequence;

// Re-export commonly used types
pub use catalog::{BlockType, Recipe, RECIPES, SEQUENCE_LEN};
pub use error::{Error, Result};
pub use sequence::{Orchestrator, Sequence, Slot, Validation};
