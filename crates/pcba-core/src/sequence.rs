//! Sequence state, mutators, and validation.
//!
//! The [`Orchestrator`] owns the one mutable [`Sequence`] and is the only
//! way to change it. Every mutator validates its input first and leaves the
//! sequence untouched on failure; callers re-read [`Orchestrator::validation`]
//! after any successful mutation to refresh derived labels.

use std::fmt;

use serde::Serialize;

use crate::catalog::{BlockType, RECIPES, Recipe, SEQUENCE_LEN};
use crate::error::{Error, Result};

/// One pipeline position: a block type plus its active sub-parameter.
///
/// `sub_param` is always a member of `block.sub_params()`; both mutators
/// canonicalize through the catalog before storing, so an illegal pairing
/// is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub block: BlockType,
    pub sub_param: &'static str,
}

/// The operator's current 5-slot configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sequence([Slot; SEQUENCE_LEN]);

impl Sequence {
    fn from_recipe(recipe: &Recipe) -> Self {
        Sequence(recipe.steps.map(|(block, sub_param)| Slot { block, sub_param }))
    }

    /// The slots in pipeline order.
    pub fn slots(&self) -> &[Slot; SEQUENCE_LEN] {
        &self.0
    }

    /// Element-wise equality against a recipe.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.0
            .iter()
            .zip(recipe.steps.iter())
            .all(|(slot, (block, param))| slot.block == *block && slot.sub_param == *param)
    }
}

impl Default for Sequence {
    /// Recipe 1: the standard RoHS-compliant consumer line.
    fn default() -> Self {
        Sequence::from_recipe(&RECIPES[0])
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{} ({})", slot.block, slot.sub_param)?;
        }
        Ok(())
    }
}

/// Outcome of validating a sequence against the recipe table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Validation {
    /// The sequence equals recipe `number` (1-based, first matching row).
    Valid { number: usize },
    Invalid,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid { .. })
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validation::Valid { number } => write!(f, "Valid Combination (Pattern {number})"),
            Validation::Invalid => f.write_str("Invalid sequence"),
        }
    }
}

/// Owns the sequence state and enforces the mutation rules.
///
/// Single-writer by construction: callers that share an orchestrator across
/// tasks must wrap it in a lock so no observer sees a partially-updated
/// sequence.
#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    sequence: Sequence,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current sequence.
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Validate the current sequence against the recipe table.
    ///
    /// Scans in table order and reports the first matching row.
    pub fn validation(&self) -> Validation {
        for (idx, recipe) in RECIPES.iter().enumerate() {
            if self.sequence.matches(recipe) {
                return Validation::Valid { number: idx + 1 };
            }
        }
        Validation::Invalid
    }

    /// Set the block type at a position.
    ///
    /// Resets the slot's sub-parameter to the new block's first legal value.
    pub fn set_block(&mut self, pos: usize, block: BlockType) -> Result<&Sequence> {
        Self::check_pos(pos)?;
        self.sequence.0[pos] = Slot {
            block,
            sub_param: block.default_sub_param(),
        };
        Ok(&self.sequence)
    }

    /// Set the block type at a position from its display name.
    pub fn set_block_named(&mut self, pos: usize, name: &str) -> Result<&Sequence> {
        Self::check_pos(pos)?;
        let block = name.parse::<BlockType>()?;
        self.set_block(pos, block)
    }

    /// Set the sub-parameter at a position.
    ///
    /// The value must be legal for the block currently stored at `pos`.
    pub fn set_sub_param(&mut self, pos: usize, value: &str) -> Result<&Sequence> {
        Self::check_pos(pos)?;
        let block = self.sequence.0[pos].block;
        let sub_param = block
            .canonical_sub_param(value)
            .ok_or_else(|| Error::InvalidSubParam {
                value: value.to_string(),
                block: block.name(),
                allowed: block.sub_params(),
            })?;
        self.sequence.0[pos].sub_param = sub_param;
        Ok(&self.sequence)
    }

    /// Overwrite the whole sequence with recipe `number` (1-based).
    pub fn apply_recipe(&mut self, number: usize) -> Result<&Sequence> {
        if number < 1 || number > RECIPES.len() {
            return Err(Error::InvalidRecipeNumber(number, RECIPES.len()));
        }
        self.sequence = Sequence::from_recipe(&RECIPES[number - 1]);
        Ok(&self.sequence)
    }

    /// Execute the current sequence if it is valid.
    ///
    /// A guarded no-op: no machine action happens, this is the semantic
    /// confirmation step. Safe to call repeatedly.
    pub fn execute(&self) -> Result<usize> {
        match self.validation() {
            Validation::Valid { number } => Ok(number),
            Validation::Invalid => Err(Error::InvalidSequence),
        }
    }

    fn check_pos(pos: usize) -> Result<()> {
        if pos < SEQUENCE_LEN {
            Ok(())
        } else {
            Err(Error::SlotOutOfRange(pos))
        }
    }
}
