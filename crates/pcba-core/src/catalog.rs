//! The static process catalog.
//!
//! Block types, their legal sub-parameters, and the table of pre-approved
//! recipes are all fixed at compile time. Validation iterates the recipe
//! table in order, so the row order here is load-bearing: the first
//! matching row wins.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Number of pipeline positions in a sequence.
pub const SEQUENCE_LEN: usize = 5;

/// A named stage in the simulated assembly pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockType {
    #[serde(rename = "Solder Paste Application")]
    SolderPasteApplication,
    #[serde(rename = "Component Placement")]
    ComponentPlacement,
    Soldering,
    #[serde(rename = "Optical Inspection")]
    OpticalInspection,
    Testing,
}

impl BlockType {
    /// All block types, in catalog order.
    pub const ALL: [BlockType; SEQUENCE_LEN] = [
        BlockType::SolderPasteApplication,
        BlockType::ComponentPlacement,
        BlockType::Soldering,
        BlockType::OpticalInspection,
        BlockType::Testing,
    ];

    /// Canonical display name.
    pub fn name(&self) -> &'static str {
        match self {
            BlockType::SolderPasteApplication => "Solder Paste Application",
            BlockType::ComponentPlacement => "Component Placement",
            BlockType::Soldering => "Soldering",
            BlockType::OpticalInspection => "Optical Inspection",
            BlockType::Testing => "Testing",
        }
    }

    /// Look up a block type by its canonical display name.
    pub fn parse(name: &str) -> Option<BlockType> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    /// Legal sub-parameters for this block, in catalog order.
    ///
    /// The first entry doubles as the default a slot falls back to when it
    /// is switched to this block type.
    pub fn sub_params(&self) -> &'static [&'static str] {
        match self {
            BlockType::SolderPasteApplication => &["lead-free", "leaded", "low-temp"],
            BlockType::ComponentPlacement => &["high-speed", "high-precision", "flexible"],
            BlockType::Soldering => &["235C", "245C", "260C"],
            BlockType::OpticalInspection => &["2D", "3D", "Automated"],
            BlockType::Testing => &["in-circuit", "functional", "boundary-scan"],
        }
    }

    /// The sub-parameter a slot takes when it is switched to this block.
    pub fn default_sub_param(&self) -> &'static str {
        self.sub_params()[0]
    }

    /// Canonicalize a sub-parameter value against this block's legal set.
    ///
    /// Returns the `'static` catalog entry so callers never store an
    /// unvetted string.
    pub fn canonical_sub_param(&self, value: &str) -> Option<&'static str> {
        self.sub_params().iter().copied().find(|p| *p == value)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlockType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::UnknownBlockType(s.to_string()))
    }
}

/// One pre-approved 5-step process configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    /// Human-readable description of the product class this recipe serves.
    pub name: &'static str,
    /// Ordered (block, sub-parameter) steps.
    pub steps: [(BlockType, &'static str); SEQUENCE_LEN],
}

use BlockType::*;

/// The fixed table of known-valid recipes.
///
/// Recipe 1 is also the default sequence a fresh orchestrator starts from.
pub const RECIPES: [Recipe; 9] = [
    Recipe {
        name: "Standard RoHS-compliant consumer electronics",
        steps: [
            (SolderPasteApplication, "lead-free"),
            (ComponentPlacement, "high-speed"),
            (Soldering, "235C"),
            (OpticalInspection, "2D"),
            (Testing, "in-circuit"),
        ],
    },
    Recipe {
        name: "High-reliability industrial equipment",
        steps: [
            (SolderPasteApplication, "leaded"),
            (ComponentPlacement, "high-precision"),
            (Soldering, "245C"),
            (OpticalInspection, "3D"),
            (Testing, "functional"),
        ],
    },
    Recipe {
        name: "Specialized high-temperature applications",
        steps: [
            (SolderPasteApplication, "low-temp"),
            (ComponentPlacement, "flexible"),
            (Soldering, "260C"),
            (OpticalInspection, "Automated"),
            (Testing, "boundary-scan"),
        ],
    },
    Recipe {
        name: "High-reliability aerospace/medical",
        steps: [
            (SolderPasteApplication, "lead-free"),
            (ComponentPlacement, "high-precision"),
            (Soldering, "245C"),
            (OpticalInspection, "3D"),
            (Testing, "boundary-scan"),
        ],
    },
    Recipe {
        name: "Cost-optimized consumer electronics",
        steps: [
            (SolderPasteApplication, "leaded"),
            (ComponentPlacement, "high-speed"),
            (Soldering, "235C"),
            (OpticalInspection, "2D"),
            (Testing, "functional"),
        ],
    },
    Recipe {
        name: "Low-temperature sensitive components",
        steps: [
            (SolderPasteApplication, "low-temp"),
            (ComponentPlacement, "high-precision"),
            (Soldering, "235C"),
            (OpticalInspection, "3D"),
            (Testing, "in-circuit"),
        ],
    },
    Recipe {
        name: "High-volume automotive production",
        steps: [
            (SolderPasteApplication, "lead-free"),
            (ComponentPlacement, "high-speed"),
            (Soldering, "260C"),
            (OpticalInspection, "Automated"),
            (Testing, "functional"),
        ],
    },
    Recipe {
        name: "Flexible/wearable electronics",
        steps: [
            (SolderPasteApplication, "low-temp"),
            (ComponentPlacement, "flexible"),
            (Soldering, "235C"),
            (OpticalInspection, "2D"),
            (Testing, "functional"),
        ],
    },
    Recipe {
        name: "Military/defense grade",
        steps: [
            (SolderPasteApplication, "leaded"),
            (ComponentPlacement, "high-precision"),
            (Soldering, "260C"),
            (OpticalInspection, "3D"),
            (Testing, "boundary-scan"),
        ],
    },
];
