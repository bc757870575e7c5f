//! CLI argument definitions using clap derive macros.

use clap::{Args, Parser, Subcommand};

/// PCBA Line Operator CLI
///
/// Edit the 5-slot assembly sequence, validate it against the known-good
/// patterns, and query the process documentation.
#[derive(Parser, Debug)]
#[command(name = "pcba")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the current sequence and its validity
    Status {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Set the block type at a position (0-4)
    SetBlock {
        /// Position in the sequence
        pos: usize,
        /// Block type display name, e.g. "Soldering"
        block: String,
    },

    /// Set the sub-parameter at a position (0-4)
    SetParam {
        /// Position in the sequence
        pos: usize,
        /// Sub-parameter value, legal set depends on the block at `pos`
        value: String,
    },

    /// Overwrite the sequence with a valid pattern (1-9)
    Recipe {
        /// Pattern number
        number: usize,
    },

    /// Execute the current sequence if it is valid
    Execute,

    /// List the valid recipe patterns
    Recipes,

    /// Show each block type's legal sub-parameters
    Catalog,

    /// Documentation index (ingest, search)
    Rag(RagCommand),

    /// Show version
    Version,
}

#[derive(Args, Debug)]
pub struct RagCommand {
    #[command(subcommand)]
    pub action: RagAction,
}

#[derive(Subcommand, Debug)]
pub enum RagAction {
    /// Build the vector collection from the documents directory
    Ingest {
        /// Rebuild even when the collection is already populated
        #[arg(long)]
        force: bool,
    },

    /// Query the documentation
    Search {
        /// Free-text query
        query: String,

        /// Number of chunks to retrieve
        #[arg(short, long, default_value_t = pcba_rag::DEFAULT_K)]
        k: usize,
    },
}
