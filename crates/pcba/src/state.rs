//! Persisted operator sequence.
//!
//! The CLI keeps the 5-slot sequence in a toml file under the data
//! directory and replays every entry through the core setters on load, so
//! a hand-edited file cannot smuggle in an illegal pairing.

use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use pcba_core::{Orchestrator, SEQUENCE_LEN};

#[derive(Debug, Serialize, Deserialize)]
struct SavedStep {
    block: String,
    sub_param: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct SavedSequence {
    steps: Vec<SavedStep>,
}

/// Load the persisted sequence, or the default when the file is missing.
pub fn load(path: &Path) -> Result<Orchestrator> {
    if !path.exists() {
        return Ok(Orchestrator::new());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file {path:?}"))?;
    let saved: SavedSequence =
        toml::from_str(&content).with_context(|| format!("Failed to parse state file {path:?}"))?;

    ensure!(
        saved.steps.len() == SEQUENCE_LEN,
        "State file {path:?} has {} steps, expected {SEQUENCE_LEN}",
        saved.steps.len()
    );

    let mut line = Orchestrator::new();
    for (pos, step) in saved.steps.iter().enumerate() {
        line.set_block_named(pos, &step.block)?;
        line.set_sub_param(pos, &step.sub_param)?;
    }
    Ok(line)
}

/// Persist the sequence.
pub fn save(line: &Orchestrator, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let saved = SavedSequence {
        steps: line
            .sequence()
            .slots()
            .iter()
            .map(|slot| SavedStep {
                block: slot.block.name().to_string(),
                sub_param: slot.sub_param.to_string(),
            })
            .collect(),
    };

    std::fs::write(path, toml::to_string_pretty(&saved)?)
        .with_context(|| format!("Failed to write state file {path:?}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcba_core::Validation;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_default_sequence() {
        let temp = tempdir().unwrap();
        let line = load(&temp.path().join("sequence.toml")).unwrap();
        assert_eq!(line.validation(), Validation::Valid { number: 1 });
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("sequence.toml");

        let mut line = Orchestrator::new();
        line.apply_recipe(9).unwrap();
        line.set_sub_param(2, "235C").unwrap();
        save(&line, &path).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.sequence(), line.sequence());
        assert_eq!(loaded.validation(), Validation::Invalid);
    }

    #[test]
    fn test_tampered_sub_param_is_rejected() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("sequence.toml");

        save(&Orchestrator::new(), &path).unwrap();

        let tampered = std::fs::read_to_string(&path)
            .unwrap()
            .replace("lead-free", "300C");
        std::fs::write(&path, tampered).unwrap();

        let err = load(&path).unwrap_err().to_string();
        assert!(err.contains("300C"));
    }

    #[test]
    fn test_wrong_step_count_is_rejected() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("sequence.toml");
        std::fs::write(
            &path,
            "[[steps]]\nblock = \"Soldering\"\nsub_param = \"235C\"\n",
        )
        .unwrap();

        let err = load(&path).unwrap_err().to_string();
        assert!(err.contains("expected 5"));
    }
}
