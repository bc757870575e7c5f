//! Markdown document loading.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{RagError, Result};

/// A markdown source document with derived metadata.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: PathBuf,
    /// Filename without extension.
    pub filename: String,
    /// First non-empty line with any leading `#` markers stripped, falling
    /// back to the filename stem.
    pub title: String,
    pub content: String,
}

/// Loads `*.md` files from a flat documents directory.
#[derive(Debug, Clone)]
pub struct MarkdownLoader {
    dir: PathBuf,
}

impl MarkdownLoader {
    /// Create a loader. Fails when the directory is missing so the caller
    /// learns about a misconfigured docs path at startup, not at query time.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(RagError::DocumentsDirMissing(dir));
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load all markdown documents, sorted by filename.
    pub fn load(&self) -> Result<Vec<SourceDocument>> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "md"))
            .collect();
        paths.sort();

        let mut docs = Vec::with_capacity(paths.len());
        for path in paths {
            let content = std::fs::read_to_string(&path)?;
            let filename = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            let title = extract_title(&content).unwrap_or_else(|| filename.clone());
            docs.push(SourceDocument {
                path,
                filename,
                title,
                content,
            });
        }

        debug!("Loaded {} documents from {:?}", docs.len(), self.dir);
        Ok(docs)
    }
}

/// Title line of a document: the first non-empty line, heading markers
/// stripped.
fn extract_title(content: &str) -> Option<String> {
    let line = content.lines().find(|l| !l.trim().is_empty())?;
    let title = line.trim().trim_start_matches('#').trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_directory_is_an_error() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("no-such-dir");

        let err = MarkdownLoader::new(&missing).unwrap_err();
        assert!(matches!(err, RagError::DocumentsDirMissing(_)));
    }

    #[test]
    fn test_loads_only_markdown_sorted_by_filename() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("b_wave.md"), "# Wave Soldering\n\nbody").unwrap();
        fs::write(temp.path().join("a_reflow.md"), "# Reflow Soldering\n\nbody").unwrap();
        fs::write(temp.path().join("notes.txt"), "not markdown").unwrap();

        let loader = MarkdownLoader::new(temp.path()).unwrap();
        let docs = loader.load().unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].filename, "a_reflow");
        assert_eq!(docs[0].title, "Reflow Soldering");
        assert_eq!(docs[1].filename, "b_wave");
        assert_eq!(docs[1].title, "Wave Soldering");
    }

    #[test]
    fn test_title_falls_back_to_filename_stem() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("selective_soldering.md"), "").unwrap();

        let loader = MarkdownLoader::new(temp.path()).unwrap();
        let docs = loader.load().unwrap();

        assert_eq!(docs[0].title, "selective_soldering");
    }

    #[test]
    fn test_title_takes_first_nonempty_line_even_without_heading() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("doc.md"), "\n\nConformal Coating\nbody").unwrap();

        let loader = MarkdownLoader::new(temp.path()).unwrap();
        let docs = loader.load().unwrap();

        assert_eq!(docs[0].title, "Conformal Coating");
    }
}
