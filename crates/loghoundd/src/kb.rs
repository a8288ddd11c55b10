//! Knowledge base - static remediation table, loaded once per process.

use anyhow::{bail, Context, Result};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// One remediation record, keyed by the category it answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub keyword: String,
    pub description: String,
    pub fixes: Vec<String>,
}

/// Lazily loaded, immutable knowledge-base snapshot.
///
/// The backing file is read on first lookup and cached for the process
/// lifetime; `OnceCell` guarantees a single initialization under
/// concurrent first access. A load failure is returned to every caller
/// instead of being swallowed - the fallback tier cannot run without the
/// table, and a missing or corrupt file is a deployment defect.
pub struct KnowledgeBase {
    path: PathBuf,
    entries: OnceCell<Arc<Vec<KnowledgeEntry>>>,
}

impl KnowledgeBase {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: OnceCell::new(),
        }
    }

    /// Case-insensitive lookup by category name.
    ///
    /// `Ok(None)` means the table loaded but has no entry for the
    /// category; `Err` means the table itself could not be loaded.
    pub fn lookup(&self, category: &str) -> Result<Option<KnowledgeEntry>> {
        let entries = self.snapshot()?;
        let key = category.to_lowercase();
        Ok(entries
            .iter()
            .find(|entry| entry.keyword.to_lowercase() == key)
            .cloned())
    }

    fn snapshot(&self) -> Result<&Arc<Vec<KnowledgeEntry>>> {
        self.entries.get_or_try_init(|| {
            let entries = load_entries(&self.path)?;
            info!(
                "Knowledge base loaded: {} entries from {}",
                entries.len(),
                self.path.display()
            );
            Ok(Arc::new(entries))
        })
    }
}

fn load_entries(path: &Path) -> Result<Vec<KnowledgeEntry>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read knowledge base {}", path.display()))?;

    let entries: Vec<KnowledgeEntry> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid knowledge base {}", path.display()))?;

    for (idx, entry) in entries.iter().enumerate() {
        if entry.keyword.trim().is_empty() {
            bail!(
                "Invalid knowledge base {}: entry {} has an empty keyword",
                path.display(),
                idx
            );
        }
    }

    Ok(entries)
}
