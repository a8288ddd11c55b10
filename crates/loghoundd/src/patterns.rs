//! Pattern catalog - the ordered rule table driving issue detection.
//!
//! Loaded once at process start: built-in defaults, optionally replaced by
//! a TOML catalog file. Declaration order is detection order.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A detection rule: category, explanation, and the keywords that trigger it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    /// Category identifier (e.g. "memory").
    pub category: String,

    /// Human-readable explanation attached to detected issues.
    pub reason: String,

    /// Lowercase substrings matched against the lowercased log text.
    pub keywords: Vec<String>,
}

/// Ordered set of detection rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternCatalog {
    pub patterns: Vec<Pattern>,
}

impl PatternCatalog {
    /// The built-in catalog covering the common failure families.
    pub fn builtin() -> Self {
        let patterns = vec![
            Pattern {
                category: "memory".to_string(),
                reason: "The application likely ran out of memory (OOM).".to_string(),
                keywords: strings(&[
                    "outofmemoryerror",
                    "out of memory",
                    "heap space",
                    "oomkilled",
                    "oom",
                ]),
            },
            Pattern {
                category: "timeout".to_string(),
                reason: "Timeout detected (service call, DB, or network).".to_string(),
                keywords: strings(&["timeout", "timed out", "read timeout", "connect timeout"]),
            },
            Pattern {
                category: "database".to_string(),
                reason: "Database-related failure detected (connect/query/lock).".to_string(),
                keywords: strings(&[
                    "database",
                    "jdbc",
                    "sql",
                    "deadlock",
                    "connection refused",
                    "too many connections",
                ]),
            },
            Pattern {
                category: "authentication".to_string(),
                reason: "Authentication/authorization failure detected.".to_string(),
                keywords: strings(&[
                    "unauthorized",
                    "forbidden",
                    "invalid token",
                    "access denied",
                    "permission denied",
                ]),
            },
            Pattern {
                category: "network".to_string(),
                reason: "Network/DNS/connectivity issue detected.".to_string(),
                keywords: strings(&[
                    "dns",
                    "no route to host",
                    "network is unreachable",
                    "connection reset",
                    "name or service not known",
                ]),
            },
            Pattern {
                category: "disk".to_string(),
                reason: "Disk/storage issue detected (space, IO).".to_string(),
                keywords: strings(&[
                    "no space left on device",
                    "disk full",
                    "i/o error",
                    "filesystem",
                    "read-only file system",
                ]),
            },
        ];

        Self { patterns }
    }

    /// Parse a catalog from TOML text. Keywords are normalized to lowercase
    /// and empty keywords dropped; an empty keyword would match every log.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut catalog: PatternCatalog =
            toml::from_str(raw).context("Failed to parse pattern catalog")?;
        for pattern in &mut catalog.patterns {
            for keyword in &mut pattern.keywords {
                *keyword = keyword.trim().to_lowercase();
            }
            pattern.keywords.retain(|keyword| !keyword.is_empty());
        }
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog file, replacing the built-in table.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read pattern catalog {}", path.display()))?;
        Self::from_toml_str(&raw)
            .with_context(|| format!("Invalid pattern catalog {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    fn validate(&self) -> Result<()> {
        if self.patterns.is_empty() {
            bail!("Pattern catalog has no patterns");
        }
        for (idx, pattern) in self.patterns.iter().enumerate() {
            if pattern.category.trim().is_empty() {
                bail!("Pattern {} has an empty category", idx);
            }
            if pattern.keywords.is_empty() {
                bail!("Pattern '{}' has no usable keywords", pattern.category);
            }
        }
        Ok(())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_order_is_stable() {
        let catalog = PatternCatalog::builtin();
        let categories: Vec<&str> = catalog.patterns.iter().map(|p| p.category.as_str()).collect();
        assert_eq!(
            categories,
            vec!["memory", "timeout", "database", "authentication", "network", "disk"]
        );
    }

    #[test]
    fn builtin_keywords_are_lowercase() {
        let catalog = PatternCatalog::builtin();
        for pattern in &catalog.patterns {
            assert!(!pattern.keywords.is_empty());
            for keyword in &pattern.keywords {
                assert_eq!(keyword, &keyword.to_lowercase());
            }
        }
    }

    #[test]
    fn from_toml_parses_and_lowercases() {
        let raw = r#"
            [[patterns]]
            category = "certificate"
            reason = "TLS certificate problem detected."
            keywords = ["Certificate Expired", "x509"]
        "#;

        let catalog = PatternCatalog::from_toml_str(raw).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.patterns[0].category, "certificate");
        assert_eq!(
            catalog.patterns[0].keywords,
            vec!["certificate expired".to_string(), "x509".to_string()]
        );
    }

    #[test]
    fn from_toml_rejects_empty_catalog() {
        assert!(PatternCatalog::from_toml_str("patterns = []").is_err());
    }

    #[test]
    fn from_toml_rejects_pattern_without_keywords() {
        let raw = r#"
            [[patterns]]
            category = "broken"
            reason = "nope"
            keywords = [""]
        "#;
        assert!(PatternCatalog::from_toml_str(raw).is_err());
    }
}
