/// Skill vocabulary and substring-based skill extraction.
use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

/// Fixed set of lowercase skill terms, loaded once at startup.
///
/// Matching is exact substring containment on lowercased text. That is
/// deliberately naive ("java" matches inside "javascript") and accepted
/// as policy: no stemming, no word boundaries.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    terms: Vec<String>,
}

impl SkillVocabulary {
    /// Load the vocabulary from a flat text file, one term per line.
    ///
    /// Lines are trimmed and lowercased; blank lines and duplicates are
    /// dropped. An empty vocabulary loads fine but makes every job fail the
    /// matched-skill gate, so it gets a warning.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read skills file: {}", path.display()))?;

        let vocabulary = Self::from_terms(content.lines());

        if vocabulary.is_empty() {
            warn!("Skill vocabulary {} is empty", path.display());
        } else {
            info!(
                "Loaded {} skill terms from {}",
                vocabulary.len(),
                path.display()
            );
        }

        Ok(vocabulary)
    }

    /// Build a vocabulary from raw terms, normalizing and deduplicating
    /// while preserving first-seen order.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut normalized = Vec::new();

        for term in terms {
            let term = term.as_ref().trim().to_lowercase();
            if term.is_empty() || !seen.insert(term.clone()) {
                continue;
            }
            normalized.push(term);
        }

        Self { terms: normalized }
    }

    /// Extract the subset of vocabulary terms contained in `text`.
    ///
    /// The text is lowercased once; each term is included if it occurs as a
    /// contiguous substring anywhere in it.
    pub fn extract(&self, text: &str) -> HashSet<String> {
        let haystack = text.to_lowercase();
        self.terms
            .iter()
            .filter(|term| haystack.contains(term.as_str()))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn vocab(terms: &[&str]) -> SkillVocabulary {
        SkillVocabulary::from_terms(terms.iter().copied())
    }

    #[test]
    fn test_extract_known_skills() {
        let v = vocab(&["python", "sql", "java"]);
        let found = v.extract("I know Python and SQL");
        let expected: HashSet<String> = ["python", "sql"].iter().map(|s| s.to_string()).collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_extract_empty_text() {
        let v = vocab(&["python", "sql"]);
        assert!(v.extract("").is_empty());
    }

    #[test]
    fn test_extract_case_insensitive() {
        let v = vocab(&["docker"]);
        let found = v.extract("Experienced with DOCKER deployments");
        assert!(found.contains("docker"));
    }

    #[test]
    fn test_extract_substring_is_policy() {
        // "java" inside "javascript" matches; that's accepted behavior
        let v = vocab(&["java", "javascript"]);
        let found = v.extract("Senior JavaScript developer");
        assert!(found.contains("java"));
        assert!(found.contains("javascript"));
    }

    #[test]
    fn test_from_terms_normalizes_and_dedupes() {
        let v = SkillVocabulary::from_terms(["  SQL ", "sql", "", "Python", "python"]);
        assert_eq!(v.terms(), &["sql".to_string(), "python".to_string()]);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("skills.txt");
        fs::write(&path, "Python\nSQL\n\nexcel\nSQL\n").unwrap();

        let v = SkillVocabulary::load(&path).unwrap();
        assert_eq!(v.len(), 3);
        assert_eq!(
            v.terms(),
            &["python".to_string(), "sql".to_string(), "excel".to_string()]
        );
    }

    #[test]
    fn test_load_missing_file() {
        assert!(SkillVocabulary::load(Path::new("/nonexistent/skills.txt")).is_err());
    }

    #[test]
    fn test_empty_vocabulary_extracts_nothing() {
        let v = vocab(&[]);
        assert!(v.extract("python sql rust").is_empty());
    }
}
