/// Configuration module for cvmatch.
///
/// Handles loading, validating, and providing default configuration values.
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// ── Default value functions ──────────────────────────────────────────

fn default_jobs_csv() -> String {
    "data/jobs.csv".to_string()
}

fn default_job_embeddings() -> String {
    "data/job_embeddings.bin".to_string()
}

fn default_skills_file() -> String {
    "data/skills.txt".to_string()
}

fn default_knowledge_base() -> String {
    "data/knowledge_base.txt".to_string()
}

fn default_model_name() -> String {
    "all-MiniLM-L6-v2".to_string()
}

fn default_model_dir() -> String {
    "models/all-MiniLM-L6-v2".to_string()
}

fn default_dimensions() -> usize {
    384
}

fn default_top_n() -> usize {
    5
}

fn default_min_similarity() -> f32 {
    0.35
}

// ── Config structs ───────────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub matching: MatchingConfig,
}

/// Paths to the startup-time corpus files. All of them are read once at
/// load and never rewritten at runtime.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DataConfig {
    #[serde(default = "default_jobs_csv")]
    pub jobs_csv: String,

    #[serde(default = "default_job_embeddings")]
    pub job_embeddings: String,

    #[serde(default = "default_skills_file")]
    pub skills_file: String,

    #[serde(default = "default_knowledge_base")]
    pub knowledge_base: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ModelConfig {
    #[serde(default = "default_model_name")]
    pub name: String,

    #[serde(default = "default_model_dir")]
    pub dir: String,

    #[serde(default = "default_dimensions")]
    pub dimensions: usize,
}

/// Display policy for the job ranking: only the `top_n` most similar jobs
/// are considered, and a job is reported only if it clears `min_similarity`
/// and shares at least one skill with the resume.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MatchingConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    #[serde(default = "default_min_similarity")]
    pub min_similarity: f32,
}

// ── Default impls ────────────────────────────────────────────────────

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            jobs_csv: default_jobs_csv(),
            job_embeddings: default_job_embeddings(),
            skills_file: default_skills_file(),
            knowledge_base: default_knowledge_base(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            dir: default_model_dir(),
            dimensions: default_dimensions(),
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            min_similarity: default_min_similarity(),
        }
    }
}

// ── Config implementation ────────────────────────────────────────────

impl Config {
    /// Load configuration from a JSON file.
    ///
    /// If `config_path` is empty, defaults to `"config.json"`.
    /// If the file does not exist, returns a default config and optionally
    /// generates a template file.
    pub fn load(config_path: &str) -> Result<Self> {
        let path = if config_path.is_empty() {
            "config.json"
        } else {
            config_path
        };

        if !Path::new(path).exists() {
            info!("{path} not found, using defaults");
            let cfg = Self::default();

            // Generate template only for the default path
            if path == "config.json" {
                match cfg.save(path) {
                    Ok(()) => info!("Generated config template: {path}"),
                    Err(e) => warn!("Failed to generate config template: {e}"),
                }
            }

            return Ok(cfg);
        }

        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {path}"))?;

        let cfg: Config = match serde_json::from_str(&data) {
            Ok(c) => c,
            Err(e) => {
                warn!("Invalid JSON in {path}: {e}");
                warn!("Using default configuration");
                return Ok(Self::default());
            }
        };

        info!("Loaded configuration from {path}");
        Ok(cfg)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &str) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("failed to marshal config")?;
        std::fs::write(path, data).with_context(|| format!("failed to write config: {path}"))?;
        Ok(())
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.matching.top_n > 0, "matching.top_n must be positive");
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.matching.min_similarity),
            "matching.min_similarity must be within [0, 1]"
        );
        anyhow::ensure!(
            self.model.dimensions > 0,
            "model.dimensions must be positive"
        );
        anyhow::ensure!(!self.data.jobs_csv.is_empty(), "data.jobs_csv must be set");
        anyhow::ensure!(
            !self.data.job_embeddings.is_empty(),
            "data.job_embeddings must be set"
        );
        anyhow::ensure!(
            !self.data.skills_file.is_empty(),
            "data.skills_file must be set"
        );
        anyhow::ensure!(
            !self.data.knowledge_base.is_empty(),
            "data.knowledge_base must be set"
        );
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.matching.top_n, 5);
        assert_eq!(config.matching.min_similarity, 0.35);
        assert_eq!(config.model.dimensions, 384);
        assert_eq!(config.model.name, "all-MiniLM-L6-v2");
        assert_eq!(config.data.jobs_csv, "data/jobs.csv");
    }

    #[test]
    fn test_load_from_json() {
        let json = r#"{"matching": {"top_n": 3}, "data": {"jobs_csv": "./test.csv"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.matching.top_n, 3);
        assert_eq!(config.data.jobs_csv, "./test.csv");
        // Other fields should have defaults
        assert_eq!(config.matching.min_similarity, 0.35);
        assert_eq!(config.model.dimensions, 384);
        assert_eq!(config.data.skills_file, "data/skills.txt");
    }

    #[test]
    fn test_validate_ok() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_top_n() {
        let mut config = Config::default();
        config.matching.top_n = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_threshold() {
        let mut config = Config::default();
        config.matching.min_similarity = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_path() {
        let mut config = Config::default();
        config.data.knowledge_base = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = Config::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.matching.top_n, config.matching.top_n);
        assert_eq!(parsed.data.jobs_csv, config.data.jobs_csv);
        assert_eq!(parsed.model.name, config.model.name);
    }
}
