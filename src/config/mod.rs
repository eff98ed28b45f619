// Configuration loading and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::queue::{PartialBlock, Settings};
use crate::random::SplitMix64;

pub const PROD: &str = "prod";
#[allow(dead_code)]
pub const DEV: &str = "dev";
pub const TEST: &str = "test";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(rename = "queue")]
    pub queue: QueueBox,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueueBox {
    pub env: String,
    pub logs: Option<Logs>,
    #[serde(rename = "reverse_k")]
    pub reverse_k: Option<ReverseK>,
    pub shuffle: Option<Shuffle>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Logs {
    pub level: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReverseK {
    #[serde(rename = "partial_block")]
    pub partial_block: Option<PartialBlock>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Shuffle {
    pub seed: Option<u64>,
}

impl Config {
    /// Loads the configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {:?}", path))?;
        let cfg = Self::from_yaml(&data)
            .with_context(|| format!("failed to parse config file {:?}", path))?;
        info!(
            component = "config",
            event = "load_success",
            path = ?path,
            env = %cfg.queue.env,
            "config loaded"
        );
        Ok(cfg)
    }

    /// Parses the configuration from a YAML document.
    pub fn from_yaml(data: &str) -> Result<Self> {
        let cfg: Config = serde_yaml::from_str(data).context("invalid queue config")?;
        if cfg.queue.env.trim().is_empty() {
            anyhow::bail!("queue.env must not be empty");
        }
        Ok(cfg)
    }

    pub fn is_prod(&self) -> bool {
        self.queue.env == PROD
    }

    pub fn logs(&self) -> Option<&Logs> {
        self.queue.logs.as_ref()
    }

    pub fn partial_block(&self) -> PartialBlock {
        self.queue
            .reverse_k
            .as_ref()
            .and_then(|r| r.partial_block)
            .unwrap_or_default()
    }

    pub fn shuffle_seed(&self) -> Option<u64> {
        self.queue.shuffle.as_ref().and_then(|s| s.seed)
    }

    /// Queue settings derived from this configuration.
    pub fn settings(&self) -> Settings {
        Settings {
            partial_block: self.partial_block(),
        }
    }

    /// Shuffle generator: seeded when a seed is configured, clock-seeded otherwise.
    pub fn rng(&self) -> SplitMix64 {
        match self.shuffle_seed() {
            Some(seed) => SplitMix64::new(seed),
            None => SplitMix64::from_clock(),
        }
    }
}

// Test config is always available for integration tests
mod test_config;
#[allow(dead_code)]
pub use test_config::new_test_config;

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
queue:
  env: prod
  logs:
    level: info
  reverse_k:
    partial_block: reverse
  shuffle:
    seed: 42
"#;

    #[test]
    fn test_parse_full_config() {
        let cfg = Config::from_yaml(SAMPLE).expect("config should parse");
        assert!(cfg.is_prod());
        assert_eq!(cfg.logs().and_then(|l| l.level.as_deref()), Some("info"));
        assert_eq!(cfg.partial_block(), PartialBlock::Reverse);
        assert_eq!(cfg.shuffle_seed(), Some(42));
        assert_eq!(cfg.settings().partial_block, PartialBlock::Reverse);
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let cfg = Config::from_yaml("queue:\n  env: dev\n").expect("config should parse");
        assert!(!cfg.is_prod());
        assert!(cfg.logs().is_none());
        assert_eq!(cfg.partial_block(), PartialBlock::Reverse);
        assert_eq!(cfg.shuffle_seed(), None);
    }

    #[test]
    fn test_rejects_unknown_policy() {
        let doc = "queue:\n  env: dev\n  reverse_k:\n    partial_block: sideways\n";
        assert!(Config::from_yaml(doc).is_err());
    }

    #[test]
    fn test_rejects_empty_env() {
        assert!(Config::from_yaml("queue:\n  env: \"\"\n").is_err());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        use rand::RngCore;

        let cfg = Config::from_yaml(SAMPLE).expect("config should parse");
        assert_eq!(cfg.rng().next_u64(), cfg.rng().next_u64());
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = Config::load("/nonexistent/listq.yaml").unwrap_err();
        assert!(format!("{:#}", err).contains("listq.yaml"));
    }
}
