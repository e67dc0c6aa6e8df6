use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{error::SimError, io::ReportFormat, scheduler::Quanta};

/// Settings read from an optional TOML file.
///
/// ```toml
/// log_level = "info"
/// report_format = "json"
///
/// [quantum]
/// level1 = 3
/// level2 = 5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub quantum: QuantumConfig,
    pub log_level: String,
    pub report_format: ReportFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuantumConfig {
    pub level1: u64,
    pub level2: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quantum: QuantumConfig::default(),
            log_level: "warn".to_string(),
            report_format: ReportFormat::Text,
        }
    }
}

impl Default for QuantumConfig {
    fn default() -> Self {
        let Quanta { level1, level2 } = Quanta::default();
        Self { level1, level2 }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn quanta(&self) -> Result<Quanta, SimError> {
        Quanta::new(self.quantum.level1, self.quantum.level2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Level;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.quanta().unwrap(), Quanta::default());
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_partial_override() {
        let config =
            Config::from_toml("report_format = \"json\"\n[quantum]\nlevel2 = 8\n").unwrap();
        assert_eq!(config.report_format, ReportFormat::Json);
        assert_eq!(config.quanta().unwrap(), Quanta::new(3, 8).unwrap());
    }

    #[test]
    fn test_zero_quantum_rejected() {
        let config = Config::from_toml("[quantum]\nlevel1 = 0\n").unwrap();
        assert_eq!(
            config.quanta(),
            Err(SimError::InvalidQuantum { level: Level::One })
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_toml("quantum_level3 = 4\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mlq.toml");
        fs::write(&path, "log_level = \"debug\"\n").unwrap();
        assert_eq!(Config::load(&path).unwrap().log_level, "debug");
        assert!(Config::load(&dir.path().join("missing.toml")).is_err());
    }
}
