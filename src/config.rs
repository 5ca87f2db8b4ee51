use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HarnessError, Result};
use crate::runner::Toolchain;

/// One named fixed-size configuration.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Subtask {
    pub name: String,
    pub n: usize,
    pub value_range: i64,
}

impl Subtask {
    pub fn new(name: &str, n: usize, value_range: i64) -> Self {
        Self {
            name: name.to_string(),
            n,
            value_range,
        }
    }
}

/// The seven judge subtasks, smallest first.
pub fn default_subtasks() -> Vec<Subtask> {
    vec![
        Subtask::new("subtask1", 2, 100),
        Subtask::new("subtask2", 10, 1_000),
        Subtask::new("subtask3", 100, 10_000),
        Subtask::new("subtask4", 1_000, 1_000_000),
        Subtask::new("subtask5", 10_000, 1_000_000_000),
        Subtask::new("subtask6", 50_000, 1_000_000_000),
        Subtask::new("subtask7", 100_000, 1_000_000_000),
    ]
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    pub log_level: String,
    /// File logging is off unless a directory is given
    pub log_dir: Option<String>,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_dir: None,
            log_file: "casegen.log".to_string(),
            use_json: false,
            rotation: "never".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct HarnessConfig {
    pub solution_source: PathBuf,
    pub solution_binary: PathBuf,
    /// Every relative path below is resolved against this directory
    pub work_dir: PathBuf,
    pub subtasks: Vec<Subtask>,
    pub test_case_dir: PathBuf,
    pub test_case_prefix: String,
    pub random_cases: usize,
    /// Inclusive bounds for `n` of the random cases
    pub random_n: (i64, i64),
    /// Inclusive bounds for `value_range` of the random cases
    pub random_value_range: (i64, i64),
    /// Fixed seed; `None` seeds from the clock
    pub seed: Option<u64>,
    pub toolchain: Toolchain,
    pub logging: LogConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            solution_source: PathBuf::from("gpt4o.cpp"),
            solution_binary: PathBuf::from("standard_solution"),
            work_dir: PathBuf::from("."),
            subtasks: default_subtasks(),
            test_case_dir: PathBuf::from("test_cases"),
            test_case_prefix: "test_case_".to_string(),
            random_cases: 100,
            random_n: (1, 1_000),
            random_value_range: (1, 1_000_000),
            seed: None,
            toolchain: Toolchain::default(),
            logging: LogConfig::default(),
        }
    }
}

impl HarnessConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| HarnessError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
        Self::from_yaml_str(&content)
    }

    /// Reject bounds that would make a random draw impossible.
    pub fn validate(&self) -> Result<()> {
        let (n_lo, n_hi) = self.random_n;
        if n_lo < 0 || n_lo > n_hi {
            return Err(HarnessError::Config(format!(
                "random_n must satisfy 0 <= low <= high, got [{}, {}]",
                n_lo, n_hi
            )));
        }
        let (r_lo, r_hi) = self.random_value_range;
        if r_lo < 0 || r_lo > r_hi {
            return Err(HarnessError::Config(format!(
                "random_value_range must satisfy 0 <= low <= high, got [{}, {}]",
                r_lo, r_hi
            )));
        }
        if let Some(bad) = self.subtasks.iter().find(|s| s.value_range < 0) {
            return Err(HarnessError::Config(format!(
                "subtask {} has negative value_range {}",
                bad.name, bad.value_range
            )));
        }
        Ok(())
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.work_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_fixed_batch() {
        let config = HarnessConfig::default();
        assert_eq!(config.subtasks.len(), 7);
        assert_eq!(config.subtasks[0], Subtask::new("subtask1", 2, 100));
        assert_eq!(
            config.subtasks[6],
            Subtask::new("subtask7", 100_000, 1_000_000_000)
        );
        assert_eq!(config.random_cases, 100);
        assert_eq!(config.random_n, (1, 1_000));
        assert_eq!(config.random_value_range, (1, 1_000_000));
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = HarnessConfig::from_yaml_str(
            r#"
solution_source: sol.cpp
seed: 42
random_cases: 3
subtasks:
  - { name: tiny, n: 1, value_range: 5 }
"#,
        )
        .unwrap();

        assert_eq!(config.solution_source, PathBuf::from("sol.cpp"));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.random_cases, 3);
        assert_eq!(config.subtasks, vec![Subtask::new("tiny", 1, 5)]);
        assert_eq!(config.solution_binary, PathBuf::from("standard_solution"));
        assert_eq!(config.toolchain, Toolchain::default());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = HarnessConfig::from_yaml_str("random_n: [10, 1]\n").unwrap_err();
        assert!(matches!(err, HarnessError::Config(_)));

        let err = HarnessConfig::from_yaml_str("random_value_range: [-1, 5]\n").unwrap_err();
        assert!(matches!(err, HarnessError::Config(_)));
    }

    #[test]
    fn test_garbage_yaml_is_config_error() {
        let err = HarnessConfig::from_yaml_str("subtasks: 7\n").unwrap_err();
        assert!(matches!(err, HarnessError::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = HarnessConfig::load(Path::new("config/does_not_exist.yaml")).unwrap_err();
        assert!(matches!(err, HarnessError::Io { .. }));
    }
}
