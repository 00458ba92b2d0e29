//! Configuration loading from sweep.toml
//!
//! SweepBench configuration can be specified in a `sweep.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.
//! Command-line flags always win over values from the file.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use sweepbench_core::{DEFAULT_RED_ZONE, DEFAULT_STACK_SIZE, ExecutorConfig};

/// SweepBench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SweepConfig {
    /// Sweep configuration
    #[serde(default)]
    pub sweep: SweepSection,
    /// Isolated executor configuration
    #[serde(default)]
    pub executor: ExecutorSection,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Chart configuration
    #[serde(default)]
    pub chart: ChartConfig,
}

/// Sizes, input seed, and strategy selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepSection {
    /// Input sizes in sweep order
    #[serde(default = "default_sizes")]
    pub sizes: Vec<usize>,
    /// Seed of the random text generator
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Only run strategies of this group
    #[serde(default)]
    pub group: Option<String>,
    /// Title printed above the results table
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for SweepSection {
    fn default() -> Self {
        Self {
            sizes: default_sizes(),
            seed: default_seed(),
            group: None,
            title: default_title(),
        }
    }
}

/// Default sweep sizes
pub const DEFAULT_SIZES: [usize; 6] = [3000, 8000, 31000, 49000, 56000, 131000];

/// Default input seed
pub const DEFAULT_SEED: u64 = 42;

fn default_sizes() -> Vec<usize> {
    DEFAULT_SIZES.to_vec()
}
fn default_seed() -> u64 {
    DEFAULT_SEED
}
fn default_title() -> String {
    "Execution time vs input size".to_string()
}

/// Isolated executor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorSection {
    /// Stack size of each isolated thread in bytes
    #[serde(default = "default_stack_size")]
    pub stack_size: usize,
    /// Red zone at the bottom of the isolated stack in bytes
    #[serde(default = "default_red_zone")]
    pub red_zone: usize,
    /// Wait limit for an isolated unit (e.g., "30s"); unset waits forever
    #[serde(default)]
    pub timeout: Option<String>,
}

impl Default for ExecutorSection {
    fn default() -> Self {
        Self {
            stack_size: default_stack_size(),
            red_zone: default_red_zone(),
            timeout: None,
        }
    }
}

fn default_stack_size() -> usize {
    DEFAULT_STACK_SIZE
}
fn default_red_zone() -> usize {
    DEFAULT_RED_ZONE
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human", "csv", "json"
    #[serde(default = "default_format")]
    pub format: String,
    /// Directory for the table and chart artifacts
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Table file name, relative to `directory`
    #[serde(default = "default_table_file")]
    pub table_file: String,
    /// Chart file name, relative to `directory`
    #[serde(default = "default_chart_file")]
    pub chart_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            directory: default_output_dir(),
            table_file: default_table_file(),
            chart_file: default_chart_file(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}
fn default_output_dir() -> String {
    "target/sweepbench".to_string()
}
fn default_table_file() -> String {
    "results.txt".to_string()
}
fn default_chart_file() -> String {
    "chart.svg".to_string()
}

impl OutputConfig {
    /// Full path of the table artifact
    pub fn table_path(&self) -> PathBuf {
        Path::new(&self.directory).join(&self.table_file)
    }

    /// Full path of the chart artifact
    pub fn chart_path(&self) -> PathBuf {
        Path::new(&self.directory).join(&self.chart_file)
    }
}

/// Chart configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Chart title
    #[serde(default = "default_chart_title")]
    pub title: String,
    /// Chart width in pixels
    #[serde(default = "default_width")]
    pub width: u32,
    /// Chart height in pixels
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: default_chart_title(),
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_chart_title() -> String {
    "Execution Time vs Input Size".to_string()
}
fn default_width() -> u32 {
    1000
}
fn default_height() -> u32 {
    500
}

impl SweepConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Discover and load configuration by walking up from the current directory.
    ///
    /// Returns `Ok(None)` when no `sweep.toml` exists. A file that exists but
    /// cannot be read or parsed is an error.
    pub fn discover() -> anyhow::Result<Option<Self>> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        Self::discover_from(&cwd)
    }

    /// Discover and load configuration by walking up from `start`
    pub fn discover_from(start: &Path) -> anyhow::Result<Option<Self>> {
        let mut dir = start.to_path_buf();
        loop {
            let config_path = dir.join("sweep.toml");
            if config_path.is_file() {
                let config = Self::load(&config_path)
                    .with_context(|| format!("Invalid config file {}", config_path.display()))?;
                tracing::debug!(path = %config_path.display(), "loaded configuration");
                return Ok(Some(config));
            }
            if !dir.pop() {
                return Ok(None);
            }
        }
    }

    /// Executor configuration, with the timeout string parsed
    pub fn executor_config(&self) -> anyhow::Result<ExecutorConfig> {
        let timeout = match &self.executor.timeout {
            Some(s) => Some(Duration::from_nanos(Self::parse_duration(s)?)),
            None => None,
        };
        Ok(ExecutorConfig {
            stack_size: self.executor.stack_size,
            red_zone: self.executor.red_zone,
            timeout,
        })
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# SweepBench Configuration
# https://github.com/ml-rust/sweepbench

[sweep]
# Input sizes, measured in this order
sizes = [3000, 8000, 31000, 49000, 56000, 131000]
# Seed of the random text generator
seed = 42
# Only run strategies of this group (uncomment to enable)
# group = "capitals"
# Title printed above the results table
title = "Execution time vs input size"

[executor]
# Stack size of each isolated thread in bytes (8 MiB)
stack_size = 8388608
# Red zone at the bottom of the isolated stack in bytes (64 KiB)
red_zone = 65536
# Stop waiting for an isolated run after this long (uncomment to enable)
# timeout = "30s"

[output]
# Default output format: human, csv, json
format = "human"
# Directory for the table and chart artifacts
directory = "target/sweepbench"
table_file = "results.txt"
chart_file = "chart.svg"

[chart]
title = "Execution Time vs Input Size"
# Chart dimensions in pixels
width = 1000
height = 500
"#
        .to_string()
    }

    /// Parse duration string (e.g., "3s", "500ms", "2m") to nanoseconds
    pub fn parse_duration(s: &str) -> anyhow::Result<u64> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow::anyhow!("Empty duration string"));
        }

        // Find where the number ends and unit begins
        let (num_part, unit_part) = s
            .char_indices()
            .find(|(_, c)| c.is_alphabetic())
            .map(|(i, _)| s.split_at(i))
            .unwrap_or((s, "s"));

        let value: f64 = num_part
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid duration number: {}", num_part))?;
        if value < 0.0 {
            return Err(anyhow::anyhow!("Negative duration: {}", s));
        }

        let multiplier: u64 = match unit_part.to_lowercase().as_str() {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" | "" => 1_000_000_000,
            "m" | "min" => 60_000_000_000,
            _ => return Err(anyhow::anyhow!("Unknown duration unit: {}", unit_part)),
        };

        Ok((value * multiplier as f64) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SweepConfig::default();
        assert_eq!(config.sweep.sizes, DEFAULT_SIZES);
        assert_eq!(config.sweep.seed, 42);
        assert_eq!(config.executor.stack_size, DEFAULT_STACK_SIZE);
        assert!(config.executor.timeout.is_none());
        assert_eq!(
            config.output.table_path(),
            PathBuf::from("target/sweepbench/results.txt")
        );
        assert_eq!(
            config.output.chart_path(),
            PathBuf::from("target/sweepbench/chart.svg")
        );
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(SweepConfig::parse_duration("3s").unwrap(), 3_000_000_000);
        assert_eq!(SweepConfig::parse_duration("500ms").unwrap(), 500_000_000);
        assert_eq!(SweepConfig::parse_duration("100us").unwrap(), 100_000);
        assert_eq!(SweepConfig::parse_duration("1000ns").unwrap(), 1000);
        assert_eq!(SweepConfig::parse_duration("2m").unwrap(), 120_000_000_000);
        assert_eq!(SweepConfig::parse_duration("1.5s").unwrap(), 1_500_000_000);
        assert_eq!(SweepConfig::parse_duration("10").unwrap(), 10_000_000_000);
    }

    #[test]
    fn test_parse_duration_errors() {
        assert!(SweepConfig::parse_duration("").is_err());
        assert!(SweepConfig::parse_duration("fast").is_err());
        assert!(SweepConfig::parse_duration("5h").is_err());
        assert!(SweepConfig::parse_duration("-1s").is_err());
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [sweep]
            sizes = [10, 100]
            seed = 7

            [executor]
            timeout = "250ms"
        "#;

        let config: SweepConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.sweep.sizes, vec![10, 100]);
        assert_eq!(config.sweep.seed, 7);
        // Defaults should still apply
        assert_eq!(config.executor.red_zone, DEFAULT_RED_ZONE);
        assert_eq!(config.output.format, "human");

        let executor = config.executor_config().unwrap();
        assert_eq!(executor.timeout, Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_invalid_timeout_is_an_error() {
        let mut config = SweepConfig::default();
        config.executor.timeout = Some("soon".to_string());
        assert!(config.executor_config().is_err());
    }

    #[test]
    fn test_default_toml_parses() {
        let default_toml = SweepConfig::default_toml();
        let config: SweepConfig = toml::from_str(&default_toml).unwrap();
        assert_eq!(config.sweep.sizes, DEFAULT_SIZES);
        assert_eq!(config.executor.stack_size, DEFAULT_STACK_SIZE);
        assert_eq!(config.executor.red_zone, DEFAULT_RED_ZONE);
        assert_eq!(config.chart.width, 1000);
    }

    #[test]
    fn test_discover_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sweep.toml"), "[sweep]\nseed = 9\n").unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let config = SweepConfig::discover_from(&nested).unwrap().unwrap();
        assert_eq!(config.sweep.seed, 9);
    }

    #[test]
    fn test_discover_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("empty");
        std::fs::create_dir_all(&nested).unwrap();

        assert!(SweepConfig::discover_from(&nested).is_ok());
    }

    #[test]
    fn test_discover_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("sweep.toml"),
            "[sweep]\nsizes = \"not-a-list\"\n\n[executor]\ntimeout = \"soon\"\n",
        )
        .unwrap();

        let err = SweepConfig::discover_from(dir.path()).unwrap_err();
        assert!(err.to_string().contains("sweep.toml"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.toml");
        std::fs::write(&path, "[output]\nformat = \"csv\"\n").unwrap();

        let config = SweepConfig::load(&path).unwrap();
        assert_eq!(config.output.format, "csv");
        assert_eq!(config.sweep.seed, DEFAULT_SEED);
    }
}
