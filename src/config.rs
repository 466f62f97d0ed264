//! Configuration management for kwlog
//!
//! This module handles loading, validation, and management of the logger
//! configuration from YAML files.

use crate::error::{KwLogError, Result};
use crate::logger::line::worst_case_line_length;
use crate::transport::BLOCK_LEN;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Measurement groups polled in order; the first entry is the initial target
    pub groups: Vec<u8>,

    /// How long to wait for each group response, in milliseconds
    pub response_timeout_ms: u64,

    /// Data log destination. A directory gets a timestamped file name.
    pub log_path: String,

    /// Upper bound for any single line written to the data log
    pub max_line_length: usize,

    /// Diagnostic logging configuration
    pub logging: LoggingConfig,

    /// Simulated ECU served by the binary
    pub simulator: SimulatorConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub level: String,

    /// Optional console-only level override
    pub console_level: Option<String>,

    /// Optional file-only level override
    pub file_level: Option<String>,

    /// Path to diagnostic log file (its directory is used for rotation)
    pub file: String,

    /// Number of rotated files to keep
    pub backup_count: u32,

    /// Whether to log to console
    pub console_output: bool,

    /// Whether to use JSON format
    pub json_format: bool,
}

/// One canned group response of the simulated ECU
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimulatedGroup {
    /// Group number answered
    pub group: u8,

    /// Raw 12-byte measurement block returned for the group
    pub block: Vec<u8>,
}

/// Simulated ECU configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Delay before each response, in milliseconds
    pub latency_ms: u64,

    /// Groups the simulator answers; anything else gets a no-acknowledgment
    pub groups: Vec<SimulatedGroup>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            console_level: None,
            file_level: None,
            file: "/tmp/kwlog.log".to_string(),
            backup_count: 5,
            console_output: true,
            json_format: false,
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            latency_ms: 50,
            groups: vec![
                // rpm, coolant, lambda, bit field
                SimulatedGroup {
                    group: 1,
                    block: vec![1, 200, 20, 5, 10, 180, 20, 100, 136, 16, 0xF0, 0xA0],
                },
                // rpm, load, injection time, intake air mass
                SimulatedGroup {
                    group: 2,
                    block: vec![1, 200, 20, 33, 100, 25, 15, 100, 30, 25, 10, 8],
                },
                // rpm, battery voltage, coolant, intake air
                SimulatedGroup {
                    group: 4,
                    block: vec![1, 200, 20, 6, 160, 88, 5, 10, 180, 5, 10, 140],
                },
            ],
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            groups: vec![1, 2, 4],
            response_timeout_ms: 1000,
            log_path: "/data/kwlog".to_string(),
            max_line_length: 4096,
            logging: LoggingConfig::default(),
            simulator: SimulatorConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from the first default location that exists
    pub fn load() -> Result<Self> {
        let default_paths = [
            "kwlog_config.yaml",
            "/data/kwlog_config.yaml",
            "/etc/kwlog/config.yaml",
        ];

        for path in &default_paths {
            if Path::new(path).exists() {
                return Self::from_file(path);
            }
        }

        Ok(Config::default())
    }

    /// Save configuration to a YAML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Response window as a `Duration`
    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.groups.is_empty() {
            return Err(KwLogError::validation(
                "groups",
                "At least one group must be configured",
            ));
        }

        // Group 0 is not addressable on the bus
        if let Some(pos) = self.groups.iter().position(|&g| g == 0) {
            return Err(KwLogError::validation(
                format!("groups[{}]", pos),
                "Group numbers must be in 1..=255".to_string(),
            ));
        }

        if self.response_timeout_ms == 0 {
            return Err(KwLogError::validation(
                "response_timeout_ms",
                "Must be greater than 0",
            ));
        }

        if self.log_path.trim().is_empty() {
            return Err(KwLogError::validation(
                "log_path",
                "Log path cannot be empty",
            ));
        }

        let needed = worst_case_line_length(&self.groups);
        if self.max_line_length < needed {
            return Err(KwLogError::validation(
                "max_line_length".to_string(),
                format!(
                    "{} bytes cannot hold a line for {} groups (needs {})",
                    self.max_line_length,
                    self.groups.len(),
                    needed
                ),
            ));
        }

        crate::logging::parse_log_level(&self.logging.level)?;

        for sim in &self.simulator.groups {
            if sim.block.len() != BLOCK_LEN {
                return Err(KwLogError::validation(
                    format!("simulator.groups[{}].block", sim.group),
                    format!("Expected {} bytes, got {}", BLOCK_LEN, sim.block.len()),
                ));
            }
        }

        Ok(())
    }
}
