use config::{Config as ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::errors::LookupError;
use crate::seed::DEFAULT_SEED_COUNT;

/// Configuration for the lookup engine.
///
/// # Configuration Locations
///
/// The configuration can be loaded from multiple locations in order of precedence:
/// 1. Custom config file specified via `--config` flag
/// 2. Local `.recordscout.yaml` in the current directory
/// 3. Global `$HOME/.config/recordscout/config.yaml`
///
/// # Configuration Format
///
/// The configuration uses YAML format. Example:
/// ```yaml
/// # Default execution strategy (concurrent or sequential)
/// mode: concurrent
///
/// # Worker threads for the concurrent executor (default: CPU cores)
/// thread_count: 8
///
/// # Number of synthetic records seeded at startup
/// seed_count: 100
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "info"
///
/// # Simulated per-record processing cost in milliseconds
/// delays:
///   identity_ms: 10
///   search_ms: 5
///   process_ms: 50
/// ```
///
/// # CLI Integration
///
/// Command-line arguments take precedence over config file values. The merging
/// behavior is defined in the `merge_with_cli` method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Strategy used when an operation does not name one
    #[serde(default)]
    pub mode: ExecutionMode,

    /// Number of worker threads for the concurrent executor
    /// Defaults to number of CPU cores if not specified
    #[serde(default = "default_thread_count")]
    pub thread_count: NonZeroUsize,

    /// Number of records seeded into a fresh store
    #[serde(default = "default_seed_count")]
    pub seed_count: usize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Simulated processing cost per unit of work
    #[serde(default)]
    pub delays: Delays,
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

fn default_seed_count() -> usize {
    DEFAULT_SEED_COUNT
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::default(),
            thread_count: default_thread_count(),
            seed_count: default_seed_count(),
            log_level: default_log_level(),
            delays: Delays::default(),
        }
    }
}

/// Values supplied on the command line; `None` leaves the file value alone
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub mode: Option<ExecutionMode>,
    pub thread_count: Option<NonZeroUsize>,
    pub seed_count: Option<usize>,
    pub log_level: Option<String>,
}

impl EngineConfig {
    /// Loads configuration from the default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration from the default locations plus an explicit file.
    ///
    /// Default locations are skipped when absent; the explicit file is required.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let default_files = [
            // Global config
            dirs::config_dir().map(|p| p.join("recordscout/config.yaml")),
            // Local config
            Some(PathBuf::from(".recordscout.yaml")),
        ];

        for path in default_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder.build()?.try_deserialize()
    }

    /// Merges CLI arguments with configuration file values
    pub fn merge_with_cli(mut self, cli: ConfigOverrides) -> Self {
        if let Some(mode) = cli.mode {
            self.mode = mode;
        }
        if let Some(thread_count) = cli.thread_count {
            self.thread_count = thread_count;
        }
        if let Some(seed_count) = cli.seed_count {
            self.seed_count = seed_count;
        }
        if let Some(log_level) = cli.log_level {
            self.log_level = log_level;
        }
        self
    }
}

/// Chooses between the concurrent engine and the sequential baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    #[default]
    Concurrent,
    Sequential,
}

impl ExecutionMode {
    /// Label reported alongside benchmark results
    pub fn label(&self) -> &'static str {
        match self {
            ExecutionMode::Concurrent => "CONCURRENT",
            ExecutionMode::Sequential => "SEQUENTIAL",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExecutionMode {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "concurrent" => Ok(ExecutionMode::Concurrent),
            "sequential" => Ok(ExecutionMode::Sequential),
            other => Err(LookupError::invalid_input(format!(
                "unknown execution mode '{}', expected 'concurrent' or 'sequential'",
                other
            ))),
        }
    }
}

/// Simulated per-unit processing cost, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delays {
    /// Cost of one identity comparison
    #[serde(default = "default_identity_ms")]
    pub identity_ms: u64,
    /// Cost of one substring comparison
    #[serde(default = "default_search_ms")]
    pub search_ms: u64,
    /// Cost of one heavy processing unit
    #[serde(default = "default_process_ms")]
    pub process_ms: u64,
}

fn default_identity_ms() -> u64 {
    10
}

fn default_search_ms() -> u64 {
    5
}

fn default_process_ms() -> u64 {
    50
}

impl Delays {
    /// Same delay for every unit kind
    pub fn uniform(ms: u64) -> Self {
        Self {
            identity_ms: ms,
            search_ms: ms,
            process_ms: ms,
        }
    }

    pub fn identity(&self) -> Duration {
        Duration::from_millis(self.identity_ms)
    }

    pub fn search(&self) -> Duration {
        Duration::from_millis(self.search_ms)
    }

    pub fn process(&self) -> Duration {
        Duration::from_millis(self.process_ms)
    }
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            identity_ms: default_identity_ms(),
            search_ms: default_search_ms(),
            process_ms: default_process_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let config_content = r#"
            mode: sequential
            thread_count: 4
            seed_count: 20
            log_level: "debug"
            delays:
              identity_ms: 1
              search_ms: 2
              process_ms: 3
        "#;

        let mut file = File::create(&config_path).unwrap();
        file.write_all(config_content.as_bytes()).unwrap();

        let config = EngineConfig::load_from(Some(&config_path)).unwrap();
        assert_eq!(config.mode, ExecutionMode::Sequential);
        assert_eq!(config.thread_count, NonZeroUsize::new(4).unwrap());
        assert_eq!(config.seed_count, 20);
        assert_eq!(config.log_level, "debug");
        assert_eq!(
            config.delays,
            Delays {
                identity_ms: 1,
                search_ms: 2,
                process_ms: 3
            }
        );
    }

    #[test]
    fn test_default_values() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let mut file = File::create(&config_path).unwrap();
        file.write_all(b"seed_count: 100\n").unwrap();

        let config = EngineConfig::load_from(Some(&config_path)).unwrap();
        assert_eq!(config.mode, ExecutionMode::Concurrent);
        assert_eq!(
            config.thread_count,
            NonZeroUsize::new(num_cpus::get()).unwrap()
        );
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.delays, Delays::default());
        assert_eq!(config.delays.identity(), Duration::from_millis(10));
        assert_eq!(config.delays.search(), Duration::from_millis(5));
        assert_eq!(config.delays.process(), Duration::from_millis(50));
    }

    #[test]
    fn test_partial_delays_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let mut file = File::create(&config_path).unwrap();
        file.write_all(b"delays:\n  process_ms: 7\n").unwrap();

        let config = EngineConfig::load_from(Some(&config_path)).unwrap();
        assert_eq!(config.delays.process_ms, 7);
        assert_eq!(config.delays.identity_ms, 10);
        assert_eq!(config.delays.search_ms, 5);
    }

    #[test]
    fn test_merge_with_cli() {
        let file_config = EngineConfig {
            mode: ExecutionMode::Sequential,
            thread_count: NonZeroUsize::new(4).unwrap(),
            seed_count: 50,
            log_level: "warn".to_string(),
            delays: Delays::default(),
        };

        let merged = file_config.clone().merge_with_cli(ConfigOverrides {
            mode: Some(ExecutionMode::Concurrent),
            thread_count: Some(NonZeroUsize::new(8).unwrap()),
            seed_count: None,
            log_level: Some("debug".to_string()),
        });
        assert_eq!(merged.mode, ExecutionMode::Concurrent); // CLI value
        assert_eq!(merged.thread_count, NonZeroUsize::new(8).unwrap()); // CLI value
        assert_eq!(merged.seed_count, 50); // File value (CLI None)
        assert_eq!(merged.log_level, "debug"); // CLI value

        let untouched = file_config.clone().merge_with_cli(ConfigOverrides::default());
        assert_eq!(untouched, file_config);
    }

    #[test]
    fn test_invalid_config() {
        let config_content = r#"
            mode: sideways
            thread_count: 0
        "#;

        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let mut file = File::create(&config_path).unwrap();
        file.write_all(config_content.as_bytes()).unwrap();

        let result = EngineConfig::load_from(Some(&config_path));
        assert!(result.is_err(), "Expected error loading invalid config");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = EngineConfig::load_from(Some(Path::new("nonexistent.yaml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_execution_mode_parsing() {
        assert_eq!(
            "concurrent".parse::<ExecutionMode>().unwrap(),
            ExecutionMode::Concurrent
        );
        assert_eq!(
            " SEQUENTIAL ".parse::<ExecutionMode>().unwrap(),
            ExecutionMode::Sequential
        );
        assert!(matches!(
            "parallel".parse::<ExecutionMode>(),
            Err(LookupError::InvalidInput(_))
        ));
        assert_eq!(ExecutionMode::Concurrent.label(), "CONCURRENT");
        assert_eq!(ExecutionMode::Sequential.to_string(), "SEQUENTIAL");
    }
}
