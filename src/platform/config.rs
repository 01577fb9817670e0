// LogMerge - platform/config.rs
//
// Config directory resolution and config.toml loading with validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::export::OutputFormat;
use crate::core::sorter::SortStrategy;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolve the platform configuration directory.
///
/// Falls back to the current directory if platform dirs cannot be determined.
pub fn default_config_dir() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
        let config_dir = proj_dirs.config_dir().to_path_buf();
        tracing::debug!(config = %config_dir.display(), "Platform config dir resolved");
        config_dir
    } else {
        tracing::warn!("Could not determine platform directories, using current directory");
        PathBuf::from(".")
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[sort]` section.
    pub sort: SortSection,
    /// `[input]` section.
    pub input: InputSection,
    /// `[output]` section.
    pub output: OutputSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[sort]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct SortSection {
    /// "recursive", "bottom-up" or "parallel".
    pub strategy: Option<String>,
    /// Fork-join cut-off in elements.
    pub parallel_threshold: Option<usize>,
    /// Rayon worker threads (0 = auto).
    pub worker_threads: Option<usize>,
}

/// `[input]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct InputSection {
    /// Reject servers that supply fewer timestamps than declared.
    pub strict_counts: Option<bool>,
}

/// `[output]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// "text", "json" or "csv".
    pub format: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub strategy: SortStrategy,
    pub parallel_threshold: usize,
    /// 0 = rayon default.
    pub worker_threads: usize,
    pub strict_counts: bool,
    pub output_format: OutputFormat,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            strategy: SortStrategy::default(),
            parallel_threshold: constants::DEFAULT_PARALLEL_THRESHOLD,
            worker_threads: constants::DEFAULT_WORKER_THREADS,
            strict_counts: false,
            output_format: OutputFormat::default(),
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first run).
/// If the file is unreadable or unparseable, returns defaults with a warning.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<ConfigError>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);
    let mut warnings: Vec<ConfigError> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            warnings.push(ConfigError::Io {
                path: config_path,
                source: e,
            });
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            warnings.push(ConfigError::TomlParse {
                path: config_path,
                source: e,
            });
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let config = validate(raw, &mut warnings);

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

/// Validate each field, accumulating every problem rather than stopping at the first.
fn validate(raw: RawConfig, warnings: &mut Vec<ConfigError>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- Sort: strategy --
    if let Some(ref strategy) = raw.sort.strategy {
        match strategy.parse::<SortStrategy>() {
            Ok(s) => config.strategy = s,
            Err(_) => warnings.push(ConfigError::ValueOutOfRange {
                field: "sort.strategy".to_string(),
                value: strategy.clone(),
                expected: "recursive, bottom-up or parallel".to_string(),
            }),
        }
    }

    // -- Sort: parallel_threshold --
    if let Some(threshold) = raw.sort.parallel_threshold {
        if (constants::MIN_PARALLEL_THRESHOLD..=constants::MAX_PARALLEL_THRESHOLD)
            .contains(&threshold)
        {
            config.parallel_threshold = threshold;
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "sort.parallel_threshold".to_string(),
                value: threshold.to_string(),
                expected: format!(
                    "{}-{}",
                    constants::MIN_PARALLEL_THRESHOLD,
                    constants::MAX_PARALLEL_THRESHOLD
                ),
            });
        }
    }

    // -- Sort: worker_threads --
    if let Some(threads) = raw.sort.worker_threads {
        if threads <= constants::MAX_WORKER_THREADS {
            config.worker_threads = threads;
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "sort.worker_threads".to_string(),
                value: threads.to_string(),
                expected: format!("0-{} (0 = auto)", constants::MAX_WORKER_THREADS),
            });
        }
    }

    if let Some(strict) = raw.input.strict_counts {
        config.strict_counts = strict;
    }

    // -- Output: format --
    if let Some(ref format) = raw.output.format {
        match format.parse::<OutputFormat>() {
            Ok(f) => config.output_format = f,
            Err(_) => warnings.push(ConfigError::ValueOutOfRange {
                field: "output.format".to_string(),
                value: format.clone(),
                expected: "text, json or csv".to_string(),
            }),
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "logging.level".to_string(),
                value: level.clone(),
                expected: constants::VALID_LOG_LEVELS.join(", "),
            });
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(body: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(constants::CONFIG_FILE_NAME), body).unwrap();
        dir
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_valid_config_is_applied() {
        let dir = write_config(
            r#"
[sort]
strategy = "parallel"
parallel_threshold = 128
worker_threads = 4

[input]
strict_counts = true

[output]
format = "json"

[logging]
level = "DEBUG"

[unknown_future_section]
key = 1
"#,
        );
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.strategy, SortStrategy::Parallel);
        assert_eq!(config.parallel_threshold, 128);
        assert_eq!(config.worker_threads, 4);
        assert!(config.strict_counts);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_values_fall_back_with_warnings() {
        let dir = write_config(
            r#"
[sort]
strategy = "quicksort"
parallel_threshold = 1
worker_threads = 100000

[output]
format = "xml"

[logging]
level = "verbose"
"#,
        );
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 5);
        assert!(warnings
            .iter()
            .all(|w| matches!(w, ConfigError::ValueOutOfRange { .. })));
    }

    #[test]
    fn test_unparseable_file_gives_defaults_and_warning() {
        let dir = write_config("[sort\nstrategy = ");
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config, AppConfig::default());
        assert!(matches!(
            warnings.as_slice(),
            [ConfigError::TomlParse { .. }]
        ));
    }
}
