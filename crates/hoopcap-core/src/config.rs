// Pipeline configuration: input and output file locations.
//
// Every setting has a default, so the pipeline runs with no configuration
// file at all. An optional `hoopcap.toml` in the base directory overrides
// individual paths.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the optional override file looked up in the base directory.
pub const CONFIG_FILE: &str = "hoopcap.toml";

pub const DEFAULT_SALARIES: &str = "nba_salaries_2024_25.csv";
pub const DEFAULT_STATS: &str = "season_stats.csv";
pub const DEFAULT_MATCHED_OUTPUT: &str = "nba_salary_performance_2024.csv";
pub const DEFAULT_UNMATCHED_OUTPUT: &str = "unmatched_salaries.csv";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Assembled config
// ---------------------------------------------------------------------------

/// File locations for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub salaries: PathBuf,
    pub stats: PathBuf,
    pub matched_output: PathBuf,
    pub unmatched_output: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            salaries: PathBuf::from(DEFAULT_SALARIES),
            stats: PathBuf::from(DEFAULT_STATS),
            matched_output: PathBuf::from(DEFAULT_MATCHED_OUTPUT),
            unmatched_output: PathBuf::from(DEFAULT_UNMATCHED_OUTPUT),
        }
    }
}

impl PipelineConfig {
    /// Default filenames placed in `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        PipelineConfig::default().resolved_against(dir)
    }

    /// Join relative paths onto `dir`; absolute paths are kept as-is.
    pub fn resolved_against(self, dir: &Path) -> Self {
        PipelineConfig {
            salaries: dir.join(self.salaries),
            stats: dir.join(self.stats),
            matched_output: dir.join(self.matched_output),
            unmatched_output: dir.join(self.unmatched_output),
        }
    }
}

// ---------------------------------------------------------------------------
// hoopcap.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    inputs: InputsSection,
    #[serde(default)]
    outputs: OutputsSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct InputsSection {
    salaries: Option<PathBuf>,
    stats: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputsSection {
    matched: Option<PathBuf>,
    unmatched: Option<PathBuf>,
}

impl ConfigFile {
    fn into_config(self) -> PipelineConfig {
        let defaults = PipelineConfig::default();
        PipelineConfig {
            salaries: self.inputs.salaries.unwrap_or(defaults.salaries),
            stats: self.inputs.stats.unwrap_or(defaults.stats),
            matched_output: self.outputs.matched.unwrap_or(defaults.matched_output),
            unmatched_output: self.outputs.unmatched.unwrap_or(defaults.unmatched_output),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Parse config text. Relative paths are left relative.
pub fn parse_config(text: &str, path: &Path) -> Result<PipelineConfig, ConfigError> {
    let file: ConfigFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config = file.into_config();
    validate(&config)?;
    Ok(config)
}

/// Load `hoopcap.toml` from `base_dir` if present, otherwise use defaults.
/// Relative paths resolve against `base_dir`.
pub fn load_config_from(base_dir: &Path) -> Result<PipelineConfig, ConfigError> {
    let path = base_dir.join(CONFIG_FILE);
    let config = if path.exists() {
        let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;
        parse_config(&text, &path)?
    } else {
        PipelineConfig::default()
    };
    Ok(config.resolved_against(base_dir))
}

/// Convenience wrapper: loads config relative to the current working directory.
pub fn load_config() -> Result<PipelineConfig, ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::Io {
        path: PathBuf::from("."),
        source: e,
    })?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &PipelineConfig) -> Result<(), ConfigError> {
    let fields: &[(&str, &Path)] = &[
        ("inputs.salaries", config.salaries.as_path()),
        ("inputs.stats", config.stats.as_path()),
        ("outputs.matched", config.matched_output.as_path()),
        ("outputs.unmatched", config.unmatched_output.as_path()),
    ];
    for (name, path) in fields {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    if config.matched_output == config.unmatched_output {
        return Err(ConfigError::ValidationError {
            field: "outputs.unmatched".into(),
            message: "must differ from outputs.matched".into(),
        });
    }

    for (name, output) in [
        ("outputs.matched", &config.matched_output),
        ("outputs.unmatched", &config.unmatched_output),
    ] {
        if *output == config.salaries || *output == config.stats {
            return Err(ConfigError::ValidationError {
                field: name.into(),
                message: format!("would overwrite input file {}", output.display()),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_fixed_filenames() {
        let config = PipelineConfig::default();
        assert_eq!(config.salaries, PathBuf::from("nba_salaries_2024_25.csv"));
        assert_eq!(config.stats, PathBuf::from("season_stats.csv"));
        assert_eq!(
            config.matched_output,
            PathBuf::from("nba_salary_performance_2024.csv")
        );
        assert_eq!(config.unmatched_output, PathBuf::from("unmatched_salaries.csv"));
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse_config("", Path::new(CONFIG_FILE)).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn partial_override() {
        let text = "\
[inputs]
stats = \"data/stats_2025.csv\"

[outputs]
matched = \"out/joined.csv\"
";
        let config = parse_config(text, Path::new(CONFIG_FILE)).unwrap();
        assert_eq!(config.stats, PathBuf::from("data/stats_2025.csv"));
        assert_eq!(config.matched_output, PathBuf::from("out/joined.csv"));
        assert_eq!(config.salaries, PathBuf::from(DEFAULT_SALARIES));
        assert_eq!(config.unmatched_output, PathBuf::from(DEFAULT_UNMATCHED_OUTPUT));
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let err = parse_config("[inputs\nsalaries = 1", Path::new(CONFIG_FILE)).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn unknown_key_rejected() {
        let err = parse_config("[inputs]\nsalary = \"x.csv\"\n", Path::new(CONFIG_FILE))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn rejects_empty_path() {
        let err = parse_config("[inputs]\nsalaries = \"\"\n", Path::new(CONFIG_FILE)).unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "inputs.salaries"),
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn rejects_identical_outputs() {
        let text = "[outputs]\nmatched = \"a.csv\"\nunmatched = \"a.csv\"\n";
        let err = parse_config(text, Path::new(CONFIG_FILE)).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn rejects_output_over_input() {
        let text = "[outputs]\nmatched = \"season_stats.csv\"\n";
        let err = parse_config(text, Path::new(CONFIG_FILE)).unwrap_err();
        match err {
            ConfigError::ValidationError { field, message } => {
                assert_eq!(field, "outputs.matched");
                assert!(message.contains("season_stats.csv"));
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn missing_config_file_uses_defaults_in_dir() {
        let tmp = std::env::temp_dir().join("hoopcap_config_test_no_file");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let config = load_config_from(&tmp).expect("defaults without hoopcap.toml");
        assert_eq!(config, PipelineConfig::in_dir(&tmp));
        assert_eq!(config.salaries, tmp.join(DEFAULT_SALARIES));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn config_file_paths_resolve_against_dir() {
        let tmp = std::env::temp_dir().join("hoopcap_config_test_with_file");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        fs::write(
            tmp.join(CONFIG_FILE),
            "[inputs]\nsalaries = \"raw/salaries.csv\"\n",
        )
        .unwrap();

        let config = load_config_from(&tmp).expect("should load hoopcap.toml");
        assert_eq!(config.salaries, tmp.join("raw/salaries.csv"));
        assert_eq!(config.stats, tmp.join(DEFAULT_STATS));

        let _ = fs::remove_dir_all(&tmp);
    }
}
