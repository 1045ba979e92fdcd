use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

pub const SEAT_COUNT: usize = 3;
const DEFAULT_MAX_REDEALS: u32 = 8;

/// Root simulation configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimConfig {
    pub run_id: String,
    pub rounds: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    /// Fresh deals allowed per round when every seat passes the bid.
    #[serde(default = "default_max_redeals")]
    pub max_redeals: u32,
    pub seats: Vec<SeatConfig>,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(source) => return Err(ConfigError::Read { source, path }),
        };
        let mut cfg: SimConfig = match serde_yaml::from_str(&text) {
            Ok(cfg) => cfg,
            Err(source) => return Err(ConfigError::Parse { source, path }),
        };
        match cfg.validate() {
            Ok(()) => Ok(cfg),
            Err(source) => Err(ConfigError::Invalid { source, path }),
        }
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        check_name("run_id", &self.run_id)?;
        if self.rounds == 0 {
            return Err(ValidationError::InvalidField {
                field: "rounds".to_string(),
                message: "number of rounds must be greater than zero".to_string(),
            });
        }
        validate_seats(&self.seats)?;
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        Ok(())
    }

    /// Resolve `{run_id}` placeholders into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_json: self
                .outputs
                .summary_json
                .as_deref()
                .map(|template| resolve_template(&self.run_id, template)),
        }
    }
}

fn default_max_redeals() -> u32 {
    DEFAULT_MAX_REDEALS
}

/// One of the three players at the table.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SeatConfig {
    pub name: String,
    #[serde(default)]
    pub evaluator: EvaluatorKind,
    /// Sample uniformly and feed decisions back to the evaluator.
    #[serde(default)]
    pub training: bool,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EvaluatorKind {
    #[default]
    Heuristic,
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    #[serde(default)]
    pub summary_json: Option<String>,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        let mut paths = vec![("outputs.jsonl", self.jsonl.as_str())];
        if let Some(summary) = self.summary_json.as_deref() {
            paths.push(("outputs.summary_json", summary));
        }
        for (label, value) in paths {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }

            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path is invalid".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    /// `None` for an unrecognised level name.
    pub fn level(&self) -> Option<Level> {
        self.tracing_level.trim().parse().ok()
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

/// Names end up in file paths and log rows: ASCII letters, digits, `.`, `_`, `-`.
fn check_name(field: &str, value: &str) -> Result<(), ValidationError> {
    let message = if value.trim().is_empty() {
        "must not be empty"
    } else if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        "may only contain alphanumeric characters, '.', '_' or '-'"
    } else {
        return Ok(());
    };
    Err(ValidationError::InvalidField {
        field: field.to_string(),
        message: message.to_string(),
    })
}

fn validate_seats(seats: &[SeatConfig]) -> Result<(), ValidationError> {
    if seats.len() != SEAT_COUNT {
        return Err(ValidationError::InvalidField {
            field: "seats".to_string(),
            message: format!("exactly {SEAT_COUNT} seats are required, found {}", seats.len()),
        });
    }

    let mut seen = HashSet::new();
    for (index, seat) in seats.iter().enumerate() {
        check_name(&format!("seats[{index}].name"), &seat.name)?;
        if !seen.insert(seat.name.as_str()) {
            return Err(ValidationError::InvalidField {
                field: "seats".to_string(),
                message: format!("seat name '{}' defined more than once", seat.name),
            });
        }
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace("{run_id}", run_id))
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_json: Option<PathBuf>,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        #[source]
        source: ValidationError,
        path: PathBuf,
    },
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
