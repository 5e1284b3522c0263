// instrscope - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::extract::{PatternField, PositionalField, SampleExtractor};
use crate::core::model::ChartSpec;
use crate::core::scanner::{ScanRules, SubsystemRule};
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for instrscope configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/instrscope/ or %APPDATA%\instrscope\config\)
    pub config_dir: PathBuf,

    /// Default location of config.toml.
    pub config_file: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        let config_dir = if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            proj_dirs.config_dir().to_path_buf()
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            PathBuf::from(".")
        };
        let config_file = config_dir.join(constants::CONFIG_FILE_NAME);

        tracing::debug!(
            config = %config_dir.display(),
            file = %config_file.display(),
            "Platform paths resolved"
        );

        Self {
            config_dir,
            config_file,
        }
    }
}

// =============================================================================
// config.toml shape
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub markers: MarkersSection,
    pub labels: LabelsSection,
    pub extraction: ExtractionSection,
    pub chart: ChartSection,
    pub logging: LoggingSection,
}

/// `[markers]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct MarkersSection {
    /// Substring of the line carrying Subsystem A's identifier.
    pub subsystem_a: Option<String>,
    /// Substring of the line carrying Subsystem B's identifier.
    pub subsystem_b: Option<String>,
    /// Substring that opens the collection window.
    pub start: Option<String>,
    /// Appended to an identifier to find its consumption lines.
    pub consumed_suffix: Option<String>,
}

/// `[labels]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LabelsSection {
    pub subsystem_a: Option<String>,
    pub subsystem_b: Option<String>,
}

/// `[extraction]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExtractionSection {
    /// "positional" or "pattern".
    pub mode: Option<String>,
    /// Field index for positional mode.
    pub field_index: Option<usize>,
    /// Regex with a `sample` named group for pattern mode.
    pub pattern: Option<String>,
    /// Skip consumption rules until the identifier is captured.
    pub require_identifier: Option<bool>,
}

/// `[chart]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ChartSection {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

// =============================================================================
// Validated configuration
// =============================================================================

/// How samples are pulled out of a matching line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionMode {
    Positional { field_index: usize },
    Pattern { pattern: String },
}

/// Validated application configuration derived from `config.toml`.
///
/// All values are validated against named constants at load time.
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Markers --
    pub subsystem_markers: [String; 2],
    pub start_marker: String,
    pub consumed_suffix: String,

    // -- Labels --
    pub labels: [String; 2],

    // -- Extraction --
    pub extraction: ExtractionMode,
    pub require_identifier: bool,

    // -- Chart --
    pub chart: ChartSpec,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            subsystem_markers: [
                constants::DEFAULT_SUBSYSTEM_A_MARKER.to_string(),
                constants::DEFAULT_SUBSYSTEM_B_MARKER.to_string(),
            ],
            start_marker: constants::DEFAULT_START_MARKER.to_string(),
            consumed_suffix: constants::DEFAULT_CONSUMED_SUFFIX.to_string(),
            labels: [
                constants::DEFAULT_SUBSYSTEM_A_LABEL.to_string(),
                constants::DEFAULT_SUBSYSTEM_B_LABEL.to_string(),
            ],
            extraction: ExtractionMode::Positional {
                field_index: constants::DEFAULT_SAMPLE_FIELD_INDEX,
            },
            require_identifier: false,
            chart: ChartSpec::default(),
            log_level: None,
        }
    }
}

impl AppConfig {
    /// Build the scan rule set described by this configuration.
    pub fn scan_rules(&self) -> Result<ScanRules, ConfigError> {
        let extractor: Box<dyn SampleExtractor> = match &self.extraction {
            ExtractionMode::Positional { field_index } => Box::new(PositionalField {
                index: *field_index,
            }),
            ExtractionMode::Pattern { pattern } => Box::new(PatternField::new(pattern)?),
        };
        let [marker_a, marker_b] = self.subsystem_markers.clone();
        let [label_a, label_b] = self.labels.clone();

        Ok(ScanRules {
            subsystems: [
                SubsystemRule {
                    marker: marker_a,
                    label: label_a,
                },
                SubsystemRule {
                    marker: marker_b,
                    label: label_b,
                },
            ],
            start_marker: self.start_marker.clone(),
            consumed_suffix: self.consumed_suffix.clone(),
            require_identifier: self.require_identifier,
            extractor,
        })
    }
}

/// Accept a text override if it is non-empty and short enough.
fn validate_text(
    section: &str,
    key: &str,
    value: Option<&String>,
    target: &mut String,
    warnings: &mut Vec<String>,
) {
    let Some(value) = value else {
        return;
    };
    if value.is_empty() || value.len() > constants::MAX_MARKER_LENGTH {
        warnings.push(
            ConfigError::ValueOutOfRange {
                field: format!("[{section}] {key}"),
                value: value.clone(),
                expected: format!(
                    "1-{} characters; using default \"{target}\"",
                    constants::MAX_MARKER_LENGTH
                ),
            }
            .to_string(),
        );
    } else {
        *target = value.clone();
    }
}

/// Accept a chart dimension if it is within bounds.
fn validate_dimension(key: &str, value: Option<u32>, target: &mut u32, warnings: &mut Vec<String>) {
    let Some(value) = value else {
        return;
    };
    if (constants::MIN_CHART_DIMENSION..=constants::MAX_CHART_DIMENSION).contains(&value) {
        *target = value;
    } else {
        warnings.push(
            ConfigError::ValueOutOfRange {
                field: format!("[chart] {key}"),
                value: value.to_string(),
                expected: format!(
                    "{}-{}; using default {target}",
                    constants::MIN_CHART_DIMENSION,
                    constants::MAX_CHART_DIMENSION
                ),
            }
            .to_string(),
        );
    }
}

/// Validate a parsed config file, accumulating every problem as a warning.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let mut config = AppConfig::default();

    // -- Markers --
    {
        let [marker_a, marker_b] = &mut config.subsystem_markers;
        validate_text(
            "markers",
            "subsystem_a",
            raw.markers.subsystem_a.as_ref(),
            marker_a,
            &mut warnings,
        );
        validate_text(
            "markers",
            "subsystem_b",
            raw.markers.subsystem_b.as_ref(),
            marker_b,
            &mut warnings,
        );
    }
    validate_text(
        "markers",
        "start",
        raw.markers.start.as_ref(),
        &mut config.start_marker,
        &mut warnings,
    );
    validate_text(
        "markers",
        "consumed_suffix",
        raw.markers.consumed_suffix.as_ref(),
        &mut config.consumed_suffix,
        &mut warnings,
    );
    if config.subsystem_markers[0] == config.subsystem_markers[1] {
        warnings.push(format!(
            "[markers] subsystem_a and subsystem_b are both \"{}\"; \
             Subsystem B's identifier will never be captured.",
            config.subsystem_markers[0]
        ));
    }

    // -- Labels --
    {
        let [label_a, label_b] = &mut config.labels;
        validate_text(
            "labels",
            "subsystem_a",
            raw.labels.subsystem_a.as_ref(),
            label_a,
            &mut warnings,
        );
        validate_text(
            "labels",
            "subsystem_b",
            raw.labels.subsystem_b.as_ref(),
            label_b,
            &mut warnings,
        );
    }

    // -- Extraction --
    let field_index = match raw.extraction.field_index {
        Some(index) if index <= constants::MAX_SAMPLE_FIELD_INDEX => index,
        Some(index) => {
            warnings.push(
                ConfigError::ValueOutOfRange {
                    field: "[extraction] field_index".to_string(),
                    value: index.to_string(),
                    expected: format!(
                        "0-{}; using default {}",
                        constants::MAX_SAMPLE_FIELD_INDEX,
                        constants::DEFAULT_SAMPLE_FIELD_INDEX
                    ),
                }
                .to_string(),
            );
            constants::DEFAULT_SAMPLE_FIELD_INDEX
        }
        None => constants::DEFAULT_SAMPLE_FIELD_INDEX,
    };
    let positional = ExtractionMode::Positional { field_index };

    config.extraction = match raw.extraction.mode.as_deref().map(str::to_lowercase).as_deref() {
        None | Some("positional") => positional,
        Some("pattern") => match raw.extraction.pattern {
            Some(pattern) => match PatternField::new(&pattern) {
                Ok(_) => ExtractionMode::Pattern { pattern },
                Err(e) => {
                    warnings.push(format!("[extraction] {e}. Using positional extraction."));
                    positional
                }
            },
            None => {
                warnings.push(
                    "[extraction] mode = \"pattern\" requires a pattern. \
                     Using positional extraction."
                        .to_string(),
                );
                positional
            }
        },
        Some(other) => {
            warnings.push(format!(
                "[extraction] mode = \"{other}\" is not recognised. \
                 Expected \"positional\" or \"pattern\". Using positional extraction."
            ));
            positional
        }
    };

    if let Some(required) = raw.extraction.require_identifier {
        config.require_identifier = required;
    }

    // -- Chart --
    validate_text(
        "chart",
        "title",
        raw.chart.title.as_ref(),
        &mut config.chart.title,
        &mut warnings,
    );
    validate_text(
        "chart",
        "x_label",
        raw.chart.x_label.as_ref(),
        &mut config.chart.x_label,
        &mut warnings,
    );
    validate_text(
        "chart",
        "y_label",
        raw.chart.y_label.as_ref(),
        &mut config.chart.y_label,
        &mut warnings,
    );
    validate_dimension("width", raw.chart.width, &mut config.chart.width, &mut warnings);
    validate_dimension("height", raw.chart.height, &mut config.chart.height, &mut warnings);

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    (config, warnings)
}

/// Load and validate a config.toml.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings.
/// If the file is unreadable or unparseable, returns defaults with a warning;
/// the scan still runs with the built-in markers.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(source) => {
            let err = ConfigError::Io {
                path: config_path.to_path_buf(),
                source,
            };
            return (AppConfig::default(), vec![format!("{err}. Using defaults.")]);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(source) => {
            let err = ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source,
            };
            return (
                AppConfig::default(),
                vec![format!(
                    "{err}. Using defaults. See config.example.toml for the expected format."
                )],
            );
        }
    };

    // Logging may not be initialised yet (the level comes from this file),
    // so warnings are returned for the caller to report.
    let (config, warnings) = validate(raw);
    tracing::debug!(
        path = %config_path.display(),
        warnings = warnings.len(),
        "Loaded config.toml"
    );
    (config, warnings)
}
