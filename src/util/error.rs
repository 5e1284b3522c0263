// instrscope - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Every error names the stage that produced it (open, scan, export, render)
// and keeps the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

/// Top-level error type for all instrscope operations.
#[derive(Debug)]
pub enum InstrScopeError {
    /// Reading or scanning the log failed.
    Scan(ScanError),

    /// Drawing or saving the chart failed.
    Render(RenderError),

    /// Writing an export file failed.
    Export(ExportError),

    /// Configuration could not be turned into scan rules.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for InstrScopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scan(e) => write!(f, "Scan error: {e}"),
            Self::Render(e) => write!(f, "Chart error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for InstrScopeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Scan(e) => Some(e),
            Self::Render(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Scan errors
// ---------------------------------------------------------------------------

/// Errors raised while reading and classifying log lines.
///
/// All of them are fatal: the scan stops at the first one and nothing is
/// printed or plotted.
#[derive(Debug)]
pub enum ScanError {
    /// The log file could not be opened.
    Open { file: PathBuf, source: io::Error },

    /// Reading a line failed (I/O error or invalid UTF-8).
    Read {
        file: PathBuf,
        line_number: u64,
        source: io::Error,
    },

    /// A line matched a rule but could not be interpreted.
    Line {
        file: PathBuf,
        line_number: u64,
        source: LineError,
    },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { file, source } => {
                write!(f, "cannot open log '{}': {source}", file.display())
            }
            Self::Read {
                file,
                line_number,
                source,
            } => write!(
                f,
                "'{}' line {line_number}: read failed: {source}",
                file.display()
            ),
            Self::Line {
                file,
                line_number,
                source,
            } => write!(f, "'{}' line {line_number}: {source}", file.display()),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Read { source, .. } => Some(source),
            Self::Line { source, .. } => Some(source),
        }
    }
}

impl From<ScanError> for InstrScopeError {
    fn from(e: ScanError) -> Self {
        Self::Scan(e)
    }
}

/// Why a single matching line could not be consumed.
#[derive(Debug)]
pub enum LineError {
    /// An identifier line had nothing after its first space.
    MissingIdentifier { marker: String },

    /// The sample field is beyond the end of the line.
    MissingField {
        field_index: usize,
        fields_found: usize,
    },

    /// The sample field is not an integer.
    InvalidSample {
        field: String,
        source: ParseIntError,
    },

    /// The extraction pattern did not match the line.
    PatternMismatch { pattern: String },
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingIdentifier { marker } => {
                write!(f, "'{marker}' line has no identifier after the first space")
            }
            Self::MissingField {
                field_index,
                fields_found,
            } => write!(
                f,
                "expected a sample in field {field_index}, line has only {fields_found} fields"
            ),
            Self::InvalidSample { field, source } => {
                write!(f, "sample field '{field}' is not an integer: {source}")
            }
            Self::PatternMismatch { pattern } => {
                write!(f, "line does not match extraction pattern '{pattern}'")
            }
        }
    }
}

impl std::error::Error for LineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidSample { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Render errors
// ---------------------------------------------------------------------------

/// Errors related to drawing or persisting the chart.
#[derive(Debug)]
pub enum RenderError {
    /// The output path has an extension no file sink handles.
    UnsupportedFormat { path: PathBuf },

    /// The chart backend failed while drawing.
    Draw { reason: String },

    /// The SVG document could not be rasterised.
    Rasterise { reason: String },

    /// The interactive window could not be opened.
    Window { reason: String },

    /// I/O error writing the chart file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat { path } => write!(
                f,
                "cannot save chart as '{}': use a .svg or .png extension",
                path.display()
            ),
            Self::Draw { reason } => write!(f, "drawing failed: {reason}"),
            Self::Rasterise { reason } => write!(f, "PNG rasterisation failed: {reason}"),
            Self::Window { reason } => write!(f, "cannot open chart window: {reason}"),
            Self::Io { path, source } => {
                write!(f, "cannot write chart '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<RenderError> for InstrScopeError {
    fn from(e: RenderError) -> Self {
        Self::Render(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for InstrScopeError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration values.
///
/// config.toml problems are downgraded to warnings by the loader; these
/// variants surface when a value is validated directly.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// An extraction pattern is not a usable regex.
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    /// An extraction pattern compiled but lacks the sample capture group.
    MissingCaptureGroup { pattern: String, group: &'static str },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::InvalidPattern { pattern, source } => {
                write!(f, "Invalid extraction pattern '{pattern}': {source}")
            }
            Self::MissingCaptureGroup { pattern, group } => write!(
                f,
                "Extraction pattern '{pattern}' has no named group '(?P<{group}>...)'"
            ),
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::InvalidPattern { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for InstrScopeError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for instrscope results.
pub type Result<T> = std::result::Result<T, InstrScopeError>;
