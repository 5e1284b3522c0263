// instrscope - core/extract.rs
//
// Sample extraction policies: turn one matching log line into one integer.
// The scan loop only sees the `SampleExtractor` trait, so the policy can be
// swapped without touching the rules.

use crate::util::constants;
use crate::util::error::{ConfigError, LineError};
use regex::Regex;
use std::fmt;

/// Pulls an instruction count out of a line that matched a consumption rule.
pub trait SampleExtractor: fmt::Debug {
    fn extract(&self, line: &str) -> Result<i64, LineError>;

    /// Human-readable description for logs.
    fn describe(&self) -> String;
}

/// Parse an integer field the way the harness output is written.
///
/// Surrounding whitespace (a stray `\r`, trailing spaces) is tolerated; any
/// other non-digit content is an error.
fn parse_sample(field: &str) -> Result<i64, LineError> {
    field
        .trim()
        .parse::<i64>()
        .map_err(|source| LineError::InvalidSample {
            field: field.to_string(),
            source,
        })
}

// =============================================================================
// Positional
// =============================================================================

/// Reads the field at a fixed position after splitting on single spaces.
///
/// Consecutive spaces yield empty fields, so positions are stable only for
/// logs written with exactly one space between tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionalField {
    pub index: usize,
}

impl Default for PositionalField {
    fn default() -> Self {
        Self {
            index: constants::DEFAULT_SAMPLE_FIELD_INDEX,
        }
    }
}

impl SampleExtractor for PositionalField {
    fn extract(&self, line: &str) -> Result<i64, LineError> {
        let mut fields = line.split(' ');
        match fields.nth(self.index) {
            Some(field) => parse_sample(field),
            None => Err(LineError::MissingField {
                field_index: self.index,
                fields_found: line.split(' ').count(),
            }),
        }
    }

    fn describe(&self) -> String {
        format!("field {}", self.index)
    }
}

// =============================================================================
// Pattern
// =============================================================================

/// Reads the `sample` named capture group of a regex.
#[derive(Debug, Clone)]
pub struct PatternField {
    regex: Regex,
}

impl PatternField {
    /// Compile and validate an extraction pattern.
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        if pattern.len() > constants::MAX_REGEX_PATTERN_LENGTH {
            return Err(ConfigError::ValueOutOfRange {
                field: "extraction.pattern".to_string(),
                value: format!("{} chars", pattern.len()),
                expected: format!("at most {} chars", constants::MAX_REGEX_PATTERN_LENGTH),
            });
        }
        let regex = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        if !regex
            .capture_names()
            .flatten()
            .any(|name| name == constants::SAMPLE_CAPTURE_GROUP)
        {
            return Err(ConfigError::MissingCaptureGroup {
                pattern: pattern.to_string(),
                group: constants::SAMPLE_CAPTURE_GROUP,
            });
        }
        Ok(Self { regex })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl SampleExtractor for PatternField {
    fn extract(&self, line: &str) -> Result<i64, LineError> {
        let field = self
            .regex
            .captures(line)
            .and_then(|caps| caps.name(constants::SAMPLE_CAPTURE_GROUP))
            .ok_or_else(|| LineError::PatternMismatch {
                pattern: self.pattern().to_string(),
            })?;
        parse_sample(field.as_str())
    }

    fn describe(&self) -> String {
        format!("pattern '{}'", self.pattern())
    }
}
