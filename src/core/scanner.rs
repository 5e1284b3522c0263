// instrscope - core/scanner.rs
//
// Line-by-line classification of a performance test log.
// Core layer: accepts BufRead trait objects, never opens files itself.
//
// Rules, evaluated in order for every line:
//   1. Subsystem A identifier marker -> capture token, skip remaining rules
//   2. Subsystem B identifier marker -> capture token, skip remaining rules
//   3. start-of-interest marker      -> open the gate (rules 4/5 still run)
//   4. gate open + "<A id><suffix>"  -> extract sample into A
//   5. gate open + "<B id><suffix>"  -> extract sample into B
//
// An identifier that was never captured matches as the empty string, so the
// needle degrades to the bare suffix. `require_identifier` turns that off.

use crate::core::extract::{PositionalField, SampleExtractor};
use crate::core::model::{Gate, ScanOutcome, Series, Subsystem};
use crate::util::constants;
use crate::util::error::{LineError, ScanError};
use crate::util::logging::preview;
use std::io::BufRead;
use std::path::Path;

/// How one subsystem is recognised in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsystemRule {
    /// Substring marking the line that carries the identifier.
    pub marker: String,
    /// Display name for reports and the chart legend.
    pub label: String,
}

/// Complete rule set for one scan.
#[derive(Debug)]
pub struct ScanRules {
    /// Indexed by `Subsystem::index()`.
    pub subsystems: [SubsystemRule; 2],
    pub start_marker: String,
    pub consumed_suffix: String,
    /// Skip consumption rules for a subsystem whose identifier is unset.
    pub require_identifier: bool,
    pub extractor: Box<dyn SampleExtractor>,
}

impl Default for ScanRules {
    fn default() -> Self {
        Self {
            subsystems: [
                SubsystemRule {
                    marker: constants::DEFAULT_SUBSYSTEM_A_MARKER.to_string(),
                    label: constants::DEFAULT_SUBSYSTEM_A_LABEL.to_string(),
                },
                SubsystemRule {
                    marker: constants::DEFAULT_SUBSYSTEM_B_MARKER.to_string(),
                    label: constants::DEFAULT_SUBSYSTEM_B_LABEL.to_string(),
                },
            ],
            start_marker: constants::DEFAULT_START_MARKER.to_string(),
            consumed_suffix: constants::DEFAULT_CONSUMED_SUFFIX.to_string(),
            require_identifier: false,
            extractor: Box::new(PositionalField::default()),
        }
    }
}

impl ScanRules {
    pub fn rule(&self, subsystem: Subsystem) -> &SubsystemRule {
        &self.subsystems[subsystem.index()]
    }
}

/// Incremental scanner state. Feed lines in log order, then `finish`.
#[derive(Debug)]
pub struct Scanner<'r> {
    rules: &'r ScanRules,
    gate: Gate,
    series: [Series; 2],
    /// Identifier + suffix for each subsystem, rebuilt on capture.
    needles: [String; 2],
    lines_scanned: u64,
    collecting_from: Option<u64>,
}

impl<'r> Scanner<'r> {
    pub fn new(rules: &'r ScanRules) -> Self {
        let [a, b] = Subsystem::all();
        Self {
            rules,
            gate: Gate::default(),
            series: [
                Series::new(a, rules.rule(a).label.clone()),
                Series::new(b, rules.rule(b).label.clone()),
            ],
            needles: [rules.consumed_suffix.clone(), rules.consumed_suffix.clone()],
            lines_scanned: 0,
            collecting_from: None,
        }
    }

    pub fn gate(&self) -> Gate {
        self.gate
    }

    pub fn identifier(&self, subsystem: Subsystem) -> Option<&str> {
        self.series[subsystem.index()].identifier.as_deref()
    }

    pub fn samples(&self, subsystem: Subsystem) -> &[i64] {
        &self.series[subsystem.index()].samples
    }

    pub fn lines_scanned(&self) -> u64 {
        self.lines_scanned
    }

    /// Classify one line (without its trailing newline).
    pub fn feed(&mut self, line: &str) -> Result<(), LineError> {
        let rules = self.rules;
        self.lines_scanned += 1;

        for subsystem in Subsystem::all() {
            let marker = &rules.rule(subsystem).marker;
            if line.contains(marker.as_str()) {
                let token = line
                    .split(' ')
                    .nth(1)
                    .ok_or_else(|| LineError::MissingIdentifier {
                        marker: marker.clone(),
                    })?;
                self.capture_identifier(subsystem, token);
                return Ok(());
            }
        }

        if line.contains(rules.start_marker.as_str()) && self.gate.open() {
            self.collecting_from = Some(self.lines_scanned);
            tracing::debug!(line = self.lines_scanned, "Collection window opened");
        }

        if !self.gate.is_collecting() {
            return Ok(());
        }

        for subsystem in Subsystem::all() {
            let idx = subsystem.index();
            if rules.require_identifier && self.series[idx].identifier.is_none() {
                continue;
            }
            if line.contains(self.needles[idx].as_str()) {
                let sample = rules.extractor.extract(line)?;
                tracing::trace!(
                    subsystem = subsystem.tag(),
                    sample,
                    line = preview(line),
                    "Sample collected"
                );
                self.series[idx].samples.push(sample);
            }
        }

        Ok(())
    }

    fn capture_identifier(&mut self, subsystem: Subsystem, token: &str) {
        let idx = subsystem.index();
        let series = &mut self.series[idx];
        if let Some(existing) = series.identifier.as_deref() {
            if existing != token {
                tracing::debug!(
                    subsystem = subsystem.tag(),
                    kept = existing,
                    ignored = token,
                    "Repeated identifier line ignored"
                );
            }
            return;
        }

        tracing::info!(
            subsystem = subsystem.tag(),
            label = %series.label,
            identifier = token,
            "Identifier captured"
        );
        series.identifier = Some(token.to_string());
        self.needles[idx] = format!("{token}{}", self.rules.consumed_suffix);
    }

    pub fn finish(self) -> ScanOutcome {
        ScanOutcome {
            series: self.series,
            lines_scanned: self.lines_scanned,
            collecting_from: self.collecting_from,
        }
    }
}

/// Scan every line of `reader` and return the collected series.
///
/// `file` is only used to give errors context. Stops at the first read or
/// line error.
pub fn scan_reader<R: BufRead>(
    reader: R,
    file: &Path,
    rules: &ScanRules,
) -> Result<ScanOutcome, ScanError> {
    tracing::debug!(
        file = %file.display(),
        extractor = %rules.extractor.describe(),
        require_identifier = rules.require_identifier,
        "Scan started"
    );

    let mut scanner = Scanner::new(rules);
    for line in reader.lines() {
        let line_number = scanner.lines_scanned() + 1;
        let line = line.map_err(|source| ScanError::Read {
            file: file.to_path_buf(),
            line_number,
            source,
        })?;
        scanner.feed(&line).map_err(|source| {
            tracing::debug!(line = line_number, text = preview(&line), "Malformed line");
            ScanError::Line {
                file: file.to_path_buf(),
                line_number,
                source,
            }
        })?;
    }

    let outcome = scanner.finish();
    tracing::info!(
        file = %file.display(),
        lines = outcome.lines_scanned,
        samples_a = outcome.samples(Subsystem::A).len(),
        samples_b = outcome.samples(Subsystem::B).len(),
        "Scan complete"
    );
    Ok(outcome)
}
