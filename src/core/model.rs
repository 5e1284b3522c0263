// instrscope - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.

use serde::Serialize;

// =============================================================================
// Subsystem
// =============================================================================

/// One of the two programs being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Subsystem {
    A,
    B,
}

impl Subsystem {
    /// Both subsystems in evaluation (and legend) order.
    pub fn all() -> [Subsystem; 2] {
        [Subsystem::A, Subsystem::B]
    }

    /// Position of this subsystem in `all()`.
    pub fn index(self) -> usize {
        match self {
            Subsystem::A => 0,
            Subsystem::B => 1,
        }
    }

    /// Short name used in logs and exports.
    pub fn tag(self) -> &'static str {
        match self {
            Subsystem::A => "a",
            Subsystem::B => "b",
        }
    }
}

// =============================================================================
// Collection gate
// =============================================================================

/// One-shot latch deciding whether consumption lines are collected.
///
/// Starts `Waiting`; the first start-of-interest line moves it to
/// `Collecting`, where it stays for the rest of the scan. There is no
/// transition back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gate {
    #[default]
    Waiting,
    Collecting,
}

impl Gate {
    /// Open the gate. Returns true only on the call that actually opened it.
    pub fn open(&mut self) -> bool {
        match self {
            Gate::Waiting => {
                *self = Gate::Collecting;
                true
            }
            Gate::Collecting => false,
        }
    }

    pub fn is_collecting(self) -> bool {
        self == Gate::Collecting
    }
}

// =============================================================================
// Series
// =============================================================================

/// Samples collected for one subsystem, in order of appearance.
///
/// The position of a sample in `samples` is its x coordinate when plotted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub subsystem: Subsystem,

    /// Display name used in the legend and reports.
    pub label: String,

    /// Identifier token captured from the log, if its line was seen.
    pub identifier: Option<String>,

    /// Instruction counts, append-only.
    pub samples: Vec<i64>,
}

impl Series {
    pub fn new(subsystem: Subsystem, label: impl Into<String>) -> Self {
        Self {
            subsystem,
            label: label.into(),
            identifier: None,
            samples: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// `(index, value)` pairs ready for plotting.
    pub fn points(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.samples.iter().copied().enumerate()
    }
}

// =============================================================================
// Scan outcome
// =============================================================================

/// Everything a completed scan produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    /// One series per subsystem, ordered as `Subsystem::all()`.
    pub series: [Series; 2],

    /// Number of lines read, including the ones that matched nothing.
    pub lines_scanned: u64,

    /// 1-based line number of the first start-of-interest marker.
    pub collecting_from: Option<u64>,
}

impl ScanOutcome {
    pub fn series_for(&self, subsystem: Subsystem) -> &Series {
        &self.series[subsystem.index()]
    }

    /// Samples collected for a subsystem.
    pub fn samples(&self, subsystem: Subsystem) -> &[i64] {
        &self.series_for(subsystem).samples
    }

    pub fn total_samples(&self) -> usize {
        self.series.iter().map(Series::len).sum()
    }
}

// =============================================================================
// Chart description
// =============================================================================

/// Presentation settings shared by every chart sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Pixel size of file output and the initial window.
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSpec {
    fn default() -> Self {
        use crate::util::constants;
        Self {
            title: constants::DEFAULT_CHART_TITLE.to_string(),
            x_label: constants::DEFAULT_X_LABEL.to_string(),
            y_label: constants::DEFAULT_Y_LABEL.to_string(),
            width: constants::DEFAULT_CHART_WIDTH,
            height: constants::DEFAULT_CHART_HEIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_starts_waiting() {
        assert_eq!(Gate::default(), Gate::Waiting);
        assert!(!Gate::default().is_collecting());
    }

    #[test]
    fn test_gate_opens_once() {
        let mut gate = Gate::default();
        assert!(gate.open());
        assert!(gate.is_collecting());
        // A second marker is a no-op and does not report a transition.
        assert!(!gate.open());
        assert!(gate.is_collecting());
    }

    #[test]
    fn test_subsystem_index_matches_all_order() {
        for (i, s) in Subsystem::all().into_iter().enumerate() {
            assert_eq!(s.index(), i);
        }
    }

    #[test]
    fn test_series_points_are_indexed_from_zero() {
        let mut series = Series::new(Subsystem::B, "Aob dex");
        series.samples = vec![7, 9];
        let points: Vec<_> = series.points().collect();
        assert_eq!(points, vec![(0, 7), (1, 9)]);
    }
}
