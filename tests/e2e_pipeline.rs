// instrscope - tests/e2e_pipeline.rs
//
// End-to-end tests for the scan -> report -> export -> plot pipeline.
//
// These tests read real log fixtures from disk and write real export and
// chart files into temporary directories. The only stand-in is a recording
// chart sink, used where a window would otherwise open.

use instrscope::app::pipeline::{run, RunOptions};
use instrscope::core::model::{ChartSpec, Series, Subsystem};
use instrscope::core::scanner::{scan_reader, ScanRules};
use instrscope::platform::config::{load_config, ExtractionMode};
use instrscope::platform::fs::open_log;
use instrscope::render::{ChartSink, FileSink};
use instrscope::util::error::{InstrScopeError, LineError, RenderError, ScanError};
use std::path::PathBuf;

// =============================================================================
// Helpers
// =============================================================================

const SERUM_ID: &str = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin";
const AOB_ID: &str = "aob1CPXmNAiv8RHkD5NUvFP6yZk9C3jyj1wK4yHPLAg";

/// Absolute path to an on-disk fixture file.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Sink that remembers every chart it was asked to render.
#[derive(Default)]
struct RecordingSink {
    rendered: Vec<(ChartSpec, Vec<Series>)>,
}

impl ChartSink for RecordingSink {
    fn render(&mut self, spec: &ChartSpec, series: &[Series]) -> Result<(), RenderError> {
        self.rendered.push((spec.clone(), series.to_vec()));
        Ok(())
    }
}

// =============================================================================
// Scanning real harness output
// =============================================================================

#[test]
fn e2e_scans_harness_log() {
    let path = fixture("perf_sample.log");
    let outcome = scan_reader(open_log(&path).unwrap(), &path, &ScanRules::default()).unwrap();

    let serum = outcome.series_for(Subsystem::A);
    let aob = outcome.series_for(Subsystem::B);
    assert_eq!(serum.identifier.as_deref(), Some(SERUM_ID));
    assert_eq!(aob.identifier.as_deref(), Some(AOB_ID));

    // The warm-up call before the first "New Order" is not collected.
    assert_eq!(serum.samples, vec![41250, 43871, 52016]);
    assert_eq!(aob.samples, vec![18342, 19105]);
    assert_eq!(outcome.collecting_from, Some(7));
    assert_eq!(outcome.lines_scanned, 26);
}

#[test]
fn e2e_prints_and_plots_unequal_series() {
    let mut out = Vec::new();
    let mut sink = RecordingSink::default();
    run(
        &RunOptions::new(fixture("perf_sample.log")),
        &ScanRules::default(),
        &mut out,
        Some(&mut sink),
    )
    .unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "[41250, 43871, 52016] [18342, 19105]\n"
    );
    assert_eq!(sink.rendered.len(), 1);
    let (spec, series) = &sink.rendered[0];
    assert_eq!(spec, &ChartSpec::default());
    assert_eq!(series[0].label, "Serum dex");
    assert_eq!(series[1].label, "Aob dex");
    // Neither series is truncated to the other's length.
    assert_eq!(series[0].len(), 3);
    assert_eq!(series[1].len(), 2);
}

// =============================================================================
// Failure and empty cases
// =============================================================================

#[test]
fn e2e_malformed_line_stops_everything() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("samples.json");
    let options = RunOptions {
        export_json: Some(json.clone()),
        ..RunOptions::new(fixture("malformed.log"))
    };
    let mut out = Vec::new();
    let mut sink = RecordingSink::default();

    let err = run(&options, &ScanRules::default(), &mut out, Some(&mut sink)).unwrap_err();
    match err {
        InstrScopeError::Scan(ScanError::Line {
            line_number,
            source: LineError::InvalidSample { ref field, .. },
            ..
        }) => {
            assert_eq!(line_number, 5);
            assert_eq!(field, "many");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("malformed.log"));
    assert!(out.is_empty(), "nothing may be printed after a scan failure");
    assert!(sink.rendered.is_empty(), "nothing may be plotted after a scan failure");
    assert!(!json.exists());
}

#[test]
fn e2e_missing_log_is_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut out = Vec::new();
    let err = run(
        &RunOptions::new(dir.path().join("out.log")),
        &ScanRules::default(),
        &mut out,
        None,
    )
    .unwrap_err();
    assert!(matches!(err, InstrScopeError::Scan(ScanError::Open { .. })));
    assert!(out.is_empty());
}

#[test]
fn e2e_empty_log_plots_empty_chart() {
    let mut out = Vec::new();
    let mut sink = RecordingSink::default();
    run(
        &RunOptions::new(fixture("empty.log")),
        &ScanRules::default(),
        &mut out,
        Some(&mut sink),
    )
    .unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "[] []\n");
    assert_eq!(sink.rendered.len(), 1);
    assert!(sink.rendered[0].1.iter().all(Series::is_empty));
}

#[test]
fn e2e_no_start_marker_collects_nothing() {
    let path = fixture("no_start.log");
    let outcome = scan_reader(open_log(&path).unwrap(), &path, &ScanRules::default()).unwrap();
    assert_eq!(outcome.collecting_from, None);
    assert_eq!(outcome.total_samples(), 0);
    assert_eq!(
        outcome.series_for(Subsystem::B).identifier.as_deref(),
        Some(AOB_ID)
    );
}

// =============================================================================
// Outputs
// =============================================================================

#[test]
fn e2e_writes_chart_and_exports() {
    let dir = tempfile::tempdir().unwrap();
    let chart = dir.path().join("charts").join("orders.svg");
    let csv = dir.path().join("samples.csv");
    let json = dir.path().join("samples.json");

    let options = RunOptions {
        summary: true,
        export_csv: Some(csv.clone()),
        export_json: Some(json.clone()),
        ..RunOptions::new(fixture("perf_sample.log"))
    };
    let mut sink = FileSink::new(&chart).unwrap();
    let mut out = Vec::new();
    run(&options, &ScanRules::default(), &mut out, Some(&mut sink)).unwrap();

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.lines().any(|l| l.starts_with("Serum dex")));
    assert!(printed.lines().any(|l| l.starts_with("Aob dex")));

    let svg = std::fs::read_to_string(&chart).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Serum dex"));

    let mut reader = csv::Reader::from_path(&csv).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 5);
    assert_eq!(&rows[0][0], "Serum dex");
    assert_eq!(&rows[0][1], SERUM_ID);
    assert_eq!(&rows[4][3], "19105");

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(value["series"][1]["samples"][1], 19105);
    assert!(value["source"].as_str().unwrap().ends_with("perf_sample.log"));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn e2e_config_with_pattern_extraction() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        r#"
[labels]
subsystem_a = "Serum"
subsystem_b = "AOB"

[extraction]
mode = "pattern"
pattern = 'consumed (?P<sample>\d+) of'
"#,
    )
    .unwrap();

    let (config, warnings) = load_config(&config_path);
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    assert!(matches!(config.extraction, ExtractionMode::Pattern { .. }));

    let rules = config.scan_rules().unwrap();
    let mut out = Vec::new();
    let mut sink = RecordingSink::default();
    run(
        &RunOptions::new(fixture("perf_sample.log")),
        &rules,
        &mut out,
        Some(&mut sink),
    )
    .unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "[41250, 43871, 52016] [18342, 19105]\n"
    );
    assert_eq!(sink.rendered[0].1[1].label, "AOB");
}
