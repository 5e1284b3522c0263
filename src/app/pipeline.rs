// instrscope - app/pipeline.rs
//
// One complete run: open -> scan -> print -> (summary) -> (export) -> plot.
//
// The scan completes before anything is written, so a malformed line stops
// the run with no partial report, no export files and no chart.

use crate::core::export;
use crate::core::model::{ChartSpec, ScanOutcome, Subsystem};
use crate::core::report;
use crate::core::scanner::{scan_reader, ScanRules};
use crate::platform::fs;
use crate::render::ChartSink;
use crate::util::error::{ExportError, InstrScopeError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// What one run should produce besides the sample line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Log to scan.
    pub log_path: PathBuf,
    /// Print the statistics table after the sample line.
    pub summary: bool,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
    pub chart: ChartSpec,
}

impl RunOptions {
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
            summary: false,
            export_csv: None,
            export_json: None,
            chart: ChartSpec::default(),
        }
    }
}

fn stdout_err(source: std::io::Error) -> InstrScopeError {
    InstrScopeError::Io {
        path: PathBuf::from("<stdout>"),
        operation: "write report",
        source,
    }
}

/// Run the pipeline, writing the report to `out` and the chart to `sink`.
///
/// Pass `None` as the sink to skip charting. Boxed sinks can be passed
/// with `Option::as_deref_mut`.
pub fn run<W: Write>(
    options: &RunOptions,
    rules: &ScanRules,
    out: &mut W,
    sink: Option<&mut (dyn ChartSink + '_)>,
) -> Result<ScanOutcome> {
    let reader = fs::open_log(&options.log_path)?;
    let outcome = scan_reader(reader, &options.log_path, rules)?;
    warn_if_empty(&outcome, rules);

    writeln!(out, "{}", report::format_samples(&outcome.series)).map_err(stdout_err)?;
    if options.summary {
        write!(out, "{}", report::format_summary(&outcome.series)).map_err(stdout_err)?;
    }
    out.flush().map_err(stdout_err)?;

    if let Some(path) = &options.export_csv {
        write_export(path, |w| export::export_csv(&outcome.series, w, path))?;
    }
    if let Some(path) = &options.export_json {
        write_export(path, |w| {
            export::export_json(&outcome.series, &options.log_path, w, path)
        })?;
    }

    if let Some(sink) = sink {
        sink.render(&options.chart, &outcome.series)?;
    }

    Ok(outcome)
}

/// Create `path`, hand a buffered writer to `write`, and flush it.
fn write_export<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut std::io::BufWriter<std::fs::File>) -> std::result::Result<usize, ExportError>,
{
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = fs::create_output(path).map_err(io_err)?;
    let rows = write(&mut writer)?;
    writer.flush().map_err(io_err)?;
    tracing::info!(path = %path.display(), samples = rows, "Export written");
    Ok(())
}

/// Explain an empty result; it is not an error, but usually means the
/// markers do not fit the log.
fn warn_if_empty(outcome: &ScanOutcome, rules: &ScanRules) {
    if outcome.collecting_from.is_none() {
        tracing::warn!(
            marker = %rules.start_marker,
            "Start marker never seen; no samples were collected"
        );
        return;
    }
    for subsystem in Subsystem::all() {
        let series = outcome.series_for(subsystem);
        if series.identifier.is_none() {
            tracing::warn!(
                subsystem = subsystem.tag(),
                marker = %rules.rule(subsystem).marker,
                samples = series.len(),
                "Identifier line never seen"
            );
        } else if series.is_empty() {
            tracing::warn!(
                subsystem = subsystem.tag(),
                label = %series.label,
                "No samples collected"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Series;
    use crate::render::FileSink;
    use crate::util::error::{RenderError, ScanError};

    /// Sink that records what it was asked to draw.
    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<Vec<Series>>,
    }

    impl ChartSink for RecordingSink {
        fn render(
            &mut self,
            _spec: &ChartSpec,
            series: &[Series],
        ) -> std::result::Result<(), RenderError> {
            self.calls.push(series.to_vec());
            Ok(())
        }
    }

    fn write_log(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("out.log");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_run_prints_and_renders() {
        let dir = tempfile::tempdir().unwrap();
        let log = write_log(
            dir.path(),
            "Serum_dex_key IDA\nAob_dex_key IDB\nNew Order\n\
             IDA consumed 1 1 1 1 10\nIDB consumed 1 1 1 1 20\nIDA consumed 1 1 1 1 30\n",
        );
        let mut out = Vec::new();
        let mut sink = RecordingSink::default();
        let outcome = run(
            &RunOptions::new(&log),
            &ScanRules::default(),
            &mut out,
            Some(&mut sink),
        )
        .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "[10, 30] [20]\n");
        assert_eq!(sink.calls.len(), 1);
        assert_eq!(sink.calls[0][0].samples, vec![10, 30]);
        assert_eq!(sink.calls[0][1].label, "Aob dex");
        assert_eq!(outcome.total_samples(), 3);
    }

    #[test]
    fn test_run_failure_produces_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let log = write_log(
            dir.path(),
            "Serum_dex_key ABC\nNew Order\nABC consumed 1 1 1 1 5\nABC consumed a b c d e X\n",
        );
        let csv = dir.path().join("samples.csv");
        let options = RunOptions {
            export_csv: Some(csv.clone()),
            ..RunOptions::new(&log)
        };
        let mut out = Vec::new();
        let mut sink = RecordingSink::default();
        let err = run(&options, &ScanRules::default(), &mut out, Some(&mut sink)).unwrap_err();

        assert!(matches!(
            err,
            InstrScopeError::Scan(ScanError::Line { line_number: 4, .. })
        ));
        assert!(out.is_empty());
        assert!(sink.calls.is_empty());
        assert!(!csv.exists());
    }

    #[test]
    fn test_run_with_boxed_sink() {
        let dir = tempfile::tempdir().unwrap();
        let log = write_log(
            dir.path(),
            "Serum_dex_key IDA\nNew Order\nIDA consumed 1 1 1 1 10\n",
        );
        let chart = dir.path().join("chart.svg");
        let file_sink = FileSink::new(&chart).unwrap();
        let mut sink: Option<Box<dyn ChartSink>> = Some(Box::new(file_sink));
        let mut out = Vec::new();
        run(
            &RunOptions::new(&log),
            &ScanRules::default(),
            &mut out,
            sink.as_deref_mut(),
        )
        .unwrap();
        assert!(chart.exists());
    }

    #[test]
    fn test_run_missing_log() {
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
        assert!(err.to_string().contains("out.log"));
    }

    #[test]
    fn test_run_summary_and_exports() {
        let dir = tempfile::tempdir().unwrap();
        let log = write_log(
            dir.path(),
            "Serum_dex_key IDA\nNew Order\nIDA consumed 1 1 1 1 10\n",
        );
        let csv = dir.path().join("exports").join("samples.csv");
        let json = dir.path().join("samples.json");
        let options = RunOptions {
            summary: true,
            export_csv: Some(csv.clone()),
            export_json: Some(json.clone()),
            ..RunOptions::new(&log)
        };
        let mut out = Vec::new();
        run(&options, &ScanRules::default(), &mut out, None).unwrap();

        let printed = String::from_utf8(out).unwrap();
        // B's needle is the bare suffix because its identifier never appeared.
        assert!(printed.starts_with("[10] [10]\n"));
        assert!(printed.contains("series"));

        let csv_text = std::fs::read_to_string(&csv).unwrap();
        assert_eq!(csv_text.lines().count(), 3);
        let json_value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
        assert_eq!(json_value["series"][0]["samples"][0], 10);
    }
}
