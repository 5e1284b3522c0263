// instrscope - core/export.rs
//
// CSV and JSON export of collected samples.
// Core layer: writes to any Write trait object.

use crate::core::model::Series;
use crate::util::error::ExportError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Export samples to CSV in long format.
///
/// Writes: subsystem, identifier, index, instructions. One row per sample,
/// so series of different lengths need no padding.
pub fn export_csv<W: Write>(
    series: &[Series],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |source| ExportError::Csv {
        path: export_path.to_path_buf(),
        source,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["subsystem", "identifier", "index", "instructions"])
        .map_err(csv_err)?;

    let mut count = 0;
    for s in series {
        let identifier = s.identifier.as_deref().unwrap_or("");
        for (index, value) in s.points() {
            csv_writer
                .write_record([
                    s.label.as_str(),
                    identifier,
                    &index.to_string(),
                    &value.to_string(),
                ])
                .map_err(csv_err)?;
            count += 1;
        }
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

#[derive(Serialize)]
struct JsonExport<'a> {
    generated_at: DateTime<Utc>,
    source: String,
    series: &'a [Series],
}

/// Export samples to JSON: `{ generated_at, source, series: [...] }`.
pub fn export_json<W: Write>(
    series: &[Series],
    source_log: &Path,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let doc = JsonExport {
        generated_at: Utc::now(),
        source: source_log.display().to_string(),
        series,
    };
    serde_json::to_writer_pretty(writer, &doc).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(series.iter().map(Series::len).sum())
}
