// instrscope - core/report.rs
//
// Plain-text rendering of the collected samples for stdout, plus per-series
// statistics for the optional summary table.

use crate::core::model::Series;
use std::fmt::Write as _;

/// Format a sample sequence as `[a, b, c]`.
fn format_sequence(samples: &[i64]) -> String {
    let mut out = String::with_capacity(samples.len() * 8 + 2);
    out.push('[');
    for (i, sample) in samples.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{sample}");
    }
    out.push(']');
    out
}

/// One line holding every sequence in order, bracketed and space separated.
///
/// `[10, 30] [20]` for A = [10, 30], B = [20].
pub fn format_samples(series: &[Series]) -> String {
    series
        .iter()
        .map(|s| format_sequence(&s.samples))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Descriptive statistics of one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub count: usize,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub mean: Option<f64>,
    pub total: i128,
}

impl SeriesStats {
    pub fn from_samples(samples: &[i64]) -> Self {
        let total: i128 = samples.iter().map(|&s| i128::from(s)).sum();
        let mean = if samples.is_empty() {
            None
        } else {
            Some(total as f64 / samples.len() as f64)
        };
        Self {
            count: samples.len(),
            min: samples.iter().copied().min(),
            max: samples.iter().copied().max(),
            mean,
            total,
        }
    }
}

fn opt_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Aligned statistics table, one row per series, followed by the ratio of
/// the second series' mean to the first's when both exist.
pub fn format_summary(series: &[Series]) -> String {
    let header = ["series", "identifier", "count", "min", "max", "mean"];
    let mut rows: Vec<[String; 6]> = Vec::with_capacity(series.len());
    let mut means = Vec::with_capacity(series.len());

    for s in series {
        let stats = SeriesStats::from_samples(&s.samples);
        means.push(stats.mean);
        rows.push([
            s.label.clone(),
            s.identifier.clone().unwrap_or_else(|| "-".to_string()),
            stats.count.to_string(),
            opt_cell(stats.min),
            opt_cell(stats.max),
            opt_cell(stats.mean.map(|m| format!("{m:.1}"))),
        ]);
    }

    let mut widths = header.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let render_row = |out: &mut String, cells: &[&str]| {
        let line = cells
            .iter()
            .zip(widths)
            .map(|(c, w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    };

    render_row(&mut out, &header);
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        render_row(&mut out, &cells);
    }

    if let (Some(first), Some(second)) = (series.first(), series.get(1)) {
        if let (Some(Some(a)), Some(Some(b))) = (means.first(), means.get(1)) {
            if *a != 0.0 {
                let _ = writeln!(
                    out,
                    "mean {} / {}: {:.3}",
                    second.label,
                    first.label,
                    b / a
                );
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Subsystem;

    fn series(subsystem: Subsystem, label: &str, samples: &[i64]) -> Series {
        let mut s = Series::new(subsystem, label);
        s.samples = samples.to_vec();
        s
    }

    #[test]
    fn test_format_samples_keeps_order_and_groups() {
        let line = format_samples(&[
            series(Subsystem::A, "Serum dex", &[10, 30]),
            series(Subsystem::B, "Aob dex", &[20]),
        ]);
        assert_eq!(line, "[10, 30] [20]");
    }

    #[test]
    fn test_format_samples_empty() {
        let line = format_samples(&[
            series(Subsystem::A, "Serum dex", &[]),
            series(Subsystem::B, "Aob dex", &[]),
        ]);
        assert_eq!(line, "[] []");
    }

    #[test]
    fn test_stats() {
        let stats = SeriesStats::from_samples(&[4, 8, 6]);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.min, Some(4));
        assert_eq!(stats.max, Some(8));
        assert_eq!(stats.mean, Some(6.0));
        assert_eq!(stats.total, 18);
    }

    #[test]
    fn test_stats_empty() {
        let stats = SeriesStats::from_samples(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.min, None);
        assert_eq!(stats.mean, None);
    }

    #[test]
    fn test_summary_table() {
        let mut a = series(Subsystem::A, "Serum dex", &[100, 300]);
        a.identifier = Some("IDA".to_string());
        let b = series(Subsystem::B, "Aob dex", &[100]);
        let table = format_summary(&[a, b]);
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("series"));
        assert!(lines[1].starts_with("Serum dex"));
        assert!(lines[1].contains("IDA"));
        assert!(lines[1].contains("200.0"));
        assert!(lines[2].contains("Aob dex"));
        assert_eq!(lines[3], "mean Aob dex / Serum dex: 0.500");
    }

    #[test]
    fn test_summary_without_ratio_when_a_series_is_empty() {
        let table = format_summary(&[
            series(Subsystem::A, "Serum dex", &[]),
            series(Subsystem::B, "Aob dex", &[5]),
        ]);
        assert!(!table.contains("mean Aob dex"));
        assert_eq!(table.lines().count(), 3);
    }
}
