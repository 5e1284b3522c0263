// instrscope - render/mod.rs
//
// Chart output layer. `ChartSink` is the single capability the pipeline
// needs; the interactive window (binary side) and the file sinks below all
// implement it.
// Dependencies: core (model), plotters, resvg.

pub mod png;
pub mod svg;

use crate::core::model::{ChartSpec, Series};
use crate::util::constants;
use crate::util::error::RenderError;
use std::path::{Path, PathBuf};

/// Anything that can present a chart of labelled series.
pub trait ChartSink {
    /// Draw every series. Each series is plotted against its own sample
    /// index; series of different lengths are never truncated.
    fn render(&mut self, spec: &ChartSpec, series: &[Series]) -> Result<(), RenderError>;
}

/// Line colours in series order (blue, orange).
pub const SERIES_RGB: [(u8, u8, u8); 2] = [(31, 119, 180), (255, 127, 14)];

/// Colour for the series at `index`, cycling if there are more series than
/// palette entries.
pub fn series_rgb(index: usize) -> (u8, u8, u8) {
    SERIES_RGB[index % SERIES_RGB.len()]
}

// =============================================================================
// Axis bounds
// =============================================================================

/// Data ranges shared by every sink so file and window output agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Right end of the x axis: the last sample index, at least 1.
    pub x_end: usize,
    pub y_min: i64,
    pub y_max: i64,
}

impl Bounds {
    /// Axis ranges covering every sample of every series.
    ///
    /// The y axis always includes zero. Empty input yields `0..1` on both
    /// axes so an empty chart still has a drawable frame.
    pub fn from_series(series: &[Series]) -> Self {
        let longest = series.iter().map(Series::len).max().unwrap_or(0);
        let x_end = longest.max(2) - 1;

        let all = series.iter().flat_map(|s| s.samples.iter().copied());
        let (lo, hi) = all.fold((0i64, 0i64), |(lo, hi), v| (lo.min(v), hi.max(v)));

        let span = hi.saturating_sub(lo);
        let headroom = (span as f64 * constants::Y_HEADROOM_FRACTION).ceil() as i64;
        let y_max = if span == 0 {
            lo.saturating_add(1)
        } else {
            hi.saturating_add(headroom)
        };

        Self {
            x_end,
            y_min: lo,
            y_max,
        }
    }
}

// =============================================================================
// File output
// =============================================================================

/// Image formats a chart can be saved as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("svg") => Ok(Self::Svg),
            Some("png") => Ok(Self::Png),
            _ => Err(RenderError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Render a chart and write it to `path` in the given format.
pub fn write_chart(
    path: &Path,
    format: OutputFormat,
    spec: &ChartSpec,
    series: &[Series],
) -> Result<(), RenderError> {
    let document = svg::render_svg(spec, series)?;
    let bytes = match format {
        OutputFormat::Svg => document.into_bytes(),
        OutputFormat::Png => png::rasterise(&document, spec.width, spec.height)?,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| RenderError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }
    std::fs::write(path, &bytes).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        format = ?format,
        bytes = bytes.len(),
        "Chart saved"
    );
    Ok(())
}

/// Headless sink: saves the chart to an image file.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    format: OutputFormat,
}

impl FileSink {
    /// Validate the output path up front, before any scanning happens.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, RenderError> {
        let path = path.into();
        let format = OutputFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChartSink for FileSink {
    fn render(&mut self, spec: &ChartSpec, series: &[Series]) -> Result<(), RenderError> {
        write_chart(&self.path, self.format, spec, series)
    }
}
