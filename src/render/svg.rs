// instrscope - render/svg.rs
//
// Two-series line chart drawn with plotters' SVG backend into a string.
// The PNG sink rasterises this same document, so both file formats look
// identical.

use super::{series_rgb, Bounds};
use crate::core::model::{ChartSpec, Series};
use crate::util::error::RenderError;
use plotters::prelude::*;

fn draw_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Draw {
        reason: e.to_string(),
    }
}

/// Render the chart as an SVG document.
///
/// Every series gets a legend entry, including empty ones (which draw no
/// line). A series with a single sample is drawn as a dot.
pub fn render_svg(spec: &ChartSpec, series: &[Series]) -> Result<String, RenderError> {
    let bounds = Bounds::from_series(series);
    let mut document = String::new();

    {
        let root = SVGBackend::with_string(&mut document, (spec.width, spec.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let y_range = bounds.y_min as f64..bounds.y_max as f64;
        let mut chart = ChartBuilder::on(&root)
            .caption(spec.title.as_str(), ("sans-serif", 24).into_font())
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(80)
            .build_cartesian_2d(0usize..bounds.x_end, y_range)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .y_label_formatter(&|v: &f64| format!("{v:.0}"))
            .draw()
            .map_err(draw_err)?;

        for (i, s) in series.iter().enumerate() {
            let (r, g, b) = series_rgb(i);
            let colour = RGBColor(r, g, b);

            chart
                .draw_series(LineSeries::new(
                    s.points().map(|(x, y)| (x, y as f64)),
                    colour.stroke_width(2),
                ))
                .map_err(draw_err)?
                .label(s.label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], colour.stroke_width(2))
                });

            if let [only] = s.samples.as_slice() {
                let dot = Circle::new((0usize, *only as f64), 3, colour.filled());
                chart.draw_series(std::iter::once(dot)).map_err(draw_err)?;
            }
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&WHITE.mix(0.85))
            .border_style(&BLACK)
            .draw()
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
    }

    tracing::debug!(
        bytes = document.len(),
        series = series.len(),
        x_end = bounds.x_end,
        y_max = bounds.y_max,
        "SVG chart rendered"
    );
    Ok(document)
}
