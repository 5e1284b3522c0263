// instrscope - ui/chart.rs
//
// Line chart drawn directly with the egui painter.
//
// Layout: caption on top, y axis on the left, x axis along the bottom,
// legend in the upper-left corner of the plot area. Hovering the plot shows
// a vertical guide at the nearest sample index and the value of every series
// that has a sample there.

use crate::core::model::{ChartSpec, Series};
use crate::render::Bounds;
use crate::ui::theme;
use crate::util::constants;
use egui::{pos2, vec2, Align2, FontId, Pos2, Rect, Shape, Stroke};

/// Maps data coordinates into a screen rectangle.
#[derive(Debug, Clone, Copy)]
pub struct Mapper {
    pub plot: Rect,
    pub bounds: Bounds,
}

impl Mapper {
    pub fn x(&self, index: f64) -> f32 {
        let t = index / self.bounds.x_end as f64;
        self.plot.left() + (t as f32) * self.plot.width()
    }

    pub fn y(&self, value: f64) -> f32 {
        let y_min = self.bounds.y_min as f64;
        let span = self.bounds.y_max as f64 - y_min;
        let t = (value - y_min) / span;
        self.plot.bottom() - (t as f32) * self.plot.height()
    }

    pub fn to_screen(&self, index: usize, value: i64) -> Pos2 {
        pos2(self.x(index as f64), self.y(value as f64))
    }

    /// Nearest sample index under a screen x coordinate.
    pub fn index_at(&self, x: f32) -> usize {
        let t = ((x - self.plot.left()) / self.plot.width()).clamp(0.0, 1.0);
        (t as f64 * self.bounds.x_end as f64).round() as usize
    }
}

/// Evenly spaced integer tick values from `lo` to `hi` inclusive, without
/// duplicates when the range is narrower than `count`.
pub fn integer_ticks(lo: i64, hi: i64, count: usize) -> Vec<i64> {
    if count < 2 || hi <= lo {
        return vec![lo];
    }
    let (lo_wide, hi_wide) = (i128::from(lo), i128::from(hi));
    let span = (hi_wide - lo_wide) as f64;
    let mut ticks: Vec<i64> = (0..count)
        .map(|i| {
            let offset = (span * i as f64 / (count - 1) as f64).round() as i128;
            (lo_wide + offset).clamp(lo_wide, hi_wide) as i64
        })
        .collect();
    ticks.dedup();
    ticks
}

/// Draw the chart into all remaining space of `ui`.
pub fn show(ui: &mut egui::Ui, spec: &ChartSpec, series: &[Series]) {
    let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
    let full = response.rect;
    let dark_mode = ui.visuals().dark_mode;
    let text_colour = ui.visuals().text_color();
    let weak_colour = ui.visuals().weak_text_color();
    let label_font = FontId::proportional(theme::LABEL_FONT_SIZE);

    painter.text(
        full.center_top() + vec2(0.0, 8.0),
        Align2::CENTER_TOP,
        &spec.title,
        FontId::proportional(theme::TITLE_FONT_SIZE),
        text_colour,
    );

    let plot = Rect::from_min_max(
        pos2(full.left() + theme::MARGIN_LEFT, full.top() + theme::MARGIN_TOP),
        pos2(full.right() - theme::MARGIN_RIGHT, full.bottom() - theme::MARGIN_BOTTOM),
    );
    if plot.width() <= 1.0 || plot.height() <= 1.0 {
        return;
    }

    let bounds = Bounds::from_series(series);
    let map = Mapper { plot, bounds };
    let grid = Stroke::new(1.0, theme::grid_colour(dark_mode));
    let axis = Stroke::new(1.0, weak_colour);

    // -- Grid and tick labels --
    for x in integer_ticks(0, bounds.x_end as i64, constants::AXIS_TICK_COUNT) {
        let sx = map.x(x as f64);
        painter.line_segment([pos2(sx, plot.top()), pos2(sx, plot.bottom())], grid);
        painter.text(
            pos2(sx, plot.bottom() + 4.0),
            Align2::CENTER_TOP,
            x.to_string(),
            label_font.clone(),
            weak_colour,
        );
    }
    for y in integer_ticks(bounds.y_min, bounds.y_max, constants::AXIS_TICK_COUNT) {
        let sy = map.y(y as f64);
        painter.line_segment([pos2(plot.left(), sy), pos2(plot.right(), sy)], grid);
        painter.text(
            pos2(plot.left() - 6.0, sy),
            Align2::RIGHT_CENTER,
            y.to_string(),
            label_font.clone(),
            weak_colour,
        );
    }

    // -- Axes --
    painter.line_segment([plot.left_bottom(), plot.right_bottom()], axis);
    painter.line_segment([plot.left_bottom(), plot.left_top()], axis);
    painter.text(
        pos2(plot.center().x, full.bottom() - 4.0),
        Align2::CENTER_BOTTOM,
        &spec.x_label,
        label_font.clone(),
        text_colour,
    );
    painter.text(
        plot.left_top() - vec2(0.0, 6.0),
        Align2::RIGHT_BOTTOM,
        &spec.y_label,
        label_font.clone(),
        text_colour,
    );

    // -- Series --
    for (i, s) in series.iter().enumerate() {
        let colour = theme::series_colour(i);
        let points: Vec<Pos2> = s.points().map(|(x, y)| map.to_screen(x, y)).collect();
        match points.len() {
            0 => {}
            1 => {
                painter.circle_filled(points[0], theme::POINT_RADIUS, colour);
            }
            _ => {
                painter.add(Shape::line(points, Stroke::new(theme::LINE_WIDTH, colour)));
            }
        }
    }

    // -- Legend --
    let row_height = theme::LABEL_FONT_SIZE + 6.0;
    let legend_width = series
        .iter()
        .map(|s| {
            painter
                .layout_no_wrap(legend_text(s), label_font.clone(), text_colour)
                .size()
                .x
        })
        .fold(0.0_f32, f32::max)
        + theme::LEGEND_SWATCH_WIDTH
        + 3.0 * theme::LEGEND_PADDING;
    let legend = Rect::from_min_size(
        plot.left_top() + vec2(theme::LEGEND_PADDING, theme::LEGEND_PADDING),
        vec2(
            legend_width,
            row_height * series.len() as f32 + theme::LEGEND_PADDING,
        ),
    );
    painter.rect_filled(legend, 4.0, theme::overlay_bg(dark_mode));
    for (i, s) in series.iter().enumerate() {
        let y = legend.top() + theme::LEGEND_PADDING / 2.0 + row_height * (i as f32 + 0.5);
        let x0 = legend.left() + theme::LEGEND_PADDING;
        painter.line_segment(
            [pos2(x0, y), pos2(x0 + theme::LEGEND_SWATCH_WIDTH, y)],
            Stroke::new(theme::LINE_WIDTH, theme::series_colour(i)),
        );
        painter.text(
            pos2(x0 + theme::LEGEND_SWATCH_WIDTH + theme::LEGEND_PADDING, y),
            Align2::LEFT_CENTER,
            legend_text(s),
            label_font.clone(),
            text_colour,
        );
    }

    // -- Hover read-out --
    let Some(pointer) = response.hover_pos() else {
        return;
    };
    if !plot.contains(pointer) {
        return;
    }
    let index = map.index_at(pointer.x);
    let guide_x = map.x(index as f64);
    painter.line_segment(
        [pos2(guide_x, plot.top()), pos2(guide_x, plot.bottom())],
        Stroke::new(1.0, theme::HOVER_GUIDE),
    );

    let mut lines = vec![format!("#{index}")];
    for (i, s) in series.iter().enumerate() {
        if let Some(&value) = s.samples.get(index) {
            painter.circle_filled(
                map.to_screen(index, value),
                theme::POINT_RADIUS + 1.0,
                theme::series_colour(i),
            );
            lines.push(format!("{}: {value}", s.label));
        }
    }
    let galley = painter.layout_no_wrap(lines.join("\n"), label_font, text_colour);
    let mut tip = Rect::from_min_size(
        pointer + vec2(12.0, 12.0),
        galley.size() + vec2(2.0, 2.0) * theme::LEGEND_PADDING,
    );
    if tip.right() > full.right() {
        tip = tip.translate(vec2(-(tip.width() + 24.0), 0.0));
    }
    if tip.bottom() > full.bottom() {
        tip = tip.translate(vec2(0.0, -(tip.height() + 24.0)));
    }
    painter.rect_filled(tip, 4.0, theme::overlay_bg(dark_mode));
    painter.galley(
        tip.min + vec2(theme::LEGEND_PADDING, theme::LEGEND_PADDING),
        galley,
        text_colour,
    );
}

/// Legend entry: label plus sample count.
fn legend_text(series: &Series) -> String {
    match series.identifier.as_deref() {
        Some(id) => format!("{} ({} samples, {id})", series.label, series.len()),
        None => format!("{} ({} samples)", series.label, series.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> Mapper {
        Mapper {
            plot: Rect::from_min_max(pos2(100.0, 0.0), pos2(300.0, 100.0)),
            bounds: Bounds {
                x_end: 4,
                y_min: 0,
                y_max: 200,
            },
        }
    }

    #[test]
    fn test_mapper_corners() {
        let m = mapper();
        assert_eq!(m.to_screen(0, 0), pos2(100.0, 100.0));
        assert_eq!(m.to_screen(4, 200), pos2(300.0, 0.0));
        assert_eq!(m.to_screen(2, 100), pos2(200.0, 50.0));
    }

    #[test]
    fn test_index_at_rounds_and_clamps() {
        let m = mapper();
        assert_eq!(m.index_at(100.0), 0);
        assert_eq!(m.index_at(160.0), 1);
        assert_eq!(m.index_at(40.0), 0);
        assert_eq!(m.index_at(900.0), 4);
    }

    #[test]
    fn test_integer_ticks() {
        assert_eq!(integer_ticks(0, 100, 5), vec![0, 25, 50, 75, 100]);
        assert_eq!(integer_ticks(0, 1, 5), vec![0, 1]);
        assert_eq!(integer_ticks(3, 3, 5), vec![3]);
    }

    #[test]
    fn test_integer_ticks_extreme_range() {
        let lo = -9_000_000_000_000_000_000;
        let ticks = integer_ticks(lo, i64::MAX, 5);
        assert_eq!(ticks.len(), 5);
        assert_eq!(ticks[0], lo);
        assert_eq!(ticks[4], i64::MAX);
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_mapper_extreme_bounds() {
        let samples = [-9_000_000_000_000_000_000, 9_000_000_000_000_000_000];
        let mut s = Series::new(crate::core::model::Subsystem::A, "Serum dex");
        s.samples = samples.to_vec();
        let m = Mapper {
            plot: Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0)),
            bounds: Bounds::from_series(&[s]),
        };
        let low = m.to_screen(0, samples[0]);
        let high = m.to_screen(1, samples[1]);
        assert!(low.y.is_finite() && high.y.is_finite());
        assert!((low.y - 100.0).abs() < 0.01);
        assert!(high.y < low.y && high.y >= 0.0);
    }

    #[test]
    fn test_legend_text_mentions_count() {
        let mut s = Series::new(crate::core::model::Subsystem::A, "Serum dex");
        s.samples = vec![1, 2];
        assert_eq!(legend_text(&s), "Serum dex (2 samples)");
        s.identifier = Some("IDA".to_string());
        assert_eq!(legend_text(&s), "Serum dex (2 samples, IDA)");
    }
}
