// instrscope - gui.rs
//
// Interactive chart window (eframe). `WindowSink` is the default chart sink:
// it opens a native window showing both series and blocks until the window
// is closed. The toolbar saves the same chart to SVG or PNG.

use crate::core::model::{ChartSpec, Series};
use crate::render::{self, ChartSink, OutputFormat};
use crate::ui;
use crate::util::constants;
use crate::util::error::RenderError;

/// The chart viewer application.
pub struct ChartApp {
    spec: ChartSpec,
    series: Vec<Series>,
    status: String,
}

impl ChartApp {
    pub fn new(spec: ChartSpec, series: Vec<Series>) -> Self {
        let total: usize = series.iter().map(Series::len).sum();
        Self {
            spec,
            series,
            status: format!("{total} samples"),
        }
    }

    /// Ask for a destination and save the chart there.
    fn save_as(&mut self, format: OutputFormat) {
        let (filter, ext) = match format {
            OutputFormat::Svg => ("SVG image", "svg"),
            OutputFormat::Png => ("PNG image", "png"),
        };
        let Some(dest) = rfd::FileDialog::new()
            .add_filter(filter, &[ext])
            .set_file_name(format!("chart.{ext}"))
            .save_file()
        else {
            return;
        };

        self.status = match render::write_chart(&dest, format, &self.spec, &self.series) {
            Ok(()) => format!("Saved {}", dest.display()),
            Err(e) => {
                tracing::warn!(error = %e, "Chart save failed");
                format!("Save failed: {e}")
            }
        };
    }
}

impl eframe::App for ChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Save SVG...").clicked() {
                    self.save_as(OutputFormat::Svg);
                }
                if ui.button("Save PNG...").clicked() {
                    self.save_as(OutputFormat::Png);
                }
                ui.separator();
                ui.label(&self.status);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui::chart::show(ui, &self.spec, &self.series);
        });
    }
}

/// Chart sink that shows the chart in a native window.
#[derive(Debug, Default)]
pub struct WindowSink;

impl ChartSink for WindowSink {
    fn render(&mut self, spec: &ChartSpec, series: &[Series]) -> Result<(), RenderError> {
        let native_options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(format!("{} - {}", constants::APP_NAME, spec.title))
                .with_inner_size([spec.width as f32, spec.height as f32])
                .with_min_inner_size([
                    constants::MIN_CHART_DIMENSION as f32,
                    constants::MIN_CHART_DIMENSION as f32,
                ]),
            ..Default::default()
        };

        let app = ChartApp::new(spec.clone(), series.to_vec());
        tracing::debug!(width = spec.width, height = spec.height, "Opening chart window");

        eframe::run_native(
            constants::APP_ID,
            native_options,
            Box::new(move |_cc| Ok(Box::new(app))),
        )
        .map_err(|e| RenderError::Window {
            reason: e.to_string(),
        })
    }
}
