// instrscope - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading (config.toml, validated with fallbacks)
// 3. Logging initialisation (debug mode support)
// 4. Chart sink selection (window, image file, or none)
// 5. Running the scan -> report -> plot pipeline

mod gui;

// Re-export modules from the library crate so that `gui.rs` can use
// `crate::core::...`, `crate::render::...` etc.
pub use instrscope::app;
pub use instrscope::core;
pub use instrscope::platform;
pub use instrscope::render;
pub use instrscope::ui;
pub use instrscope::util;

use clap::Parser;
use std::path::PathBuf;

/// instrscope - per-order instruction usage from a performance test log.
///
/// Scans the log for the two program identifiers, waits for the first
/// "New Order" marker, then prints and plots the instruction counts each
/// program consumed.
#[derive(Parser, Debug)]
#[command(name = "instrscope", version, about)]
struct Cli {
    /// Log file to scan.
    #[arg(default_value = util::constants::DEFAULT_LOG_FILE)]
    log: PathBuf,

    /// Configuration file (defaults to the platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Save the chart to an image file (.svg or .png) instead of opening a window.
    #[arg(short = 'o', long = "output", conflicts_with = "no_chart")]
    output: Option<PathBuf>,

    /// Print the samples only; do not plot.
    #[arg(long = "no-chart")]
    no_chart: bool,

    /// Print per-series statistics after the samples.
    #[arg(short = 's', long = "summary")]
    summary: bool,

    /// Also write the samples to a CSV file.
    #[arg(long = "export-csv")]
    export_csv: Option<PathBuf>,

    /// Also write the samples to a JSON file.
    #[arg(long = "export-json")]
    export_json: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Configuration first so its [logging] level can seed the filter.
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| platform::config::PlatformPaths::resolve().config_file);
    let (config, config_warnings) = platform::config::load_config(&config_path);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        log = %cli.log.display(),
        "instrscope starting"
    );
    for warning in &config_warnings {
        tracing::warn!(config = %config_path.display(), "{warning}");
    }

    if let Err(e) = run(&cli, &config) {
        tracing::debug!(error = ?e, "Run failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, config: &platform::config::AppConfig) -> util::error::Result<()> {
    let rules = config.scan_rules()?;

    // Resolve the sink before scanning so a bad --output fails fast.
    let mut sink: Option<Box<dyn render::ChartSink>> = if cli.no_chart {
        None
    } else if let Some(path) = &cli.output {
        Some(Box::new(render::FileSink::new(path)?))
    } else {
        Some(Box::new(gui::WindowSink))
    };

    let options = app::pipeline::RunOptions {
        log_path: cli.log.clone(),
        summary: cli.summary,
        export_csv: cli.export_csv.clone(),
        export_json: cli.export_json.clone(),
        chart: config.chart.clone(),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let sink = match &mut sink {
        Some(s) => Some(s.as_mut()),
        None => None,
    };
    let outcome = app::pipeline::run(&options, &rules, &mut out, sink)?;

    tracing::info!(
        lines = outcome.lines_scanned,
        samples = outcome.total_samples(),
        "Done"
    );
    Ok(())
}
