// instrscope - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "instrscope";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "instrscope";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Input
// =============================================================================

/// Log file read when no path is given on the command line.
pub const DEFAULT_LOG_FILE: &str = "out.log";

// =============================================================================
// Log markers
//
// These match the output of the order-book performance test harness, which
// prints `Serum_dex_key <id>` / `Aob_dex_key <id>` once, `New Order` when the
// measured phase begins, and one runtime line per executed instruction:
//   [<ts> DEBUG <target>] Program <id> consumed <N> of <M> compute units
// =============================================================================

/// Substring identifying the line that carries Subsystem A's identifier.
pub const DEFAULT_SUBSYSTEM_A_MARKER: &str = "Serum_dex_key";

/// Substring identifying the line that carries Subsystem B's identifier.
pub const DEFAULT_SUBSYSTEM_B_MARKER: &str = "Aob_dex_key";

/// Substring that opens the collection window.
pub const DEFAULT_START_MARKER: &str = "New Order";

/// Suffix appended to an identifier to recognise its consumption lines.
pub const DEFAULT_CONSUMED_SUFFIX: &str = " consumed";

/// Legend label for Subsystem A.
pub const DEFAULT_SUBSYSTEM_A_LABEL: &str = "Serum dex";

/// Legend label for Subsystem B.
pub const DEFAULT_SUBSYSTEM_B_LABEL: &str = "Aob dex";

/// Maximum length of any configured marker or label.
pub const MAX_MARKER_LENGTH: usize = 256;

// =============================================================================
// Sample extraction
// =============================================================================

/// 0-based field (split on single spaces) holding the instruction count.
pub const DEFAULT_SAMPLE_FIELD_INDEX: usize = 6;

/// Upper bound on the configurable field index.
pub const MAX_SAMPLE_FIELD_INDEX: usize = 64;

/// Name of the capture group a pattern extractor reads the sample from.
pub const SAMPLE_CAPTURE_GROUP: &str = "sample";

/// Maximum regex pattern length to prevent ReDoS.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 1_024;

// =============================================================================
// Chart
// =============================================================================

/// Default chart caption.
pub const DEFAULT_CHART_TITLE: &str = "Instructions consumed per order";

/// Default x-axis caption.
pub const DEFAULT_X_LABEL: &str = "Order";

/// Default y-axis caption.
pub const DEFAULT_Y_LABEL: &str = "Instructions";

/// Default chart size in pixels (file output and initial window size).
pub const DEFAULT_CHART_WIDTH: u32 = 1024;
pub const DEFAULT_CHART_HEIGHT: u32 = 640;

/// Bounds on configurable chart dimensions.
pub const MIN_CHART_DIMENSION: u32 = 200;
pub const MAX_CHART_DIMENSION: u32 = 8_192;

/// Number of tick marks drawn on each axis.
pub const AXIS_TICK_COUNT: usize = 5;

/// Fraction of the value span added above the largest sample.
pub const Y_HEADROOM_FRACTION: f64 = 0.05;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
