// instrscope - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library, regex, serde, csv/serde_json for export.
// Must NOT depend on: ui, platform, app, or the chart backends.

pub mod export;
pub mod extract;
pub mod model;
pub mod report;
pub mod scanner;
