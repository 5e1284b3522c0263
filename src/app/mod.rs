// instrscope - app/mod.rs
//
// Application layer: orchestration of a single run.
// Dependencies: core, platform (file access), render (sink trait).
// Must NOT depend on: ui, eframe.

pub mod pipeline;
