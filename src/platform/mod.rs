// instrscope - platform/mod.rs
//
// Platform abstraction layer: config file discovery and loading, file access.
// Dependencies: standard library, directories, toml, core (rule types).
// Must NOT depend on: app, ui, render.

pub mod config;
pub mod fs;
