// instrscope - ui/mod.rs
//
// UI layer: presentation only.
// Dependencies: core (read-only models), render (bounds, palette), egui.
// Must NOT depend on: platform, direct I/O.

pub mod chart;
pub mod theme;
