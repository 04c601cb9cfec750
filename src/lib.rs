// RestoreConfig - lib.rs
//
// Library entry point, exposing all non-GUI modules for integration testing
// and for the headless command-line mode.
//
// The eframe `App` implementation lives in `gui.rs` next to `main.rs` and is
// not part of the library surface.

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;
