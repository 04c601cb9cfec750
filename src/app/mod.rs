// RestoreConfig - app/mod.rs
//
// Application layer: restoration worker lifecycle and the panel controller.
// Dependencies: core, platform (policy trait only).
// Must NOT depend on: ui, egui.

pub mod panel;
pub mod restore;
