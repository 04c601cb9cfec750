// RestoreConfig - platform/mod.rs
//
// Platform abstraction layer: OS identity, config directories, and the
// process-backed restoration routine.
// Dependencies: core, util, directories, toml.
// Must NOT depend on: app, ui.

pub mod command;
pub mod config;
pub mod os;
