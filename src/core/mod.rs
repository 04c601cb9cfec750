// RestoreConfig - core/mod.rs
//
// Core vocabulary and collaborator contracts.
// Dependencies: util, serde.
// Must NOT depend on: ui, platform, app.

pub mod diagnostics;
pub mod messages;
pub mod model;
pub mod restore;
pub mod window;
