// RestoreConfig - ui/panels/mod.rs

pub mod restore;
