// LogMerge - platform/mod.rs
//
// Platform abstraction layer.
// Dependencies: standard library, directories crate.

pub mod config;
