// LogMerge - core/mod.rs
//
// Core business logic layer: data model, the merge sorter, token parsing
// and output rendering.
// Must NOT depend on: app, platform, or any terminal/file I/O directly.

pub mod export;
pub mod model;
pub mod parser;
pub mod sorter;
