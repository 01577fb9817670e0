// LogMerge - app/mod.rs
//
// Application layer: source collection and merge orchestration.
// Dependencies: core layer.
// Must NOT depend on: platform specifics.

pub mod prompt;
pub mod session;
