//! Replays percent-format Python scripts through the cellcheck extension.

pub mod cells;
pub mod config;
pub mod logging;
pub mod shell;
