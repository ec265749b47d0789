//! Render functions for the main panes.

pub mod dashboard;
pub mod logs;
pub mod sequence;
pub mod workspace;
