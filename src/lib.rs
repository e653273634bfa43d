//! Bisect TUI - an animated binary search visualizer for the terminal
//!
//! The library holds the toolkit-free core (dataset store, search engine,
//! token row, highlight sequence, orchestrator) and the ratatui shell in
//! [`ui`]. The binary only wires them to a real terminal.

pub mod animation;
pub mod dataset;
pub mod error;
pub mod orchestrator;
pub mod search;
pub mod tokens;
pub mod ui;
