//! # UI Module
//!
//! The terminal presentation shell: state, key handling and drawing.
//!
//! ## Components
//!
//! - [`App`] - Presentation state (token row, status, prompts, highlight)
//! - [`mod@render`] - Rendering functions for drawing the TUI
//! - [`config`] - Persisted user settings
//! - [`theme`] - Built-in color palettes
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │          Binary Search Visualization            │
//! ├─────────────────────────────────────────────────┤
//! │   ▄▄▄▄                                          │
//! │    3    5    8   13   21   34                   │
//! │    0    1    2    3    4    5                   │
//! ├─────────────────────────────┬───────────────────┤
//! │ Steps (probes of the last   │ Result            │
//! │ search)                     │ (status message)  │
//! ├─────────────────────────────┴───────────────────┤
//! │ Target                                          │
//! ├─────────────────────────────────────────────────┤
//! │ Footer (key hints)                              │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod config;
pub mod render;
pub mod theme;

pub use app::App;
pub use render::render;
