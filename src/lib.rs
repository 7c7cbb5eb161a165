//! matrix-cam library crate.
//!
//! Renders a live webcam feed as "digital rain": the frame is sampled on a
//! square grid and each sample is drawn as a katakana/latin/digit glyph
//! whose identity, opacity and shade of green follow the sample's
//! brightness.

pub mod camera;
pub mod cli;
pub mod config;
pub mod event_loop;
pub mod input;
pub mod logging;
pub mod rain;
pub mod render;
pub mod settings;
pub mod shutdown;
pub mod surface;
pub mod terminal;
