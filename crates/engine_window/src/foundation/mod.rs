//! Foundation module - small shared types and utilities
//!
//! - Logging setup
//! - RGBA color

pub mod color;
pub mod logging;

pub use color::Color;
