//! # Rendering System
//!
//! Presentation-side types for the engine. The window subsystem owns the
//! native window, its lifecycle and the presentation plan a swapchain is
//! created from.

// Public modules for application use
pub mod window;

pub use window::{BufferType, PresentationPlan, Window, WindowConfig, WindowError, WindowState};
