//! Window management subsystem
//!
//! Backend-agnostic windows with a fixed lifecycle, negotiated buffering and
//! ordered keyboard delivery.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────┐
//! │     Application Code            │
//! └─────────────┬───────────────────┘
//!               │ Uses
//!         ┌─────▼─────┐
//!         │  Window   │ ← Lifecycle, buffering, input (handle.rs)
//!         └─────┬─────┘
//!               │ Drives
//!      ┌────────▼────────┐
//!      │ WindowPlatform  │ ← Backend contract (backend.rs)
//!      │ WindowBackend   │
//!      └────────┬────────┘
//!               │ Implemented by
//!   ┌───────────▼───────────┐
//!   │ headless::*           │ ← In-process backend (headless.rs)
//!   │ backend::glfw::*      │ ← Native backend (feature `glfw`)
//!   └───────────────────────┘
//! ```
//!
//! # Module Organization
//!
//! - **`handle`**: The [`Window`] applications hold
//! - **`backend`**: Traits a native backend implements
//! - **`buffer`**: Buffer types and present-mode negotiation
//! - **`config`**: [`WindowConfig`] and its validation
//! - **`state`**: Lifecycle states
//! - **`headless`**: Backend without a display, used by tests and CI

pub mod backend;
pub mod buffer;
pub mod config;
pub mod error;
pub mod handle;
pub mod headless;
pub mod state;

#[cfg(test)]
mod lifecycle_tests;

pub use backend::{PlatformEvent, SurfaceDescriptor, WindowBackend, WindowPlatform};
pub use buffer::{negotiate, BufferType, PresentationPlan, SupportedBufferTypes, SurfaceSupport};
pub use config::WindowConfig;
pub use error::{WindowError, WindowResult};
pub use handle::Window;
pub use state::WindowState;
