//! Window errors

use thiserror::Error;

use super::buffer::{BufferType, SupportedBufferTypes};
use super::state::WindowState;

/// Window management errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// Configuration rejected before any native resource was allocated
    #[error("Invalid window configuration: {0}")]
    InvalidConfiguration(String),

    /// The display cannot honor the requested buffering mode
    #[error("Buffer type {requested} is not supported by this surface (available: {available:?})")]
    UnsupportedBufferType {
        /// Mode the configuration asked for
        requested: BufferType,
        /// Modes the surface offers
        available: SupportedBufferTypes,
    },

    /// Operation not allowed in the window's current state
    #[error("Cannot {operation} a window in state {state}")]
    InvalidLifecycleState {
        /// Operation that was attempted
        operation: &'static str,
        /// State the window was in
        state: WindowState,
    },

    /// The native windowing library could not be initialized
    #[error("Platform initialization failed: {0}")]
    PlatformInit(String),

    /// The native window could not be created
    #[error("Window creation failed: {0}")]
    CreationFailed(String),
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;
