//! # Engine Window
//!
//! Platform-agnostic windows for a Vulkan rendering engine.
//!
//! ## Features
//!
//! - **Lifecycle**: `ACTIVE -> CLOSE_REQUESTED -> DISPOSED` with idempotent teardown
//! - **Buffering**: Single, double or mailbox presentation, negotiated at construction
//! - **Keyboard Input**: Ordered press/repeat/release delivery with contained callback failures
//! - **Configuration**: Windows described in code, TOML or RON
//! - **Backends**: GLFW (feature `glfw`) and an in-process headless backend
//!
//! ## Quick Start
//!
//! ```rust
//! use engine_window::prelude::*;
//!
//! struct Quit;
//!
//! impl KeyboardCallback for Quit {
//!     fn key_typed(
//!         &mut self,
//!         key: Key,
//!         _scancode: i32,
//!         action: Action,
//!         _mods: Modifiers,
//!     ) -> CallbackResult {
//!         if key == Key::Escape && action == Action::Press {
//!             log::info!("Escape pressed");
//!         }
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), WindowError> {
//!     let config = WindowConfig::new("Demo")
//!         .with_size(1280, 720)
//!         .with_buffer_type(BufferType::Double)
//!         .with_keyboard_callback(shared(Quit));
//!
//!     let mut platform = HeadlessPlatform::default();
//!     let mut window = Window::new(config, &mut platform)?;
//!     window.pump_events()?;
//!     window.close()?;
//!     window.dispose();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod input;
pub mod render;

#[cfg(feature = "glfw")]
pub mod backend;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, ConfigFormat},
        foundation::Color,
        input::{
            shared, Action, CallbackResult, DispatchReport, Key, KeyboardCallback, Modifiers,
            SharedKeyboardCallback,
        },
        render::window::{
            headless::HeadlessPlatform, BufferType, Window, WindowConfig, WindowError,
            WindowResult, WindowState,
        },
    };

    #[cfg(feature = "glfw")]
    pub use crate::backend::GlfwPlatform;
}
