//! Initial window parameters

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::foundation::Color;
use crate::input::SharedKeyboardCallback;

use super::buffer::BufferType;
use super::error::{WindowError, WindowResult};

/// Initial configuration for a window
///
/// Consumed once by [`Window::new`](super::Window::new). Title, size and clear
/// color may be changed later through the window; the buffer type may not.
/// Validation happens at window construction, not here.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Title bar text
    pub title: String,
    /// Initial client width in pixels
    pub width: u32,
    /// Initial client height in pixels
    pub height: u32,
    /// Presentation strategy, fixed for the life of the window
    pub buffer_type: BufferType,
    /// Color the framebuffer is cleared to
    pub clear_color: Color,
    /// Receiver of keyboard input; `None` means no input is produced at all
    #[serde(skip)]
    pub keyboard_callback: Option<SharedKeyboardCallback>,
}

impl WindowConfig {
    /// Default width in pixels
    pub const DEFAULT_WIDTH: u32 = 800;
    /// Default height in pixels
    pub const DEFAULT_HEIGHT: u32 = 600;

    /// Configuration with defaults and the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the clear color
    pub fn with_clear_color(mut self, color: impl Into<Color>) -> Self {
        self.clear_color = color.into();
        self
    }

    /// Set the buffer type
    pub fn with_buffer_type(mut self, buffer_type: BufferType) -> Self {
        self.buffer_type = buffer_type;
        self
    }

    /// Install a keyboard callback
    pub fn with_keyboard_callback(mut self, callback: SharedKeyboardCallback) -> Self {
        self.keyboard_callback = Some(callback);
        self
    }

    /// Check that the configuration can build a window
    pub fn validate(&self) -> WindowResult<()> {
        validate_size(self.width, self.height)?;
        validate_clear_color(&self.clear_color)
    }
}

pub(crate) fn validate_size(width: u32, height: u32) -> WindowResult<()> {
    if width == 0 || height == 0 {
        return Err(WindowError::InvalidConfiguration(format!(
            "window size must be positive, got {}x{}",
            width, height
        )));
    }
    Ok(())
}

pub(crate) fn validate_clear_color(color: &Color) -> WindowResult<()> {
    if !color.is_normalized() {
        return Err(WindowError::InvalidConfiguration(format!(
            "clear color channels must be within [0, 1], got {:?}",
            color.to_array()
        )));
    }
    Ok(())
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            clear_color: Color::default(),
            buffer_type: BufferType::default(),
            keyboard_callback: None,
        }
    }
}

impl fmt::Debug for WindowConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowConfig")
            .field("title", &self.title)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("clear_color", &self.clear_color)
            .field("buffer_type", &self.buffer_type)
            .field("keyboard_callback", &self.keyboard_callback.is_some())
            .finish()
    }
}

impl Config for WindowConfig {}
