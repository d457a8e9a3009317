//! Platform backend contract
//!
//! Every native windowing backend implements [`WindowPlatform`] (creation) and
//! [`WindowBackend`] (one live native window). The shared
//! [`Window`](super::Window) drives these traits and owns all lifecycle and
//! input-ordering rules, so backends only translate between the native API
//! and the types below.
//!
//! Backends run on the thread that owns the event loop; neither trait
//! requires `Send`.

use std::any::Any;

use crate::input::InputEvent;

use super::buffer::SurfaceSupport;
use super::error::WindowResult;

/// Native parameters for creating a window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceDescriptor<'a> {
    /// Title bar text
    pub title: &'a str,
    /// Client width in pixels
    pub width: u32,
    /// Client height in pixels
    pub height: u32,
    /// Whether keyboard input should be produced from the start
    pub input_enabled: bool,
}

/// Event reported by a backend while polling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// Translated keyboard input
    Input(InputEvent),
    /// The user or OS asked the window to close (e.g. title-bar button)
    CloseRequested,
}

/// Factory for native windows
pub trait WindowPlatform {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    /// Create a native window
    ///
    /// Only called with a configuration that already passed validation.
    fn create_backend(
        &mut self,
        descriptor: &SurfaceDescriptor<'_>,
    ) -> WindowResult<Box<dyn WindowBackend>>;
}

/// One live native window
pub trait WindowBackend {
    /// Presentation capabilities of this window's surface
    fn surface_support(&self) -> WindowResult<SurfaceSupport>;

    /// Start or stop producing keyboard input
    ///
    /// While disabled the backend must not generate input events at all,
    /// rather than generating and discarding them.
    fn set_input_enabled(&mut self, enabled: bool);

    /// Pump the native event queue and append translated events to `events`
    fn poll_events(&mut self, events: &mut Vec<PlatformEvent>);

    /// Ask the native window to begin closing (hide it, flag it for teardown)
    fn request_close(&mut self);

    /// Current client size in pixels
    fn size(&self) -> (u32, u32);

    /// Resize the client area
    fn set_size(&mut self, width: u32, height: u32);

    /// Change the title bar text
    fn set_title(&mut self, title: &str);

    /// Release every native resource held by this window
    ///
    /// Consumes the backend so it can only ever run once.
    fn destroy(self: Box<Self>);

    /// Get access to the concrete type for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Get mutable access to the concrete type for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
