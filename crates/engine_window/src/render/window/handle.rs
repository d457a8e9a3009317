//! Backend-agnostic window
//!
//! [`Window`] is the one type applications and event loops hold. It owns a
//! boxed [`WindowBackend`] and applies the lifecycle, buffering and input
//! rules on top of it, so every backend behaves the same way:
//!
//! ```text
//!   Window::new ──► ACTIVE ──close()/OS close──► CLOSE_REQUESTED
//!                     │                               │
//!                     └────────── dispose() ──────────┴──► DISPOSED
//! ```
//!
//! A typical driver:
//!
//! ```rust
//! use engine_window::render::window::{headless::HeadlessPlatform, Window, WindowConfig};
//!
//! let mut platform = HeadlessPlatform::default();
//! let mut window = Window::new(WindowConfig::new("Demo"), &mut platform)?;
//! # window.close()?;
//! while !window.should_close() {
//!     let report = window.pump_events()?;
//!     for failure in &report.failures {
//!         eprintln!("input handler failed: {}", failure.error);
//!     }
//! }
//! window.close()?;
//! window.dispose();
//! # Ok::<(), engine_window::render::window::WindowError>(())
//! ```

use std::fmt;

use crate::foundation::Color;
use crate::input::{DispatchReport, InputDispatcher, SharedKeyboardCallback};

use super::backend::{PlatformEvent, SurfaceDescriptor, WindowBackend, WindowPlatform};
use super::buffer::{negotiate, BufferType, PresentationPlan};
use super::config::{validate_clear_color, validate_size, WindowConfig};
use super::error::{WindowError, WindowResult};
use super::state::WindowState;

/// One live on-screen rendering surface
///
/// Exclusively owned by whoever created it (normally the event loop) and
/// driven from that thread only. Dropping a window disposes it.
pub struct Window {
    state: WindowState,
    plan: PresentationPlan,
    backend: Option<Box<dyn WindowBackend>>,
    keyboard_callback: Option<SharedKeyboardCallback>,
    dispatcher: InputDispatcher,
    events: Vec<PlatformEvent>,
    title: String,
    clear_color: Color,
    platform: &'static str,
}

impl Window {
    /// Create a window from a configuration
    ///
    /// The configuration is validated before the platform is touched, so an
    /// [`WindowError::InvalidConfiguration`] never leaves a native window
    /// behind. If the surface cannot provide the requested buffer type the
    /// freshly created native window is destroyed and
    /// [`WindowError::UnsupportedBufferType`] is returned.
    pub fn new(config: WindowConfig, platform: &mut dyn WindowPlatform) -> WindowResult<Self> {
        config.validate()?;

        let WindowConfig {
            title,
            width,
            height,
            buffer_type,
            clear_color,
            keyboard_callback,
        } = config;

        let descriptor = SurfaceDescriptor {
            title: &title,
            width,
            height,
            input_enabled: keyboard_callback.is_some(),
        };
        let backend = platform.create_backend(&descriptor)?;

        let negotiated = backend
            .surface_support()
            .and_then(|support| negotiate(buffer_type, &support));
        let plan = match negotiated {
            Ok(plan) => plan,
            Err(err) => {
                log::error!("Destroying {} window '{}': {}", platform.name(), title, err);
                backend.destroy();
                return Err(err);
            }
        };

        log::info!(
            "Created {} window '{}' ({}x{}, {} buffering, {} image(s))",
            platform.name(),
            title,
            width,
            height,
            plan.buffer_type(),
            plan.image_count()
        );

        Ok(Self {
            state: WindowState::Active,
            plan,
            backend: Some(backend),
            keyboard_callback,
            dispatcher: InputDispatcher::new(),
            events: Vec::new(),
            title,
            clear_color,
            platform: platform.name(),
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> WindowState {
        self.state
    }

    /// Whether the window was asked to close or is already disposed
    ///
    /// Pure query, valid in every state.
    pub fn should_close(&self) -> bool {
        self.state.is_closing()
    }

    /// Buffer type negotiated at construction
    pub fn buffer_type(&self) -> BufferType {
        self.plan.buffer_type()
    }

    /// Presentation settings for the swapchain owner
    pub fn presentation(&self) -> WindowResult<PresentationPlan> {
        self.ensure_live("query the presentation plan of")?;
        Ok(self.plan)
    }

    /// Last title set on the window
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Color the framebuffer is cleared to
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Name of the platform backend
    pub fn platform_name(&self) -> &'static str {
        self.platform
    }

    /// Whether keyboard input is being delivered
    pub fn has_keyboard_callback(&self) -> bool {
        self.keyboard_callback.is_some()
    }

    /// Ask the window to close
    ///
    /// `ACTIVE -> CLOSE_REQUESTED`; the native window is told to start tearing
    /// down. A no-op when a close was already requested, an error once
    /// disposed.
    pub fn close(&mut self) -> WindowResult<()> {
        match self.state {
            WindowState::CloseRequested => Ok(()),
            WindowState::Disposed => Err(self.lifecycle_error("close")),
            WindowState::Active => {
                live_backend(&mut self.backend, self.state, "close")?.request_close();
                self.state = WindowState::CloseRequested;
                log::info!("Close requested for window '{}'", self.title);
                Ok(())
            }
        }
    }

    /// Release every native resource and enter `DISPOSED`
    ///
    /// Safe to call any number of times; only the first call has an effect.
    /// Queued input is discarded and the keyboard callback is released, so no
    /// callback runs for this window afterwards.
    pub fn dispose(&mut self) {
        let Some(backend) = self.backend.take() else {
            return;
        };

        self.dispatcher.clear();
        self.events.clear();
        self.keyboard_callback = None;
        backend.destroy();
        self.state = WindowState::Disposed;

        log::info!("Disposed {} window '{}'", self.platform, self.title);
    }

    /// Poll the backend and deliver keyboard input
    ///
    /// A platform close request moves an `ACTIVE` window to
    /// `CLOSE_REQUESTED`. Callback failures are contained and returned in the
    /// report.
    pub fn pump_events(&mut self) -> WindowResult<DispatchReport> {
        let backend = live_backend(&mut self.backend, self.state, "pump events for")?;
        backend.poll_events(&mut self.events);

        for event in self.events.drain(..) {
            match event {
                PlatformEvent::CloseRequested => {
                    if self.state == WindowState::Active {
                        log::info!("Platform requested close of window '{}'", self.title);
                        self.state = WindowState::CloseRequested;
                    }
                }
                PlatformEvent::Input(input) if self.keyboard_callback.is_some() => {
                    self.dispatcher.push(input);
                }
                PlatformEvent::Input(input) => {
                    log::warn!("Backend produced {:?} while input is disabled", input);
                }
            }
        }

        Ok(self.dispatcher.dispatch(self.keyboard_callback.as_ref()))
    }

    /// Replace (or remove) the keyboard callback
    ///
    /// Takes effect from the next event delivered. Removing the callback stops
    /// the backend from producing input and forgets held keys, since their
    /// releases will no longer be observed.
    pub fn set_keyboard_callback(
        &mut self,
        callback: Option<SharedKeyboardCallback>,
    ) -> WindowResult<()> {
        let backend = live_backend(&mut self.backend, self.state, "set the keyboard callback of")?;
        let enabled = callback.is_some();
        if enabled != self.keyboard_callback.is_some() {
            backend.set_input_enabled(enabled);
            let status = if enabled { "enabled" } else { "disabled" };
            log::debug!("Keyboard input {} for window '{}'", status, self.title);
        }
        if !enabled {
            self.dispatcher.clear();
        }
        self.keyboard_callback = callback;
        Ok(())
    }

    /// Change the title bar text
    pub fn set_title(&mut self, title: impl Into<String>) -> WindowResult<()> {
        let backend = live_backend(&mut self.backend, self.state, "set the title of")?;
        let title = title.into();
        backend.set_title(&title);
        self.title = title;
        Ok(())
    }

    /// Current client size in pixels
    pub fn size(&self) -> WindowResult<(u32, u32)> {
        self.ensure_live("query the size of")?;
        Ok(self.backend.as_ref().map_or((0, 0), |backend| backend.size()))
    }

    /// Resize the client area
    pub fn set_size(&mut self, width: u32, height: u32) -> WindowResult<()> {
        let backend = live_backend(&mut self.backend, self.state, "resize")?;
        validate_size(width, height)?;
        backend.set_size(width, height);
        Ok(())
    }

    /// Change the clear color
    pub fn set_clear_color(&mut self, color: impl Into<Color>) -> WindowResult<()> {
        self.ensure_live("set the clear color of")?;
        let color = color.into();
        validate_clear_color(&color)?;
        self.clear_color = color;
        Ok(())
    }

    /// Backend access for the renderer
    ///
    /// Used to downcast to the concrete backend (e.g. to create a GPU surface
    /// from the native handle). Applications should not need this.
    pub fn backend_mut(&mut self) -> WindowResult<&mut (dyn WindowBackend + 'static)> {
        live_backend(&mut self.backend, self.state, "access the backend of")
    }

    fn ensure_live(&self, operation: &'static str) -> WindowResult<()> {
        if self.state == WindowState::Disposed {
            return Err(self.lifecycle_error(operation));
        }
        Ok(())
    }

    fn lifecycle_error(&self, operation: &'static str) -> WindowError {
        WindowError::InvalidLifecycleState {
            operation,
            state: self.state,
        }
    }
}

fn live_backend<'a>(
    backend: &'a mut Option<Box<dyn WindowBackend>>,
    state: WindowState,
    operation: &'static str,
) -> WindowResult<&'a mut (dyn WindowBackend + 'static)> {
    match backend.as_deref_mut() {
        Some(backend) => Ok(backend),
        None => Err(WindowError::InvalidLifecycleState { operation, state }),
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("title", &self.title)
            .field("state", &self.state)
            .field("plan", &self.plan)
            .field("platform", &self.platform)
            .field("keyboard_callback", &self.keyboard_callback.is_some())
            .field("pending_input", &self.dispatcher.pending())
            .finish()
    }
}
