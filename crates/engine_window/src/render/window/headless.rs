//! In-process window backend
//!
//! Stands in for a native windowing system on machines without a display
//! and in tests. Each created window gets a [`HeadlessSurface`] handle that
//! plays the role of the OS: it injects raw native key codes, characters and
//! close-button clicks, and exposes what the window did to its native side
//! (title, size, visibility, destruction).

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::input::{Action, InputEvent, Key, Modifiers};

use super::backend::{PlatformEvent, SurfaceDescriptor, WindowBackend, WindowPlatform};
use super::buffer::SurfaceSupport;
use super::error::{WindowError, WindowResult};

#[derive(Debug)]
struct SurfaceState {
    title: String,
    size: (u32, u32),
    input_enabled: bool,
    visible: bool,
    destroyed: bool,
    pending: VecDeque<PlatformEvent>,
}

/// OS-side handle to a headless window
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    state: Rc<RefCell<SurfaceState>>,
}

impl HeadlessSurface {
    /// Inject a raw key transition
    ///
    /// Codes are native values: key code, scancode, action code (`0` release,
    /// `1` press, `2` repeat) and modifier mask. Returns whether an event was
    /// produced; nothing is produced while input is disabled, after
    /// destruction, or for an unknown action code.
    pub fn key(
        &self,
        native_key: i32,
        scancode: i32,
        native_action: i32,
        native_mods: i32,
    ) -> bool {
        let Some(action) = Action::from_code(native_action) else {
            log::warn!("Ignoring key event with unknown action code {}", native_action);
            return false;
        };
        self.produce_input(InputEvent::Key {
            key: Key::from_code(native_key),
            scancode,
            action,
            mods: Modifiers::from_native(native_mods),
        })
    }

    /// Inject a key press using the key's own code as scancode
    pub fn press(&self, key: Key, mods: Modifiers) -> bool {
        self.key(key.code(), key.code(), Action::Press.code(), mods.to_native())
    }

    /// Inject a key repeat
    pub fn repeat(&self, key: Key, mods: Modifiers) -> bool {
        self.key(key.code(), key.code(), Action::Repeat.code(), mods.to_native())
    }

    /// Inject a key release
    pub fn release(&self, key: Key, mods: Modifiers) -> bool {
        self.key(key.code(), key.code(), Action::Release.code(), mods.to_native())
    }

    /// Inject a composed text character
    pub fn type_char(&self, codepoint: char, native_mods: i32) -> bool {
        self.produce_input(InputEvent::Char {
            codepoint,
            mods: Modifiers::from_native(native_mods),
        })
    }

    /// Simulate the title-bar close button
    pub fn click_close(&self) {
        let mut state = self.state.borrow_mut();
        if !state.destroyed {
            state.pending.push_back(PlatformEvent::CloseRequested);
        }
    }

    /// Current native title
    pub fn title(&self) -> String {
        self.state.borrow().title.clone()
    }

    /// Current native size
    pub fn size(&self) -> (u32, u32) {
        self.state.borrow().size
    }

    /// Whether the native window is shown
    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    /// Whether input events are being produced
    pub fn input_enabled(&self) -> bool {
        self.state.borrow().input_enabled
    }

    /// Whether the native window has been destroyed
    pub fn is_destroyed(&self) -> bool {
        self.state.borrow().destroyed
    }

    /// Events produced but not yet polled
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    fn produce_input(&self, event: InputEvent) -> bool {
        let mut state = self.state.borrow_mut();
        if state.destroyed || !state.input_enabled {
            return false;
        }
        state.pending.push_back(PlatformEvent::Input(event));
        true
    }
}

/// Platform creating [`HeadlessWindow`]s
#[derive(Debug)]
pub struct HeadlessPlatform {
    support: SurfaceSupport,
    creation_error: Option<String>,
    surfaces: Vec<HeadlessSurface>,
    destroyed: Rc<Cell<usize>>,
}

impl HeadlessPlatform {
    /// Platform whose surfaces report `support`
    pub fn new(support: SurfaceSupport) -> Self {
        Self {
            support,
            creation_error: None,
            surfaces: Vec::new(),
            destroyed: Rc::new(Cell::new(0)),
        }
    }

    /// Platform on which every window creation fails
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            creation_error: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Handle to the most recently created surface
    pub fn last_surface(&self) -> Option<HeadlessSurface> {
        self.surfaces.last().cloned()
    }

    /// Number of native windows created so far
    pub fn created(&self) -> usize {
        self.surfaces.len()
    }

    /// Number of native windows created and not yet destroyed
    pub fn live_windows(&self) -> usize {
        self.surfaces.len() - self.destroyed.get()
    }
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new(SurfaceSupport::all())
    }
}

impl WindowPlatform for HeadlessPlatform {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn create_backend(
        &mut self,
        descriptor: &SurfaceDescriptor<'_>,
    ) -> WindowResult<Box<dyn WindowBackend>> {
        if let Some(reason) = &self.creation_error {
            return Err(WindowError::CreationFailed(reason.clone()));
        }

        let surface = HeadlessSurface {
            state: Rc::new(RefCell::new(SurfaceState {
                title: descriptor.title.to_string(),
                size: (descriptor.width, descriptor.height),
                input_enabled: descriptor.input_enabled,
                visible: true,
                destroyed: false,
                pending: VecDeque::new(),
            })),
        };
        self.surfaces.push(surface.clone());
        log::debug!("Created headless surface #{} '{}'", self.surfaces.len(), descriptor.title);

        Ok(Box::new(HeadlessWindow {
            surface,
            support: self.support.clone(),
            destroyed: Rc::clone(&self.destroyed),
        }))
    }
}

/// Backend side of a headless window
#[derive(Debug)]
pub struct HeadlessWindow {
    surface: HeadlessSurface,
    support: SurfaceSupport,
    destroyed: Rc<Cell<usize>>,
}

impl HeadlessWindow {
    /// OS-side handle of this window
    pub fn surface(&self) -> &HeadlessSurface {
        &self.surface
    }
}

impl WindowBackend for HeadlessWindow {
    fn surface_support(&self) -> WindowResult<SurfaceSupport> {
        Ok(self.support.clone())
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.surface.state.borrow_mut().input_enabled = enabled;
    }

    fn poll_events(&mut self, events: &mut Vec<PlatformEvent>) {
        events.extend(self.surface.state.borrow_mut().pending.drain(..));
    }

    fn request_close(&mut self) {
        self.surface.state.borrow_mut().visible = false;
    }

    fn size(&self) -> (u32, u32) {
        self.surface.size()
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.surface.state.borrow_mut().size = (width, height);
    }

    fn set_title(&mut self, title: &str) {
        self.surface.state.borrow_mut().title = title.to_string();
    }

    fn destroy(self: Box<Self>) {
        let mut state = self.surface.state.borrow_mut();
        state.destroyed = true;
        state.visible = false;
        state.pending.clear();
        self.destroyed.set(self.destroyed.get() + 1);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
