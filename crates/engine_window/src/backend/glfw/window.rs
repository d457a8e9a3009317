//! GLFW-based native windows
//!
//! Creates client-API-less windows suitable for a Vulkan swapchain and
//! translates GLFW's key, character and close events into
//! [`PlatformEvent`]s.

use std::any::Any;

use crate::input::{Action, InputEvent, Key, Modifiers};
use crate::render::window::{
    PlatformEvent, SurfaceDescriptor, SurfaceSupport, WindowBackend, WindowError, WindowPlatform,
    WindowResult,
};

/// Reports the presentation capabilities of a freshly created window
///
/// Typically creates a Vulkan surface for the window and queries its present
/// modes and capabilities.
pub type SurfaceProbe = Box<dyn FnMut(&glfw::PWindow) -> WindowResult<SurfaceSupport>>;

enum SupportSource {
    Fixed(SurfaceSupport),
    Probe(SurfaceProbe),
}

/// GLFW library handle creating [`GlfwWindow`]s
pub struct GlfwPlatform {
    glfw: glfw::Glfw,
    support: SupportSource,
}

impl GlfwPlatform {
    /// Initialize GLFW
    ///
    /// Until a probe is installed, windows report only `FIFO` presentation,
    /// the one mode every Vulkan surface provides.
    pub fn new() -> WindowResult<Self> {
        let glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| WindowError::PlatformInit(format!("{:?}", e)))?;
        log::info!("GLFW {} initialized", glfw::get_version_string());

        Ok(Self {
            glfw,
            support: SupportSource::Fixed(SurfaceSupport::fifo_only()),
        })
    }

    /// Report the same capabilities for every window
    pub fn with_surface_support(mut self, support: SurfaceSupport) -> Self {
        self.support = SupportSource::Fixed(support);
        self
    }

    /// Query capabilities per window
    pub fn with_probe(mut self, probe: SurfaceProbe) -> Self {
        self.support = SupportSource::Probe(probe);
        self
    }

    /// Vulkan instance extensions GLFW needs for surface creation
    pub fn required_instance_extensions(&self) -> WindowResult<Vec<String>> {
        self.glfw
            .get_required_instance_extensions()
            .ok_or_else(|| WindowError::PlatformInit("Vulkan is not available to GLFW".to_string()))
    }
}

impl WindowPlatform for GlfwPlatform {
    fn name(&self) -> &'static str {
        "glfw"
    }

    fn create_backend(
        &mut self,
        descriptor: &SurfaceDescriptor<'_>,
    ) -> WindowResult<Box<dyn WindowBackend>> {
        // Configure for Vulkan (no OpenGL context)
        self.glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
        self.glfw.window_hint(glfw::WindowHint::Resizable(true));

        let (mut window, events) = self
            .glfw
            .create_window(
                descriptor.width,
                descriptor.height,
                descriptor.title,
                glfw::WindowMode::Windowed,
            )
            .ok_or_else(|| {
                WindowError::CreationFailed(format!("GLFW could not create '{}'", descriptor.title))
            })?;

        window.set_close_polling(true);
        set_input_polling(&mut window, descriptor.input_enabled);

        let support = match &mut self.support {
            SupportSource::Fixed(support) => support.clone(),
            SupportSource::Probe(probe) => probe(&window)?,
        };

        Ok(Box::new(GlfwWindow {
            glfw: self.glfw.clone(),
            window,
            events,
            support,
        }))
    }
}

/// One GLFW window
pub struct GlfwWindow {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    support: SurfaceSupport,
}

impl GlfwWindow {
    /// Underlying GLFW window, e.g. for Vulkan surface creation
    pub fn native(&self) -> &glfw::PWindow {
        &self.window
    }

    /// Framebuffer size in pixels (differs from the client size on HiDPI)
    pub fn framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (to_pixels(width), to_pixels(height))
    }
}

impl WindowBackend for GlfwWindow {
    fn surface_support(&self) -> WindowResult<SurfaceSupport> {
        Ok(self.support.clone())
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        set_input_polling(&mut self.window, enabled);
    }

    fn poll_events(&mut self, events: &mut Vec<PlatformEvent>) {
        self.glfw.poll_events();
        events.extend(
            glfw::flush_messages(&self.events).filter_map(|(_, event)| translate_event(event)),
        );
    }

    fn request_close(&mut self) {
        self.window.set_should_close(true);
        self.window.hide();
    }

    fn size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_size();
        (to_pixels(width), to_pixels(height))
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.window.set_size(
            i32::try_from(width).unwrap_or(i32::MAX),
            i32::try_from(height).unwrap_or(i32::MAX),
        );
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    fn destroy(self: Box<Self>) {
        log::debug!("Destroying GLFW window");
        drop(self);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn set_input_polling(window: &mut glfw::PWindow, enabled: bool) {
    window.set_key_polling(enabled);
    window.set_char_mods_polling(enabled);
}

fn to_pixels(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

fn translate_event(event: glfw::WindowEvent) -> Option<PlatformEvent> {
    match event {
        glfw::WindowEvent::Key(key, scancode, action, mods) => {
            Some(PlatformEvent::Input(InputEvent::Key {
                key: translate_key(key),
                scancode,
                action: translate_action(action),
                mods: translate_mods(mods),
            }))
        }
        glfw::WindowEvent::CharModifiers(codepoint, mods) => {
            Some(PlatformEvent::Input(InputEvent::Char { codepoint, mods: translate_mods(mods) }))
        }
        glfw::WindowEvent::Close => Some(PlatformEvent::CloseRequested),
        _ => None,
    }
}

fn translate_key(key: glfw::Key) -> Key {
    match key {
        // The grave accent keeps its historical interop code, not GLFW's.
        glfw::Key::GraveAccent => Key::GraveAccent,
        other => Key::from_code(other as i32),
    }
}

fn translate_action(action: glfw::Action) -> Action {
    match action {
        glfw::Action::Release => Action::Release,
        glfw::Action::Press => Action::Press,
        glfw::Action::Repeat => Action::Repeat,
    }
}

fn translate_mods(mods: glfw::Modifiers) -> Modifiers {
    Modifiers::from_native(mods.bits() as i32)
}
