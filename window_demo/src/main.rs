//! Window demo application
//!
//! Opens one window, echoes typed text and key transitions to the log, and
//! closes when Escape is pressed. Pass a `.toml` or `.ron` path to load the
//! window configuration from a file.
//!
//! Without the `native` feature the demo replays a scripted session on the
//! headless backend, which is handy on machines without a display.

use std::cell::Cell;
use std::error::Error;
use std::rc::Rc;

use engine_window::foundation::logging;
use engine_window::prelude::*;

/// Logs input and flags Escape as a close request
struct DemoInput {
    close_requested: Rc<Cell<bool>>,
    text: String,
}

impl KeyboardCallback for DemoInput {
    fn char_typed(&mut self, codepoint: char, _mods: Modifiers) -> CallbackResult {
        self.text.push(codepoint);
        log::info!("Text so far: {:?}", self.text);
        Ok(())
    }

    fn key_typed(
        &mut self,
        key: Key,
        scancode: i32,
        action: Action,
        mods: Modifiers,
    ) -> CallbackResult {
        log::info!("{} {:?} (scancode {}, mods {:?})", key, action, scancode, mods);
        if key == Key::Escape && action == Action::Press {
            self.close_requested.set(true);
        }
        Ok(())
    }
}

fn load_config() -> Result<WindowConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading window configuration from {}", path);
            WindowConfig::load_from_file(path)
        }
        None => Ok(WindowConfig::new("Window Demo")
            .with_size(1280, 720)
            .with_buffer_type(BufferType::Double)
            .with_clear_color(Color::rgb(0.05, 0.05, 0.1))),
    }
}

fn run(window: &mut Window, close_requested: &Cell<bool>) -> Result<(), WindowError> {
    while !window.should_close() {
        let report = window.pump_events()?;
        for failure in &report.failures {
            log::error!("Input handler failed on {:?}: {}", failure.event, failure.error);
        }
        if close_requested.get() {
            window.close()?;
        }
    }
    log::info!("Window closing ({})", window.state());
    window.dispose();
    Ok(())
}

#[cfg(feature = "native")]
fn main() -> Result<(), Box<dyn Error>> {
    logging::init_with_level("info");

    let close_requested = Rc::new(Cell::new(false));
    let input = shared(DemoInput {
        close_requested: Rc::clone(&close_requested),
        text: String::new(),
    });
    let config = load_config()?.with_keyboard_callback(input);

    let mut platform = GlfwPlatform::new()?;
    let mut window = Window::new(config, &mut platform)?;
    run(&mut window, &close_requested)?;
    Ok(())
}

#[cfg(not(feature = "native"))]
fn main() -> Result<(), Box<dyn Error>> {
    logging::init_with_level("info");

    let close_requested = Rc::new(Cell::new(false));
    let input = shared(DemoInput {
        close_requested: Rc::clone(&close_requested),
        text: String::new(),
    });
    let config = load_config()?.with_keyboard_callback(input);

    let mut platform = HeadlessPlatform::default();
    let mut window = Window::new(config, &mut platform)?;

    if let Some(surface) = platform.last_surface() {
        for (key, codepoint) in [(Key::H, 'h'), (Key::I, 'i')] {
            surface.press(key, Modifiers::empty());
            surface.type_char(codepoint, 0);
            surface.release(key, Modifiers::empty());
        }
        surface.press(Key::Escape, Modifiers::empty());
    }

    run(&mut window, &close_requested)?;
    Ok(())
}
