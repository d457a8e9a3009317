//! Window lifecycle and input delivery tests
//!
//! Drives [`Window`] through the headless backend: construction and
//! validation, close/dispose transitions, buffer negotiation and keyboard
//! delivery as the OS would produce it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::Color;
use crate::input::{
    shared, Action, CallbackError, CallbackResult, Key, KeyboardCallback, Modifiers,
    SharedKeyboardCallback,
};

use super::headless::{HeadlessPlatform, HeadlessWindow};
use super::{
    BufferType, SupportedBufferTypes, SurfaceSupport, Window, WindowConfig, WindowError,
    WindowState,
};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Default)]
    struct Recorder {
        keys: Vec<(Key, i32, Action, Modifiers)>,
        chars: Vec<char>,
        fail_on: Option<Key>,
        panic_on: Option<char>,
    }

    impl KeyboardCallback for Recorder {
        fn char_typed(&mut self, codepoint: char, _mods: Modifiers) -> CallbackResult {
            if self.panic_on == Some(codepoint) {
                panic!("cannot handle {codepoint}");
            }
            self.chars.push(codepoint);
            Ok(())
        }

        fn key_typed(
            &mut self,
            key: Key,
            scancode: i32,
            action: Action,
            mods: Modifiers,
        ) -> CallbackResult {
            if self.fail_on == Some(key) {
                return Err(format!("rejected {key}").into());
            }
            self.keys.push((key, scancode, action, mods));
            Ok(())
        }
    }

    fn recorded() -> (Rc<RefCell<Recorder>>, SharedKeyboardCallback) {
        let recorder = shared(Recorder::default());
        let callback: SharedKeyboardCallback = recorder.clone();
        (recorder, callback)
    }

    fn example_config() -> WindowConfig {
        WindowConfig::new("Example")
            .with_size(800, 600)
            .with_buffer_type(BufferType::Double)
            .with_clear_color(Color::rgba(0.0, 0.0, 0.0, 1.0))
    }

    #[test]
    fn test_close_then_dispose_scenario() {
        let mut platform = HeadlessPlatform::default();
        let mut window = Window::new(example_config(), &mut platform).unwrap();
        assert_eq!(window.state(), WindowState::Active);
        assert!(!window.should_close());
        assert_eq!(window.buffer_type(), BufferType::Double);
        assert_eq!(window.presentation().unwrap().image_count(), 2);

        window.close().unwrap();
        assert!(window.should_close());
        assert_eq!(window.state(), WindowState::CloseRequested);
        assert!(!platform.last_surface().unwrap().is_visible());

        window.dispose();
        assert_eq!(window.state(), WindowState::Disposed);
        assert!(window.should_close());
        window.dispose();
        assert_eq!(window.state(), WindowState::Disposed);
        assert_eq!(platform.live_windows(), 0);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut platform = HeadlessPlatform::default();
        let mut window = Window::new(example_config(), &mut platform).unwrap();
        window.close().unwrap();
        window.close().unwrap();
        assert_eq!(window.state(), WindowState::CloseRequested);
    }

    #[test]
    fn test_dispose_from_active() {
        let mut platform = HeadlessPlatform::default();
        let mut window = Window::new(example_config(), &mut platform).unwrap();
        window.dispose();
        assert_eq!(window.state(), WindowState::Disposed);
        assert!(platform.last_surface().unwrap().is_destroyed());
    }

    #[test]
    fn test_operations_fail_after_dispose() {
        let mut platform = HeadlessPlatform::default();
        let mut window = Window::new(example_config(), &mut platform).unwrap();
        window.dispose();

        let lifecycle_error = |result: Result<(), WindowError>| {
            matches!(
                result,
                Err(WindowError::InvalidLifecycleState { state: WindowState::Disposed, .. })
            )
        };
        assert!(lifecycle_error(window.close()));
        assert!(lifecycle_error(window.set_title("Renamed")));
        assert!(lifecycle_error(window.set_size(640, 480)));
        assert!(lifecycle_error(window.set_clear_color(Color::BLACK)));
        assert!(lifecycle_error(window.set_keyboard_callback(None)));
        assert!(window.pump_events().is_err());
        assert!(window.size().is_err());
        assert!(window.presentation().is_err());
        assert!(window.backend_mut().is_err());

        // Pure queries stay valid.
        assert!(window.should_close());
        assert_eq!(window.title(), "Example");
    }

    #[test]
    fn test_invalid_configuration_allocates_nothing() {
        let mut platform = HeadlessPlatform::default();
        let configs = [
            example_config().with_size(0, 600),
            example_config().with_size(800, 0),
            example_config().with_clear_color([0.0, 1.5, 0.0, 1.0]),
            example_config().with_clear_color([f32::NAN, 0.0, 0.0, 1.0]),
        ];

        for config in configs {
            let err = Window::new(config, &mut platform).unwrap_err();
            assert!(matches!(err, WindowError::InvalidConfiguration(_)), "{err:?}");
        }
        assert_eq!(platform.created(), 0);
    }

    #[test]
    fn test_mailbox_on_fifo_only_surface() {
        let mut platform = HeadlessPlatform::new(SurfaceSupport::fifo_only());
        let config = example_config().with_buffer_type(BufferType::Mailbox);
        let err = Window::new(config, &mut platform).unwrap_err();

        assert_eq!(
            err,
            WindowError::UnsupportedBufferType {
                requested: BufferType::Mailbox,
                available: SupportedBufferTypes::DOUBLE,
            }
        );
        assert_eq!(platform.created(), 1);
        assert_eq!(platform.live_windows(), 0);
    }

    #[test]
    fn test_no_silent_downgrade_on_image_limits() {
        let support = SurfaceSupport::all().with_image_count_range(3, 3);
        let mut platform = HeadlessPlatform::new(support);

        let err = Window::new(example_config(), &mut platform).unwrap_err();
        assert!(matches!(
            err,
            WindowError::UnsupportedBufferType { requested: BufferType::Double, available }
                if !available.contains(SupportedBufferTypes::DOUBLE)
        ));

        let config = example_config().with_buffer_type(BufferType::Mailbox);
        let window = Window::new(config, &mut platform).unwrap();
        assert_eq!(window.buffer_type(), BufferType::Mailbox);
        assert_eq!(window.presentation().unwrap().image_count(), 3);
    }

    #[test]
    fn test_platform_creation_failure() {
        let mut platform = HeadlessPlatform::failing("display unavailable");
        let err = Window::new(example_config(), &mut platform).unwrap_err();
        assert!(matches!(err, WindowError::CreationFailed(_)));
    }

    #[test]
    fn test_shift_a_press_repeat_release() {
        let (recorder, callback) = recorded();
        let mut platform = HeadlessPlatform::default();
        let config = example_config().with_keyboard_callback(callback);
        let mut window = Window::new(config, &mut platform).unwrap();
        let surface = platform.last_surface().unwrap();

        // Native SHIFT bit is 0x1; 65 is the native code for A.
        for native_action in [1, 2, 0] {
            assert!(surface.key(65, 38, native_action, 0x1));
        }
        let report = window.pump_events().unwrap();

        assert!(report.is_clean());
        assert_eq!(report.delivered, 3);
        assert_eq!(
            recorder.borrow().keys,
            vec![
                (Key::A, 38, Action::Press, Modifiers::SHIFT),
                (Key::A, 38, Action::Repeat, Modifiers::SHIFT),
                (Key::A, 38, Action::Release, Modifiers::SHIFT),
            ]
        );
    }

    #[test]
    fn test_chars_and_keys_both_delivered() {
        let (recorder, callback) = recorded();
        let mut platform = HeadlessPlatform::default();
        let config = example_config().with_keyboard_callback(callback);
        let mut window = Window::new(config, &mut platform).unwrap();
        let surface = platform.last_surface().unwrap();

        surface.press(Key::E, Modifiers::empty());
        surface.type_char('é', 0);
        surface.type_char('€', 0x2);
        surface.release(Key::E, Modifiers::empty());
        window.pump_events().unwrap();

        let recorder = recorder.borrow();
        assert_eq!(recorder.chars, vec!['é', '€']);
        assert_eq!(recorder.keys.len(), 2);
    }

    #[test]
    fn test_no_callback_means_no_events() {
        let mut platform = HeadlessPlatform::default();
        let mut window = Window::new(example_config(), &mut platform).unwrap();
        let surface = platform.last_surface().unwrap();

        assert!(!surface.input_enabled());
        assert!(!surface.press(Key::A, Modifiers::empty()));
        assert!(!surface.type_char('a', 0));
        assert_eq!(surface.pending(), 0);

        let report = window.pump_events().unwrap();
        assert_eq!(report.delivered, 0);
        assert_eq!(report.dropped, 0);
    }

    #[test]
    fn test_no_callbacks_after_dispose() {
        let (recorder, callback) = recorded();
        let mut platform = HeadlessPlatform::default();
        let config = example_config().with_keyboard_callback(callback);
        let mut window = Window::new(config, &mut platform).unwrap();
        let surface = platform.last_surface().unwrap();

        surface.press(Key::Space, Modifiers::empty());
        surface.type_char(' ', 0);
        window.dispose();

        assert!(!surface.press(Key::Enter, Modifiers::empty()));
        assert!(window.pump_events().is_err());
        assert_eq!(surface.pending(), 0);
        assert!(recorder.borrow().keys.is_empty());
        assert!(recorder.borrow().chars.is_empty());
        // The window released its handle on the callback.
        assert_eq!(Rc::strong_count(&recorder), 1);
    }

    #[test]
    fn test_input_still_delivered_while_close_requested() {
        let (recorder, callback) = recorded();
        let mut platform = HeadlessPlatform::default();
        let config = example_config().with_keyboard_callback(callback);
        let mut window = Window::new(config, &mut platform).unwrap();
        let surface = platform.last_surface().unwrap();

        window.close().unwrap();
        surface.press(Key::Escape, Modifiers::empty());
        window.pump_events().unwrap();
        assert_eq!(recorder.borrow().keys.len(), 1);
    }

    #[test]
    fn test_native_close_button() {
        let mut platform = HeadlessPlatform::default();
        let mut window = Window::new(example_config(), &mut platform).unwrap();

        platform.last_surface().unwrap().click_close();
        assert!(!window.should_close());
        window.pump_events().unwrap();
        assert_eq!(window.state(), WindowState::CloseRequested);
        assert!(window.should_close());
    }

    #[test]
    fn test_swapping_callback_keeps_held_keys() {
        let (first, first_callback) = recorded();
        let (second, second_callback) = recorded();
        let mut platform = HeadlessPlatform::default();
        let config = example_config().with_keyboard_callback(first_callback);
        let mut window = Window::new(config, &mut platform).unwrap();
        let surface = platform.last_surface().unwrap();

        surface.press(Key::W, Modifiers::empty());
        window.pump_events().unwrap();

        window.set_keyboard_callback(Some(second_callback)).unwrap();
        surface.release(Key::W, Modifiers::empty());
        window.pump_events().unwrap();

        assert_eq!(first.borrow().keys.len(), 1);
        assert_eq!(second.borrow().keys.len(), 1);
        assert_eq!(second.borrow().keys[0].2, Action::Release);
    }

    #[test]
    fn test_removing_callback_stops_input() {
        let (recorder, callback) = recorded();
        let mut platform = HeadlessPlatform::default();
        let config = example_config().with_keyboard_callback(callback.clone());
        let mut window = Window::new(config, &mut platform).unwrap();
        let surface = platform.last_surface().unwrap();

        surface.press(Key::W, Modifiers::empty());
        window.pump_events().unwrap();
        window.set_keyboard_callback(None).unwrap();
        assert!(!window.has_keyboard_callback());
        assert!(!surface.input_enabled());
        assert!(!surface.release(Key::W, Modifiers::empty()));

        // Reinstalled: the release was never observed, so W is not held.
        window.set_keyboard_callback(Some(callback)).unwrap();
        assert!(surface.input_enabled());
        surface.release(Key::W, Modifiers::empty());
        let report = window.pump_events().unwrap();
        assert_eq!(report.dropped, 1);
        assert_eq!(recorder.borrow().keys.len(), 1);
    }

    #[test]
    fn test_failing_callback_does_not_stop_delivery() {
        let recorder = shared(Recorder {
            fail_on: Some(Key::B),
            ..Recorder::default()
        });
        let callback: SharedKeyboardCallback = recorder.clone();
        let mut platform = HeadlessPlatform::default();
        let config = example_config().with_keyboard_callback(callback);
        let mut window = Window::new(config, &mut platform).unwrap();
        let surface = platform.last_surface().unwrap();

        surface.press(Key::A, Modifiers::empty());
        surface.press(Key::B, Modifiers::empty());
        surface.press(Key::C, Modifiers::empty());
        let report = window.pump_events().unwrap();

        assert_eq!(report.delivered, 3);
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(report.failures[0].error, CallbackError::Failed(_)));
        let keys: Vec<Key> = recorder.borrow().keys.iter().map(|k| k.0).collect();
        assert_eq!(keys, vec![Key::A, Key::C]);
        assert_eq!(window.state(), WindowState::Active);
    }

    #[test]
    fn test_panicking_callback_is_contained() {
        let recorder = shared(Recorder {
            panic_on: Some('x'),
            ..Recorder::default()
        });
        let callback: SharedKeyboardCallback = recorder.clone();
        let mut platform = HeadlessPlatform::default();
        let config = example_config().with_keyboard_callback(callback);
        let mut window = Window::new(config, &mut platform).unwrap();
        let surface = platform.last_surface().unwrap();

        surface.type_char('x', 0);
        surface.type_char('y', 0);
        let report = window.pump_events().unwrap();

        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            &report.failures[0].error,
            CallbackError::Panicked(msg) if msg.contains("cannot handle x")
        ));
        assert_eq!(recorder.borrow().chars, vec!['y']);
    }

    #[test]
    fn test_setters_reach_native_window() {
        let mut platform = HeadlessPlatform::default();
        let mut window = Window::new(example_config(), &mut platform).unwrap();
        let surface = platform.last_surface().unwrap();

        window.set_title("Renamed").unwrap();
        window.set_size(1024, 768).unwrap();
        window.set_clear_color([0.2, 0.3, 0.4, 1.0]).unwrap();

        assert_eq!(surface.title(), "Renamed");
        assert_eq!(window.title(), "Renamed");
        assert_eq!(window.size().unwrap(), (1024, 768));
        assert_eq!(window.clear_color(), Color::rgba(0.2, 0.3, 0.4, 1.0));

        assert!(matches!(window.set_size(0, 10), Err(WindowError::InvalidConfiguration(_))));
        assert!(matches!(
            window.set_clear_color([2.0, 0.0, 0.0, 1.0]),
            Err(WindowError::InvalidConfiguration(_))
        ));
        assert_eq!(window.size().unwrap(), (1024, 768));
    }

    #[test]
    fn test_backend_downcast() {
        let mut platform = HeadlessPlatform::default();
        let mut window = Window::new(example_config(), &mut platform).unwrap();
        assert_eq!(window.platform_name(), "headless");

        let backend = window.backend_mut().unwrap();
        let headless = backend.as_any_mut().downcast_mut::<HeadlessWindow>().unwrap();
        assert_eq!(headless.surface().title(), "Example");
    }

    #[test]
    fn test_drop_disposes() {
        let mut platform = HeadlessPlatform::default();
        {
            let _window = Window::new(example_config(), &mut platform).unwrap();
            assert_eq!(platform.live_windows(), 1);
        }
        assert_eq!(platform.live_windows(), 0);
    }

    fn buffer_type_strategy() -> impl Strategy<Value = BufferType> {
        prop::sample::select(BufferType::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_valid_config_starts_active(
            width in 1u32..8192,
            height in 1u32..8192,
            channels in prop::array::uniform4(0.0f32..=1.0),
            buffer_type in buffer_type_strategy(),
        ) {
            let mut platform = HeadlessPlatform::default();
            let config = WindowConfig::new("prop")
                .with_size(width, height)
                .with_clear_color(channels)
                .with_buffer_type(buffer_type);
            let window = Window::new(config, &mut platform).unwrap();
            prop_assert_eq!(window.state(), WindowState::Active);
            prop_assert!(!window.should_close());
            prop_assert_eq!(window.buffer_type(), buffer_type);
        }

        #[test]
        fn prop_dispose_idempotent_from_any_state(
            close_first in any::<bool>(),
            repeats in 1usize..5,
        ) {
            let mut platform = HeadlessPlatform::default();
            let mut window = Window::new(WindowConfig::new("prop"), &mut platform).unwrap();
            if close_first {
                window.close().unwrap();
            }
            for _ in 0..repeats {
                window.dispose();
                prop_assert_eq!(window.state(), WindowState::Disposed);
            }
            prop_assert_eq!(platform.live_windows(), 0);
        }
    }
}
