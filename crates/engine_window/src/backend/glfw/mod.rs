//! GLFW windowing backend

pub mod window;

pub use window::{GlfwPlatform, GlfwWindow, SurfaceProbe};
