//! # Backend Module
//!
//! Native implementations of the window platform contract defined in
//! [`render::window::backend`](crate::render::window::backend).
//!
//! ## Organization
//!
//! - **GLFW**: Desktop windows for Vulkan rendering (feature `glfw`)
//!
//! The in-process backend lives next to the contract in
//! [`render::window::headless`](crate::render::window::headless) since it has
//! no native dependency.

pub mod glfw;

pub use self::glfw::{GlfwPlatform, GlfwWindow};
