//! Window lifecycle states

use std::fmt;

/// Where a window is in its lifecycle
///
/// `Active -> CloseRequested -> Disposed`, with `Disposed` reachable from any
/// state through `dispose()` and terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowState {
    /// Live and accepting input (initial state)
    Active,
    /// The OS or the application asked the window to close
    CloseRequested,
    /// Native resources released
    Disposed,
}

impl WindowState {
    /// Whether the window is on its way out
    pub const fn is_closing(self) -> bool {
        !matches!(self, WindowState::Active)
    }
}

impl fmt::Display for WindowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WindowState::Active => "ACTIVE",
            WindowState::CloseRequested => "CLOSE_REQUESTED",
            WindowState::Disposed => "DISPOSED",
        })
    }
}
