//! Presentation buffering policy
//!
//! A window's [`BufferType`] is negotiated once, at construction, against
//! what the surface actually offers:
//!
//! - **Single** → `IMMEDIATE`: frames go straight to the display buffer, no
//!   vertical-blank sync. Tearing is expected and never an error.
//! - **Double** → `FIFO`: exactly two images, presentation waits for the
//!   display. No tearing.
//! - **Mailbox** → `MAILBOX`: three or more images; the newest finished frame
//!   is shown at the next vertical blank and unshown frames are replaced
//!   without blocking the producer. Costs memory, lowers latency when the GPU
//!   is the bottleneck.
//!
//! A mode the surface cannot provide fails with
//! [`WindowError::UnsupportedBufferType`]. There is no fallback: the
//! negotiated mode is immutable for the life of the window, so a silent
//! downgrade would lie to the renderer.

use std::fmt;

use ash::vk;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::error::{WindowError, WindowResult};

/// Presentation strategy requested for a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BufferType {
    /// Present directly, tearing possible
    Single,
    /// Two images swapped on each present, vsync
    Double,
    /// Three or more images, newest frame wins
    #[default]
    Mailbox,
}

impl BufferType {
    /// Every buffer type, cheapest first
    pub const ALL: [BufferType; 3] = [BufferType::Single, BufferType::Double, BufferType::Mailbox];

    /// Vulkan present mode implementing this strategy
    pub const fn present_mode(self) -> vk::PresentModeKHR {
        match self {
            BufferType::Single => vk::PresentModeKHR::IMMEDIATE,
            BufferType::Double => vk::PresentModeKHR::FIFO,
            BufferType::Mailbox => vk::PresentModeKHR::MAILBOX,
        }
    }

    /// Buffer type provided by a Vulkan present mode, if any
    ///
    /// `FIFO_RELAXED` may tear and therefore does not count as double buffering.
    pub fn from_present_mode(mode: vk::PresentModeKHR) -> Option<Self> {
        match mode {
            vk::PresentModeKHR::IMMEDIATE => Some(BufferType::Single),
            vk::PresentModeKHR::FIFO => Some(BufferType::Double),
            vk::PresentModeKHR::MAILBOX => Some(BufferType::Mailbox),
            _ => None,
        }
    }

    /// Smallest number of images this strategy needs
    pub const fn min_image_count(self) -> u32 {
        match self {
            BufferType::Single => 1,
            BufferType::Double => 2,
            BufferType::Mailbox => 3,
        }
    }

    /// Whether visible tearing is an accepted outcome
    pub const fn allows_tearing(self) -> bool {
        matches!(self, BufferType::Single)
    }

    /// Whether presenting waits for the display to take the next image
    pub const fn blocks_on_present(self) -> bool {
        matches!(self, BufferType::Double)
    }

    /// This buffer type as a support flag
    pub const fn as_flag(self) -> SupportedBufferTypes {
        match self {
            BufferType::Single => SupportedBufferTypes::SINGLE,
            BufferType::Double => SupportedBufferTypes::DOUBLE,
            BufferType::Mailbox => SupportedBufferTypes::MAILBOX,
        }
    }
}

impl fmt::Display for BufferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BufferType::Single => "SINGLE",
            BufferType::Double => "DOUBLE",
            BufferType::Mailbox => "MAILBOX",
        })
    }
}

bitflags! {
    /// Set of buffer types a surface can provide
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SupportedBufferTypes: u8 {
        /// `IMMEDIATE` present mode available
        const SINGLE = 0b001;
        /// `FIFO` present mode available
        const DOUBLE = 0b010;
        /// `MAILBOX` present mode available
        const MAILBOX = 0b100;
    }
}

impl SupportedBufferTypes {
    /// Collect the buffer types offered by a list of present modes
    pub fn from_present_modes(modes: &[vk::PresentModeKHR]) -> Self {
        modes
            .iter()
            .filter_map(|&mode| BufferType::from_present_mode(mode))
            .fold(Self::empty(), |set, buffer_type| set | buffer_type.as_flag())
    }

    /// Whether `buffer_type` is in the set
    pub fn supports(self, buffer_type: BufferType) -> bool {
        self.contains(buffer_type.as_flag())
    }
}

/// What a presentation surface offers, as reported by a backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceSupport {
    /// Present modes the surface accepts
    pub present_modes: Vec<vk::PresentModeKHR>,
    /// Minimum swapchain image count
    pub min_image_count: u32,
    /// Maximum swapchain image count, `0` for no limit
    pub max_image_count: u32,
}

impl SurfaceSupport {
    /// Surface with the given present modes and no image count limits
    pub fn new(present_modes: Vec<vk::PresentModeKHR>) -> Self {
        Self {
            present_modes,
            min_image_count: 1,
            max_image_count: 0,
        }
    }

    /// Surface described by Vulkan surface capabilities
    pub fn from_capabilities(
        present_modes: Vec<vk::PresentModeKHR>,
        caps: &vk::SurfaceCapabilitiesKHR,
    ) -> Self {
        Self {
            present_modes,
            min_image_count: caps.min_image_count,
            max_image_count: caps.max_image_count,
        }
    }

    /// Surface offering every buffer type
    pub fn all() -> Self {
        Self::new(BufferType::ALL.iter().map(|b| b.present_mode()).collect())
    }

    /// Surface offering only `FIFO`, the one mode Vulkan guarantees
    pub fn fifo_only() -> Self {
        Self::new(vec![vk::PresentModeKHR::FIFO])
    }

    /// Set the image count limits
    pub fn with_image_count_range(mut self, min: u32, max: u32) -> Self {
        self.min_image_count = min;
        self.max_image_count = max;
        self
    }

    /// Buffer types whose present mode is offered
    pub fn buffer_types(&self) -> SupportedBufferTypes {
        SupportedBufferTypes::from_present_modes(&self.present_modes)
    }

    /// Buffer types that would actually negotiate on this surface
    ///
    /// Narrower than [`buffer_types`](Self::buffer_types) when the image
    /// count limits rule a mode out.
    pub fn negotiable(&self) -> SupportedBufferTypes {
        BufferType::ALL
            .iter()
            .filter(|b| plan_for(**b, self).is_some())
            .fold(SupportedBufferTypes::empty(), |set, b| set | b.as_flag())
    }

    fn image_count_fits(&self, count: u32) -> bool {
        count >= self.min_image_count
            && (self.max_image_count == 0 || count <= self.max_image_count)
    }
}

/// Presentation settings fixed at window construction
///
/// Consumed by the swapchain owner. No setter exists; a window keeps its
/// plan until it is disposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationPlan {
    buffer_type: BufferType,
    present_mode: vk::PresentModeKHR,
    image_count: u32,
}

impl PresentationPlan {
    /// Negotiated buffer type (always the one requested)
    pub fn buffer_type(&self) -> BufferType {
        self.buffer_type
    }

    /// Vulkan present mode to create the swapchain with
    pub fn present_mode(&self) -> vk::PresentModeKHR {
        self.present_mode
    }

    /// Swapchain image count to request
    pub fn image_count(&self) -> u32 {
        self.image_count
    }
}

/// Negotiate `requested` against a surface
///
/// Either returns a plan for exactly `requested` or fails with
/// [`WindowError::UnsupportedBufferType`].
pub fn negotiate(
    requested: BufferType,
    support: &SurfaceSupport,
) -> WindowResult<PresentationPlan> {
    match plan_for(requested, support) {
        Some(plan) => {
            log::debug!(
                "Negotiated {} presentation: {:?} with {} image(s)",
                requested,
                plan.present_mode,
                plan.image_count
            );
            Ok(plan)
        }
        None => {
            let available = support.negotiable();
            log::warn!(
                "Surface cannot provide {} buffering (available: {:?})",
                requested,
                available
            );
            Err(WindowError::UnsupportedBufferType { requested, available })
        }
    }
}

fn plan_for(buffer_type: BufferType, support: &SurfaceSupport) -> Option<PresentationPlan> {
    let present_mode = buffer_type.present_mode();
    if !support.present_modes.contains(&present_mode) {
        return None;
    }

    let image_count = match buffer_type {
        // Double buffering means two images, not "at least two".
        BufferType::Double => 2,
        other => other.min_image_count().max(support.min_image_count),
    };
    if !support.image_count_fits(image_count) {
        return None;
    }

    Some(PresentationPlan {
        buffer_type,
        present_mode,
        image_count,
    })
}
