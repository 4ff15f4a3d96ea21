//! Engine-facing seams
//!
//! The store never talks to a concrete window, mixer or player type. Hosts
//! implement these traits; test code implements them with recorders.

use latch_core::math::IVec2;
use std::rc::Rc;

pub const MASTER_BUS: &str = "Master";
pub const MUSIC_BUS: &str = "Music";
pub const SFX_BUS: &str = "SFX";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VsyncMode {
    Enabled,
    Disabled,
}

impl From<bool> for VsyncMode {
    fn from(enabled: bool) -> Self {
        if enabled {
            VsyncMode::Enabled
        } else {
            VsyncMode::Disabled
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMode {
    Windowed,
    Fullscreen,
}

impl From<bool> for WindowMode {
    fn from(fullscreen: bool) -> Self {
        if fullscreen {
            WindowMode::Fullscreen
        } else {
            WindowMode::Windowed
        }
    }
}

/// Window and presentation controls.
pub trait DisplayServer {
    fn set_vsync(&mut self, mode: VsyncMode);
    fn set_window_mode(&mut self, mode: WindowMode);
    fn set_window_size(&mut self, size: IVec2);
    fn set_window_position(&mut self, position: IVec2);
    fn primary_screen_size(&self) -> IVec2;
}

pub trait FrameRateLimiter {
    /// 0 removes the cap.
    fn set_max_fps(&mut self, max_fps: u32);
}

/// Named-bus audio mixer.
pub trait AudioMixer {
    fn bus_index(&self, name: &str) -> Option<usize>;
    fn set_bus_mute(&mut self, bus: usize, muted: bool);
    fn set_bus_volume_db(&mut self, bus: usize, volume_db: f32);
}

/// Engine systems the store pushes settings into.
pub struct Host {
    pub display: Box<dyn DisplayServer>,
    pub frame_limiter: Box<dyn FrameRateLimiter>,
    pub audio: Box<dyn AudioMixer>,
}

impl Host {
    pub fn new(
        display: impl DisplayServer + 'static,
        frame_limiter: impl FrameRateLimiter + 'static,
        audio: impl AudioMixer + 'static,
    ) -> Self {
        Self {
            display: Box::new(display),
            frame_limiter: Box::new(frame_limiter),
            audio: Box::new(audio),
        }
    }
}

// ============================================================================
// Player capabilities
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    #[default]
    Node,
    /// Physics-driven character; cameras are often mounted one level below it.
    CharacterBody,
}

pub trait MouseLook {
    fn set_mouse_sensitivity(&self, sensitivity: f64);
}

pub trait InvertY {
    fn set_invert_y(&self, inverted: bool);
}

pub trait Camera {
    fn set_field_of_view(&self, degrees: f32);
}

/// Node that knows which camera it looks through.
pub trait CameraRig {
    fn camera(&self) -> Option<Rc<dyn Camera>>;
}

/// A node in the player's scene subtree.
///
/// Each `as_*` accessor hands out the node as one capability, or `None` when
/// the node does not have it. Implementors that have a capability return
/// `Some(self)`.
pub trait SceneNode {
    fn kind(&self) -> NodeKind {
        NodeKind::Node
    }

    fn children(&self) -> Vec<Rc<dyn SceneNode>> {
        Vec::new()
    }

    fn as_mouse_look(self: Rc<Self>) -> Option<Rc<dyn MouseLook>> {
        None
    }

    fn as_invert_y(self: Rc<Self>) -> Option<Rc<dyn InvertY>> {
        None
    }

    fn as_camera(self: Rc<Self>) -> Option<Rc<dyn Camera>> {
        None
    }

    fn as_camera_rig(self: Rc<Self>) -> Option<Rc<dyn CameraRig>> {
        None
    }
}
