//! Recording fakes for the engine seams.

use crate::engine::{
    AudioMixer, Camera, CameraRig, DisplayServer, FrameRateLimiter, Host, InvertY, MouseLook,
    NodeKind, SceneNode, VsyncMode, WindowMode,
};
use latch_core::math::IVec2;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Vsync(VsyncMode),
    WindowMode(WindowMode),
    WindowSize(IVec2),
    WindowPosition(IVec2),
    MaxFps(u32),
    BusMute(usize, bool),
    BusVolumeDb(usize, f32),
}

#[derive(Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<HostCall>>>);

impl CallLog {
    fn push(&self, call: HostCall) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.0.borrow().clone()
    }

    pub fn take(&self) -> Vec<HostCall> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

pub const SCREEN_SIZE: IVec2 = IVec2::new(2560, 1440);

struct FakeDisplay {
    log: CallLog,
    screen: IVec2,
}

impl DisplayServer for FakeDisplay {
    fn set_vsync(&mut self, mode: VsyncMode) {
        self.log.push(HostCall::Vsync(mode));
    }

    fn set_window_mode(&mut self, mode: WindowMode) {
        self.log.push(HostCall::WindowMode(mode));
    }

    fn set_window_size(&mut self, size: IVec2) {
        self.log.push(HostCall::WindowSize(size));
    }

    fn set_window_position(&mut self, position: IVec2) {
        self.log.push(HostCall::WindowPosition(position));
    }

    fn primary_screen_size(&self) -> IVec2 {
        self.screen
    }
}

struct FakeLimiter {
    log: CallLog,
}

impl FrameRateLimiter for FakeLimiter {
    fn set_max_fps(&mut self, max_fps: u32) {
        self.log.push(HostCall::MaxFps(max_fps));
    }
}

struct FakeMixer {
    log: CallLog,
    buses: Vec<&'static str>,
}

impl AudioMixer for FakeMixer {
    fn bus_index(&self, name: &str) -> Option<usize> {
        self.buses.iter().position(|bus| *bus == name)
    }

    fn set_bus_mute(&mut self, bus: usize, muted: bool) {
        self.log.push(HostCall::BusMute(bus, muted));
    }

    fn set_bus_volume_db(&mut self, bus: usize, volume_db: f32) {
        self.log.push(HostCall::BusVolumeDb(bus, volume_db));
    }
}

/// Host with `Master`, `Music` and `SFX` buses at indices 0, 1, 2.
pub fn recording_host() -> (Host, CallLog) {
    recording_host_with_buses(&["Master", "Music", "SFX"])
}

pub fn recording_host_with_buses(buses: &[&'static str]) -> (Host, CallLog) {
    build_recording_host(SCREEN_SIZE, buses)
}

/// Default buses, with the display reporting `screen` as its size.
pub fn recording_host_with_screen(screen: IVec2) -> (Host, CallLog) {
    build_recording_host(screen, &["Master", "Music", "SFX"])
}

fn build_recording_host(screen: IVec2, buses: &[&'static str]) -> (Host, CallLog) {
    let log = CallLog::default();
    let host = Host::new(
        FakeDisplay {
            log: log.clone(),
            screen,
        },
        FakeLimiter { log: log.clone() },
        FakeMixer {
            log: log.clone(),
            buses: buses.to_vec(),
        },
    );
    (host, log)
}

/// Scene node whose capabilities are picked per test.
#[derive(Default)]
pub struct FakeNode {
    kind: NodeKind,
    mouse_look: bool,
    invert_y: bool,
    camera: bool,
    rig_camera: Option<Rc<FakeNode>>,
    children: RefCell<Vec<Rc<FakeNode>>>,
    sensitivity_calls: RefCell<Vec<f64>>,
    invert_calls: RefCell<Vec<bool>>,
    fov_calls: RefCell<Vec<f32>>,
}

impl FakeNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_mouse_look(mut self) -> Self {
        self.mouse_look = true;
        self
    }

    pub fn with_invert_y(mut self) -> Self {
        self.invert_y = true;
        self
    }

    pub fn with_camera(mut self) -> Self {
        self.camera = true;
        self
    }

    pub fn with_rig(mut self, camera: &Rc<FakeNode>) -> Self {
        self.rig_camera = Some(Rc::clone(camera));
        self
    }

    pub fn into_rc(self) -> Rc<Self> {
        Rc::new(self)
    }

    pub fn add_child(&self, child: &Rc<FakeNode>) {
        self.children.borrow_mut().push(Rc::clone(child));
    }

    pub fn as_scene_node(self: &Rc<Self>) -> Rc<dyn SceneNode> {
        Rc::clone(self) as Rc<dyn SceneNode>
    }

    pub fn sensitivity_calls(&self) -> Vec<f64> {
        self.sensitivity_calls.borrow().clone()
    }

    pub fn invert_calls(&self) -> Vec<bool> {
        self.invert_calls.borrow().clone()
    }

    pub fn fov_calls(&self) -> Vec<f32> {
        self.fov_calls.borrow().clone()
    }
}

impl MouseLook for FakeNode {
    fn set_mouse_sensitivity(&self, sensitivity: f64) {
        self.sensitivity_calls.borrow_mut().push(sensitivity);
    }
}

impl InvertY for FakeNode {
    fn set_invert_y(&self, inverted: bool) {
        self.invert_calls.borrow_mut().push(inverted);
    }
}

impl Camera for FakeNode {
    fn set_field_of_view(&self, degrees: f32) {
        self.fov_calls.borrow_mut().push(degrees);
    }
}

impl CameraRig for FakeNode {
    fn camera(&self) -> Option<Rc<dyn Camera>> {
        self.rig_camera
            .as_ref()
            .map(|camera| Rc::clone(camera) as Rc<dyn Camera>)
    }
}

impl SceneNode for FakeNode {
    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn children(&self) -> Vec<Rc<dyn SceneNode>> {
        self.children
            .borrow()
            .iter()
            .map(|child| Rc::clone(child) as Rc<dyn SceneNode>)
            .collect()
    }

    fn as_mouse_look(self: Rc<Self>) -> Option<Rc<dyn MouseLook>> {
        if self.mouse_look {
            Some(self as Rc<dyn MouseLook>)
        } else {
            None
        }
    }

    fn as_invert_y(self: Rc<Self>) -> Option<Rc<dyn InvertY>> {
        if self.invert_y {
            Some(self as Rc<dyn InvertY>)
        } else {
            None
        }
    }

    fn as_camera(self: Rc<Self>) -> Option<Rc<dyn Camera>> {
        if self.camera {
            Some(self as Rc<dyn Camera>)
        } else {
            None
        }
    }

    fn as_camera_rig(self: Rc<Self>) -> Option<Rc<dyn CameraRig>> {
        if self.rig_camera.is_some() {
            Some(self as Rc<dyn CameraRig>)
        } else {
            None
        }
    }
}
