//! First-person player rig
//!
//! Mouse look lives on the player root; the camera is mounted on the
//! character body below it.

use latch_core::math::Vec2;
use latch_settings::{Camera, InvertY, MouseLook, NodeKind, SceneNode};
use std::cell::Cell;
use std::rc::Rc;

pub struct FirstPersonPlayer {
    sensitivity: Cell<f64>,
    invert_y: Cell<bool>,
    body: Rc<CharacterBody>,
}

impl FirstPersonPlayer {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            sensitivity: Cell::new(1.0),
            invert_y: Cell::new(false),
            body: Rc::new(CharacterBody {
                camera: Rc::new(HeadCamera {
                    fov: Cell::new(75.0),
                }),
            }),
        })
    }

    /// View rotation (degrees) produced by a raw mouse delta.
    pub fn look_delta(&self, mouse_delta: Vec2) -> Vec2 {
        let scaled = mouse_delta * self.sensitivity.get() as f32;
        if self.invert_y.get() {
            Vec2::new(scaled.x, -scaled.y)
        } else {
            scaled
        }
    }

    pub fn field_of_view(&self) -> f32 {
        self.body.camera.fov.get()
    }
}

impl MouseLook for FirstPersonPlayer {
    fn set_mouse_sensitivity(&self, sensitivity: f64) {
        self.sensitivity.set(sensitivity);
    }
}

impl InvertY for FirstPersonPlayer {
    fn set_invert_y(&self, inverted: bool) {
        self.invert_y.set(inverted);
    }
}

impl SceneNode for FirstPersonPlayer {
    fn children(&self) -> Vec<Rc<dyn SceneNode>> {
        vec![Rc::clone(&self.body) as Rc<dyn SceneNode>]
    }

    fn as_mouse_look(self: Rc<Self>) -> Option<Rc<dyn MouseLook>> {
        Some(self as Rc<dyn MouseLook>)
    }

    fn as_invert_y(self: Rc<Self>) -> Option<Rc<dyn InvertY>> {
        Some(self as Rc<dyn InvertY>)
    }
}

struct CharacterBody {
    camera: Rc<HeadCamera>,
}

impl SceneNode for CharacterBody {
    fn kind(&self) -> NodeKind {
        NodeKind::CharacterBody
    }

    fn children(&self) -> Vec<Rc<dyn SceneNode>> {
        vec![Rc::clone(&self.camera) as Rc<dyn SceneNode>]
    }
}

struct HeadCamera {
    fov: Cell<f32>,
}

impl Camera for HeadCamera {
    fn set_field_of_view(&self, degrees: f32) {
        tracing::debug!(degrees, "camera field of view changed");
        self.fov.set(degrees);
    }
}

impl SceneNode for HeadCamera {
    fn as_camera(self: Rc<Self>) -> Option<Rc<dyn Camera>> {
        Some(self as Rc<dyn Camera>)
    }
}
