//! Player binding
//!
//! Resolves, once per binding, which nodes of the player subtree receive the
//! control and camera settings. Only weak references are kept, so a despawned
//! player turns every update into a no-op.

use crate::engine::{Camera, CameraRig, InvertY, MouseLook, NodeKind, SceneNode};
use std::rc::{Rc, Weak};

enum CameraSource {
    /// Ask the rig every time; it may switch cameras.
    Rig(Weak<dyn CameraRig>),
    Node(Weak<dyn Camera>),
}

pub struct PlayerLink {
    player: Weak<dyn SceneNode>,
    mouse_look: Option<Weak<dyn MouseLook>>,
    invert_y: Option<Weak<dyn InvertY>>,
    camera: Option<CameraSource>,
}

impl PlayerLink {
    pub fn bind(player: &Rc<dyn SceneNode>) -> Self {
        let mouse_look = find_capability(player, |node| node.as_mouse_look());
        let invert_y = find_capability(player, |node| node.as_invert_y());
        let camera = resolve_camera(player);

        tracing::debug!(
            mouse_look = mouse_look.is_some(),
            invert_y = invert_y.is_some(),
            camera = camera.is_some(),
            "player bound"
        );

        Self {
            player: Rc::downgrade(player),
            mouse_look: mouse_look.as_ref().map(Rc::downgrade),
            invert_y: invert_y.as_ref().map(Rc::downgrade),
            camera,
        }
    }

    /// The bound player, if it is still alive.
    pub fn player(&self) -> Option<Rc<dyn SceneNode>> {
        self.player.upgrade()
    }

    /// Returns whether a target received the value.
    pub fn set_mouse_sensitivity(&self, sensitivity: f64) -> bool {
        match self.live(&self.mouse_look) {
            Some(target) => {
                target.set_mouse_sensitivity(sensitivity);
                true
            }
            None => false,
        }
    }

    pub fn set_invert_y(&self, inverted: bool) -> bool {
        match self.live(&self.invert_y) {
            Some(target) => {
                target.set_invert_y(inverted);
                true
            }
            None => false,
        }
    }

    pub fn camera(&self) -> Option<Rc<dyn Camera>> {
        self.player.upgrade()?;
        match self.camera.as_ref()? {
            CameraSource::Rig(rig) => rig.upgrade()?.camera(),
            CameraSource::Node(camera) => camera.upgrade(),
        }
    }

    fn live<T: ?Sized>(&self, target: &Option<Weak<T>>) -> Option<Rc<T>> {
        self.player.upgrade()?;
        target.as_ref()?.upgrade()
    }
}

/// The player itself wins; otherwise the first direct child that has it.
fn find_capability<T: ?Sized>(
    player: &Rc<dyn SceneNode>,
    capability: impl Fn(Rc<dyn SceneNode>) -> Option<Rc<T>>,
) -> Option<Rc<T>> {
    capability(Rc::clone(player)).or_else(|| player.children().into_iter().find_map(&capability))
}

fn resolve_camera(player: &Rc<dyn SceneNode>) -> Option<CameraSource> {
    if let Some(rig) = Rc::clone(player).as_camera_rig() {
        return Some(CameraSource::Rig(Rc::downgrade(&rig)));
    }

    let children = player.children();
    let direct = children
        .iter()
        .find_map(|child| Rc::clone(child).as_camera());

    let camera = direct.or_else(|| {
        children
            .iter()
            .filter(|child| child.kind() == NodeKind::CharacterBody)
            .flat_map(|body| body.children())
            .find_map(|grandchild| grandchild.as_camera())
    })?;

    Some(CameraSource::Node(Rc::downgrade(&camera)))
}
