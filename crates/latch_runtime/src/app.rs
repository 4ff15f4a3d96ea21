//! Main loop
//!
//! The window only exists after `resumed`, so the settings store is built
//! there and `ready` runs before the first frame.

use crate::host::{SharedLimiter, SharedMixer, WindowDisplay};
use crate::player::FirstPersonPlayer;
use latch_audio::Mixer;
use latch_core::math::Vec2;
use latch_core::time::FrameLimiter;
use latch_render::window::{window_attributes, WindowConfig};
use latch_render::GameWindow;
use latch_render::winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{Key, NamedKey},
    window::WindowId,
};
use latch_settings::{Host, SceneNode, SettingKey, SettingsStore, StoreConfig};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

pub struct RuntimeApp {
    config: StoreConfig,
    limiter: Rc<RefCell<FrameLimiter>>,
    mixer: Rc<RefCell<Mixer>>,
    // The store only holds a weak reference.
    player: Rc<FirstPersonPlayer>,
    /// Accumulated yaw/pitch in degrees.
    view_angles: Vec2,
    window: Option<Rc<RefCell<GameWindow>>>,
    store: Option<SettingsStore>,
}

impl RuntimeApp {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            limiter: Rc::new(RefCell::new(FrameLimiter::new())),
            mixer: Rc::new(RefCell::new(Mixer::with_default_layout())),
            player: FirstPersonPlayer::new(),
            view_angles: Vec2::ZERO,
            window: None,
            store: None,
        }
    }

    fn start_settings(&self, window: &Rc<RefCell<GameWindow>>) -> SettingsStore {
        let host = Host::new(
            WindowDisplay(Rc::clone(window)),
            SharedLimiter(Rc::clone(&self.limiter)),
            SharedMixer(Rc::clone(&self.mixer)),
        );
        let mut store = SettingsStore::new(self.config.clone(), host);
        store.set_player(Some(&(Rc::clone(&self.player) as Rc<dyn SceneNode>)));
        store.subscribe(|change| {
            tracing::info!(setting = change.name(), value = ?change.value, "setting changed");
        });

        store.ready();

        match serde_json::to_string(store.settings()) {
            Ok(snapshot) => tracing::info!(settings = %snapshot, "settings applied"),
            Err(err) => tracing::warn!(error = %err, "could not encode settings snapshot"),
        }
        let mixer = self.mixer.borrow();
        for index in 0..mixer.bus_count() {
            if let (Some(bus), Some(gain)) = (mixer.bus(index), mixer.effective_gain(index)) {
                tracing::debug!(bus = bus.name(), gain, "bus output gain");
            }
        }
        drop(mixer);

        store
    }

    fn toggle_fullscreen(&mut self) {
        if let Some(store) = self.store.as_mut() {
            let fullscreen = !store.fullscreen();
            store.set_fullscreen(fullscreen);
            // Leaving fullscreen restores the stored window size.
            if !fullscreen {
                store.reapply(SettingKey::Resolution);
            }
        }
    }
}

impl ApplicationHandler for RuntimeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(window_attributes(&WindowConfig::default())) {
            Ok(window) => window,
            Err(err) => {
                tracing::error!(error = %err, "failed to create window");
                event_loop.exit();
                return;
            }
        };
        let window = Rc::new(RefCell::new(GameWindow::new(Arc::new(window))));

        let store = self.start_settings(&window);
        tracing::info!(
            present_mode = ?window.borrow().present_mode(),
            max_fps = self.limiter.borrow().max_fps(),
            fov = self.player.field_of_view(),
            "runtime initialized"
        );

        self.window = Some(window);
        self.store = Some(store);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && !event.repeat
                    && event.logical_key == Key::Named(NamedKey::F11) =>
            {
                self.toggle_fullscreen();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.view_angles += self.player.look_delta(Vec2::new(dx as f32, dy as f32));
            self.view_angles.y = self.view_angles.y.clamp(-89.0, 89.0);
            tracing::trace!(yaw = self.view_angles.x, pitch = self.view_angles.y, "view rotated");
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        self.limiter.borrow_mut().pace();
        if let Some(window) = &self.window {
            window.borrow().window().request_redraw();
        }
    }
}
