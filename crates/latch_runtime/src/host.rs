//! Engine systems exposed to the settings store
//!
//! Each adapter shares its system with the main loop, which keeps using it
//! after the store has been built.

use latch_audio::Mixer;
use latch_core::math::IVec2;
use latch_core::time::FrameLimiter;
use latch_render::GameWindow;
use latch_settings::{AudioMixer, DisplayServer, FrameRateLimiter, VsyncMode, WindowMode};
use std::cell::RefCell;
use std::rc::Rc;

pub struct WindowDisplay(pub Rc<RefCell<GameWindow>>);

impl DisplayServer for WindowDisplay {
    fn set_vsync(&mut self, mode: VsyncMode) {
        self.0.borrow_mut().set_vsync(mode == VsyncMode::Enabled);
    }

    fn set_window_mode(&mut self, mode: WindowMode) {
        self.0.borrow().set_fullscreen(mode == WindowMode::Fullscreen);
    }

    fn set_window_size(&mut self, size: IVec2) {
        self.0.borrow().set_inner_size(size);
    }

    fn set_window_position(&mut self, position: IVec2) {
        self.0.borrow().set_outer_position(position);
    }

    fn primary_screen_size(&self) -> IVec2 {
        self.0.borrow().primary_screen_size()
    }
}

pub struct SharedLimiter(pub Rc<RefCell<FrameLimiter>>);

impl FrameRateLimiter for SharedLimiter {
    fn set_max_fps(&mut self, max_fps: u32) {
        self.0.borrow_mut().set_max_fps(max_fps);
    }
}

pub struct SharedMixer(pub Rc<RefCell<Mixer>>);

impl AudioMixer for SharedMixer {
    fn bus_index(&self, name: &str) -> Option<usize> {
        self.0.borrow().bus_index(name)
    }

    fn set_bus_mute(&mut self, bus: usize, muted: bool) {
        if let Err(err) = self.0.borrow_mut().set_bus_mute(bus, muted) {
            tracing::warn!(error = %err, "bus mute not applied");
        }
    }

    fn set_bus_volume_db(&mut self, bus: usize, volume_db: f32) {
        if let Err(err) = self.0.borrow_mut().set_bus_volume_db(bus, volume_db) {
            tracing::warn!(error = %err, "bus gain not applied");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use latch_settings::engine::{MASTER_BUS, MUSIC_BUS, SFX_BUS};
    use latch_settings::{Host, SettingsStore, StoreConfig};

    struct HeadlessDisplay;

    impl DisplayServer for HeadlessDisplay {
        fn set_vsync(&mut self, _mode: VsyncMode) {}
        fn set_window_mode(&mut self, _mode: WindowMode) {}
        fn set_window_size(&mut self, _size: IVec2) {}
        fn set_window_position(&mut self, _position: IVec2) {}
        fn primary_screen_size(&self) -> IVec2 {
            IVec2::new(1920, 1080)
        }
    }

    fn headless_store(
        dir: &tempfile::TempDir,
    ) -> (SettingsStore, Rc<RefCell<FrameLimiter>>, Rc<RefCell<Mixer>>) {
        let limiter = Rc::new(RefCell::new(FrameLimiter::new()));
        let mixer = Rc::new(RefCell::new(Mixer::with_default_layout()));
        let host = Host::new(
            HeadlessDisplay,
            SharedLimiter(Rc::clone(&limiter)),
            SharedMixer(Rc::clone(&mixer)),
        );
        let mut config = StoreConfig::at(dir.path().join("game_settings.cfg"));
        config.auto_save = false;
        (SettingsStore::new(config, host), limiter, mixer)
    }

    #[test]
    fn mixer_layout_has_every_settings_bus() {
        let mixer = Mixer::with_default_layout();
        for name in [MASTER_BUS, MUSIC_BUS, SFX_BUS] {
            assert!(mixer.bus_index(name).is_some(), "missing bus {name}");
        }
    }

    #[test]
    fn store_drives_mixer_and_limiter() {
        let dir = tempfile::TempDir::new().unwrap();
        let (mut store, limiter, mixer) = headless_store(&dir);

        store.set_max_fps(120);
        store.set_master_volume(1.0);
        store.set_music_volume(0.1);
        store.set_sfx_volume(0.0);

        assert_eq!(limiter.borrow().max_fps(), 120);
        let mixer = mixer.borrow();
        let music = mixer.effective_gain(mixer.bus_index(MUSIC_BUS).unwrap()).unwrap();
        assert!((music - 0.1).abs() < 1e-5);
        let sfx = mixer.bus(mixer.bus_index(SFX_BUS).unwrap()).unwrap();
        assert!(sfx.is_muted());
    }
}
