//! Settings store
//!
//! Every public setter runs the same sequence: store the value, push it into
//! the engine, save when auto-save is on, then notify subscribers. Bulk
//! operations (`apply_all`, `load`, `reset_to_defaults`) write the file at
//! most once.

use crate::config::StoreConfig;
use crate::engine::{Host, SceneNode, VsyncMode, WindowMode, MASTER_BUS, MUSIC_BUS, SFX_BUS};
use crate::error::SettingsError;
use crate::events::{SettingChanged, Subscribers, SubscriptionId};
use crate::model::{SettingKey, Settings};
use crate::persist;
use crate::player::PlayerLink;
use latch_core::math::{centered_origin, IVec2};
use std::path::Path;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Values came from the file; keys it lacked kept their current value.
    Loaded,
    /// No usable file. Current values were applied and written out.
    Recreated,
}

/// Bus gain in decibels for a linear volume.
pub fn volume_to_db(volume: f64) -> f64 {
    20.0 * volume.log10()
}

pub struct SettingsStore {
    config: StoreConfig,
    settings: Settings,
    host: Host,
    player: Option<PlayerLink>,
    subscribers: Subscribers,
}

impl SettingsStore {
    pub fn new(config: StoreConfig, host: Host) -> Self {
        Self::with_settings(config, host, Settings::default())
    }

    /// Start from `settings` instead of the defaults. Nothing is applied
    /// until `ready` or `apply_all`.
    pub fn with_settings(config: StoreConfig, host: Host, settings: Settings) -> Self {
        Self {
            config,
            settings,
            host,
            player: None,
            subscribers: Subscribers::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ------------------------------------------------------------------------
    // Getters
    // ------------------------------------------------------------------------

    pub fn vsync_enabled(&self) -> bool {
        self.settings.vsync_enabled()
    }

    pub fn max_fps(&self) -> u32 {
        self.settings.max_fps()
    }

    pub fn fullscreen(&self) -> bool {
        self.settings.fullscreen()
    }

    pub fn resolution(&self) -> IVec2 {
        self.settings.resolution()
    }

    pub fn master_volume(&self) -> f64 {
        self.settings.master_volume()
    }

    pub fn music_volume(&self) -> f64 {
        self.settings.music_volume()
    }

    pub fn sfx_volume(&self) -> f64 {
        self.settings.sfx_volume()
    }

    pub fn mouse_sensitivity(&self) -> f64 {
        self.settings.mouse_sensitivity()
    }

    pub fn invert_y_axis(&self) -> bool {
        self.settings.invert_y_axis()
    }

    pub fn field_of_view(&self) -> u32 {
        self.settings.field_of_view()
    }

    pub fn auto_save(&self) -> bool {
        self.config.auto_save
    }

    pub fn load_on_ready(&self) -> bool {
        self.config.load_on_ready
    }

    /// The bound player, if one is set and still alive.
    pub fn player(&self) -> Option<Rc<dyn SceneNode>> {
        self.player.as_ref().and_then(PlayerLink::player)
    }

    // ------------------------------------------------------------------------
    // Setters
    // ------------------------------------------------------------------------

    pub fn set_vsync_enabled(&mut self, enabled: bool) {
        self.settings.set_vsync_enabled(enabled);
        self.commit(SettingKey::VsyncEnabled);
    }

    /// 0 removes the cap. Clamped to 500.
    pub fn set_max_fps(&mut self, max_fps: u32) {
        self.settings.set_max_fps(i64::from(max_fps));
        self.commit(SettingKey::MaxFps);
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.settings.set_fullscreen(fullscreen);
        self.commit(SettingKey::Fullscreen);
    }

    pub fn set_resolution(&mut self, resolution: IVec2) {
        self.settings.set_resolution(resolution);
        self.commit(SettingKey::Resolution);
    }

    pub fn set_master_volume(&mut self, volume: f64) {
        self.settings.set_master_volume(volume);
        self.commit(SettingKey::MasterVolume);
    }

    pub fn set_music_volume(&mut self, volume: f64) {
        self.settings.set_music_volume(volume);
        self.commit(SettingKey::MusicVolume);
    }

    pub fn set_sfx_volume(&mut self, volume: f64) {
        self.settings.set_sfx_volume(volume);
        self.commit(SettingKey::SfxVolume);
    }

    pub fn set_mouse_sensitivity(&mut self, sensitivity: f64) {
        self.settings.set_mouse_sensitivity(sensitivity);
        self.commit(SettingKey::MouseSensitivity);
    }

    pub fn set_invert_y_axis(&mut self, inverted: bool) {
        self.settings.set_invert_y_axis(inverted);
        self.commit(SettingKey::InvertYAxis);
    }

    pub fn set_field_of_view(&mut self, degrees: u32) {
        self.settings.set_field_of_view(i64::from(degrees));
        self.commit(SettingKey::FieldOfView);
    }

    pub fn set_auto_save(&mut self, auto_save: bool) {
        self.config.auto_save = auto_save;
    }

    pub fn set_load_on_ready(&mut self, load_on_ready: bool) {
        self.config.load_on_ready = load_on_ready;
    }

    /// Bind (or clear) the player that receives control and camera settings.
    /// Capability targets are resolved here, not on every update.
    pub fn set_player(&mut self, player: Option<&Rc<dyn SceneNode>>) {
        self.player = player.map(PlayerLink::bind);
    }

    /// Push the current value of `key` into the engine again, without saving
    /// or notifying. For engine state that drifted from the stored value.
    pub fn reapply(&mut self, key: SettingKey) {
        self.apply(key);
    }

    // ------------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------------

    /// Callbacks run synchronously and must not call back into the store.
    pub fn subscribe(&mut self, callback: impl FnMut(&SettingChanged) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(Box::new(callback))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    // ------------------------------------------------------------------------
    // Bulk operations
    // ------------------------------------------------------------------------

    /// Push every setting into the engine, in `SettingKey::ALL` order.
    pub fn apply_all(&mut self) {
        for key in SettingKey::ALL {
            self.apply(key);
        }
    }

    /// Write every persisted setting. Failures are logged and returned; the
    /// in-memory values are kept either way.
    pub fn save(&self) -> Result<(), SettingsError> {
        match persist::write(&self.config.path, &self.settings) {
            Ok(()) => {
                tracing::debug!(path = %self.config.path.display(), "settings saved");
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to save settings");
                Err(err)
            }
        }
    }

    /// Load the settings file and apply the result once.
    ///
    /// A missing or unreadable file counts as "nothing saved yet": the current
    /// values are applied and written to a fresh file.
    pub fn load(&mut self) -> LoadOutcome {
        let table = match persist::read(&self.config.path) {
            Ok(table) => table,
            Err(err) => {
                if err.is_not_found() {
                    tracing::info!(
                        path = %self.config.path.display(),
                        "no saved settings, writing current values"
                    );
                } else {
                    tracing::warn!(error = %err, "settings file unusable, recreating it");
                }
                self.apply_all();
                let _ = self.save();
                return LoadOutcome::Recreated;
            }
        };

        let report = persist::merge(&table, &mut self.settings);
        if !report.fallbacks.is_empty() {
            tracing::debug!(
                missing = ?report.fallbacks,
                "settings file incomplete, kept current values"
            );
        }
        tracing::info!(
            path = %self.config.path.display(),
            loaded = report.loaded.len(),
            "settings loaded"
        );

        self.apply_all();
        for key in report.loaded {
            self.emit(key);
        }
        LoadOutcome::Loaded
    }

    pub fn reset_to_defaults(&mut self) {
        self.settings = Settings::default();
        self.apply_all();
        if self.config.auto_save {
            let _ = self.save();
        }
        for key in SettingKey::ALL {
            self.emit(key);
        }
    }

    /// Startup entry point: load when `load_on_ready` is set, otherwise apply
    /// the values the store was constructed with.
    pub fn ready(&mut self) {
        tracing::info!(
            path = %self.config.path.display(),
            load_on_ready = self.config.load_on_ready,
            "settings store starting"
        );
        if self.config.load_on_ready {
            self.load();
        } else {
            self.apply_all();
        }
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn commit(&mut self, key: SettingKey) {
        self.apply(key);
        if self.config.auto_save {
            // `save` already logged the failure.
            let _ = self.save();
        }
        self.emit(key);
    }

    fn emit(&mut self, key: SettingKey) {
        let change = SettingChanged {
            key,
            value: self.settings.get(key),
        };
        self.subscribers.emit(&change);
    }

    fn apply(&mut self, key: SettingKey) {
        match key {
            SettingKey::VsyncEnabled => {
                let mode = VsyncMode::from(self.settings.vsync_enabled());
                self.host.display.set_vsync(mode);
            }
            SettingKey::MaxFps => {
                self.host.frame_limiter.set_max_fps(self.settings.max_fps());
            }
            SettingKey::Fullscreen => {
                let mode = WindowMode::from(self.settings.fullscreen());
                self.host.display.set_window_mode(mode);
            }
            SettingKey::Resolution => self.apply_resolution(),
            SettingKey::MasterVolume => {
                self.apply_volume(MASTER_BUS, self.settings.master_volume());
            }
            SettingKey::MusicVolume => self.apply_volume(MUSIC_BUS, self.settings.music_volume()),
            SettingKey::SfxVolume => self.apply_volume(SFX_BUS, self.settings.sfx_volume()),
            SettingKey::MouseSensitivity => {
                if let Some(player) = &self.player {
                    player.set_mouse_sensitivity(self.settings.mouse_sensitivity());
                }
            }
            SettingKey::InvertYAxis => {
                if let Some(player) = &self.player {
                    player.set_invert_y(self.settings.invert_y_axis());
                }
            }
            SettingKey::FieldOfView => {
                if let Some(camera) = self.player.as_ref().and_then(PlayerLink::camera) {
                    camera.set_field_of_view(self.settings.field_of_view() as f32);
                }
            }
        }
    }

    /// Fullscreen windows keep the monitor's size, so only windowed mode
    /// resizes and recenters.
    fn apply_resolution(&mut self) {
        if self.settings.fullscreen() {
            return;
        }
        let resolution = self.settings.resolution();
        self.host.display.set_window_size(resolution);
        let screen = self.host.display.primary_screen_size();
        if screen.x <= 0 || screen.y <= 0 {
            tracing::debug!("screen size unknown, window left where the platform put it");
            return;
        }
        self.host
            .display
            .set_window_position(centered_origin(screen, resolution));
    }

    fn apply_volume(&mut self, bus_name: &str, volume: f64) {
        let Some(bus) = self.host.audio.bus_index(bus_name) else {
            tracing::warn!(bus = bus_name, "audio bus not found, volume not applied");
            return;
        };

        if volume <= 0.0 {
            self.host.audio.set_bus_mute(bus, true);
        } else {
            self.host.audio.set_bus_mute(bus, false);
            self.host
                .audio
                .set_bus_volume_db(bus, volume_to_db(volume) as f32);
        }
    }
}
