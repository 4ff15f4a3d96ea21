//! Settings model
//!
//! Plain values only. Every setter here stores a domain-checked value and
//! returns it; pushing values into the engine is the store's job.

use latch_core::math::IVec2;
use serde::Serialize;
use std::ops::RangeInclusive;

pub const MAX_FPS_RANGE: RangeInclusive<u32> = 0..=500;
pub const VOLUME_RANGE: RangeInclusive<f64> = 0.0..=1.0;
pub const MOUSE_SENSITIVITY_RANGE: RangeInclusive<f64> = 0.05..=2.0;
pub const FIELD_OF_VIEW_RANGE: RangeInclusive<u32> = 60..=120;

/// File section a setting is persisted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Video,
    Audio,
    Controls,
    Gameplay,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Video,
        Section::Audio,
        Section::Controls,
        Section::Gameplay,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Section::Video => "video",
            Section::Audio => "audio",
            Section::Controls => "controls",
            Section::Gameplay => "gameplay",
        }
    }
}

/// User-facing settings, in the order they are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    VsyncEnabled,
    MaxFps,
    Fullscreen,
    Resolution,
    MasterVolume,
    MusicVolume,
    SfxVolume,
    MouseSensitivity,
    InvertYAxis,
    FieldOfView,
}

impl SettingKey {
    pub const ALL: [SettingKey; 10] = [
        SettingKey::VsyncEnabled,
        SettingKey::MaxFps,
        SettingKey::Fullscreen,
        SettingKey::Resolution,
        SettingKey::MasterVolume,
        SettingKey::MusicVolume,
        SettingKey::SfxVolume,
        SettingKey::MouseSensitivity,
        SettingKey::InvertYAxis,
        SettingKey::FieldOfView,
    ];

    /// Name used in change notifications and, except for the split
    /// resolution, as the file key.
    pub fn name(self) -> &'static str {
        match self {
            SettingKey::VsyncEnabled => "vsync_enabled",
            SettingKey::MaxFps => "max_fps",
            SettingKey::Fullscreen => "fullscreen",
            SettingKey::Resolution => "resolution",
            SettingKey::MasterVolume => "master_volume",
            SettingKey::MusicVolume => "music_volume",
            SettingKey::SfxVolume => "sfx_volume",
            SettingKey::MouseSensitivity => "mouse_sensitivity",
            SettingKey::InvertYAxis => "invert_y_axis",
            SettingKey::FieldOfView => "field_of_view",
        }
    }

    pub fn section(self) -> Section {
        match self {
            SettingKey::VsyncEnabled
            | SettingKey::MaxFps
            | SettingKey::Fullscreen
            | SettingKey::Resolution => Section::Video,
            SettingKey::MasterVolume | SettingKey::MusicVolume | SettingKey::SfxVolume => {
                Section::Audio
            }
            SettingKey::MouseSensitivity | SettingKey::InvertYAxis => Section::Controls,
            SettingKey::FieldOfView => Section::Gameplay,
        }
    }
}

/// Value carried by a change notification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Resolution(IVec2),
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    // Video
    vsync_enabled: bool,
    max_fps: u32,
    fullscreen: bool,
    resolution: IVec2,
    // Audio
    master_volume: f64,
    music_volume: f64,
    sfx_volume: f64,
    // Controls
    mouse_sensitivity: f64,
    invert_y_axis: bool,
    // Gameplay
    field_of_view: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vsync_enabled: true,
            max_fps: 0,
            fullscreen: false,
            resolution: IVec2::new(1920, 1080),
            master_volume: 0.8,
            music_volume: 0.7,
            sfx_volume: 0.8,
            mouse_sensitivity: 0.3,
            invert_y_axis: false,
            field_of_view: 85,
        }
    }
}

impl Settings {
    pub fn vsync_enabled(&self) -> bool {
        self.vsync_enabled
    }

    pub fn max_fps(&self) -> u32 {
        self.max_fps
    }

    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn resolution(&self) -> IVec2 {
        self.resolution
    }

    pub fn master_volume(&self) -> f64 {
        self.master_volume
    }

    pub fn music_volume(&self) -> f64 {
        self.music_volume
    }

    pub fn sfx_volume(&self) -> f64 {
        self.sfx_volume
    }

    pub fn mouse_sensitivity(&self) -> f64 {
        self.mouse_sensitivity
    }

    pub fn invert_y_axis(&self) -> bool {
        self.invert_y_axis
    }

    pub fn field_of_view(&self) -> u32 {
        self.field_of_view
    }

    /// Current value of `key`, as reported to subscribers.
    pub fn get(&self, key: SettingKey) -> SettingValue {
        match key {
            SettingKey::VsyncEnabled => SettingValue::Bool(self.vsync_enabled),
            SettingKey::MaxFps => SettingValue::Int(i64::from(self.max_fps)),
            SettingKey::Fullscreen => SettingValue::Bool(self.fullscreen),
            SettingKey::Resolution => SettingValue::Resolution(self.resolution),
            SettingKey::MasterVolume => SettingValue::Float(self.master_volume),
            SettingKey::MusicVolume => SettingValue::Float(self.music_volume),
            SettingKey::SfxVolume => SettingValue::Float(self.sfx_volume),
            SettingKey::MouseSensitivity => SettingValue::Float(self.mouse_sensitivity),
            SettingKey::InvertYAxis => SettingValue::Bool(self.invert_y_axis),
            SettingKey::FieldOfView => SettingValue::Int(i64::from(self.field_of_view)),
        }
    }

    pub fn set_vsync_enabled(&mut self, enabled: bool) -> bool {
        self.vsync_enabled = enabled;
        enabled
    }

    /// Clamped to `0..=500`; 0 means uncapped.
    pub fn set_max_fps(&mut self, max_fps: i64) -> u32 {
        self.max_fps = clamp_int(SettingKey::MaxFps, max_fps, MAX_FPS_RANGE);
        self.max_fps
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) -> bool {
        self.fullscreen = fullscreen;
        fullscreen
    }

    pub fn set_resolution(&mut self, resolution: IVec2) -> IVec2 {
        self.resolution = resolution;
        resolution
    }

    pub fn set_master_volume(&mut self, volume: f64) -> f64 {
        self.master_volume =
            clamp_float(SettingKey::MasterVolume, volume, self.master_volume, VOLUME_RANGE);
        self.master_volume
    }

    pub fn set_music_volume(&mut self, volume: f64) -> f64 {
        self.music_volume =
            clamp_float(SettingKey::MusicVolume, volume, self.music_volume, VOLUME_RANGE);
        self.music_volume
    }

    pub fn set_sfx_volume(&mut self, volume: f64) -> f64 {
        self.sfx_volume = clamp_float(SettingKey::SfxVolume, volume, self.sfx_volume, VOLUME_RANGE);
        self.sfx_volume
    }

    pub fn set_mouse_sensitivity(&mut self, sensitivity: f64) -> f64 {
        self.mouse_sensitivity = clamp_float(
            SettingKey::MouseSensitivity,
            sensitivity,
            self.mouse_sensitivity,
            MOUSE_SENSITIVITY_RANGE,
        );
        self.mouse_sensitivity
    }

    pub fn set_invert_y_axis(&mut self, inverted: bool) -> bool {
        self.invert_y_axis = inverted;
        inverted
    }

    /// Clamped to `60..=120` degrees.
    pub fn set_field_of_view(&mut self, degrees: i64) -> u32 {
        self.field_of_view = clamp_int(SettingKey::FieldOfView, degrees, FIELD_OF_VIEW_RANGE);
        self.field_of_view
    }
}

fn clamp_int(key: SettingKey, value: i64, range: RangeInclusive<u32>) -> u32 {
    let clamped = value.clamp(i64::from(*range.start()), i64::from(*range.end()));
    if clamped != value {
        tracing::warn!(
            setting = key.name(),
            value,
            clamped,
            "value outside {}..={}, clamped",
            range.start(),
            range.end()
        );
    }
    // In range of u32 after the clamp above.
    clamped as u32
}

fn clamp_float(key: SettingKey, value: f64, previous: f64, range: RangeInclusive<f64>) -> f64 {
    if !value.is_finite() {
        tracing::warn!(setting = key.name(), value, "non-finite value ignored");
        return previous;
    }
    let clamped = value.clamp(*range.start(), *range.end());
    if clamped != value {
        tracing::warn!(
            setting = key.name(),
            value,
            clamped,
            "value outside {}..={}, clamped",
            range.start(),
            range.end()
        );
    }
    clamped
}
