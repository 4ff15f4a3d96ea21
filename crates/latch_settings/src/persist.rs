//! Settings file
//!
//! Four sections (`video`, `audio`, `controls`, `gameplay`) of flat
//! `key = value` pairs. Reading is per key: anything missing or of the wrong
//! type leaves the in-memory value untouched.
//!
//! Files are written as TOML but read as INI: `;` and `#` comment lines are
//! skipped, repeated sections are merged and the last value of a key wins.

use crate::error::SettingsError;
use crate::model::{Section, SettingKey, Settings};
use latch_core::math::IVec2;
use serde::Serialize;
use std::fs;
use std::path::Path;
use toml::{Table, Value};

pub const RESOLUTION_X: &str = "resolution_x";
pub const RESOLUTION_Y: &str = "resolution_y";

#[derive(Serialize)]
struct SettingsFile {
    video: VideoSection,
    audio: AudioSection,
    controls: ControlsSection,
    gameplay: GameplaySection,
}

#[derive(Serialize)]
struct VideoSection {
    vsync_enabled: bool,
    max_fps: u32,
    fullscreen: bool,
    resolution_x: i32,
    resolution_y: i32,
}

#[derive(Serialize)]
struct AudioSection {
    master_volume: f64,
    music_volume: f64,
    sfx_volume: f64,
}

#[derive(Serialize)]
struct ControlsSection {
    mouse_sensitivity: f64,
    invert_y_axis: bool,
}

#[derive(Serialize)]
struct GameplaySection {
    field_of_view: u32,
}

impl From<&Settings> for SettingsFile {
    fn from(settings: &Settings) -> Self {
        Self {
            video: VideoSection {
                vsync_enabled: settings.vsync_enabled(),
                max_fps: settings.max_fps(),
                fullscreen: settings.fullscreen(),
                resolution_x: settings.resolution().x,
                resolution_y: settings.resolution().y,
            },
            audio: AudioSection {
                master_volume: settings.master_volume(),
                music_volume: settings.music_volume(),
                sfx_volume: settings.sfx_volume(),
            },
            controls: ControlsSection {
                mouse_sensitivity: settings.mouse_sensitivity(),
                invert_y_axis: settings.invert_y_axis(),
            },
            gameplay: GameplaySection {
                field_of_view: settings.field_of_view(),
            },
        }
    }
}

/// Render the file contents for `settings`.
pub fn encode(settings: &Settings) -> Result<String, SettingsError> {
    Ok(toml::to_string(&SettingsFile::from(settings))?)
}

pub fn write(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    let contents = encode(settings)?;

    let write_err = |source| SettingsError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, contents).map_err(write_err)
}

/// Read and parse the file without interpreting any keys.
pub fn read(path: &Path) -> Result<Table, SettingsError> {
    let contents = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let contents = normalize_ini(&contents);
    toml::from_str::<Table>(&contents).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Fold INI text into TOML that `toml` accepts. Values are left to `toml`;
/// lines that are neither a section, a pair nor a comment are kept so the
/// parser still rejects them.
fn normalize_ini(contents: &str) -> String {
    // Entries before the first header live under "".
    let mut sections: Vec<(String, Vec<(String, String)>)> = vec![(String::new(), Vec::new())];
    let mut current = 0;

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
            let name = name.trim();
            current = match sections.iter().position(|(existing, _)| existing == name) {
                Some(index) => index,
                None => {
                    sections.push((name.to_string(), Vec::new()));
                    sections.len() - 1
                }
            };
            continue;
        }

        let (key, value) = match line.split_once('=') {
            Some((key, value)) => (key.trim().to_string(), value.trim().to_string()),
            None => (line.to_string(), String::new()),
        };
        let entries = &mut sections[current].1;
        match entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => entries.push((key, value)),
        }
    }

    let mut normalized = String::with_capacity(contents.len());
    for (name, entries) in &sections {
        if !name.is_empty() {
            normalized.push_str(&format!("[{name}]\n"));
        }
        for (key, value) in entries {
            if value.is_empty() {
                normalized.push_str(&format!("{key}\n"));
            } else {
                normalized.push_str(&format!("{key} = {value}\n"));
            }
        }
    }
    normalized
}

/// Which settings a merge took from the file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MergeReport {
    pub loaded: Vec<SettingKey>,
    /// `section.key` entries that kept their in-memory value.
    pub fallbacks: Vec<String>,
}

/// Copy every usable value from `table` into `settings`.
pub fn merge(table: &Table, settings: &mut Settings) -> MergeReport {
    let mut reader = Reader {
        table,
        report: MergeReport::default(),
    };

    if let Some(enabled) = reader.field(SettingKey::VsyncEnabled, Value::as_bool) {
        settings.set_vsync_enabled(enabled);
    }
    if let Some(fps) = reader.field(SettingKey::MaxFps, Value::as_integer) {
        settings.set_max_fps(fps);
    }
    if let Some(fullscreen) = reader.field(SettingKey::Fullscreen, Value::as_bool) {
        settings.set_fullscreen(fullscreen);
    }

    let current = settings.resolution();
    let x = reader.value(Section::Video, RESOLUTION_X, as_i32);
    let y = reader.value(Section::Video, RESOLUTION_Y, as_i32);
    if x.is_some() || y.is_some() {
        settings.set_resolution(IVec2::new(x.unwrap_or(current.x), y.unwrap_or(current.y)));
        reader.report.loaded.push(SettingKey::Resolution);
    }

    if let Some(volume) = reader.field(SettingKey::MasterVolume, as_float) {
        settings.set_master_volume(volume);
    }
    if let Some(volume) = reader.field(SettingKey::MusicVolume, as_float) {
        settings.set_music_volume(volume);
    }
    if let Some(volume) = reader.field(SettingKey::SfxVolume, as_float) {
        settings.set_sfx_volume(volume);
    }
    if let Some(sensitivity) = reader.field(SettingKey::MouseSensitivity, as_float) {
        settings.set_mouse_sensitivity(sensitivity);
    }
    if let Some(inverted) = reader.field(SettingKey::InvertYAxis, Value::as_bool) {
        settings.set_invert_y_axis(inverted);
    }
    if let Some(degrees) = reader.field(SettingKey::FieldOfView, Value::as_integer) {
        settings.set_field_of_view(degrees);
    }

    reader.report
}

struct Reader<'a> {
    table: &'a Table,
    report: MergeReport,
}

impl Reader<'_> {
    fn field<T>(&mut self, key: SettingKey, convert: fn(&Value) -> Option<T>) -> Option<T> {
        let value = self.value(key.section(), key.name(), convert)?;
        self.report.loaded.push(key);
        Some(value)
    }

    fn value<T>(
        &mut self,
        section: Section,
        name: &str,
        convert: fn(&Value) -> Option<T>,
    ) -> Option<T> {
        let raw = self
            .table
            .get(section.name())
            .and_then(Value::as_table)
            .and_then(|entries| entries.get(name));

        let converted = raw.and_then(convert);
        if converted.is_none() {
            if let Some(raw) = raw {
                tracing::warn!(
                    section = section.name(),
                    key = name,
                    value = %raw,
                    "unexpected value type in settings file, keeping current value"
                );
            }
            self.report
                .fallbacks
                .push(format!("{}.{}", section.name(), name));
        }
        converted
    }
}

/// Floats may be written without a fractional part.
fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Float(float) => Some(*float),
        Value::Integer(int) => Some(*int as f64),
        _ => None,
    }
}

fn as_i32(value: &Value) -> Option<i32> {
    value.as_integer().and_then(|int| i32::try_from(int).ok())
}
