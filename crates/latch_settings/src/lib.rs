//! Latch Settings
//!
//! Player-facing video, audio, control and gameplay settings. The store keeps
//! the values, pushes them into the engine (display, frame limiter, mixer,
//! player) and persists them to `game_settings.cfg`.

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod model;
pub mod persist;
pub mod player;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use config::StoreConfig;
pub use engine::{
    AudioMixer, Camera, CameraRig, DisplayServer, FrameRateLimiter, Host, InvertY, MouseLook,
    NodeKind, SceneNode, VsyncMode, WindowMode,
};
pub use error::SettingsError;
pub use events::{SettingChanged, SubscriptionId};
pub use model::{Section, SettingKey, SettingValue, Settings};
pub use player::PlayerLink;
pub use store::{volume_to_db, LoadOutcome, SettingsStore};
