//! Latch Audio
//!
//! Bus-based mixing: every voice routes into a named bus, every bus routes
//! into `Master`.

pub mod bus;

pub use bus::{Bus, Mixer, MixerError};

/// Name of the bus every other bus feeds into.
pub const MASTER_BUS: &str = "Master";
pub const MUSIC_BUS: &str = "Music";
pub const SFX_BUS: &str = "SFX";

/// Convert a decibel gain into a linear amplitude factor.
pub fn db_to_linear(db: f32) -> f32 {
    10f32.powf(db / 20.0)
}
