//! Mixer buses

use crate::{db_to_linear, MASTER_BUS, MUSIC_BUS, SFX_BUS};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MixerError {
    #[error("audio bus index {index} is out of range ({count} buses)")]
    UnknownBus { index: usize, count: usize },
}

/// One mixing channel with its own mute and gain state.
#[derive(Debug, Clone)]
pub struct Bus {
    name: String,
    volume_db: f32,
    muted: bool,
}

impl Bus {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            volume_db: 0.0,
            muted: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn volume_db(&self) -> f32 {
        self.volume_db
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

/// Ordered bus table. Index 0 is always `Master`.
pub struct Mixer {
    buses: Vec<Bus>,
}

impl Mixer {
    pub fn new() -> Self {
        Self {
            buses: vec![Bus::new(MASTER_BUS)],
        }
    }

    /// `Master`, `Music` and `SFX`.
    pub fn with_default_layout() -> Self {
        let mut mixer = Self::new();
        mixer.buses.push(Bus::new(MUSIC_BUS));
        mixer.buses.push(Bus::new(SFX_BUS));
        mixer
    }

    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }

    pub fn bus_index(&self, name: &str) -> Option<usize> {
        self.buses.iter().position(|bus| bus.name == name)
    }

    pub fn bus(&self, index: usize) -> Option<&Bus> {
        self.buses.get(index)
    }

    pub fn set_bus_mute(&mut self, index: usize, muted: bool) -> Result<(), MixerError> {
        let bus = self.bus_mut(index)?;
        bus.muted = muted;
        tracing::debug!(bus = %bus.name, muted, "bus mute changed");
        Ok(())
    }

    pub fn set_bus_volume_db(&mut self, index: usize, volume_db: f32) -> Result<(), MixerError> {
        let bus = self.bus_mut(index)?;
        bus.volume_db = volume_db;
        tracing::debug!(bus = %bus.name, volume_db, "bus gain changed");
        Ok(())
    }

    /// Linear gain a voice on this bus ends up with, master included.
    pub fn effective_gain(&self, index: usize) -> Option<f32> {
        let gain = |bus: &Bus| {
            if bus.muted {
                0.0
            } else {
                db_to_linear(bus.volume_db)
            }
        };

        let bus = self.buses.get(index)?;
        if index == 0 {
            Some(gain(bus))
        } else {
            Some(gain(bus) * gain(&self.buses[0]))
        }
    }

    fn bus_mut(&mut self, index: usize) -> Result<&mut Bus, MixerError> {
        let count = self.buses.len();
        self.buses
            .get_mut(index)
            .ok_or(MixerError::UnknownBus { index, count })
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Self::with_default_layout()
    }
}
