//! Latch Engine Core
//!
//! Contains the fundamental pieces shared by every engine crate:
//! - Math types (glam)
//! - Frame pacing

pub mod math;
pub mod time;

pub use glam;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
