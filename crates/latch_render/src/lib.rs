//! Latch Render System
//!
//! Window and presentation state shared with the renderer

pub mod window;

pub use wgpu;
pub use winit;

pub use window::{GameWindow, WindowConfig};
