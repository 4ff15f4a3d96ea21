//! Window management
//!
//! Cross-platform window creation via winit, plus the display controls the
//! settings layer drives (vsync, window mode, size and position).

use glam::IVec2;
use std::sync::Arc;
use wgpu::PresentMode;
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    error::EventLoopError,
    event_loop::EventLoop,
    window::{Fullscreen, Window, WindowAttributes},
};

pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Latch Engine".to_string(),
            width: 1920,
            height: 1080,
            fullscreen: false,
        }
    }
}

/// Create window attributes from config
pub fn window_attributes(config: &WindowConfig) -> WindowAttributes {
    Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(PhysicalSize::new(config.width, config.height))
        .with_fullscreen(fullscreen_mode(config.fullscreen))
}

/// In winit 0.30+, windows must be created inside the `resumed` event, so
/// this only builds the loop.
pub fn create_event_loop() -> Result<EventLoop<()>, EventLoopError> {
    EventLoop::new()
}

fn fullscreen_mode(fullscreen: bool) -> Option<Fullscreen> {
    fullscreen.then_some(Fullscreen::Borderless(None))
}

/// Game window plus the presentation choices the renderer reads each frame.
pub struct GameWindow {
    window: Arc<Window>,
    present_mode: PresentMode,
}

impl GameWindow {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            present_mode: PresentMode::AutoVsync,
        }
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Present mode to configure the surface with.
    pub fn present_mode(&self) -> PresentMode {
        self.present_mode
    }

    pub fn set_vsync(&mut self, enabled: bool) {
        self.present_mode = if enabled {
            PresentMode::AutoVsync
        } else {
            PresentMode::AutoNoVsync
        };
        tracing::debug!(present_mode = ?self.present_mode, "present mode changed");
    }

    pub fn set_fullscreen(&self, fullscreen: bool) {
        self.window.set_fullscreen(fullscreen_mode(fullscreen));
    }

    pub fn set_inner_size(&self, size: IVec2) {
        let size = PhysicalSize::new(size.x.max(1) as u32, size.y.max(1) as u32);
        // Platforms apply the resize asynchronously; the resulting event reports the final size.
        let _ = self.window.request_inner_size(size);
    }

    pub fn set_outer_position(&self, position: IVec2) {
        self.window
            .set_outer_position(PhysicalPosition::new(position.x, position.y));
    }

    /// Size of the primary monitor, or of the monitor holding the window when
    /// the platform cannot name a primary one. Zero when neither is known.
    pub fn primary_screen_size(&self) -> IVec2 {
        self.window
            .primary_monitor()
            .or_else(|| self.window.current_monitor())
            .map(|monitor| {
                let size = monitor.size();
                IVec2::new(size.width as i32, size.height as i32)
            })
            .unwrap_or(IVec2::ZERO)
    }
}
