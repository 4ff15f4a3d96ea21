//! Math utilities
//!
//! Re-exports glam with the integer helpers the engine shares

pub use glam::*;

/// Top-left position that centers a rectangle of `size` inside `container`.
///
/// Uses integer division, so odd leftovers round toward zero.
pub fn centered_origin(container: IVec2, size: IVec2) -> IVec2 {
    (container - size) / 2
}
