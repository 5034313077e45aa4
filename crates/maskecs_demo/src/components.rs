//! # Demo Components
//!
//! Sample payloads. The runtime never reads them; only the hooks do.

use bytemuck::{Pod, Zeroable};
use maskecs_core::Component;

/// Position in screen space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Component for Position {}

/// Movement in units per second.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Velocity {
    /// Horizontal speed.
    pub dx: f32,
    /// Vertical speed.
    pub dy: f32,
}

impl Component for Velocity {}

/// Handle of the image an entity is drawn with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct Sprite {
    /// Opaque sprite id.
    pub handle: u32,
}

impl Component for Sprite {}
