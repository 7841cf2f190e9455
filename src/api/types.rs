//! Public identifier and snapshot-view types.

use bytemuck::{Pod, Zeroable};
use glam::DVec2;

use crate::components::color::Color;
use crate::components::particle::{Particle, ParticleKind};

/// Unique identifier for a particle in the live set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleId(pub u32);

impl ParticleId {
    /// The id a particle carries before it enters a live set.
    pub const UNASSIGNED: ParticleId = ParticleId(0);
}

/// What a snapshot particle should be drawn as. Closed set, so renderers can
/// pick point-versus-line drawing without depending on internal types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderKind {
    /// A plain spark: draw as a point.
    Plain,
    /// A burning star: draw as a point (its radius shrinks over time).
    Burning,
    /// A launch streak: draw as a line from `origin` to the position.
    Streak { origin: DVec2 },
}

/// A deep-copied, render-ready view of one live particle. Owned by the
/// caller; the simulation never mutates a snapshot after returning it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleView {
    /// Position in metres.
    pub position: DVec2,
    pub color: Color,
    pub kind: RenderKind,
}

impl ParticleView {
    pub fn from_particle(particle: &Particle) -> Self {
        let kind = match particle.kind {
            ParticleKind::Plain => RenderKind::Plain,
            ParticleKind::Burning { .. } => RenderKind::Burning,
            ParticleKind::Streak { origin } => RenderKind::Streak { origin },
        };
        ParticleView {
            position: particle.pos,
            color: particle.color,
            kind,
        }
    }

    /// Flatten to the raw-buffer form.
    pub fn render_point(&self) -> RenderPoint {
        RenderPoint {
            x: self.position.x as f32,
            y: self.position.y as f32,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

/// Flat per-particle data for renderers that consume raw float buffers.
/// 6 floats = 24 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct RenderPoint {
    /// X position in metres.
    pub x: f32,
    /// Y position in metres.
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl RenderPoint {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Pack a snapshot into a contiguous point buffer, ready for
/// `bytemuck::cast_slice` into `&[f32]`.
pub fn pack_render_points(views: &[ParticleView]) -> Vec<RenderPoint> {
    views.iter().map(ParticleView::render_point).collect()
}
