//! Procedural textures sampled by materials.
//!
//! Materials only need `value(u, v, p)`; anything image-backed lives outside
//! this crate and implements [`Texture`] itself.

use std::fmt;
use std::sync::Arc;

use lumen_math::Vec3;

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// A color field over surface parameters and world position.
///
/// Implementations must be pure functions of their inputs so that materials
/// built on them stay deterministic for a fixed random stream.
pub trait Texture: Send + Sync {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color;
}

impl<T: Texture + ?Sized> Texture for Arc<T> {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color {
        (**self).value(u, v, p)
    }
}

/// A constant color everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(Color::new(r, g, b))
    }
}

impl From<Color> for SolidColor {
    fn from(color: Color) -> Self {
        Self::new(color)
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        self.color
    }
}

/// A 3D checkerboard alternating between two textures.
///
/// The parity is taken from `sin(scale*x) * sin(scale*y) * sin(scale*z)`, so
/// `scale` controls the cell frequency in world space.
#[derive(Clone)]
pub struct CheckerTexture {
    scale: f32,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(scale: f32, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self { scale, even, odd }
    }

    /// Checker between two solid colors.
    pub fn from_colors(scale: f32, even: Color, odd: Color) -> Self {
        Self::new(
            scale,
            Arc::new(SolidColor::new(even)),
            Arc::new(SolidColor::new(odd)),
        )
    }
}

impl fmt::Debug for CheckerTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckerTexture")
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color {
        let s = self.scale;
        let sines = (s * p.x).sin() * (s * p.y).sin() * (s * p.z).sin();
        if sines < 0.0 {
            self.odd.value(u, v, p)
        } else {
            self.even.value(u, v, p)
        }
    }
}
