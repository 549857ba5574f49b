//! Direction sampling distributions for importance sampling.
//!
//! A distribution can both draw a direction and report the solid-angle density
//! of any direction, which is what a mixture (material + light) estimator
//! needs. Everything here is a plain value or a borrow; a scatter step never
//! allocates.

use std::f32::consts::PI;

use lumen_math::{Onb, Vec3};
use rand::RngCore;

use crate::hittable::Hittable;
use crate::sampling::{gen_f32, random_cosine_direction, random_on_unit_sphere};

/// A probability density over directions.
pub trait SamplingPdf {
    /// Solid-angle density of `direction` (need not be normalized).
    fn value(&self, direction: Vec3) -> f32;

    /// Draw a direction distributed according to `value`.
    fn generate(&self, rng: &mut dyn RngCore) -> Vec3;
}

/// Cosine-weighted hemisphere about a normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CosinePdf {
    uvw: Onb,
}

impl CosinePdf {
    pub fn new(normal: Vec3) -> Self {
        Self {
            uvw: Onb::from_w(normal),
        }
    }
}

impl SamplingPdf for CosinePdf {
    fn value(&self, direction: Vec3) -> f32 {
        let cosine = direction.normalize().dot(self.uvw.w());
        cosine.max(0.0) / PI
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        self.uvw.local(random_cosine_direction(rng))
    }
}

/// Uniform density over the whole sphere of directions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpherePdf;

impl SamplingPdf for SpherePdf {
    fn value(&self, _direction: Vec3) -> f32 {
        1.0 / (4.0 * PI)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        random_on_unit_sphere(rng)
    }
}

/// The distribution a material hands back with a non-specular scatter.
///
/// Held by value inside the scatter record and dropped with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScatterPdf {
    Cosine(CosinePdf),
    Sphere(SpherePdf),
}

impl SamplingPdf for ScatterPdf {
    fn value(&self, direction: Vec3) -> f32 {
        match self {
            ScatterPdf::Cosine(pdf) => pdf.value(direction),
            ScatterPdf::Sphere(pdf) => pdf.value(direction),
        }
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        match self {
            ScatterPdf::Cosine(pdf) => pdf.generate(rng),
            ScatterPdf::Sphere(pdf) => pdf.generate(rng),
        }
    }
}

impl From<CosinePdf> for ScatterPdf {
    fn from(pdf: CosinePdf) -> Self {
        ScatterPdf::Cosine(pdf)
    }
}

impl From<SpherePdf> for ScatterPdf {
    fn from(pdf: SpherePdf) -> Self {
        ScatterPdf::Sphere(pdf)
    }
}

/// Directions toward a light-sampleable object as seen from `origin`.
pub struct HittablePdf<'a> {
    object: &'a dyn Hittable,
    origin: Vec3,
}

impl<'a> HittablePdf<'a> {
    pub fn new(object: &'a dyn Hittable, origin: Vec3) -> Self {
        Self { object, origin }
    }
}

impl SamplingPdf for HittablePdf<'_> {
    fn value(&self, direction: Vec3) -> f32 {
        self.object.pdf_value(self.origin, direction)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        self.object.random(self.origin, rng)
    }
}

/// Weighted blend of two distributions.
///
/// `weight` is the probability of drawing from the first one.
pub struct MixturePdf<'a> {
    first: &'a dyn SamplingPdf,
    second: &'a dyn SamplingPdf,
    weight: f32,
}

impl<'a> MixturePdf<'a> {
    /// Even split between the two distributions.
    pub fn new(first: &'a dyn SamplingPdf, second: &'a dyn SamplingPdf) -> Self {
        Self::with_weight(first, second, 0.5)
    }

    pub fn with_weight(first: &'a dyn SamplingPdf, second: &'a dyn SamplingPdf, weight: f32) -> Self {
        Self {
            first,
            second,
            weight: weight.clamp(0.0, 1.0),
        }
    }
}

impl SamplingPdf for MixturePdf<'_> {
    fn value(&self, direction: Vec3) -> f32 {
        self.weight * self.first.value(direction) + (1.0 - self.weight) * self.second.value(direction)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        if gen_f32(rng) < self.weight {
            self.first.generate(rng)
        } else {
            self.second.generate(rng)
        }
    }
}
