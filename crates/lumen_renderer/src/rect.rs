//! Axis-aligned rectangle primitives.
//!
//! One struct covers all three orientations; the `Plane` picks which world
//! axes play the roles of the two in-plane axes and the normal axis. Besides
//! intersection, rectangles can be sampled, so they work as explicit lights.

use std::sync::Arc;

use lumen_core::Plane;
use lumen_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;

use crate::hittable::{HitRecord, Hittable};
use crate::sampling::gen_f32;
use crate::Material;

/// Half-thickness of the bounding box along the normal axis.
pub const RECT_THICKNESS: f32 = 0.0001;

/// Nearest distance considered when measuring light densities.
const PDF_T_MIN: f32 = 0.001;

/// A rectangle perpendicular to one world axis.
///
/// `a` and `b` bound the first and second in-plane axes of the plane
/// (x/y for `Xy`, x/z for `Xz`, y/z for `Yz`); `k` is the coordinate along
/// the remaining axis.
pub struct AxisRect {
    plane: Plane,
    a: Interval,
    b: Interval,
    k: f32,
    material: Arc<dyn Material>,
}

impl AxisRect {
    /// Both in-plane intervals must be finite with `min < max`, and `k` finite.
    /// Scene descriptions are validated against this before rectangles are
    /// built.
    ///
    /// # Panics
    ///
    /// In debug builds, if the bounds are degenerate, inverted or non-finite.
    pub fn new(plane: Plane, a: Interval, b: Interval, k: f32, material: Arc<dyn Material>) -> Self {
        debug_assert!(
            is_proper(a) && is_proper(b) && k.is_finite(),
            "degenerate {:?} rectangle: [{}, {}] x [{}, {}] at k={}",
            plane,
            a.min,
            a.max,
            b.min,
            b.max,
            k
        );
        Self {
            plane,
            a,
            b,
            k,
            material,
        }
    }

    /// Rectangle in the z = k plane.
    pub fn xy(x0: f32, x1: f32, y0: f32, y1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        Self::new(Plane::Xy, Interval::new(x0, x1), Interval::new(y0, y1), k, material)
    }

    /// Rectangle in the y = k plane.
    pub fn xz(x0: f32, x1: f32, z0: f32, z1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        Self::new(Plane::Xz, Interval::new(x0, x1), Interval::new(z0, z1), k, material)
    }

    /// Rectangle in the x = k plane.
    pub fn yz(y0: f32, y1: f32, z0: f32, z1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        Self::new(Plane::Yz, Interval::new(y0, y1), Interval::new(z0, z1), k, material)
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    pub fn material(&self) -> &Arc<dyn Material> {
        &self.material
    }

    pub fn area(&self) -> f32 {
        self.a.size() * self.b.size()
    }

    /// Surface coordinates of a point on the rectangle.
    pub fn uv_at(&self, p: Vec3) -> (f32, f32) {
        let (ia, ib, _) = self.plane.axes();
        (self.a.fraction(p[ia]), self.b.fraction(p[ib]))
    }

    /// World point from in-plane coordinates and `k`.
    fn point(&self, along_a: f32, along_b: f32) -> Vec3 {
        let (ia, ib, ik) = self.plane.axes();
        let mut p = [0.0; 3];
        p[ia] = along_a;
        p[ib] = along_b;
        p[ik] = self.k;
        Vec3::from(p)
    }
}

fn is_proper(interval: Interval) -> bool {
    interval.min.is_finite() && interval.max.is_finite() && interval.min < interval.max
}

impl Hittable for AxisRect {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let (ia, ib, ik) = self.plane.axes();
        let origin = ray.origin();
        let direction = ray.direction();

        // Parallel rays never cross the plane
        if direction[ik] == 0.0 {
            return None;
        }
        let t = (self.k - origin[ik]) / direction[ik];
        if !t.is_finite() || !ray_t.contains(t) {
            return None;
        }

        let along_a = origin[ia] + t * direction[ia];
        let along_b = origin[ib] + t * direction[ib];
        if !self.a.contains(along_a) || !self.b.contains(along_b) {
            return None;
        }

        Some(HitRecord {
            t,
            p: ray.at(t),
            normal: self.plane.normal(),
            u: self.a.fraction(along_a),
            v: self.b.fraction(along_b),
            material: self.material.as_ref(),
        })
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::from_points(
            self.point(self.a.min, self.b.min) - RECT_THICKNESS * self.plane.normal(),
            self.point(self.a.max, self.b.max) + RECT_THICKNESS * self.plane.normal(),
        )
    }

    fn pdf_value(&self, origin: Vec3, direction: Vec3) -> f32 {
        let ray = Ray::new_simple(origin, direction);
        match self.hit(&ray, Interval::new(PDF_T_MIN, f32::INFINITY)) {
            Some(rec) => {
                let distance_squared = rec.t * rec.t * direction.length_squared();
                let cosine = (direction.dot(rec.normal) / direction.length()).abs();
                distance_squared / (cosine * self.area())
            }
            None => 0.0,
        }
    }

    fn random(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        let along_a = self.a.lerp(gen_f32(rng));
        let along_b = self.b.lerp(gen_f32(rng));
        self.point(along_a, along_b) - origin
    }
}
