//! Hittable trait and HitRecord for ray-object intersection.

use std::sync::Arc;

use lumen_math::{Aabb, Interval, Ray, Vec3};
use rand::{Rng, RngCore};

use crate::Material;

/// Record of a ray-object intersection.
///
/// Produced fresh by every successful `hit`; it borrows the material from the
/// primitive that was hit.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal in the primitive's fixed orientation.
    /// It is not flipped toward the incoming ray.
    pub normal: Vec3,
    /// UV texture coordinates
    pub u: f32,
    pub v: f32,
    /// Material at the intersection point
    pub material: &'a dyn Material,
}

impl std::fmt::Debug for HitRecord<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitRecord")
            .field("t", &self.t)
            .field("p", &self.p)
            .field("normal", &self.normal)
            .field("u", &self.u)
            .field("v", &self.v)
            .finish_non_exhaustive()
    }
}

impl HitRecord<'_> {
    /// True when the ray arrives against the stored normal.
    pub fn is_front_face(&self, ray: &Ray) -> bool {
        ray.direction().dot(self.normal) < 0.0
    }
}

/// Trait for objects that can be hit by rays.
///
/// The sampling methods let an object double as an explicit light source; the
/// defaults describe an object that cannot be sampled.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object within the given interval.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>>;

    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;

    /// Solid-angle density of reaching this object from `origin` along
    /// `direction`.
    fn pdf_value(&self, _origin: Vec3, _direction: Vec3) -> f32 {
        0.0
    }

    /// Unnormalized direction from `origin` toward a random point on the
    /// object.
    fn random(&self, _origin: Vec3, _rng: &mut dyn RngCore) -> Vec3 {
        Vec3::X
    }
}

/// Reports the opposite normal of the wrapped object.
///
/// Emission is one-sided, so a light placed on a ceiling is wrapped in
/// `FlipFace` to shine downward.
pub struct FlipFace<H> {
    inner: H,
}

impl<H: Hittable> FlipFace<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }
}

impl<H: Hittable> Hittable for FlipFace<H> {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        self.inner.hit(ray, ray_t).map(|rec| HitRecord {
            normal: -rec.normal,
            ..rec
        })
    }

    fn bounding_box(&self) -> Aabb {
        self.inner.bounding_box()
    }

    fn pdf_value(&self, origin: Vec3, direction: Vec3) -> f32 {
        self.inner.pdf_value(origin, direction)
    }

    fn random(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        self.inner.random(origin, rng)
    }
}

/// A list of hittable objects.
///
/// As a light set, sampling picks one member uniformly and the density is the
/// average of the members' densities.
pub struct HittableList {
    objects: Vec<Arc<dyn Hittable>>,
    bbox: Aabb,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    pub fn objects(&self) -> &[Arc<dyn Hittable>] {
        &self.objects
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for HittableList {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let mut closest: Option<HitRecord<'a>> = None;

        for object in &self.objects {
            let max = closest.as_ref().map_or(ray_t.max, |rec| rec.t);
            if let Some(rec) = object.hit(ray, Interval::new(ray_t.min, max)) {
                closest = Some(rec);
            }
        }

        closest
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    fn pdf_value(&self, origin: Vec3, direction: Vec3) -> f32 {
        if self.objects.is_empty() {
            return 0.0;
        }
        let sum: f32 = self
            .objects
            .iter()
            .map(|object| object.pdf_value(origin, direction))
            .sum();
        sum / self.objects.len() as f32
    }

    fn random(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        if self.objects.is_empty() {
            return Vec3::X;
        }
        let index = rng.gen_range(0..self.objects.len());
        self.objects[index].random(origin, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{DiffuseLight, Lambertian};
    use crate::rect::AxisRect;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn white() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Vec3::splat(0.73)))
    }

    #[test]
    fn test_list_returns_closest_hit() {
        let mut list = HittableList::new();
        list.add(Arc::new(AxisRect::xy(-1.0, 1.0, -1.0, 1.0, 10.0, white())));
        list.add(Arc::new(AxisRect::xy(-1.0, 1.0, -1.0, 1.0, 3.0, white())));
        list.add(Arc::new(AxisRect::xy(-1.0, 1.0, -1.0, 1.0, 7.0, white())));

        let ray = Ray::new_simple(Vec3::ZERO, Vec3::Z);
        let rec = list.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert!((rec.t - 3.0).abs() < 1e-6);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_list_bounding_box_grows() {
        let mut list = HittableList::new();
        assert!(list.is_empty());

        list.add(Arc::new(AxisRect::xy(0.0, 1.0, 0.0, 1.0, 0.0, white())));
        list.add(Arc::new(AxisRect::yz(0.0, 2.0, 0.0, 3.0, 4.0, white())));

        let bbox = list.bounding_box();
        assert_eq!(bbox.x.max, 4.0 + 1e-4);
        assert_eq!(bbox.y.max, 2.0);
        assert_eq!(bbox.z.max, 3.0);
    }

    #[test]
    fn test_list_pdf_is_average() {
        let a = Arc::new(AxisRect::xz(-1.0, 1.0, -1.0, 1.0, 2.0, white()));
        let b = Arc::new(AxisRect::xz(10.0, 11.0, 10.0, 11.0, 2.0, white()));
        let mut lights = HittableList::new();
        lights.add(a.clone());
        lights.add(b);

        let dir = Vec3::Y;
        assert!((lights.pdf_value(Vec3::ZERO, dir) - 0.5 * a.pdf_value(Vec3::ZERO, dir)).abs() < 1e-6);
    }

    #[test]
    fn test_list_random_hits_some_member() {
        let mut lights = HittableList::new();
        lights.add(Arc::new(AxisRect::xz(-1.0, 1.0, -1.0, 1.0, 2.0, white())));
        lights.add(Arc::new(AxisRect::yz(-1.0, 1.0, -1.0, 1.0, 3.0, white())));
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..200 {
            let d = lights.random(Vec3::ZERO, &mut rng);
            assert!(lights.pdf_value(Vec3::ZERO, d) > 0.0);
        }
    }

    #[test]
    fn test_empty_list_is_not_sampleable() {
        let lights = HittableList::default();
        let mut rng = StdRng::seed_from_u64(12);

        assert_eq!(lights.pdf_value(Vec3::ZERO, Vec3::Y), 0.0);
        assert_eq!(lights.random(Vec3::ZERO, &mut rng), Vec3::X);
        assert!(lights.hit(&Ray::default(), Interval::UNIVERSE).is_none());
    }

    #[test]
    fn test_flip_face_negates_normal() {
        let light = AxisRect::xz(-1.0, 1.0, -1.0, 1.0, 5.0, Arc::new(DiffuseLight::new(Vec3::splat(4.0))));
        let flipped = FlipFace::new(light);
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::Y);

        let rec = flipped.hit(&ray, Interval::new(0.0, 100.0)).unwrap();
        assert_eq!(rec.normal, -Vec3::Y);
        assert!(rec.is_front_face(&ray));

        // Ray from below now sees the emitting side
        let emitted = rec.material.emitted(&ray, &rec, rec.u, rec.v, rec.p);
        assert_eq!(emitted, Vec3::splat(4.0));

        assert_eq!(flipped.bounding_box(), flipped.inner().bounding_box());
        assert_eq!(
            flipped.pdf_value(Vec3::ZERO, Vec3::Y),
            flipped.inner().pdf_value(Vec3::ZERO, Vec3::Y)
        );
    }
}
