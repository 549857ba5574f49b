//! Material trait for surface scattering.

use std::sync::Arc;

use lumen_core::{Color, SolidColor, Texture};
use lumen_math::{Ray, Vec3};
use rand::RngCore;
use std::f32::consts::PI;

use crate::hittable::HitRecord;
use crate::pdf::{CosinePdf, ScatterPdf};
use crate::sampling::{gen_f32, random_in_unit_sphere};

/// Outcome of a successful scatter.
///
/// A specular material produces the outgoing ray itself. Anything else hands
/// back a distribution so the integrator can mix it with light sampling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScatterRecord {
    Specular { specular_ray: Ray, attenuation: Color },
    Sampled { pdf: ScatterPdf, attenuation: Color },
}

impl ScatterRecord {
    pub fn is_specular(&self) -> bool {
        matches!(self, ScatterRecord::Specular { .. })
    }

    pub fn attenuation(&self) -> Color {
        match *self {
            ScatterRecord::Specular { attenuation, .. } | ScatterRecord::Sampled { attenuation, .. } => {
                attenuation
            }
        }
    }

    pub fn specular_ray(&self) -> Option<&Ray> {
        match self {
            ScatterRecord::Specular { specular_ray, .. } => Some(specular_ray),
            ScatterRecord::Sampled { .. } => None,
        }
    }

    pub fn pdf(&self) -> Option<&ScatterPdf> {
        match self {
            ScatterRecord::Sampled { pdf, .. } => Some(pdf),
            ScatterRecord::Specular { .. } => None,
        }
    }
}

/// Trait for materials that describe how light interacts with surfaces.
///
/// Directions passed in must be non-degenerate. Implementations are immutable
/// and shared across threads; all randomness comes from the `rng` argument.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the material does not continue the path.
    fn scatter(&self, _ray_in: &Ray, _rec: &HitRecord<'_>, _rng: &mut dyn RngCore) -> Option<ScatterRecord> {
        None
    }

    /// Density of scattering toward `scattered`, for non-specular materials.
    fn scattering_pdf(&self, _ray_in: &Ray, _rec: &HitRecord<'_>, _scattered: &Ray) -> f32 {
        0.0
    }

    /// Get emitted light from this material.
    ///
    /// Most materials return black (no emission).
    fn emitted(&self, _ray_in: &Ray, _rec: &HitRecord<'_>, _u: f32, _v: f32, _p: Vec3) -> Color {
        Color::ZERO
    }
}

/// Lambertian (diffuse) material.
#[derive(Clone)]
pub struct Lambertian {
    albedo: Arc<dyn Texture>,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self::with_texture(Arc::new(SolidColor::new(albedo)))
    }

    pub fn with_texture(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(&self, _ray_in: &Ray, rec: &HitRecord<'_>, _rng: &mut dyn RngCore) -> Option<ScatterRecord> {
        Some(ScatterRecord::Sampled {
            pdf: CosinePdf::new(rec.normal).into(),
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
        })
    }

    fn scattering_pdf(&self, _ray_in: &Ray, rec: &HitRecord<'_>, scattered: &Ray) -> f32 {
        let cosine = rec.normal.dot(scattered.direction().normalize());
        cosine.max(0.0) / PI
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, clamped to at most 1.0
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        let clamped = fuzz.clamp(0.0, 1.0);
        if clamped != fuzz {
            log::debug!("Metal fuzz {} clamped to {}", fuzz, clamped);
        }
        Self {
            albedo,
            fuzz: clamped,
        }
    }

    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }
}

impl Material for Metal {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord<'_>, rng: &mut dyn RngCore) -> Option<ScatterRecord> {
        let mut direction = reflect(ray_in.direction().normalize(), rec.normal);
        if self.fuzz > 0.0 {
            direction += self.fuzz * random_in_unit_sphere(rng);
        }

        Some(ScatterRecord::Specular {
            specular_ray: Ray::new(rec.p, direction, ray_in.time()),
            attenuation: self.albedo,
        })
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone)]
pub struct Dielectric {
    albedo: Color,
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `albedo`: Tint applied to both reflected and refracted light
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(albedo: Color, ior: f32) -> Self {
        Self { albedo, ior }
    }

    /// Clear glass with the given index of refraction.
    pub fn clear(ior: f32) -> Self {
        Self::new(Color::ONE, ior)
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord<'_>, rng: &mut dyn RngCore) -> Option<ScatterRecord> {
        let direction = ray_in.direction();
        let d_dot_n = direction.dot(rec.normal);

        // Travelling along the normal means leaving the medium
        let (outward_normal, ni_over_nt, cosine) = if d_dot_n > 0.0 {
            (-rec.normal, self.ior, self.ior * d_dot_n / direction.length())
        } else {
            (rec.normal, 1.0 / self.ior, -d_dot_n / direction.length())
        };

        let refracted = refract(direction, outward_normal, ni_over_nt);
        let reflect_prob = match refracted {
            // Matched indices form no interface to reflect from
            Some(_) if self.ior == 1.0 => 0.0,
            Some(_) => schlick(cosine, self.ior),
            None => 1.0,
        };

        let scattered = match refracted {
            Some(refracted) if gen_f32(rng) >= reflect_prob => refracted,
            _ => reflect(direction, rec.normal),
        };

        Some(ScatterRecord::Specular {
            specular_ray: Ray::new(rec.p, scattered, ray_in.time()),
            attenuation: self.albedo,
        })
    }
}

/// Diffuse light emitter.
///
/// Emits only on the side the normal points to and never scatters.
#[derive(Clone)]
pub struct DiffuseLight {
    emit: Arc<dyn Texture>,
}

impl DiffuseLight {
    /// Create a new diffuse light with the given emission color.
    pub fn new(emit: Color) -> Self {
        Self::with_texture(Arc::new(SolidColor::new(emit)))
    }

    pub fn with_texture(emit: Arc<dyn Texture>) -> Self {
        Self { emit }
    }
}

impl Material for DiffuseLight {
    fn emitted(&self, ray_in: &Ray, rec: &HitRecord<'_>, u: f32, v: f32, p: Vec3) -> Color {
        if rec.normal.dot(ray_in.direction()) < 0.0 {
            self.emit.value(u, v, p)
        } else {
            Color::ZERO
        }
    }
}

/// Phase function for participating media: scatters uniformly in all
/// directions.
#[derive(Clone)]
pub struct Isotropic {
    albedo: Arc<dyn Texture>,
}

impl Isotropic {
    pub fn new(albedo: Color) -> Self {
        Self::with_texture(Arc::new(SolidColor::new(albedo)))
    }

    pub fn with_texture(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }
}

impl Material for Isotropic {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord<'_>, rng: &mut dyn RngCore) -> Option<ScatterRecord> {
        Some(ScatterRecord::Specular {
            specular_ray: Ray::new(rec.p, random_in_unit_sphere(rng), ray_in.time()),
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
        })
    }

    fn scattering_pdf(&self, _ray_in: &Ray, _rec: &HitRecord<'_>, _scattered: &Ray) -> f32 {
        1.0 / (4.0 * PI)
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract `v` through a surface with normal `n` facing the incoming side.
///
/// Returns `None` on total internal reflection.
pub fn refract(v: Vec3, n: Vec3, ni_over_nt: f32) -> Option<Vec3> {
    let uv = v.normalize();
    let dt = uv.dot(n);
    let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);
    if discriminant > 0.0 {
        Some(ni_over_nt * (uv - n * dt) - n * discriminant.sqrt())
    } else {
        None
    }
}

/// Schlick's approximation for reflectance.
pub fn schlick(cosine: f32, ior: f32) -> f32 {
    let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
