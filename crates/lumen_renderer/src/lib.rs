//! Lumen Renderer - materials and light sampling for Monte Carlo path tracing.
//!
//! Surfaces decide how an incoming ray continues through a `Material`:
//! lambertian, metal and dielectric surfaces, diffuse emitters, and an
//! isotropic phase function for media. Axis-aligned rectangles can both be
//! intersected and sampled, so they serve as area lights for mixture
//! (light + material) importance sampling.
//!
//! All randomness flows through an explicit `&mut dyn RngCore`; materials are
//! immutable and can be shared across rendering threads.

mod hittable;
mod material;
mod pdf;
mod rect;
mod registry;
mod sampling;

pub use hittable::{FlipFace, HitRecord, Hittable, HittableList};
pub use material::{
    reflect, refract, schlick, Dielectric, DiffuseLight, Isotropic, Lambertian, Material, Metal,
    ScatterRecord,
};
pub use pdf::{CosinePdf, HittablePdf, MixturePdf, SamplingPdf, ScatterPdf, SpherePdf};
pub use rect::{AxisRect, RECT_THICKNESS};
pub use registry::{build_material, MaterialRegistry, Scene};
pub use sampling::{gen_f32, random_cosine_direction, random_in_unit_sphere, random_on_unit_sphere};

/// Re-export common math and scene types
pub use lumen_core::{Color, Plane, SceneDesc, SceneError, Texture};
pub use lumen_math::{Aabb, Interval, Onb, Ray, Vec3};
