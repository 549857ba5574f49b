//! Live materials and geometry built from a scene description.

use std::collections::HashMap;
use std::sync::Arc;

use lumen_core::{Color, MaterialDesc, SceneDesc, SceneError, SceneResult, Texture};
use lumen_math::Interval;

use crate::hittable::{FlipFace, Hittable, HittableList};
use crate::material::{Dielectric, DiffuseLight, Isotropic, Lambertian, Metal};
use crate::rect::AxisRect;
use crate::Material;

/// Named table of shared materials.
///
/// Primitives hold clones of the `Arc`s stored here, so a material outlives
/// every primitive that references it.
pub struct MaterialRegistry {
    materials: HashMap<String, Arc<dyn Material>>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self {
            materials: HashMap::new(),
        }
    }

    /// Validate a scene description and build every material in it.
    pub fn from_scene(desc: &SceneDesc) -> SceneResult<Self> {
        desc.validate()?;
        Ok(Self::build(desc))
    }

    /// Build the materials of an already validated description.
    fn build(desc: &SceneDesc) -> Self {
        let mut registry = Self::new();
        for entry in &desc.materials {
            registry.insert(&entry.name, build_material(&entry.material));
        }
        registry
    }

    /// Register a material, replacing any previous one with the same name.
    pub fn insert(&mut self, name: &str, material: Arc<dyn Material>) {
        if self.materials.insert(name.to_string(), material).is_some() {
            log::debug!("Replaced material: {}", name);
        } else {
            log::debug!("Registered material: {}", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Material>> {
        self.materials.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.materials.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Instantiate a material from its description.
pub fn build_material(desc: &MaterialDesc) -> Arc<dyn Material> {
    match *desc {
        MaterialDesc::Lambertian { albedo } => {
            Arc::new(Lambertian::with_texture(Arc::<dyn Texture>::from(albedo.build())))
        }
        MaterialDesc::Metal { albedo, fuzz } => Arc::new(Metal::new(Color::from(albedo), fuzz)),
        MaterialDesc::Dielectric { albedo, index } => {
            Arc::new(Dielectric::new(Color::from(albedo), index))
        }
        MaterialDesc::DiffuseLight { emit } => {
            Arc::new(DiffuseLight::with_texture(Arc::<dyn Texture>::from(emit.build())))
        }
        MaterialDesc::Isotropic { albedo } => {
            Arc::new(Isotropic::with_texture(Arc::<dyn Texture>::from(albedo.build())))
        }
    }
}

/// Renderable scene: every rectangle in `world`, the ones marked as lights
/// also in `lights` for explicit sampling.
pub struct Scene {
    materials: MaterialRegistry,
    world: HittableList,
    lights: HittableList,
}

impl Scene {
    pub fn from_desc(desc: &SceneDesc) -> SceneResult<Self> {
        desc.validate()?;
        let materials = MaterialRegistry::build(desc);
        let mut world = HittableList::new();
        let mut lights = HittableList::new();

        for rect in &desc.rects {
            let material = materials
                .get(&rect.material)
                .ok_or_else(|| SceneError::UnknownMaterial(rect.material.clone()))?;

            let [a0, a1] = rect.a;
            let [b0, b1] = rect.b;
            let shape = AxisRect::new(rect.plane, Interval::new(a0, a1), Interval::new(b0, b1), rect.k, material);

            let object: Arc<dyn Hittable> = if rect.flip {
                Arc::new(FlipFace::new(shape))
            } else {
                Arc::new(shape)
            };
            if rect.light {
                lights.add(object.clone());
            }
            world.add(object);
        }

        log::info!(
            "Built scene: {} materials, {} objects, {} lights",
            materials.len(),
            world.len(),
            lights.len()
        );

        Ok(Self {
            materials,
            world,
            lights,
        })
    }

    pub fn from_json(text: &str) -> SceneResult<Self> {
        Self::from_desc(&SceneDesc::from_json(text)?)
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    pub fn world(&self) -> &HittableList {
        &self.world
    }

    pub fn lights(&self) -> &HittableList {
        &self.lights
    }
}
