//! Scene descriptions for materials and axis-aligned rectangles.
//!
//! These types are renderer-agnostic: they are deserialized from JSON,
//! validated here, and turned into live materials and primitives by the
//! renderer crate. Validation is the only place where physically invalid
//! parameters (non-positive refractive index, negative fuzz, inverted
//! bounds) are rejected; the shading code downstream assumes they never
//! occur.

use std::collections::HashSet;
use std::path::Path;

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::texture::{CheckerTexture, Color, SolidColor, Texture};

/// Errors that can occur while loading or validating a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Material '{name}' has invalid refractive index {index}")]
    InvalidRefractiveIndex { name: String, index: f32 },

    #[error("Material '{name}' has invalid fuzz {fuzz}")]
    InvalidFuzz { name: String, fuzz: f32 },

    #[error("Material '{name}' has a non-finite or negative color")]
    InvalidColor { name: String },

    #[error("Material '{name}' has an invalid checker scale {scale}")]
    InvalidTextureScale { name: String, scale: f32 },

    #[error("Rectangle {index} has degenerate or non-finite bounds")]
    DegenerateRect { index: usize },

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    #[error("Material defined twice: {0}")]
    DuplicateMaterial(String),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Orientation of an axis-aligned rectangle, named by its two in-plane axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plane {
    Xy,
    Xz,
    Yz,
}

impl Plane {
    /// Indices of the (first in-plane, second in-plane, normal) axes.
    pub const fn axes(self) -> (usize, usize, usize) {
        match self {
            Plane::Xy => (0, 1, 2),
            Plane::Xz => (0, 2, 1),
            Plane::Yz => (1, 2, 0),
        }
    }

    /// Unit normal along the omitted axis, positive by convention.
    pub fn normal(self) -> Vec3 {
        match self {
            Plane::Xy => Vec3::Z,
            Plane::Xz => Vec3::Y,
            Plane::Yz => Vec3::X,
        }
    }
}

/// Texture parameters as written in a scene file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextureDesc {
    Solid { color: [f32; 3] },
    Checker { scale: f32, even: [f32; 3], odd: [f32; 3] },
}

impl TextureDesc {
    pub fn solid(color: [f32; 3]) -> Self {
        TextureDesc::Solid { color }
    }

    /// Instantiate the described texture.
    pub fn build(&self) -> Box<dyn Texture> {
        match *self {
            TextureDesc::Solid { color } => Box::new(SolidColor::new(Color::from(color))),
            TextureDesc::Checker { scale, even, odd } => Box::new(CheckerTexture::from_colors(
                scale,
                Color::from(even),
                Color::from(odd),
            )),
        }
    }

    fn validate(&self, name: &str) -> SceneResult<()> {
        match *self {
            TextureDesc::Solid { color } => check_color(name, color),
            TextureDesc::Checker { scale, even, odd } => {
                if !scale.is_finite() || scale == 0.0 {
                    return Err(SceneError::InvalidTextureScale {
                        name: name.to_string(),
                        scale,
                    });
                }
                check_color(name, even)?;
                check_color(name, odd)
            }
        }
    }
}

fn white() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

/// Material parameters as written in a scene file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    Lambertian {
        albedo: TextureDesc,
    },
    Metal {
        albedo: [f32; 3],
        #[serde(default)]
        fuzz: f32,
    },
    Dielectric {
        #[serde(default = "white")]
        albedo: [f32; 3],
        index: f32,
    },
    DiffuseLight {
        emit: TextureDesc,
    },
    Isotropic {
        albedo: TextureDesc,
    },
}

impl MaterialDesc {
    /// Check the physical parameters of this material.
    ///
    /// Metal fuzz above 1 is accepted; the material clamps it on construction.
    pub fn validate(&self, name: &str) -> SceneResult<()> {
        match *self {
            MaterialDesc::Lambertian { albedo }
            | MaterialDesc::DiffuseLight { emit: albedo }
            | MaterialDesc::Isotropic { albedo } => albedo.validate(name),
            MaterialDesc::Metal { albedo, fuzz } => {
                if !fuzz.is_finite() || fuzz < 0.0 {
                    return Err(SceneError::InvalidFuzz {
                        name: name.to_string(),
                        fuzz,
                    });
                }
                check_color(name, albedo)
            }
            MaterialDesc::Dielectric { albedo, index } => {
                if !index.is_finite() || index <= 0.0 {
                    return Err(SceneError::InvalidRefractiveIndex {
                        name: name.to_string(),
                        index,
                    });
                }
                check_color(name, albedo)
            }
        }
    }

    pub fn is_emissive(&self) -> bool {
        matches!(self, MaterialDesc::DiffuseLight { .. })
    }
}

fn check_color(name: &str, color: [f32; 3]) -> SceneResult<()> {
    if color.iter().all(|c| c.is_finite() && *c >= 0.0) {
        Ok(())
    } else {
        Err(SceneError::InvalidColor {
            name: name.to_string(),
        })
    }
}

/// A named entry in the scene's material table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialEntry {
    pub name: String,
    pub material: MaterialDesc,
}

/// An axis-aligned rectangle as written in a scene file.
///
/// `a` and `b` are the `[min, max]` bounds along the plane's first and second
/// in-plane axes; `k` is the fixed coordinate along the normal axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectDesc {
    pub plane: Plane,
    pub a: [f32; 2],
    pub b: [f32; 2],
    pub k: f32,
    pub material: String,
    /// Report the negated normal (e.g. a ceiling light facing down).
    #[serde(default)]
    pub flip: bool,
    /// Register the rectangle for explicit light sampling.
    #[serde(default)]
    pub light: bool,
}

impl RectDesc {
    fn validate(&self, index: usize) -> SceneResult<()> {
        let ordered = |[lo, hi]: [f32; 2]| lo.is_finite() && hi.is_finite() && lo < hi;
        if ordered(self.a) && ordered(self.b) && self.k.is_finite() {
            Ok(())
        } else {
            Err(SceneError::DegenerateRect { index })
        }
    }
}

/// A complete scene: a material table plus the rectangles that use it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDesc {
    #[serde(default)]
    pub materials: Vec<MaterialEntry>,
    #[serde(default)]
    pub rects: Vec<RectDesc>,
}

impl SceneDesc {
    /// Parse and validate a scene from JSON text.
    pub fn from_json(text: &str) -> SceneResult<Self> {
        let scene: SceneDesc = serde_json::from_str(text)?;
        scene.validate()?;
        log::info!(
            "Loaded scene description: {} materials, {} rects",
            scene.materials.len(),
            scene.rects.len()
        );
        Ok(scene)
    }

    /// Read, parse and validate a scene file.
    pub fn from_file(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        log::debug!("Reading scene description from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Look up a material description by name.
    pub fn material(&self, name: &str) -> Option<&MaterialDesc> {
        self.materials
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.material)
    }

    /// Validate every material and rectangle, and all name references.
    pub fn validate(&self) -> SceneResult<()> {
        let mut names = HashSet::new();
        for entry in &self.materials {
            if !names.insert(entry.name.as_str()) {
                return Err(SceneError::DuplicateMaterial(entry.name.clone()));
            }
            entry.material.validate(&entry.name)?;
        }

        for (index, rect) in self.rects.iter().enumerate() {
            rect.validate(index)?;
            if !names.contains(rect.material.as_str()) {
                return Err(SceneError::UnknownMaterial(rect.material.clone()));
            }
            if rect.light && !self.material(&rect.material).is_some_and(MaterialDesc::is_emissive) {
                log::warn!(
                    "Rectangle {} is marked as a light but '{}' does not emit",
                    index,
                    rect.material
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORNELL_LIGHT: &str = r#"{
        "materials": [
            { "name": "white", "material": { "type": "lambertian", "albedo": { "type": "solid", "color": [0.73, 0.73, 0.73] } } },
            { "name": "light", "material": { "type": "diffuse_light", "emit": { "type": "solid", "color": [15.0, 15.0, 15.0] } } },
            { "name": "glass", "material": { "type": "dielectric", "index": 1.5 } },
            { "name": "steel", "material": { "type": "metal", "albedo": [0.8, 0.85, 0.88] } }
        ],
        "rects": [
            { "plane": "xz", "a": [213.0, 343.0], "b": [227.0, 332.0], "k": 554.0, "material": "light", "flip": true, "light": true },
            { "plane": "yz", "a": [0.0, 555.0], "b": [0.0, 555.0], "k": 0.0, "material": "white" }
        ]
    }"#;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn scene_with(material: MaterialDesc) -> SceneDesc {
        SceneDesc {
            materials: vec![MaterialEntry {
                name: "m".to_string(),
                material,
            }],
            rects: Vec::new(),
        }
    }

    #[test]
    fn test_parse_scene() {
        init_logger();
        let scene = SceneDesc::from_json(CORNELL_LIGHT).unwrap();

        assert_eq!(scene.materials.len(), 4);
        assert_eq!(scene.rects.len(), 2);
        assert_eq!(scene.rects[0].plane, Plane::Xz);
        assert!(scene.rects[0].flip);
        assert!(!scene.rects[1].flip);
        assert!(!scene.rects[1].light);

        // Defaults
        assert_eq!(
            scene.material("glass"),
            Some(&MaterialDesc::Dielectric {
                albedo: [1.0, 1.0, 1.0],
                index: 1.5
            })
        );
        assert_eq!(
            scene.material("steel"),
            Some(&MaterialDesc::Metal {
                albedo: [0.8, 0.85, 0.88],
                fuzz: 0.0
            })
        );
        assert!(scene.material("light").unwrap().is_emissive());
    }

    #[test]
    fn test_reject_invalid_refractive_index() {
        for index in [0.0, -1.5, f32::NAN] {
            let scene = scene_with(MaterialDesc::Dielectric {
                albedo: [1.0; 3],
                index,
            });
            assert!(matches!(
                scene.validate(),
                Err(SceneError::InvalidRefractiveIndex { .. })
            ));
        }
    }

    #[test]
    fn test_fuzz_above_one_is_accepted() {
        let scene = scene_with(MaterialDesc::Metal {
            albedo: [0.5; 3],
            fuzz: 3.0,
        });
        assert!(scene.validate().is_ok());

        let scene = scene_with(MaterialDesc::Metal {
            albedo: [0.5; 3],
            fuzz: -0.1,
        });
        assert!(matches!(scene.validate(), Err(SceneError::InvalidFuzz { .. })));
    }

    #[test]
    fn test_reject_negative_color() {
        let scene = scene_with(MaterialDesc::Lambertian {
            albedo: TextureDesc::solid([0.5, -0.1, 0.5]),
        });
        assert!(matches!(scene.validate(), Err(SceneError::InvalidColor { .. })));
    }

    #[test]
    fn test_reject_zero_checker_scale() {
        let scene = scene_with(MaterialDesc::Isotropic {
            albedo: TextureDesc::Checker {
                scale: 0.0,
                even: [1.0; 3],
                odd: [0.0; 3],
            },
        });
        assert!(matches!(
            scene.validate(),
            Err(SceneError::InvalidTextureScale { .. })
        ));
    }

    #[test]
    fn test_reject_degenerate_rect() {
        let mut scene = SceneDesc::from_json(CORNELL_LIGHT).unwrap();
        scene.rects[1].a = [1.0, 1.0];

        assert!(matches!(
            scene.validate(),
            Err(SceneError::DegenerateRect { index: 1 })
        ));
    }

    #[test]
    fn test_reject_unknown_and_duplicate_materials() {
        let mut scene = SceneDesc::from_json(CORNELL_LIGHT).unwrap();
        scene.rects[1].material = "missing".to_string();
        assert!(matches!(
            scene.validate(),
            Err(SceneError::UnknownMaterial(name)) if name == "missing"
        ));

        let mut scene = SceneDesc::from_json(CORNELL_LIGHT).unwrap();
        let dup = scene.materials[0].clone();
        scene.materials.push(dup);
        assert!(matches!(
            scene.validate(),
            Err(SceneError::DuplicateMaterial(name)) if name == "white"
        ));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = SceneDesc::from_json("{ \"rects\": [ { \"plane\": \"xw\" } ] }").unwrap_err();
        assert!(matches!(err, SceneError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SceneDesc::from_file("/nonexistent/lumen/scene.json").unwrap_err();
        assert!(matches!(err, SceneError::Io(_)));
    }

    #[test]
    fn test_plane_axes() {
        assert_eq!(Plane::Xy.axes(), (0, 1, 2));
        assert_eq!(Plane::Xz.axes(), (0, 2, 1));
        assert_eq!(Plane::Yz.axes(), (1, 2, 0));

        for plane in [Plane::Xy, Plane::Xz, Plane::Yz] {
            let (_, _, n) = plane.axes();
            assert_eq!(plane.normal()[n], 1.0);
        }
    }

    #[test]
    fn test_texture_desc_build() {
        let tex = TextureDesc::solid([0.1, 0.2, 0.3]).build();
        assert_eq!(tex.value(0.0, 0.0, Vec3::ZERO), Color::new(0.1, 0.2, 0.3));
    }
}
