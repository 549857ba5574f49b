//! Lumen Core - scene descriptions and textures.
//!
//! This crate provides:
//!
//! - **Textures**: the `Texture` contract plus solid and checker textures
//! - **Scene descriptions**: serde types for materials and axis-aligned
//!   rectangles, with validation of physical parameters
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::SceneDesc;
//!
//! let scene = SceneDesc::from_file("cornell.json")?;
//! println!("{} materials, {} rects", scene.materials.len(), scene.rects.len());
//! ```

pub mod scene;
pub mod texture;

// Re-export commonly used types
pub use scene::{
    MaterialDesc, MaterialEntry, Plane, RectDesc, SceneDesc, SceneError, SceneResult, TextureDesc,
};
pub use texture::{CheckerTexture, Color, SolidColor, Texture};
