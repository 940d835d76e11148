//! Math types for mesh geometry
//!
//! Thin aliases over nalgebra's fixed-size vectors; everything that
//! carries positions, normals, or texture coordinates uses these.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type (texture coordinates)
pub type Vec2 = Vector2<f32>;

/// 3D vector type (positions and normals)
pub type Vec3 = Vector3<f32>;
