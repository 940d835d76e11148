//! Group compaction into single-indexed triangle shapes
//!
//! PBRT's triangle mesh shares one index per corner across all vertex
//! attributes, while OBJ faces index positions, texcoords, and normals
//! independently. [`PbrtShape`] flattens one face group into the
//! single-index form the serializer needs.

use std::collections::HashMap;

use crate::assets::{Group, Mesh};
use crate::foundation::math::{Vec2, Vec3};

use super::ExportError;

/// A face group flattened to PBRT's single-index triangle-mesh form.
///
/// Built per group at serialization time and consumed immediately; never
/// stored in the mesh.
#[derive(Debug, Clone)]
pub struct PbrtShape {
    /// Group name, echoed into the geometry file comment
    pub name: String,
    /// Name of the bound material
    pub material: String,
    /// Flat triangle index list, three entries per face
    pub indices: Vec<u32>,
    /// Deduplicated positions in first-occurrence order
    pub positions: Vec<Vec3>,
    /// Texcoords parallel to `positions`; `(0, 0)` where the face omitted them
    pub texcoords: Vec<Vec2>,
    /// Normals parallel to `positions`; `(0, 0, 0)` where omitted
    pub normals: Vec<Vec3>,
}

impl PbrtShape {
    /// Compact `group`'s faces against `mesh`'s attribute arrays.
    ///
    /// Corners are deduplicated by position index alone: the first corner
    /// to reference a position fixes that output vertex's texcoord and
    /// normal, and later corners reusing the position map to the same
    /// output slot even when their texcoord or normal indices differ.
    /// All indices are range-checked here.
    pub fn from_group(mesh: &Mesh, group: &Group) -> Result<Self, ExportError> {
        let material = group
            .material
            .clone()
            .ok_or_else(|| ExportError::MissingMaterial {
                group: group.name.clone(),
            })?;

        let mut shape = Self {
            name: group.name.clone(),
            material,
            indices: Vec::with_capacity(group.faces.len() * 3),
            positions: Vec::new(),
            texcoords: Vec::new(),
            normals: Vec::new(),
        };
        let mut output_index: HashMap<usize, u32> = HashMap::new();

        for face in &group.faces {
            for corner in &face.vertices {
                let slot = match output_index.get(&corner.position) {
                    Some(&slot) => slot,
                    None => {
                        let slot = shape.positions.len() as u32;
                        let position =
                            resolve(&mesh.positions, corner.position, "position", &group.name)?;
                        shape.positions.push(*position);
                        shape.texcoords.push(match corner.texcoord {
                            Some(ti) => *resolve(&mesh.texcoords, ti, "texcoord", &group.name)?,
                            None => Vec2::zeros(),
                        });
                        shape.normals.push(match corner.normal {
                            Some(ni) => *resolve(&mesh.normals, ni, "normal", &group.name)?,
                            None => Vec3::zeros(),
                        });
                        output_index.insert(corner.position, slot);
                        slot
                    }
                };
                shape.indices.push(slot);
            }
        }

        Ok(shape)
    }
}

fn resolve<'a, T>(
    array: &'a [T],
    index: usize,
    kind: &'static str,
    group: &str,
) -> Result<&'a T, ExportError> {
    array.get(index).ok_or_else(|| ExportError::IndexOutOfRange {
        group: group.to_string(),
        kind,
        index,
        len: array.len(),
    })
}
