//! Top-level OBJ → PBRT conversion

use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::assets::{Mesh, ObjError};
use crate::export::{self, ExportError};

/// Errors from a whole-file conversion run.
///
/// A failure partway through writing leaves the output files truncated;
/// callers must treat any failed run's outputs as invalid.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The OBJ/MTL input could not be read or parsed
    #[error("Could not parse OBJ input: {0}")]
    Obj(#[from] ObjError),
    /// The PBRT output could not be produced
    #[error("Could not write PBRT output: {0}")]
    Export(#[from] ExportError),
}

/// Counts reported by a successful conversion.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConvertStats {
    /// Positions parsed from the OBJ
    pub positions: usize,
    /// Triangle faces across all groups
    pub faces: usize,
    /// Groups that produced a geometry block
    pub shapes: usize,
    /// Materials in the library
    pub materials: usize,
}

/// Convert `obj_path` into `<prefix>-geom.pbrt` and `<prefix>-mat.pbrt`.
///
/// `mtllib` records inside the OBJ are resolved relative to its parent
/// directory; `prefix` is used as-is, so it may carry a directory part.
pub fn convert(obj_path: impl AsRef<Path>, prefix: &str) -> Result<ConvertStats, ConvertError> {
    let obj_path = obj_path.as_ref();
    debug!("converting {} with output prefix '{}'", obj_path.display(), prefix);

    let mesh = Mesh::load(obj_path)?;
    export::save_geometry(&mesh, prefix)?;
    export::save_materials(&mesh.materials, prefix)?;

    Ok(ConvertStats {
        positions: mesh.positions.len(),
        faces: mesh.groups().iter().map(|g| g.faces.len()).sum(),
        shapes: mesh.groups().iter().filter(|g| !g.faces.is_empty()).count(),
        materials: mesh.materials.len(),
    })
}
