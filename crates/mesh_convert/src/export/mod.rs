//! PBRT export: group compaction and scene-description serialization

pub mod pbrt_writer;
pub mod shape;

pub use pbrt_writer::{save_geometry, save_materials, write_geometry, write_materials};
pub use shape::PbrtShape;

use thiserror::Error;

/// Errors produced while compacting groups or writing PBRT output.
#[derive(Error, Debug)]
pub enum ExportError {
    /// IO error writing an output file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A face referenced an attribute index outside its array
    #[error("Group '{group}': {kind} index {index} out of range (array length {len})")]
    IndexOutOfRange {
        /// Name of the group being compacted
        group: String,
        /// Which attribute stream the index targeted
        kind: &'static str,
        /// The offending 0-based index
        index: usize,
        /// Length of the targeted array
        len: usize,
    },
    /// A group has faces but never received a `usemtl` binding
    #[error("Group '{group}' has faces but no material")]
    MissingMaterial {
        /// Name of the offending group
        group: String,
    },
    /// A material's Kd parameter has fewer than 3 components
    #[error("Material '{material}': Kd needs 3 components")]
    BadDiffuseColor {
        /// Name of the offending material
        material: String,
    },
}
