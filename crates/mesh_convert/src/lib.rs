//! # Mesh Convert
//!
//! Converts 3D meshes in the Wavefront OBJ text format (with their MTL
//! material libraries) into PBRT scene-description files: a geometry file
//! of single-indexed triangle meshes and a material file of image
//! textures and named "uber" materials.
//!
//! The interesting part is the index model: OBJ faces carry independent
//! position/texcoord/normal indices per corner, while PBRT's triangle
//! mesh shares one index per corner across all attributes. The
//! [`export::PbrtShape`] compaction pass bridges the two.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mesh_convert::convert;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let stats = convert("zebra.obj", "zebra")?;
//!     println!("{} faces in {} shapes", stats.faces, stats.shapes);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod assets;
pub mod export;
pub mod foundation;

mod converter;

pub use converter::{convert, ConvertError, ConvertStats};

/// Common imports for library users
pub mod prelude {
    pub use crate::assets::{
        Face, FaceVertex, Group, Material, MaterialLibrary, Mesh, MtlError, ObjError,
    };
    pub use crate::export::{ExportError, PbrtShape};
    pub use crate::{convert, ConvertError, ConvertStats};
}
