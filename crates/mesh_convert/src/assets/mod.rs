//! Asset parsing: OBJ meshes and MTL material libraries

pub mod materials;
pub mod obj_parser;

pub use materials::{Material, MaterialLibrary, MtlError};
pub use obj_parser::{Face, FaceVertex, Group, Mesh, ObjError};
