//! Material library subsystem
//!
//! MTL parsing and the insertion-ordered material collection consumed by
//! the PBRT material writer.

pub mod mtl_parser;

pub use mtl_parser::{Material, MaterialLibrary, MtlError};
