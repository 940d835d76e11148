//! PBRT scene-description text output
//!
//! Writes the two-file split the renderer consumes: a geometry file of
//! triangle-mesh attribute blocks (one per non-empty group) and a
//! material file declaring image textures followed by named "uber"
//! materials. Output order follows source insertion order throughout, so
//! a given mesh always serializes identically.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::assets::materials::MaterialLibrary;
use crate::assets::Mesh;

use super::shape::PbrtShape;
use super::ExportError;

/// Write one triangle-mesh attribute block per non-empty group.
///
/// Groups with no faces, including an unused default group, emit nothing.
pub fn write_geometry(mesh: &Mesh, out: &mut impl Write) -> Result<(), ExportError> {
    for group in mesh.groups() {
        if group.faces.is_empty() {
            continue;
        }
        let shape = PbrtShape::from_group(mesh, group)?;
        write_shape(&shape, out)?;
    }
    Ok(())
}

fn write_shape(shape: &PbrtShape, out: &mut impl Write) -> Result<(), ExportError> {
    writeln!(out, "#**** Object: {} ****", shape.name)?;
    writeln!(out, "AttributeBegin")?;
    writeln!(out, "\tNamedMaterial \"{}\"", shape.material)?;

    writeln!(out, "Shape \"trianglemesh\"")?;
    writeln!(out, "\"integer indices\"")?;
    writeln!(out, "[")?;
    for triangle in shape.indices.chunks(3) {
        writeln!(out, "\t {} {} {}", triangle[0], triangle[1], triangle[2])?;
    }
    writeln!(out, "]")?;

    writeln!(out, "\"point P\"")?;
    writeln!(out, "[")?;
    for p in &shape.positions {
        writeln!(out, "\t {:.6} {:.6} {:.6}", p.x, p.y, p.z)?;
    }
    writeln!(out, "]")?;

    writeln!(out, "\"float uv\"")?;
    writeln!(out, "[")?;
    for uv in &shape.texcoords {
        writeln!(out, "\t {:.6} {:.6}", uv.x, uv.y)?;
    }
    writeln!(out, "]")?;

    writeln!(out, "\"normal N\"")?;
    writeln!(out, "[")?;
    for n in &shape.normals {
        writeln!(out, "\t {:.6} {:.6} {:.6}", n.x, n.y, n.z)?;
    }
    writeln!(out, "]")?;

    writeln!(out, "AttributeEnd")?;
    writeln!(out)?;
    writeln!(out)?;
    Ok(())
}

/// Write image-texture declarations followed by named materials.
///
/// Every (material, map kind) pair gets its own texture named
/// `<material>_<kind>`, even when two materials share a filename. The
/// diffuse term resolves by priority: Kd texture map, then Kd parameter,
/// then opaque white.
pub fn write_materials(library: &MaterialLibrary, out: &mut impl Write) -> Result<(), ExportError> {
    for material in library.iter() {
        for (kind, filename) in material.maps() {
            writeln!(out, "Texture \"{}_{}\" \"color\" \"imagemap\"", material.name, kind)?;
            writeln!(out, "\t\"string filename\" [\"{}\"]", filename)?;
            writeln!(out)?;
        }
    }

    for material in library.iter() {
        writeln!(out, "MakeNamedMaterial \"{}\"", material.name)?;
        writeln!(out, "\t\"string type\" [\"uber\"]")?;

        if material.map("Kd").is_some() {
            writeln!(out, "\t\"texture Kd\" [\"{}_Kd\"]", material.name)?;
        } else if let Some(kd) = material.param("Kd") {
            if kd.len() < 3 {
                return Err(ExportError::BadDiffuseColor {
                    material: material.name.clone(),
                });
            }
            writeln!(out, "\t\"color Kd\" [{:.6} {:.6} {:.6}]", kd[0], kd[1], kd[2])?;
        } else {
            writeln!(out, "\t\"color Kd\" [1.000000 1.000000 1.000000]")?;
        }

        writeln!(out)?;
    }

    Ok(())
}

/// Write `<prefix>-geom.pbrt`.
pub fn save_geometry(mesh: &Mesh, prefix: &str) -> Result<(), ExportError> {
    let file = File::create(geometry_path(prefix))?;
    let mut writer = BufWriter::new(file);
    write_geometry(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write `<prefix>-mat.pbrt`.
pub fn save_materials(library: &MaterialLibrary, prefix: &str) -> Result<(), ExportError> {
    let file = File::create(material_path(prefix))?;
    let mut writer = BufWriter::new(file);
    write_materials(library, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Geometry output path for `prefix`.
pub fn geometry_path(prefix: &str) -> PathBuf {
    PathBuf::from(format!("{}-geom.pbrt", prefix))
}

/// Material output path for `prefix`.
pub fn material_path(prefix: &str) -> PathBuf {
    PathBuf::from(format!("{}-mat.pbrt", prefix))
}
