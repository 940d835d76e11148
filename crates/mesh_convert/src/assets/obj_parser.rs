//! OBJ mesh parser
//!
//! Parses Wavefront .obj text into global attribute arrays, named face
//! groups, and an attached material library. Faces must be triangles;
//! unrecognized record kinds are skipped for forward compatibility.
//!
//! Each input line is classified into an [`ObjRecord`] first, then applied
//! to the mesh under a current-group cursor, so all parser state is local
//! to the parse call.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::assets::materials::{MaterialLibrary, MtlError};
use crate::foundation::math::{Vec2, Vec3};

/// Errors produced while reading or parsing an OBJ file.
#[derive(Error, Debug)]
pub enum ObjError {
    /// IO error reading the file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed record
    #[error("Line {line}: {message}")]
    Parse {
        /// 1-based line number of the offending record
        line: usize,
        /// What was wrong with it
        message: String,
    },
    /// `usemtl` named a material absent from the library so far
    #[error("Line {line}: unknown material '{name}'")]
    UnknownMaterial {
        /// 1-based line number of the `usemtl` record
        line: usize,
        /// The name that was requested
        name: String,
    },
    /// A `mtllib` file failed to load or parse
    #[error("Material library error: {0}")]
    Mtl(#[from] MtlError),
}

/// One corner of a face: a position index plus optional texcoord and
/// normal indices, all 0-based. OBJ permits omitting the texcoord or
/// normal per corner, so absence is distinct from index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceVertex {
    /// Index into the mesh position array
    pub position: usize,
    /// Index into the mesh texcoord array, if given
    pub texcoord: Option<usize>,
    /// Index into the mesh normal array, if given
    pub normal: Option<usize>,
}

/// A triangle face: exactly three corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    /// The three corners in winding order
    pub vertices: [FaceVertex; 3],
}

/// A named run of faces sharing one material binding.
#[derive(Debug, Clone)]
pub struct Group {
    /// Group name; the default group is named `""`
    pub name: String,
    /// Faces appended while this group was current
    pub faces: Vec<Face>,
    /// Material bound by the most recent `usemtl` while this group was
    /// current. Not inherited across `g` records.
    pub material: Option<String>,
}

impl Group {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            faces: Vec::new(),
            material: None,
        }
    }
}

/// A parsed OBJ mesh: attribute arrays, face groups, and the material
/// library accumulated from `mtllib` records.
///
/// Groups keep insertion order; the default unnamed group always exists
/// and sits first.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Vertex positions (`v` records), in input order
    pub positions: Vec<Vec3>,
    /// Vertex normals (`vn` records), in input order
    pub normals: Vec<Vec3>,
    /// Texture coordinates (`vt` records), in input order
    pub texcoords: Vec<Vec2>,
    /// Materials merged from `mtllib` files
    pub materials: MaterialLibrary,
    groups: Vec<Group>,
    group_index: HashMap<String, usize>,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Mesh {
    /// Create an empty mesh holding only the default group.
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            texcoords: Vec::new(),
            materials: MaterialLibrary::new(),
            groups: vec![Group::new("")],
            group_index: HashMap::from([(String::new(), 0)]),
        }
    }

    /// Read and parse an OBJ file. `mtllib` references are resolved
    /// relative to the file's parent directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ObjError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::parse(&contents, base_dir)
    }

    /// Parse OBJ text. `base_dir` anchors relative `mtllib` paths.
    pub fn parse(contents: &str, base_dir: &Path) -> Result<Self, ObjError> {
        let mut mesh = Self::new();
        // Cursor into `groups`; faces and material bindings apply to
        // whichever group is current.
        let mut current_group = 0usize;

        for (line_num, line) in contents.lines().enumerate() {
            let line_num = line_num + 1;
            match classify(line, line_num)? {
                ObjRecord::Position(p) => mesh.positions.push(p),
                ObjRecord::Normal(n) => mesh.normals.push(n),
                ObjRecord::Texcoord(t) => mesh.texcoords.push(t),
                ObjRecord::Face(face) => mesh.groups[current_group].faces.push(face),
                ObjRecord::MtlLib(file) => {
                    mesh.materials.append_from_file(base_dir.join(file))?;
                }
                ObjRecord::UseMtl(name) => {
                    if !mesh.materials.contains(name) {
                        return Err(ObjError::UnknownMaterial {
                            line: line_num,
                            name: name.to_string(),
                        });
                    }
                    mesh.groups[current_group].material = Some(name.to_string());
                }
                ObjRecord::Group(name) => current_group = mesh.group_slot(name),
                ObjRecord::Skip => {}
            }
        }

        debug!(
            "parsed OBJ: {} positions, {} normals, {} texcoords, {} groups, {} materials",
            mesh.positions.len(),
            mesh.normals.len(),
            mesh.texcoords.len(),
            mesh.groups.len(),
            mesh.materials.len()
        );

        Ok(mesh)
    }

    /// All groups in insertion order, the default group first.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Look up a group by name.
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.group_index.get(name).map(|&slot| &self.groups[slot])
    }

    fn group_slot(&mut self, name: &str) -> usize {
        if let Some(&slot) = self.group_index.get(name) {
            return slot;
        }
        let slot = self.groups.len();
        self.groups.push(Group::new(name));
        self.group_index.insert(name.to_string(), slot);
        slot
    }
}

/// A single classified OBJ record.
enum ObjRecord<'a> {
    Position(Vec3),
    Normal(Vec3),
    Texcoord(Vec2),
    Face(Face),
    MtlLib(&'a str),
    UseMtl(&'a str),
    Group(&'a str),
    /// Comment, blank line, or unrecognized record kind
    Skip,
}

fn classify(line: &str, line_num: usize) -> Result<ObjRecord<'_>, ObjError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(ObjRecord::Skip);
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let args = &tokens[1..];

    match tokens[0] {
        "v" => Ok(ObjRecord::Position(parse_vec3(args, line_num, "v")?)),
        "vn" => Ok(ObjRecord::Normal(parse_vec3(args, line_num, "vn")?)),
        "vt" => Ok(ObjRecord::Texcoord(parse_vec2(args, line_num)?)),
        "f" => Ok(ObjRecord::Face(parse_face(args, line_num)?)),
        "mtllib" => Ok(ObjRecord::MtlLib(name_arg(args, line_num, "mtllib")?)),
        "usemtl" => Ok(ObjRecord::UseMtl(name_arg(args, line_num, "usemtl")?)),
        "g" => Ok(ObjRecord::Group(name_arg(args, line_num, "g")?)),
        _ => Ok(ObjRecord::Skip),
    }
}

fn name_arg<'a>(args: &[&'a str], line: usize, command: &str) -> Result<&'a str, ObjError> {
    args.first().copied().ok_or_else(|| ObjError::Parse {
        line,
        message: format!("{} missing name", command),
    })
}

fn parse_f32(token: &str, line: usize, command: &str) -> Result<f32, ObjError> {
    token.parse::<f32>().map_err(|_| ObjError::Parse {
        line,
        message: format!("{} invalid float value '{}'", command, token),
    })
}

fn parse_vec3(args: &[&str], line: usize, command: &str) -> Result<Vec3, ObjError> {
    if args.len() != 3 {
        return Err(ObjError::Parse {
            line,
            message: format!("{} expects 3 values, got {}", command, args.len()),
        });
    }
    Ok(Vec3::new(
        parse_f32(args[0], line, command)?,
        parse_f32(args[1], line, command)?,
        parse_f32(args[2], line, command)?,
    ))
}

fn parse_vec2(args: &[&str], line: usize) -> Result<Vec2, ObjError> {
    // A third texcoord value is legal OBJ; it is parsed nowhere and
    // ignored here.
    if args.len() < 2 || args.len() > 3 {
        return Err(ObjError::Parse {
            line,
            message: format!("vt expects 2 values, got {}", args.len()),
        });
    }
    Ok(Vec2::new(
        parse_f32(args[0], line, "vt")?,
        parse_f32(args[1], line, "vt")?,
    ))
}

fn parse_face(args: &[&str], line: usize) -> Result<Face, ObjError> {
    if args.len() != 3 {
        return Err(ObjError::Parse {
            line,
            message: format!("f expects 3 vertices, got {}", args.len()),
        });
    }
    Ok(Face {
        vertices: [
            parse_face_vertex(args[0], line)?,
            parse_face_vertex(args[1], line)?,
            parse_face_vertex(args[2], line)?,
        ],
    })
}

fn parse_face_vertex(token: &str, line: usize) -> Result<FaceVertex, ObjError> {
    let mut fields = token.split('/');

    // Position index is required; texcoord and normal subfields are
    // optional and may be empty ("1//3").
    let position = parse_index(fields.next().unwrap_or(""), line, token)?;
    let texcoord = match fields.next() {
        Some("") | None => None,
        Some(field) => Some(parse_index(field, line, token)?),
    };
    let normal = match fields.next() {
        Some("") | None => None,
        Some(field) => Some(parse_index(field, line, token)?),
    };

    Ok(FaceVertex {
        position,
        texcoord,
        normal,
    })
}

fn parse_index(field: &str, line: usize, token: &str) -> Result<usize, ObjError> {
    let index = field.parse::<usize>().map_err(|_| ObjError::Parse {
        line,
        message: format!("invalid index '{}' in face vertex '{}'", field, token),
    })?;
    if index == 0 {
        return Err(ObjError::Parse {
            line,
            message: format!("index 0 in face vertex '{}' (OBJ indices are 1-based)", token),
        });
    }
    Ok(index - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    /// Write fixture files into a per-test temp directory and return it.
    fn fixture_dir(test: &str, files: &[(&str, &str)]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mesh_convert_{}_{}", std::process::id(), test));
        fs::create_dir_all(&dir).unwrap();
        for (name, contents) in files {
            fs::write(dir.join(name), contents).unwrap();
        }
        dir
    }

    #[test]
    fn test_positions_preserve_input_order() {
        let obj = "v 1.0 2.0 3.0\nv 4.0 5.0 6.0\nv 7.0 8.0 9.0\n";
        let mesh = Mesh::parse(obj, Path::new("")).unwrap();

        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.positions[0], Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.positions[2], Vec3::new(7.0, 8.0, 9.0));
    }

    #[test]
    fn test_parse_all_attribute_records() {
        let obj = "v 0.0 0.0 0.0\nvn 0.0 1.0 0.0\nvt 0.5 0.5\nvt 0.25 0.75 0.0\n";
        let mesh = Mesh::parse(obj, Path::new("")).unwrap();

        assert_eq!(mesh.normals, vec![Vec3::new(0.0, 1.0, 0.0)]);
        // The optional third vt value is ignored
        assert_eq!(mesh.texcoords.len(), 2);
        assert_eq!(mesh.texcoords[1], Vec2::new(0.25, 0.75));
    }

    #[test]
    fn test_face_index_forms() {
        let obj = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vn 0.0 0.0 1.0
f 1/1/1 2/1/1 3/1/1
f 1 2 3
f 1//1 2//1 3//1
f 1/1 2/1 3/1
";
        let mesh = Mesh::parse(obj, Path::new("")).unwrap();
        let faces = &mesh.groups()[0].faces;
        assert_eq!(faces.len(), 4);

        // Full triple, 1-based converted to 0-based
        assert_eq!(
            faces[0].vertices[1],
            FaceVertex {
                position: 1,
                texcoord: Some(0),
                normal: Some(0),
            }
        );
        // Position only
        assert_eq!(faces[1].vertices[0].texcoord, None);
        assert_eq!(faces[1].vertices[0].normal, None);
        // Empty texcoord subfield
        assert_eq!(faces[2].vertices[0].texcoord, None);
        assert_eq!(faces[2].vertices[0].normal, Some(0));
        // No normal subfield
        assert_eq!(faces[3].vertices[2].texcoord, Some(0));
        assert_eq!(faces[3].vertices[2].normal, None);
    }

    #[test]
    fn test_non_triangle_face_fails() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1 2 3 4\n";
        let err = Mesh::parse(obj, Path::new("")).unwrap_err();
        assert!(matches!(err, ObjError::Parse { line: 5, .. }));
    }

    #[test]
    fn test_zero_index_fails() {
        let obj = "v 0 0 0\nf 0 1 1\n";
        let err = Mesh::parse(obj, Path::new("")).unwrap_err();
        assert!(matches!(err, ObjError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_wrong_value_count_fails() {
        let err = Mesh::parse("v 1.0 2.0\n", Path::new("")).unwrap_err();
        assert!(matches!(err, ObjError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_unknown_records_are_skipped() {
        let obj = "o thing\ns 1\nusemtllib nope\nv 0.0 0.0 0.0\n";
        let mesh = Mesh::parse(obj, Path::new("")).unwrap();
        assert_eq!(mesh.positions.len(), 1);
    }

    #[test]
    fn test_groups_created_in_order_with_default_first() {
        let obj = "g left\nv 0 0 0\ng right\ng left\n";
        let mesh = Mesh::parse(obj, Path::new("")).unwrap();

        let names: Vec<&str> = mesh.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["", "left", "right"]);
    }

    #[test]
    fn test_faces_go_to_current_group() {
        let obj = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
g wing
f 1 2 3
f 3 2 1
g wing
f 2 3 1
";
        let mesh = Mesh::parse(obj, Path::new("")).unwrap();
        assert_eq!(mesh.group("").unwrap().faces.len(), 1);
        // Re-mentioning a group resumes appending to it
        assert_eq!(mesh.group("wing").unwrap().faces.len(), 3);
    }

    #[test]
    fn test_usemtl_unknown_material_fails() {
        let obj = "usemtl missing_name\n";
        let err = Mesh::parse(obj, Path::new("")).unwrap_err();
        match err {
            ObjError::UnknownMaterial { line, name } => {
                assert_eq!(line, 1);
                assert_eq!(name, "missing_name");
            }
            other => panic!("expected UnknownMaterial, got {:?}", other),
        }
    }

    #[test]
    fn test_mtllib_and_usemtl_bind_current_group_only() {
        let dir = fixture_dir(
            "usemtl_binding",
            &[(
                "scene.mtl",
                "newmtl red\nKd 1.0 0.0 0.0\nnewmtl blue\nKd 0.0 0.0 1.0\n",
            )],
        );
        let obj = "\
mtllib scene.mtl
v 0 0 0
v 1 0 0
v 0 1 0
usemtl red
f 1 2 3
g hull
usemtl blue
f 1 2 3
g fin
f 1 2 3
";
        let mesh = Mesh::parse(obj, &dir).unwrap();

        assert_eq!(mesh.group("").unwrap().material.as_deref(), Some("red"));
        assert_eq!(mesh.group("hull").unwrap().material.as_deref(), Some("blue"));
        // Material does not carry forward into a fresh group
        assert_eq!(mesh.group("fin").unwrap().material, None);
    }

    #[test]
    fn test_missing_mtllib_file_fails() {
        let dir = fixture_dir("missing_mtllib", &[]);
        let err = Mesh::parse("mtllib nope.mtl\n", &dir).unwrap_err();
        assert!(matches!(err, ObjError::Mtl(MtlError::Io(_))));
    }

    #[test]
    fn test_later_mtllib_overwrites_reused_names() {
        let dir = fixture_dir(
            "mtllib_merge",
            &[
                ("a.mtl", "newmtl base\nKd 1.0 0.0 0.0\n"),
                ("b.mtl", "newmtl base\nKd 0.0 1.0 0.0\nnewmtl extra\nKd 0.5 0.5 0.5\n"),
            ],
        );
        let obj = "mtllib a.mtl\nmtllib b.mtl\n";
        let mesh = Mesh::parse(obj, &dir).unwrap();

        assert_eq!(mesh.materials.len(), 2);
        assert_eq!(
            mesh.materials.get("base").unwrap().param("Kd"),
            Some(&[0.0, 1.0, 0.0][..])
        );
    }
}
