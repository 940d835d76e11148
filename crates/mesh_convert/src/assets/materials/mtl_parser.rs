//! MTL (Material Template Library) file parser
//!
//! Parses Wavefront .mtl files into a named material library. Only the
//! record kinds the PBRT export consumes are given structure: `newmtl`
//! starts a material, `map_*` binds a texture, and any other record is
//! kept as a named sequence of floats.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

/// Errors produced while reading or parsing an MTL file.
#[derive(Error, Debug)]
pub enum MtlError {
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
    /// Lookup of a material name absent from the library
    #[error("Unknown material '{name}'")]
    UnknownMaterial {
        /// The name that was requested
        name: String,
    },
}

/// A single named material: texture-map bindings plus numeric parameters.
///
/// Both collections preserve insertion order; rebinding an existing key
/// replaces the value in place so serialization order stays stable.
#[derive(Debug, Clone, Default)]
pub struct Material {
    /// Material name, unique within its library
    pub name: String,
    maps: Vec<(String, String)>,
    params: Vec<(String, Vec<f32>)>,
}

impl Material {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Bind the texture map `kind` ("Kd", "Ks", ...) to `filename`.
    pub fn set_map(&mut self, kind: &str, filename: &str) {
        match self.maps.iter_mut().find(|(k, _)| k == kind) {
            Some((_, f)) => *f = filename.to_string(),
            None => self.maps.push((kind.to_string(), filename.to_string())),
        }
    }

    /// Store the numeric parameter `name` with its value sequence.
    pub fn set_param(&mut self, name: &str, values: Vec<f32>) {
        match self.params.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = values,
            None => self.params.push((name.to_string(), values)),
        }
    }

    /// Texture filename bound to `kind`, if any.
    pub fn map(&self, kind: &str) -> Option<&str> {
        self.maps
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, f)| f.as_str())
    }

    /// Values of the numeric parameter `name`, if any.
    pub fn param(&self, name: &str) -> Option<&[f32]> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Iterate texture-map bindings in insertion order.
    pub fn maps(&self) -> impl Iterator<Item = (&str, &str)> {
        self.maps.iter().map(|(k, f)| (k.as_str(), f.as_str()))
    }
}

/// Insertion-ordered collection of named materials.
///
/// Built incrementally by appending one or more MTL files. A `newmtl`
/// reusing an existing name replaces that material in place, keeping its
/// original slot so iteration order is reproducible.
#[derive(Debug, Clone, Default)]
pub struct MaterialLibrary {
    materials: Vec<Material>,
    by_name: HashMap<String, usize>,
}

impl MaterialLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of materials in the library.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the library holds no materials.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Whether a material named `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Look up a material by name.
    pub fn get(&self, name: &str) -> Result<&Material, MtlError> {
        self.by_name
            .get(name)
            .map(|&slot| &self.materials[slot])
            .ok_or_else(|| MtlError::UnknownMaterial {
                name: name.to_string(),
            })
    }

    /// Iterate materials in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    fn insert(&mut self, material: Material) {
        match self.by_name.get(&material.name) {
            Some(&slot) => self.materials[slot] = material,
            None => {
                self.by_name
                    .insert(material.name.clone(), self.materials.len());
                self.materials.push(material);
            }
        }
    }

    /// Read an MTL file and append its materials into this library.
    pub fn append_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), MtlError> {
        let contents = fs::read_to_string(path)?;
        self.append_from_str(&contents)
    }

    /// Parse MTL text and append its materials into this library.
    pub fn append_from_str(&mut self, contents: &str) -> Result<(), MtlError> {
        let mut current: Option<Material> = None;

        for (line_num, line) in contents.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut tokens = line.split_whitespace();
            let command = match tokens.next() {
                Some(cmd) => cmd,
                None => continue,
            };

            match command {
                "newmtl" => {
                    // Save previous material if exists
                    if let Some(mat) = current.take() {
                        self.insert(mat);
                    }

                    let name = tokens.next().ok_or_else(|| MtlError::Parse {
                        line: line_num + 1,
                        message: "newmtl missing material name".to_string(),
                    })?;
                    current = Some(Material::new(name));
                }

                cmd if cmd.starts_with("map_") => {
                    let mat = current.as_mut().ok_or_else(|| {
                        record_before_newmtl(line_num, cmd)
                    })?;
                    // Texture options are not interpreted; the last token
                    // of the line is taken as the filename.
                    let filename = tokens.last().ok_or_else(|| MtlError::Parse {
                        line: line_num + 1,
                        message: format!("{} missing filename", cmd),
                    })?;
                    mat.set_map(&cmd["map_".len()..], filename);
                }

                param => {
                    let mat = current.as_mut().ok_or_else(|| {
                        record_before_newmtl(line_num, param)
                    })?;
                    let mut values = Vec::new();
                    for token in tokens {
                        let value = token.parse::<f32>().map_err(|_| MtlError::Parse {
                            line: line_num + 1,
                            message: format!("{} invalid float value '{}'", param, token),
                        })?;
                        values.push(value);
                    }
                    mat.set_param(param, values);
                }
            }
        }

        // Save final material
        if let Some(mat) = current.take() {
            self.insert(mat);
        }

        Ok(())
    }
}

fn record_before_newmtl(line_num: usize, command: &str) -> MtlError {
    MtlError::Parse {
        line: line_num + 1,
        message: format!("{} record before any newmtl", command),
    }
}
