//! Map-wide catalogue of surface materials.

use crate::{
    coord::MAX_MATERIALS,
    error::{
        Result,
        bail,
        ensure,
    },
};
use std::{
    fmt::Write,
    slice,
};


/// The built-in catalogue, as (name, texture) pairs. Always present in
/// every table, in this order unless a file declares them differently.
///
/// Fresh tiles use index 0 for their top and index 1 for their sides.
pub const DEFAULT_MATERIALS: &[(&str, &str)] = &[
    ("Grass", "grass.png"),
    ("Cliffs", "cliffs.png"),
    ("Cobblestone", "cobblestone.png"),
];


/// A named surface appearance.
///
/// Both fields are single whitespace-free tokens, as the file format
/// separates them by spaces.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Material {
    name: String,
    texture: String,
}

impl Material {
    pub fn new<N, T>(name: N, texture: T) -> Result<Self>
    where
        N: Into<String>,
        T: Into<String>,
    {
        let name = name.into();
        let texture = texture.into();
        for (what, token) in [("name", &name), ("texture", &texture)] {
            ensure!(
                !token.is_empty() && !token.chars().any(char::is_whitespace),
                MalformedData, None, "material {} {:?} is not a single token", what, token,
            );
        }
        Ok(Material { name, texture })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Texture reference. Identifies the material for deduplication.
    pub fn texture(&self) -> &str {
        &self.texture
    }

    /// Parse a `material <name> <texture>` line.
    pub(crate) fn parse_pfmap_line(line: &str) -> Result<Self> {
        let mut tokens = line.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next(), tokens.next()) {
            (Some("material"), Some(name), Some(texture), None) => Material::new(name, texture),
            _ => bail!(MalformedData, None, "expected `material <name> <texture>`, got {:?}", line),
        }
    }

    fn defaults() -> impl Iterator<Item=Material> {
        DEFAULT_MATERIALS.iter()
            .map(|&(name, texture)| Material {
                name: name.to_owned(),
                texture: texture.to_owned(),
            })
    }
}


/// Ordered, index-addressed list of materials.
///
/// Indices are stable: materials are only ever appended.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MaterialTable {
    materials: Vec<Material>,
}

impl MaterialTable {
    /// Table holding exactly the default catalogue.
    pub fn with_defaults() -> Self {
        MaterialTable {
            materials: Material::defaults().collect(),
        }
    }

    /// Build the table for a loaded file: the file's own materials first, in
    /// file order, then every default material whose texture the file did
    /// not declare.
    ///
    /// This keeps indices from files which only ever referenced the default
    /// catalogue valid, even if they list only a subset of it.
    pub fn from_declared(declared: Vec<Material>) -> Result<Self> {
        ensure!(
            declared.len() <= MAX_MATERIALS,
            MaterialTableFull, None,
            "{} materials declared, max is {}", declared.len(), MAX_MATERIALS,
        );
        let num_declared = declared.len();
        let mut table = MaterialTable { materials: declared };
        for material in Material::defaults() {
            table.append_default_if_missing(material)?;
        }
        debug!(
            declared = num_declared,
            merged = table.len() - num_declared,
            "merged material table",
        );
        Ok(table)
    }

    /// Index of the first material with the same texture.
    pub fn index_of(&self, material: &Material) -> Option<usize> {
        self.index_of_texture(material.texture())
    }

    pub fn index_of_texture(&self, texture: &str) -> Option<usize> {
        self.materials.iter().position(|m| m.texture == texture)
    }

    /// Append `material` unless its texture is already present. Returns its
    /// index either way.
    pub fn append_default_if_missing(&mut self, material: Material) -> Result<usize> {
        if let Some(i) = self.index_of(&material) {
            return Ok(i);
        }
        ensure!(
            self.materials.len() < MAX_MATERIALS,
            MaterialTableFull, None, "cannot add material {:?}", material.name,
        );
        self.materials.push(material);
        Ok(self.materials.len() - 1)
    }

    /// Add a custom material. Same deduplication as
    /// `append_default_if_missing`.
    pub fn push(&mut self, material: Material) -> Result<usize> {
        self.append_default_if_missing(material)
    }

    pub fn get(&self, i: usize) -> Option<&Material> {
        self.materials.get(i)
    }

    pub fn contains_index(&self, i: usize) -> bool {
        i < self.materials.len()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<Material> {
        self.materials.iter()
    }

    /// Append one `material` line per material.
    pub fn write_pfmap(&self, buf: &mut String) {
        for material in &self.materials {
            writeln!(buf, "material {} {}", material.name, material.texture).unwrap();
        }
    }
}

impl Default for MaterialTable {
    fn default() -> Self {
        MaterialTable::with_defaults()
    }
}

impl<'a> IntoIterator for &'a MaterialTable {
    type Item = &'a Material;
    type IntoIter = slice::Iter<'a, Material>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
