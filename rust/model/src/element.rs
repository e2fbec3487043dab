// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building elements and their classification.
//!
//! Type labels come from the loading layer and vary between authoring
//! tools ("IfcDoor", "Door - Interior", "M_Single-Flush", ...), so
//! classification is a case-insensitive substring match, cross-checked
//! against a numeric type code when the loader provides one. An
//! unrecognized label is never an error: the element classifies as
//! [`ElementClass::Other`] and carries its raw label through to drawing.

use crate::aabb::Aabb;
use crate::error::Result;
use crate::mesh::TriangleMesh;
use nalgebra::Point3;

/// Coarse element classification used for resolution and drawing colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementClass {
    Door,
    Wall,
    Window,
    Device,
    Space,
    Slab,
    Other,
}

/// Numeric type codes used by loaders that ship them alongside labels.
/// Matches the code table of the upstream model API.
pub mod type_code {
    pub const WALL: u16 = 100;
    pub const SLAB: u16 = 110;
    pub const DOOR: u16 = 200;
    pub const WINDOW: u16 = 210;
    pub const DEVICE: u16 = 300;
    pub const SPACE: u16 = 400;
}

impl ElementClass {
    /// Classify from a type label alone
    pub fn from_label(label: &str) -> Self {
        let l = label.to_ascii_lowercase();
        let has = |needle: &str| l.contains(needle);
        if has("door") {
            ElementClass::Door
        } else if has("window") {
            ElementClass::Window
        } else if has("wall") {
            ElementClass::Wall
        } else if has("space") || has("room") || has("zone") {
            ElementClass::Space
        } else if has("slab") || has("floor") {
            ElementClass::Slab
        } else if has("device")
            || has("switch")
            || has("outlet")
            || has("sensor")
            || has("terminal")
            || has("reader")
        {
            ElementClass::Device
        } else {
            ElementClass::Other
        }
    }

    /// Classify from a numeric type code alone
    pub fn from_code(code: u16) -> Self {
        match code {
            type_code::WALL => ElementClass::Wall,
            type_code::SLAB => ElementClass::Slab,
            type_code::DOOR => ElementClass::Door,
            type_code::WINDOW => ElementClass::Window,
            type_code::DEVICE => ElementClass::Device,
            type_code::SPACE => ElementClass::Space,
            _ => ElementClass::Other,
        }
    }
}

/// A building element as handed over by the loading layer.
///
/// Read-only to the analysis core; lifetime spans one analysis session.
#[derive(Debug, Clone)]
pub struct Element {
    /// Loader-local element id
    pub id: u64,
    /// Stable global id (IFC GUID) when the source format has one
    pub global_id: Option<String>,
    /// Raw type label as authored
    pub type_label: String,
    /// Numeric type code, when the loader provides one
    pub type_code: Option<u16>,
    /// World-space geometry (transform applied on read)
    pub meshes: Vec<TriangleMesh>,
    /// World-space axis-aligned bounding box
    pub bbox: Option<Aabb>,
    /// Flagged transparent by the loader (drawn as glass)
    pub transparent: bool,
}

impl Element {
    /// Create an element with geometry; the bbox is derived from the meshes
    pub fn new(id: u64, type_label: impl Into<String>, meshes: Vec<TriangleMesh>) -> Self {
        let bbox = Aabb::from_points(meshes.iter().flat_map(|m| m.world_vertices()));
        Self {
            id,
            global_id: None,
            type_label: type_label.into(),
            type_code: None,
            meshes,
            bbox,
            transparent: false,
        }
    }

    /// Create a geometry-less element from a bounding box alone
    pub fn from_bbox(id: u64, type_label: impl Into<String>, bbox: Aabb) -> Self {
        Self {
            id,
            global_id: None,
            type_label: type_label.into(),
            type_code: None,
            meshes: Vec::new(),
            bbox: Some(bbox),
            transparent: false,
        }
    }

    /// Classification from label, cross-checked against the numeric code.
    /// The label wins when it is recognized; the code fills in when the
    /// label is unrecognized or renamed.
    pub fn class(&self) -> ElementClass {
        let by_label = ElementClass::from_label(&self.type_label);
        if by_label != ElementClass::Other {
            return by_label;
        }
        match self.type_code {
            Some(code) => ElementClass::from_code(code),
            None => ElementClass::Other,
        }
    }

    /// World-space center, from the bbox when present, else mesh vertices
    pub fn center(&self) -> Option<Point3<f64>> {
        if let Some(bbox) = &self.bbox {
            return Some(bbox.center());
        }
        Aabb::from_points(self.meshes.iter().flat_map(|m| m.world_vertices()))
            .map(|b| b.center())
    }

    /// Whether any mesh carries geometry
    pub fn has_geometry(&self) -> bool {
        self.meshes.iter().any(|m| !m.is_empty())
    }

    /// Validate every mesh buffer of the element
    pub fn validate(&self) -> Result<()> {
        for mesh in &self.meshes {
            mesh.validate()?;
        }
        Ok(())
    }
}
