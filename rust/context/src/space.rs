// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Resolved space (room) context.

use crate::outline::FloorOutline;
use plan2d_model::{ContextFilter, Element};

/// The resolved bundle of relationships for one space.
#[derive(Debug, Clone)]
pub struct SpaceContext {
    /// The space element itself
    pub space: Element,
    /// Walls touching the space boundary
    pub boundary_walls: Vec<Element>,
    /// Doors on the space boundary
    pub boundary_doors: Vec<Element>,
    /// Windows on the space boundary
    pub boundary_windows: Vec<Element>,
    /// Elements whose center lies inside the space
    pub contained_elements: Vec<Element>,
    /// Floor polygon with its extraction method
    pub floor_outline: Option<FloorOutline>,
    /// Name of the enclosing storey
    pub storey_name: Option<String>,
    /// Human-readable space type/name
    pub space_type_name: Option<String>,
}

impl SpaceContext {
    /// Apply a context filter (substring, OR within field, AND across)
    pub fn matches(&self, filter: &ContextFilter) -> bool {
        filter.matches(
            self.space_type_name.as_deref(),
            self.storey_name.as_deref(),
            self.space.id,
            self.space.global_id.as_deref(),
        )
    }

    /// Floor level of the space, from the outline when present
    pub fn floor_level(&self) -> Option<f64> {
        self.floor_outline
            .as_ref()
            .map(|o| o.floor_level)
            .or_else(|| self.space.bbox.map(|b| b.min.z))
    }
}
