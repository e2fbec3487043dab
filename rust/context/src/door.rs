// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Resolved door context.

use crate::normal::NormalMethod;
use nalgebra::{Point3, Vector3};
use plan2d_model::{ContextFilter, Element};

/// The resolved bundle of relationships for one door.
///
/// Built once by the resolver and immutable afterwards; every
/// relationship that could not be resolved is `None`.
#[derive(Debug, Clone)]
pub struct DoorContext {
    /// The door element itself
    pub door: Element,
    /// The wall the door is cut into, when one qualified
    pub host_wall: Option<Element>,
    /// Devices in the same wall plane within reach of the door
    pub nearby_devices: Vec<Element>,
    /// Effective unit facing normal (host-wall-corrected when adopted)
    pub normal: Vector3<f64>,
    /// How the door's own normal was estimated
    pub normal_method: NormalMethod,
    /// World-space door center
    pub center: Point3<f64>,
    /// Opening-direction code (e.g. "SINGLE_SWING_LEFT")
    pub opening_direction: Option<String>,
    /// Human-readable door type name
    pub door_type_name: Option<String>,
    /// Name of the enclosing storey
    pub storey_name: Option<String>,
}

impl DoorContext {
    /// Apply a context filter (substring, OR within field, AND across)
    pub fn matches(&self, filter: &ContextFilter) -> bool {
        filter.matches(
            self.door_type_name.as_deref(),
            self.storey_name.as_deref(),
            self.door.id,
            self.door.global_id.as_deref(),
        )
    }
}
