// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-session context resolver.
//!
//! Consumes the flat element list from the loading layer and produces one
//! [`DoorContext`] per door of the primary model and one [`SpaceContext`]
//! per space. Elements from a secondary/reference model contribute walls
//! and devices only; their doors and spaces are never analyzed.
//!
//! The numeric tolerances are empirical values carried over from field
//! use. They are named fields of [`ResolverConfig`] and can be overridden
//! per session, but the defaults are the values everything downstream was
//! tuned against.

use crate::door::DoorContext;
use crate::error::{Error, Result};
use crate::normal::{estimate_normal, EstimatedNormal};
use crate::outline::extract_floor_outline;
use crate::space::SpaceContext;
use nalgebra::Vector3;
use plan2d_model::{Element, ElementClass, ModelQuery, QueryError};
use tracing::{debug, warn};

/// Geometric tolerances used during resolution.
///
/// All values are in model length units (meters for IFC models).
#[derive(Debug, Clone, Copy)]
pub struct ResolverConfig {
    /// Margin added to the door bbox when searching for the host wall
    pub host_search_margin: f64,
    /// Walls smaller than this fraction of the door volume are slivers
    pub min_wall_volume_ratio: f64,
    /// Maximum distance from door center to a nearby device
    pub device_search_radius: f64,
    /// Maximum out-of-plane offset of a device along the door normal
    pub device_plane_tolerance: f64,
    /// Minimum |dot| for two normals to count as aligned (~37 degrees)
    pub normal_alignment_min_dot: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            host_search_margin: 0.3,
            min_wall_volume_ratio: 0.1,
            device_search_radius: 1.0,
            device_plane_tolerance: 0.3,
            normal_alignment_min_dot: 0.8,
        }
    }
}

/// Resolves door and space contexts for one analysis session
pub struct ContextResolver<'a, Q: ModelQuery> {
    config: ResolverConfig,
    query: &'a Q,
}

impl<'a, Q: ModelQuery> ContextResolver<'a, Q> {
    /// Create a resolver with default tolerances
    pub fn new(query: &'a Q) -> Self {
        Self {
            config: ResolverConfig::default(),
            query,
        }
    }

    /// Create a resolver with custom tolerances
    pub fn with_config(query: &'a Q, config: ResolverConfig) -> Self {
        Self { config, query }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a context for every door in the primary element list.
    ///
    /// `secondary` supplies additional walls and devices (e.g. from a
    /// linked reference model); its doors are resolver inputs only.
    /// Doors that fail to resolve are skipped with a warning.
    pub fn resolve_doors(
        &self,
        primary: &[Element],
        secondary: &[Element],
    ) -> Vec<DoorContext> {
        let walls: Vec<&Element> = primary
            .iter()
            .chain(secondary.iter())
            .filter(|e| e.class() == ElementClass::Wall)
            .collect();
        let devices: Vec<&Element> = primary
            .iter()
            .chain(secondary.iter())
            .filter(|e| e.class() == ElementClass::Device)
            .collect();

        let mut contexts = Vec::new();
        for door in primary.iter().filter(|e| e.class() == ElementClass::Door) {
            match self.resolve_door(door, &walls, &devices) {
                Ok(ctx) => contexts.push(ctx),
                Err(err) => warn!(door = door.id, %err, "skipping unresolvable door"),
            }
        }
        debug!(
            doors = contexts.len(),
            walls = walls.len(),
            devices = devices.len(),
            "door context resolution finished"
        );
        contexts
    }

    /// Resolve the context of a single door element
    pub fn resolve_door(
        &self,
        door: &Element,
        walls: &[&Element],
        devices: &[&Element],
    ) -> Result<DoorContext> {
        if door.class() != ElementClass::Door {
            return Err(Error::WrongClass(door.id, "door"));
        }
        door.validate()?;
        let door_bbox = door.bbox.ok_or(Error::MissingBoundingBox(door.id))?;
        let center = door_bbox.center();

        let own = estimate_normal(door).ok_or(Error::MissingBoundingBox(door.id))?;

        let host_wall = self.find_host_wall(door, walls).filter(|w| well_formed(w));

        // Prefer the host wall's normal when it agrees with the door's own
        // estimate, flipping sign to keep the door's original orientation.
        let normal = match host_wall {
            Some(wall) => self
                .adopt_wall_normal(&own, wall)
                .unwrap_or(own.direction),
            None => own.direction,
        };

        let nearby_devices = devices
            .iter()
            .filter(|d| well_formed(d) && self.is_nearby_device(door, &normal, d))
            .map(|d| (*d).clone())
            .collect();

        let storey_name = self.query_opt(door.id, "containing_storey", |q, id| {
            q.containing_storey(id)
        });
        // Instance value overrides the type-level one
        let opening_direction = self
            .query_opt(door.id, "operation_type", |q, id| q.operation_type(id))
            .or_else(|| {
                self.query_opt(door.id, "related_operation_type", |q, id| {
                    q.related_operation_type(id)
                })
            });
        let door_type_name = self.query_opt(door.id, "type_name", |q, id| q.type_name(id));

        Ok(DoorContext {
            door: door.clone(),
            host_wall: host_wall.cloned(),
            nearby_devices,
            normal,
            normal_method: own.method,
            center,
            opening_direction,
            door_type_name,
            storey_name,
        })
    }

    /// Resolve a context for every space in the primary element list
    pub fn resolve_spaces(&self, primary: &[Element]) -> Vec<SpaceContext> {
        let mut contexts = Vec::new();
        for space in primary.iter().filter(|e| e.class() == ElementClass::Space) {
            contexts.push(self.resolve_space(space, primary));
        }
        contexts
    }

    /// Resolve the context of a single space element
    pub fn resolve_space(&self, space: &Element, elements: &[Element]) -> SpaceContext {
        let floor_outline = extract_floor_outline(space);

        let mut boundary_walls = Vec::new();
        let mut boundary_doors = Vec::new();
        let mut boundary_windows = Vec::new();
        let mut contained_elements = Vec::new();

        if let Some(bbox) = space.bbox {
            let search = bbox.expanded(self.config.host_search_margin);
            for e in elements {
                if e.id == space.id || !well_formed(e) {
                    continue;
                }
                let Some(ebox) = e.bbox else { continue };
                let touches = search.intersection(&ebox).is_some();
                match e.class() {
                    ElementClass::Wall if touches => boundary_walls.push(e.clone()),
                    ElementClass::Door if touches => boundary_doors.push(e.clone()),
                    ElementClass::Window if touches => boundary_windows.push(e.clone()),
                    ElementClass::Space | ElementClass::Wall | ElementClass::Door
                    | ElementClass::Window => {}
                    _ => {
                        if bbox.contains_point(&ebox.center()) {
                            contained_elements.push(e.clone());
                        }
                    }
                }
            }
        }

        let storey_name = self.query_opt(space.id, "containing_storey", |q, id| {
            q.containing_storey(id)
        });
        let space_type_name = self
            .query_opt(space.id, "type_name", |q, id| q.type_name(id))
            .or_else(|| Some(space.type_label.clone()));

        SpaceContext {
            space: space.clone(),
            boundary_walls,
            boundary_doors,
            boundary_windows,
            contained_elements,
            floor_outline,
            storey_name,
            space_type_name,
        }
    }

    /// Pick the wall hosting a door by intersection-volume score.
    ///
    /// The door bbox is expanded by the search margin; walls whose own
    /// volume is below the sliver ratio are rejected; the highest positive
    /// intersection volume wins.
    pub fn find_host_wall<'e>(
        &self,
        door: &Element,
        walls: &[&'e Element],
    ) -> Option<&'e Element> {
        let door_bbox = door.bbox?;
        let search = door_bbox.expanded(self.config.host_search_margin);
        let min_wall_volume = door_bbox.volume() * self.config.min_wall_volume_ratio;

        let mut best: Option<(&Element, f64)> = None;
        for wall in walls {
            let Some(wall_bbox) = wall.bbox else { continue };
            if wall_bbox.volume() < min_wall_volume {
                continue;
            }
            let Some(inter) = search.intersection(&wall_bbox) else {
                continue;
            };
            let score = inter.volume();
            if score > 0.0 && best.is_none_or(|(_, s)| score > s) {
                best = Some((wall, score));
            }
        }
        best.map(|(wall, _)| wall)
    }

    /// Adopt the host wall's normal when it is aligned with the door's
    /// own estimate, sign-matched to the door's orientation.
    fn adopt_wall_normal(
        &self,
        own: &EstimatedNormal,
        wall: &Element,
    ) -> Option<Vector3<f64>> {
        let wall_normal = estimate_normal(wall)?;
        let dot = wall_normal.direction.dot(&own.direction);
        if dot.abs() > self.config.normal_alignment_min_dot {
            Some(wall_normal.direction * dot.signum())
        } else {
            None
        }
    }

    /// The three-predicate nearby-device test: within reach of the door
    /// center, in the same wall plane, and facing the same way.
    fn is_nearby_device(
        &self,
        door: &Element,
        door_normal: &Vector3<f64>,
        device: &Element,
    ) -> bool {
        let Some(door_center) = door.center() else {
            return false;
        };
        let Some(device_center) = device.center() else {
            return false;
        };
        let offset = device_center - door_center;

        if offset.norm() > self.config.device_search_radius {
            return false;
        }
        if offset.dot(door_normal).abs() >= self.config.device_plane_tolerance {
            return false;
        }
        let Some(device_normal) = estimate_normal(device) else {
            return false;
        };
        device_normal.direction.dot(door_normal).abs() > self.config.normal_alignment_min_dot
    }

    /// Run one relationship query; failures are logged and degrade to None
    fn query_opt<F>(&self, id: u64, what: &'static str, f: F) -> Option<String>
    where
        F: FnOnce(&Q, u64) -> std::result::Result<Option<String>, QueryError>,
    {
        match f(self.query, id) {
            Ok(value) => value,
            Err(err) => {
                warn!(element = id, query = what, %err, "relationship query failed");
                None
            }
        }
    }
}

/// Mesh-buffer sanity gate for elements that will be rendered later.
/// Malformed elements are dropped from the context with a warning.
fn well_formed(element: &Element) -> bool {
    match element.validate() {
        Ok(()) => true,
        Err(err) => {
            warn!(element = element.id, %err, "dropping element with malformed mesh");
            false
        }
    }
}
