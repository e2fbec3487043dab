// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Filled-polygon extraction.
//!
//! Triangles whose face normal points away from the camera are culled;
//! the rest are projected and kept as filled polygons classified by the
//! owning element so the composer can color them (glass for elements
//! flagged transparent).

use crate::camera::OrthoCamera;
use nalgebra::Point2;
use plan2d_model::{ElementClass, TriangleMesh};

/// Back-face culling tolerance on the normal/view-direction dot product
pub const BACKFACE_DOT_TOLERANCE: f64 = 0.1;

/// Fill classification for coloring
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FillKind {
    Element(ElementClass),
    /// Unclassified element, colored by its raw type label
    Labeled(String),
    Glass,
}

/// A projected filled polygon in NDC
#[derive(Debug, Clone)]
pub struct ProjectedPolygon {
    pub points: Vec<Point2<f64>>,
    pub kind: FillKind,
    /// Average NDC depth of the vertices
    pub depth: f64,
}

/// Project the front-facing triangles of a set of meshes.
///
/// A triangle is culled when its face normal and the view direction agree
/// beyond the tolerance, i.e. the face looks away from the camera.
pub fn extract_fills(
    meshes: &[TriangleMesh],
    camera: &OrthoCamera,
    kind: FillKind,
) -> Vec<ProjectedPolygon> {
    let view_dir = camera.view_direction();
    let mut fills = Vec::new();

    for mesh in meshes {
        for tri in mesh.world_triangles() {
            let Some(normal) = tri.face_normal() else {
                continue;
            };
            if normal.dot(&view_dir) > BACKFACE_DOT_TOLERANCE {
                continue;
            }
            let a = camera.project(&tri.a);
            let b = camera.project(&tri.b);
            let c = camera.project(&tri.c);
            fills.push(ProjectedPolygon {
                points: vec![
                    Point2::new(a.x, a.y),
                    Point2::new(b.x, b.y),
                    Point2::new(c.x, c.y),
                ],
                kind: kind.clone(),
                depth: (a.z + b.z + c.z) / 3.0,
            });
        }
    }

    fills
}

/// Painter's-algorithm ordering: farthest (largest depth) first
pub fn sort_back_to_front(polygons: &mut [ProjectedPolygon]) {
    polygons.sort_by(|a, b| b.depth.total_cmp(&a.depth));
}
