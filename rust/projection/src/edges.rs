// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sharp-edge silhouette extraction.
//!
//! Every mesh triangle contributes its three undirected edges to an
//! adjacency map keyed by quantized endpoint coordinates, so coincident
//! edges from neighboring triangles merge. An edge with a single adjacent
//! face is a boundary edge and is always drawn; an edge shared by two or
//! more faces is drawn only when some pair of adjacent normals differs by
//! more than the dihedral threshold. This yields the "sharp edges only"
//! silhouette instead of every triangulation seam.

use crate::camera::OrthoCamera;
use nalgebra::{Point3, Vector3};
use plan2d_model::TriangleMesh;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Quantization step for merging edge endpoints (0.1 mm)
const EDGE_QUANTUM: f64 = 1e-4;

/// Configuration for sharp-edge extraction
#[derive(Debug, Clone, Copy)]
pub struct EdgeExtractorConfig {
    /// Dihedral angle above which an interior edge is drawn, in radians
    pub dihedral_threshold: f64,
}

impl Default for EdgeExtractorConfig {
    fn default() -> Self {
        Self {
            dihedral_threshold: 30f64.to_radians(),
        }
    }
}

/// A projected 2D edge in NDC, with its average depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedEdge {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// Average NDC depth of the two endpoints
    pub depth: f64,
    pub dashed: bool,
}

impl ProjectedEdge {
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            x1: a.x,
            y1: a.y,
            x2: b.x,
            y2: b.y,
            depth: (a.z + b.z) / 2.0,
            dashed: false,
        }
    }

    pub fn dashed(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            dashed: true,
            ..Self::new(a, b)
        }
    }
}

type QuantizedPoint = (i64, i64, i64);
type EdgeKey = (QuantizedPoint, QuantizedPoint);

struct EdgeRecord {
    a: Point3<f64>,
    b: Point3<f64>,
    normals: SmallVec<[Vector3<f64>; 2]>,
}

fn quantize(p: &Point3<f64>) -> QuantizedPoint {
    (
        (p.x / EDGE_QUANTUM).round() as i64,
        (p.y / EDGE_QUANTUM).round() as i64,
        (p.z / EDGE_QUANTUM).round() as i64,
    )
}

fn edge_key(a: QuantizedPoint, b: QuantizedPoint) -> EdgeKey {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Extract the world-space sharp edges of a set of meshes.
///
/// Returned as endpoint pairs; projection happens separately so plan
/// views can clip in NDC with per-endpoint depth.
pub fn collect_sharp_edges(
    meshes: &[TriangleMesh],
    config: &EdgeExtractorConfig,
) -> Vec<(Point3<f64>, Point3<f64>)> {
    let mut adjacency: FxHashMap<EdgeKey, EdgeRecord> = FxHashMap::default();

    for mesh in meshes {
        for tri in mesh.world_triangles() {
            let Some(normal) = tri.face_normal() else {
                continue;
            };
            let corners = [tri.a, tri.b, tri.c];
            for i in 0..3 {
                let a = corners[i];
                let b = corners[(i + 1) % 3];
                let key = edge_key(quantize(&a), quantize(&b));
                adjacency
                    .entry(key)
                    .or_insert_with(|| EdgeRecord {
                        a,
                        b,
                        normals: SmallVec::new(),
                    })
                    .normals
                    .push(normal);
            }
        }
    }

    let min_dot = config.dihedral_threshold.cos();
    adjacency
        .into_values()
        .filter(|rec| is_sharp(&rec.normals, min_dot))
        .map(|rec| (rec.a, rec.b))
        .collect()
}

/// Boundary edges (one face) are always sharp; interior edges are sharp
/// when some pair of adjacent normals falls below the dot threshold.
fn is_sharp(normals: &[Vector3<f64>], min_dot: f64) -> bool {
    if normals.len() < 2 {
        return true;
    }
    for i in 0..normals.len() {
        for j in (i + 1)..normals.len() {
            if normals[i].dot(&normals[j]) < min_dot {
                return true;
            }
        }
    }
    false
}

/// Extract sharp edges and project them through a camera.
///
/// No depth clipping is applied here; plan views clip afterwards.
pub fn extract_sharp_edges(
    meshes: &[TriangleMesh],
    camera: &OrthoCamera,
    config: &EdgeExtractorConfig,
) -> Vec<ProjectedEdge> {
    collect_sharp_edges(meshes, config)
        .into_iter()
        .map(|(a, b)| ProjectedEdge::new(camera.project(&a), camera.project(&b)))
        .collect()
}

/// Painter's-algorithm ordering: farthest (largest depth) first
pub fn sort_back_to_front(edges: &mut [ProjectedEdge]) {
    edges.sort_by(|a, b| b.depth.total_cmp(&a.depth));
}
