// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Triangle mesh with a world transform applied on read.
//!
//! The loading layer hands over flat vertex buffers in the element's local
//! frame plus a 4x4 world transform. The analysis path works in f64 world
//! space throughout, so vertices are transformed lazily rather than baked.

use crate::aabb::Aabb;
use crate::error::{Error, Result};
use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

/// One triangle in world space
#[derive(Debug, Clone, Copy)]
pub struct WorldTriangle {
    pub a: Point3<f64>,
    pub b: Point3<f64>,
    pub c: Point3<f64>,
}

impl WorldTriangle {
    /// Face normal from the cross product of the triangle edges.
    /// Returns `None` for degenerate triangles.
    pub fn face_normal(&self) -> Option<Vector3<f64>> {
        let n = (self.b - self.a).cross(&(self.c - self.a));
        let len = n.norm();
        if len > 1e-12 {
            Some(n / len)
        } else {
            None
        }
    }
}

/// Triangle mesh
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    /// Vertex positions (x, y, z), local frame
    pub positions: Vec<f64>,
    /// Vertex normals (nx, ny, nz), local frame
    pub normals: Vec<f64>,
    /// Triangle indices (i0, i1, i2); empty means non-indexed triangle soup
    pub indices: Vec<u32>,
    /// Local-to-world transform
    pub transform: Matrix4<f64>,
}

impl TriangleMesh {
    /// Create a new empty mesh with an identity transform
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
            transform: Matrix4::identity(),
        }
    }

    /// Create a mesh from buffers and a transform
    pub fn with_transform(
        positions: Vec<f64>,
        normals: Vec<f64>,
        indices: Vec<u32>,
        transform: Matrix4<f64>,
    ) -> Self {
        Self {
            positions,
            normals,
            indices,
            transform,
        }
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count (indexed or soup)
    #[inline]
    pub fn triangle_count(&self) -> usize {
        if self.indices.is_empty() {
            self.vertex_count() / 3
        } else {
            self.indices.len() / 3
        }
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Check the buffers handed over by the loading layer.
    ///
    /// Vertex access trusts these invariants, so a loader bug surfaces
    /// here instead of as an out-of-bounds panic mid-render.
    pub fn validate(&self) -> Result<()> {
        if self.positions.len() % 3 != 0 {
            return Err(Error::MalformedMesh(format!(
                "position buffer length {} is not a multiple of 3",
                self.positions.len()
            )));
        }
        if self.indices.len() % 3 != 0 {
            return Err(Error::MalformedMesh(format!(
                "index buffer length {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        let vertices = self.vertex_count() as u32;
        if let Some(&bad) = self.indices.iter().find(|&&i| i >= vertices) {
            return Err(Error::MalformedMesh(format!(
                "index {bad} out of range for {vertices} vertices"
            )));
        }
        Ok(())
    }

    /// Vertex position in the local frame
    #[inline]
    pub fn local_vertex(&self, i: usize) -> Point3<f64> {
        Point3::new(
            self.positions[i * 3],
            self.positions[i * 3 + 1],
            self.positions[i * 3 + 2],
        )
    }

    /// Vertex position transformed into world space
    #[inline]
    pub fn world_vertex(&self, i: usize) -> Point3<f64> {
        self.transform.transform_point(&self.local_vertex(i))
    }

    /// Iterate all vertices in world space
    pub fn world_vertices(&self) -> impl Iterator<Item = Point3<f64>> + '_ {
        (0..self.vertex_count()).map(move |i| self.world_vertex(i))
    }

    /// Iterate triangles in world space, handling both indexed and
    /// non-indexed buffers
    pub fn world_triangles(&self) -> impl Iterator<Item = WorldTriangle> + '_ {
        (0..self.triangle_count()).map(move |t| {
            let (i0, i1, i2) = if self.indices.is_empty() {
                (t * 3, t * 3 + 1, t * 3 + 2)
            } else {
                (
                    self.indices[t * 3] as usize,
                    self.indices[t * 3 + 1] as usize,
                    self.indices[t * 3 + 2] as usize,
                )
            };
            WorldTriangle {
                a: self.world_vertex(i0),
                b: self.world_vertex(i1),
                c: self.world_vertex(i2),
            }
        })
    }

    /// Bounding box of the vertices in the local frame
    pub fn local_bounds(&self) -> Option<Aabb> {
        Aabb::from_points((0..self.vertex_count()).map(|i| self.local_vertex(i)))
    }

    /// Bounding box of the vertices in world space
    pub fn world_bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.world_vertices())
    }

    /// Unit rotation columns of the world transform, with translation
    /// dropped and per-axis scale divided out. Used to rotate local-frame
    /// directions into world space.
    pub fn rotation(&self) -> Matrix3<f64> {
        let m = &self.transform;
        let mut r = Matrix3::new(
            m[(0, 0)],
            m[(0, 1)],
            m[(0, 2)],
            m[(1, 0)],
            m[(1, 1)],
            m[(1, 2)],
            m[(2, 0)],
            m[(2, 1)],
            m[(2, 2)],
        );
        for c in 0..3 {
            let col = r.column(c).norm();
            if col > 1e-12 {
                for row in 0..3 {
                    r[(row, c)] /= col;
                }
            }
        }
        r
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn quad_mesh() -> TriangleMesh {
        // Unit quad in the XY plane, two coplanar triangles
        TriangleMesh::with_transform(
            vec![
                0.0, 0.0, 0.0, //
                1.0, 0.0, 0.0, //
                1.0, 1.0, 0.0, //
                0.0, 1.0, 0.0,
            ],
            vec![0.0; 12],
            vec![0, 1, 2, 0, 2, 3],
            Matrix4::identity(),
        )
    }

    #[test]
    fn world_triangle_iteration() {
        let mesh = quad_mesh();
        let tris: Vec<_> = mesh.world_triangles().collect();
        assert_eq!(tris.len(), 2);
        let n = tris[0].face_normal().unwrap();
        assert_relative_eq!(n, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn transform_applied_on_read() {
        let mut mesh = quad_mesh();
        mesh.transform = Matrix4::new_translation(&Vector3::new(10.0, 0.0, 0.0));
        let bounds = mesh.world_bounds().unwrap();
        assert_relative_eq!(bounds.min.x, 10.0, epsilon = 1e-12);
        assert_relative_eq!(bounds.max.x, 11.0, epsilon = 1e-12);
        // Local bounds are untouched by the transform
        assert_relative_eq!(mesh.local_bounds().unwrap().min.x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn rotation_strips_scale_and_translation() {
        let mut mesh = quad_mesh();
        mesh.transform = Matrix4::new_translation(&Vector3::new(5.0, 6.0, 7.0))
            * Matrix4::from_euler_angles(0.0, 0.0, std::f64::consts::FRAC_PI_2)
            * Matrix4::new_nonuniform_scaling(&Vector3::new(2.0, 3.0, 4.0));
        let r = mesh.rotation();
        let x = r * Vector3::x();
        assert_relative_eq!(x.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(x, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut mesh = quad_mesh();
        mesh.indices = vec![0, 1, 9];
        let err = mesh.validate().unwrap_err();
        assert!(err.to_string().contains("index 9"));
        assert!(quad_mesh().validate().is_ok());
    }

    #[test]
    fn ragged_buffers_are_rejected() {
        let mut mesh = quad_mesh();
        mesh.positions.pop();
        assert!(mesh.validate().is_err());

        let mut mesh = quad_mesh();
        mesh.indices.pop();
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn soup_mesh_triangle_count() {
        let mut mesh = quad_mesh();
        mesh.indices.clear();
        // 4 vertices, non-indexed: one full triangle, remainder ignored
        assert_eq!(mesh.triangle_count(), 1);
    }
}
