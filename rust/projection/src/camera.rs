// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Orthographic cameras for elevation and plan views.
//!
//! An elevation camera looks along the context normal at the element,
//! framed to its bounding box plus a minimum margin, with world +Z up.
//! A plan camera looks straight down from the section cut height
//! (element bottom + 1.2, the door-hardware reference height) with "up"
//! set to the negated normal so the element's width axis is always
//! horizontal on the sheet.
//!
//! Projection output is NDC: x, y in [-1, 1] across the frame, depth in
//! [-1, 1] between the near and far planes.

use crate::error::{Error, Result};
use nalgebra::{Matrix4, Point3, Vector3};
use plan2d_model::Aabb;

/// Minimum margin around the framed bounding box, in model units
pub const FRAME_MARGIN: f64 = 0.25;

/// Height of the plan section cut above the element bottom
pub const PLAN_CUT_HEIGHT: f64 = 1.2;

/// An orthographic camera with a fixed frame
#[derive(Debug, Clone)]
pub struct OrthoCamera {
    view: Matrix4<f64>,
    proj: Matrix4<f64>,
    view_dir: Vector3<f64>,
}

impl OrthoCamera {
    /// Elevation camera looking along `-normal` at the box center.
    ///
    /// Set `from_back` to look along `+normal` instead (rear elevation).
    pub fn elevation(bbox: &Aabb, normal: &Vector3<f64>, from_back: bool) -> Result<Self> {
        let n = unit(normal)?;
        let dir = if from_back { n } else { -n };
        let center = bbox.center();
        let (ex, ey, ez) = bbox.extents();
        let radius = (ex * ex + ey * ey + ez * ez).sqrt() / 2.0;
        let eye = center - dir * (radius + FRAME_MARGIN).max(1.0);
        let up = Vector3::z();
        Self::framed(eye, dir, up, bbox, FRAME_MARGIN)
    }

    /// Plan (top-down section) camera at the cut height.
    ///
    /// The near plane sits exactly at the cut, so geometry above it falls
    /// outside NDC and is removed by depth clipping.
    pub fn plan(bbox: &Aabb, normal: &Vector3<f64>) -> Result<Self> {
        let n = unit(normal)?;
        let center = bbox.center();
        let cut = bbox.min.z + PLAN_CUT_HEIGHT;
        let eye = Point3::new(center.x, center.y, cut);
        let dir = -Vector3::z();
        // Negated normal as up keeps the width axis horizontal
        let mut up = -n;
        up.z = 0.0;
        if up.norm() < 1e-9 {
            up = -Vector3::y();
        }
        Self::framed(eye, dir, up.normalize(), bbox, FRAME_MARGIN)
    }

    /// Build a camera at `eye` looking along `dir`, framed so the box
    /// corners fit with `margin` on each side.
    fn framed(
        eye: Point3<f64>,
        dir: Vector3<f64>,
        up: Vector3<f64>,
        bbox: &Aabb,
        margin: f64,
    ) -> Result<Self> {
        let target = eye + dir;
        let view = Matrix4::look_at_rh(&eye, &target, &up);

        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        let mut min_z = f64::INFINITY;
        let mut max_z = f64::NEG_INFINITY;
        for corner in bbox.corners() {
            let v = view.transform_point(&corner);
            min_x = min_x.min(v.x);
            max_x = max_x.max(v.x);
            min_y = min_y.min(v.y);
            max_y = max_y.max(v.y);
            min_z = min_z.min(v.z);
            max_z = max_z.max(v.z);
        }
        if !min_x.is_finite() || max_x - min_x < 0.0 {
            return Err(Error::DegenerateFrame("empty frame".into()));
        }

        // View space looks down -Z: znear/zfar are positive distances
        let znear = (-max_z).max(0.0);
        let zfar = -min_z + margin;
        if zfar <= znear {
            return Err(Error::DegenerateFrame("near/far collapse".into()));
        }

        let proj = Matrix4::new_orthographic(
            min_x - margin,
            max_x + margin,
            min_y - margin,
            max_y + margin,
            znear,
            zfar,
        );

        Ok(Self {
            view,
            proj,
            view_dir: dir,
        })
    }

    /// World-space direction the camera looks along (unit)
    #[inline]
    pub fn view_direction(&self) -> Vector3<f64> {
        self.view_dir
    }

    /// Project a world point to NDC (x, y, depth)
    #[inline]
    pub fn project(&self, p: &Point3<f64>) -> Point3<f64> {
        self.proj.transform_point(&self.view.transform_point(p))
    }
}

fn unit(v: &Vector3<f64>) -> Result<Vector3<f64>> {
    let norm = v.norm();
    if norm < 1e-9 {
        return Err(Error::DegenerateFrame("zero-length normal".into()));
    }
    Ok(v / norm)
}
