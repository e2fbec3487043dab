// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! plan2d Orthographic Projection & Silhouette Extraction
//!
//! Turns the 3D geometry of a resolved context into 2D vector primitives:
//! sharp silhouette edges, back-face-culled triangle fills, and the door
//! swing symbol for plan views. All projected coordinates are normalized
//! device coordinates in [-1, 1]; fitting to a pixel canvas happens in the
//! drawing crate.

pub mod camera;
pub mod clip;
pub mod edges;
pub mod error;
pub mod fill;
pub mod swing;
pub mod view;

pub use camera::OrthoCamera;
pub use clip::clip_segment;
pub use edges::{extract_sharp_edges, EdgeExtractorConfig, ProjectedEdge};
pub use error::{Error, Result};
pub use fill::{extract_fills, FillKind, ProjectedPolygon};
pub use swing::{parse_opening_code, synthesize_swing, HingeSide, OpeningKind, SwingConfig};
pub use view::{
    render_elevation, render_plan, render_space_plan, RenderMode, ViewDrawing, ViewEdge, ViewKind,
};
