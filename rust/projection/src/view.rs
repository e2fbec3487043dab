// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-context view rendering.
//!
//! One call renders one orthographic view of one resolved context:
//! resolve -> project -> synthesize symbols -> depth-sort. A context
//! without meshes degrades to a bounding-box illustration, which is a
//! first-class rendering mode rather than an error; only a missing
//! bounding box on the subject element is fatal, because no camera can
//! be framed without one.

use crate::camera::OrthoCamera;
use crate::clip::clip_segment;
use crate::edges::{collect_sharp_edges, EdgeExtractorConfig, ProjectedEdge};
use crate::error::{Error, Result};
use crate::fill::{self, extract_fills, FillKind, ProjectedPolygon};
use crate::swing::{parse_opening_code, synthesize_swing, SwingConfig, SymbolSegment};
use nalgebra::{Point2, Point3, Vector3};
use plan2d_context::{DoorContext, OutlineMethod, SpaceContext};
use plan2d_model::{Element, ElementClass};

/// Which projection a drawing shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// Front elevation along the context normal
    Elevation,
    /// Top-down section at the cut height
    Plan,
}

/// How the drawing was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Projected from mesh geometry
    Full,
    /// Simplified bounding-box illustration (no usable mesh edges)
    BoundingBox,
}

/// A projected edge tagged with the element class that produced it.
/// Unclassified elements carry their raw type label for color lookup.
#[derive(Debug, Clone)]
pub struct ViewEdge {
    pub edge: ProjectedEdge,
    pub class: ElementClass,
    pub label: Option<String>,
}

/// The projected content of one view, depth-sorted and ready to compose
#[derive(Debug, Clone)]
pub struct ViewDrawing {
    pub kind: ViewKind,
    pub mode: RenderMode,
    /// Back-to-front polygons, drawn under the edges
    pub polygons: Vec<ProjectedPolygon>,
    /// Back-to-front edges
    pub edges: Vec<ViewEdge>,
}

fn fill_kind(element: &Element) -> FillKind {
    if element.transparent {
        FillKind::Glass
    } else if element.class() == ElementClass::Other {
        FillKind::Labeled(element.type_label.clone())
    } else {
        FillKind::Element(element.class())
    }
}

/// Raw type label, carried only for elements outside the fixed classes
fn raw_label(element: &Element) -> Option<String> {
    (element.class() == ElementClass::Other).then(|| element.type_label.clone())
}

/// Render the elevation view of a door context.
///
/// The frame is the door's bounding box; host-wall and device geometry
/// beyond it is drawn anyway and cropped at composition. Wall fill sits
/// under the door fill in painter's order.
pub fn render_elevation(ctx: &DoorContext) -> Result<ViewDrawing> {
    let bbox = ctx
        .door
        .bbox
        .ok_or(Error::MissingBoundingBox(ctx.door.id))?;
    let camera = OrthoCamera::elevation(&bbox, &ctx.normal, false)?;
    let edge_config = EdgeExtractorConfig::default();

    let mut edges: Vec<ViewEdge> = Vec::new();
    let mut polygons: Vec<ProjectedPolygon> = Vec::new();

    for element in std::iter::once(&ctx.door)
        .chain(ctx.host_wall.iter())
        .chain(ctx.nearby_devices.iter())
    {
        for (a, b) in collect_sharp_edges(&element.meshes, &edge_config) {
            edges.push(ViewEdge {
                edge: ProjectedEdge::new(camera.project(&a), camera.project(&b)),
                class: element.class(),
                label: raw_label(element),
            });
        }
        polygons.extend(extract_fills(&element.meshes, &camera, fill_kind(element)));
    }

    let mode = if edges.is_empty() {
        bbox_fallback(&camera, &bbox, ElementClass::Door, &mut edges);
        RenderMode::BoundingBox
    } else {
        RenderMode::Full
    };

    Ok(finish(ViewKind::Elevation, mode, polygons, edges))
}

/// Render the plan (sectioned top-down) view of a door context, swing
/// symbol included.
pub fn render_plan(ctx: &DoorContext) -> Result<ViewDrawing> {
    let bbox = ctx
        .door
        .bbox
        .ok_or(Error::MissingBoundingBox(ctx.door.id))?;

    let style = ctx
        .opening_direction
        .as_deref()
        .map(parse_opening_code);
    let width_axis = Vector3::z().cross(&ctx.normal);
    let (ex, ey, ez) = bbox.extents();
    let width = ex * width_axis.x.abs() + ey * width_axis.y.abs() + ez * width_axis.z.abs();

    // Widen the frame horizontally so the open leaf and its arc stay on
    // the sheet; the cut height still derives from the original bottom.
    let reach = if style.is_some() { width } else { 0.0 };
    let frame = plan2d_model::Aabb::new(
        Point3::new(bbox.min.x - reach, bbox.min.y - reach, bbox.min.z),
        Point3::new(bbox.max.x + reach, bbox.max.y + reach, bbox.max.z),
    );
    let camera = OrthoCamera::plan(&frame, &ctx.normal)?;
    let edge_config = EdgeExtractorConfig::default();

    let mut edges: Vec<ViewEdge> = Vec::new();
    let mut polygons: Vec<ProjectedPolygon> = Vec::new();

    for element in std::iter::once(&ctx.door)
        .chain(ctx.host_wall.iter())
        .chain(ctx.nearby_devices.iter())
    {
        for (a, b) in collect_sharp_edges(&element.meshes, &edge_config) {
            push_clipped(&camera, a, b, false, element, &mut edges);
        }
        let mut fills = extract_fills(&element.meshes, &camera, fill_kind(element));
        // Sectioned fills above the cut are outside NDC depth
        fills.retain(|p| p.depth >= -1.0 && p.depth <= 1.0);
        polygons.extend(fills);
    }

    let mode = if edges.is_empty() {
        bbox_fallback(&camera, &bbox, ElementClass::Door, &mut edges);
        RenderMode::BoundingBox
    } else {
        RenderMode::Full
    };

    // Swing symbol, merged into the edge list before composition
    if let Some(style) = style {
        let symbol_center = Point3::new(ctx.center.x, ctx.center.y, bbox.min.z);
        for SymbolSegment { a, b, dashed } in synthesize_swing(
            style,
            symbol_center,
            &ctx.normal,
            width,
            &SwingConfig::default(),
        ) {
            push_clipped(&camera, a, b, dashed, &ctx.door, &mut edges);
        }
    }

    Ok(finish(ViewKind::Plan, mode, polygons, edges))
}

/// Render a room floor plan from a space context.
///
/// North is up; the floor outline is drawn dashed when it came from the
/// bounding-box fallback rather than measured geometry. Contained
/// elements (furniture and the like) are drawn with fill, colored by
/// their raw label when they fall outside the fixed classes.
pub fn render_space_plan(ctx: &SpaceContext) -> Result<ViewDrawing> {
    let bbox = ctx
        .space
        .bbox
        .ok_or(Error::MissingBoundingBox(ctx.space.id))?;
    // Up = -normal puts north up for a south-facing normal
    let camera = OrthoCamera::plan(&bbox, &Vector3::new(0.0, -1.0, 0.0))?;
    let edge_config = EdgeExtractorConfig::default();

    let mut edges: Vec<ViewEdge> = Vec::new();
    let mut polygons: Vec<ProjectedPolygon> = Vec::new();

    for element in ctx
        .boundary_walls
        .iter()
        .chain(ctx.boundary_doors.iter())
        .chain(ctx.boundary_windows.iter())
    {
        for (a, b) in collect_sharp_edges(&element.meshes, &edge_config) {
            push_clipped(&camera, a, b, false, element, &mut edges);
        }
    }

    for element in &ctx.contained_elements {
        for (a, b) in collect_sharp_edges(&element.meshes, &edge_config) {
            push_clipped(&camera, a, b, false, element, &mut edges);
        }
        let mut fills = extract_fills(&element.meshes, &camera, fill_kind(element));
        fills.retain(|p| p.depth >= -1.0 && p.depth <= 1.0);
        polygons.extend(fills);
    }

    let mode = match &ctx.floor_outline {
        Some(outline) => {
            let dashed = outline.method == OutlineMethod::BoundingBox;
            let level = outline.floor_level;
            let n = outline.polygon.len();
            let mut projected: Vec<Point3<f64>> = Vec::with_capacity(n);
            for p in &outline.polygon {
                projected.push(camera.project(&Point3::new(p.x, p.y, level)));
            }
            for i in 0..n {
                let a = projected[i];
                let b = projected[(i + 1) % n];
                let edge = if dashed {
                    ProjectedEdge::dashed(a, b)
                } else {
                    ProjectedEdge::new(a, b)
                };
                edges.push(ViewEdge {
                    edge,
                    class: ElementClass::Space,
                    label: None,
                });
            }
            polygons.push(ProjectedPolygon {
                points: projected.iter().map(|p| Point2::new(p.x, p.y)).collect(),
                kind: FillKind::Element(ElementClass::Space),
                depth: projected.iter().map(|p| p.z).sum::<f64>() / n.max(1) as f64,
            });
            if outline.method == OutlineMethod::Geometry {
                RenderMode::Full
            } else {
                RenderMode::BoundingBox
            }
        }
        None => {
            bbox_fallback(&camera, &bbox, ElementClass::Space, &mut edges);
            RenderMode::BoundingBox
        }
    };

    Ok(finish(ViewKind::Plan, mode, polygons, edges))
}

/// Project, clip against the NDC depth range, and push an edge
fn push_clipped(
    camera: &OrthoCamera,
    a: Point3<f64>,
    b: Point3<f64>,
    dashed: bool,
    element: &Element,
    out: &mut Vec<ViewEdge>,
) {
    let pa = camera.project(&a);
    let pb = camera.project(&b);
    if let Some((ca, cb)) = clip_segment(pa, pb) {
        let mut edge = ProjectedEdge::new(ca, cb);
        edge.dashed = dashed;
        out.push(ViewEdge {
            edge,
            class: element.class(),
            label: raw_label(element),
        });
    }
}

/// The simplified bounding-box illustration: the twelve box edges
fn bbox_fallback(
    camera: &OrthoCamera,
    bbox: &plan2d_model::Aabb,
    class: ElementClass,
    out: &mut Vec<ViewEdge>,
) {
    const BOX_EDGES: [(usize, usize); 12] = [
        (0, 1),
        (1, 3),
        (3, 2),
        (2, 0),
        (4, 5),
        (5, 7),
        (7, 6),
        (6, 4),
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
    ];
    let corners = bbox.corners();
    for (i, j) in BOX_EDGES {
        let a = camera.project(&corners[i]);
        let b = camera.project(&corners[j]);
        out.push(ViewEdge {
            edge: ProjectedEdge::new(a, b),
            class,
            label: None,
        });
    }
}

/// Depth-sort polygons and edges back to front
fn finish(
    kind: ViewKind,
    mode: RenderMode,
    mut polygons: Vec<ProjectedPolygon>,
    mut edges: Vec<ViewEdge>,
) -> ViewDrawing {
    fill::sort_back_to_front(&mut polygons);
    edges.sort_by(|a, b| b.edge.depth.total_cmp(&a.edge.depth));
    ViewDrawing {
        kind,
        mode,
        polygons,
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Matrix4;
    use plan2d_context::{ContextResolver, ResolverConfig};
    use plan2d_model::{Aabb, NoModelQuery, TriangleMesh};

    fn box_mesh(min: (f64, f64, f64), max: (f64, f64, f64)) -> TriangleMesh {
        let (x0, y0, z0) = min;
        let (x1, y1, z1) = max;
        let positions = vec![
            x0, y0, z0, x1, y0, z0, x1, y1, z0, x0, y1, z0, //
            x0, y0, z1, x1, y0, z1, x1, y1, z1, x0, y1, z1,
        ];
        let indices = vec![
            0, 2, 1, 0, 3, 2, 4, 5, 6, 4, 6, 7, 0, 1, 5, 0, 5, 4, //
            2, 3, 7, 2, 7, 6, 1, 2, 6, 1, 6, 5, 3, 0, 4, 3, 4, 7,
        ];
        TriangleMesh::with_transform(positions, vec![0.0; 24], indices, Matrix4::identity())
    }

    fn door_context(opening: Option<&str>) -> DoorContext {
        let door = Element::new(1, "IfcDoor", vec![box_mesh((0.0, 0.0, 0.0), (0.1, 1.0, 2.1))]);
        let resolver = ContextResolver::with_config(&NoModelQuery, ResolverConfig::default());
        let mut ctx = resolver.resolve_door(&door, &[], &[]).unwrap();
        ctx.opening_direction = opening.map(str::to_string);
        ctx
    }

    #[test]
    fn elevation_of_a_box_door_is_full_mode() {
        let drawing = render_elevation(&door_context(None)).unwrap();
        assert_eq!(drawing.kind, ViewKind::Elevation);
        assert_eq!(drawing.mode, RenderMode::Full);
        // A box silhouette has the 12 sharp edges
        assert_eq!(drawing.edges.len(), 12);
        assert!(!drawing.polygons.is_empty());
    }

    #[test]
    fn polygons_and_edges_are_back_to_front() {
        let drawing = render_elevation(&door_context(None)).unwrap();
        for pair in drawing.polygons.windows(2) {
            assert!(pair[0].depth >= pair[1].depth);
        }
        for pair in drawing.edges.windows(2) {
            assert!(pair[0].edge.depth >= pair[1].edge.depth);
        }
    }

    #[test]
    fn plan_includes_swing_symbol_edges() {
        let without = render_plan(&door_context(None)).unwrap();
        let with = render_plan(&door_context(Some("SINGLE_SWING_LEFT"))).unwrap();
        // Closed leaf + 20 arc segments + dashed open line
        assert_eq!(with.edges.len(), without.edges.len() + 22);
        assert!(with.edges.iter().any(|e| e.edge.dashed));
        assert!(without.edges.iter().all(|e| !e.edge.dashed));
    }

    #[test]
    fn contained_furniture_is_drawn_with_its_label() {
        let space = Element::from_bbox(
            50,
            "IfcSpace",
            Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(5.0, 4.0, 3.0)),
        );
        let pot = Element::new(
            53,
            "Plant pot",
            vec![box_mesh((2.0, 2.0, 0.0), (2.5, 2.5, 1.0))],
        );
        let ctx = SpaceContext {
            space,
            boundary_walls: vec![],
            boundary_doors: vec![],
            boundary_windows: vec![],
            contained_elements: vec![pot],
            floor_outline: None,
            storey_name: None,
            space_type_name: None,
        };
        let drawing = render_space_plan(&ctx).unwrap();
        assert!(drawing
            .edges
            .iter()
            .any(|e| e.label.as_deref() == Some("Plant pot")));
        assert!(drawing
            .polygons
            .iter()
            .any(|p| p.kind == FillKind::Labeled("Plant pot".into())));
        // The space outline itself keeps the class color path
        assert!(drawing
            .edges
            .iter()
            .any(|e| e.class == ElementClass::Space && e.label.is_none()));
    }

    #[test]
    fn meshless_door_degrades_to_bbox_mode() {
        let door = Element::from_bbox(
            1,
            "IfcDoor",
            Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(0.1, 1.0, 2.1)),
        );
        let resolver = ContextResolver::new(&NoModelQuery);
        let ctx = resolver.resolve_door(&door, &[], &[]).unwrap();
        let drawing = render_elevation(&ctx).unwrap();
        assert_eq!(drawing.mode, RenderMode::BoundingBox);
        assert_eq!(drawing.edges.len(), 12);
    }
}
