// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end pipeline tests: elements -> resolved contexts -> projected
//! views -> composed sheets -> SVG.

use plan2d_context::ContextResolver;
use plan2d_drawing::{render_door_sheets, render_space_sheets, CanvasConfig, Primitive};
use plan2d_model::{
    Aabb, ContextFilter, Element, Matrix4, ModelQuery, Point3, QueryError, TriangleMesh,
};

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

/// Canned relationship answers for a one-door model
struct StaticQuery;

impl ModelQuery for StaticQuery {
    fn containing_storey(&self, _id: u64) -> Result<Option<String>, QueryError> {
        Ok(Some("Level 1".into()))
    }

    fn operation_type(&self, id: u64) -> Result<Option<String>, QueryError> {
        Ok((id == 1).then(|| "SINGLE_SWING_LEFT".into()))
    }

    fn related_operation_type(&self, _id: u64) -> Result<Option<String>, QueryError> {
        Ok(None)
    }

    fn type_name(&self, id: u64) -> Result<Option<String>, QueryError> {
        Ok((id == 1).then(|| "Interior door 90x210".into()))
    }
}

fn model() -> Vec<Element> {
    let door = Element::new(1, "IfcDoor", vec![box_mesh((0.0, 0.0, 0.0), (0.1, 1.0, 2.1))]);
    let wall = Element::new(
        2,
        "IfcWall",
        vec![box_mesh((0.0, -2.0, 0.0), (0.1, 3.0, 2.4))],
    );
    vec![door, wall]
}

fn texts(primitives: &[Primitive]) -> Vec<&str> {
    primitives
        .iter()
        .filter_map(|p| match p {
            Primitive::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn hosted_door_produces_elevation_and_plan_sheets() {
    let elements = model();
    let resolver = ContextResolver::new(&StaticQuery);
    let contexts = resolver.resolve_doors(&elements, &[]);
    assert_eq!(contexts.len(), 1);
    assert!(contexts[0].host_wall.is_some());

    let outcome = render_door_sheets(&contexts, &ContextFilter::any(), &CanvasConfig::default());
    assert!(outcome.is_complete());
    assert_eq!(outcome.sheets.len(), 2);
    assert_eq!(outcome.sheets[0].title, "Door 1 - Elevation");
    assert_eq!(outcome.sheets[1].title, "Door 1 - Plan");

    // Title block carries the resolved relationships
    let details = texts(&outcome.sheets[0].primitives).join("\n");
    assert!(details.contains("Interior door 90x210"));
    assert!(details.contains("Level 1"));
}

#[test]
fn plan_sheet_draws_the_swing_symbol_dashed() {
    let elements = model();
    let resolver = ContextResolver::new(&StaticQuery);
    let contexts = resolver.resolve_doors(&elements, &[]);

    let outcome = render_door_sheets(&contexts, &ContextFilter::any(), &CanvasConfig::default());
    let plan = &outcome.sheets[1];
    let dashed_lines = plan
        .primitives
        .iter()
        .filter(|p| matches!(p, Primitive::Line { stroke, .. } if stroke.dashed))
        .count();
    assert!(dashed_lines >= 1, "open-leaf line should be dashed");
    assert!(plan.to_svg().contains("stroke-dasharray"));
}

#[test]
fn storey_filter_narrows_the_batch() {
    let elements = model();
    let resolver = ContextResolver::new(&StaticQuery);
    let contexts = resolver.resolve_doors(&elements, &[]);

    let pass = ContextFilter {
        storeys: vec!["level 1".into()],
        ..ContextFilter::default()
    };
    assert_eq!(
        render_door_sheets(&contexts, &pass, &CanvasConfig::default())
            .sheets
            .len(),
        2
    );

    let reject = ContextFilter {
        storeys: vec!["level 9".into()],
        ..ContextFilter::default()
    };
    let outcome = render_door_sheets(&contexts, &reject, &CanvasConfig::default());
    assert!(outcome.sheets.is_empty());
    assert!(outcome.failures.is_empty());
}

#[test]
fn meshless_space_gets_an_annotated_fallback_plan() {
    let space = Element::from_bbox(
        10,
        "IfcSpace",
        Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 3.0, 2.7)),
    );
    let elements = vec![space];
    let resolver = ContextResolver::new(&StaticQuery);
    let contexts = resolver.resolve_spaces(&elements);
    assert_eq!(contexts.len(), 1);

    let outcome = render_space_sheets(&contexts, &ContextFilter::any(), &CanvasConfig::default());
    assert!(outcome.is_complete());
    assert_eq!(outcome.sheets.len(), 1);
    let sheet = &outcome.sheets[0];
    assert_eq!(sheet.title, "Space 10 - Floor plan");
    assert!(texts(&sheet.primitives)
        .iter()
        .any(|t| t.contains("approximate outline")));

    let svg = sheet.to_svg();
    assert!(svg.starts_with("<svg "));
    assert!(svg.contains("</svg>"));
}

#[test]
fn sheets_serialize_to_json() {
    let elements = model();
    let resolver = ContextResolver::new(&StaticQuery);
    let contexts = resolver.resolve_doors(&elements, &[]);
    let outcome = render_door_sheets(&contexts, &ContextFilter::any(), &CanvasConfig::default());
    let json = outcome.sheets[0].to_json().unwrap();
    assert!(json.contains("\"title\":\"Door 1 - Elevation\""));
}
