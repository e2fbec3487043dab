// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-composer color assignment.
//!
//! Each composer owns its table, so two sessions never share color state.
//! Element classes have fixed colors; unrecognized type labels get a
//! deterministic color from a rotating palette on first sight.

use crate::primitives::Color;
use plan2d_model::ElementClass;
use plan2d_projection::{FillKind, ProjectedPolygon};
use rustc_hash::FxHashMap;

/// Rotating palette for labels outside the fixed class table
const LABEL_PALETTE: [Color; 6] = [
    Color::new(0x8e, 0x44, 0xad),
    Color::new(0x16, 0xa0, 0x85),
    Color::new(0xd3, 0x54, 0x00),
    Color::new(0x2c, 0x3e, 0x50),
    Color::new(0xc0, 0x39, 0x2b),
    Color::new(0x27, 0x60, 0xae),
];

/// Color table owned by one composer
#[derive(Debug, Default)]
pub struct ColorTable {
    labels: FxHashMap<String, Color>,
}

impl ColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed color for an element class
    pub fn class_color(&self, class: ElementClass) -> Color {
        match class {
            ElementClass::Door => Color::new(0x8b, 0x5a, 0x2b),
            ElementClass::Wall => Color::new(0x9e, 0x9e, 0x9e),
            ElementClass::Window => Color::new(0xa8, 0xd4, 0xe6),
            ElementClass::Device => Color::new(0xe6, 0x7e, 0x22),
            ElementClass::Space => Color::new(0xb8, 0xd8, 0xb8),
            ElementClass::Slab => Color::new(0x6e, 0x6e, 0x6e),
            ElementClass::Other => Color::new(0xbd, 0xbd, 0xbd),
        }
    }

    /// Glass fill for transparent elements
    pub fn glass_color(&self) -> Color {
        Color::new(0xc8, 0xe8, 0xf8)
    }

    /// Fill color for a projected polygon
    pub fn fill_color(&mut self, polygon: &ProjectedPolygon) -> Color {
        match &polygon.kind {
            FillKind::Element(class) => self.class_color(*class),
            FillKind::Labeled(label) => self.label_color(label),
            FillKind::Glass => self.glass_color(),
        }
    }

    /// Stroke color for a projected edge
    pub fn edge_color(&mut self, class: ElementClass, label: Option<&str>) -> Color {
        match label {
            Some(label) => self.label_color(label),
            None => self.class_color(class),
        }
    }

    /// Deterministic on-demand color for a raw type label
    pub fn label_color(&mut self, label: &str) -> Color {
        if let Some(c) = self.labels.get(label) {
            return *c;
        }
        let color = LABEL_PALETTE[self.labels.len() % LABEL_PALETTE.len()];
        self.labels.insert(label.to_string(), color);
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_colors_are_stable_within_a_table() {
        let mut table = ColorTable::new();
        let a1 = table.label_color("Custom panel A");
        let b = table.label_color("Custom panel B");
        let a2 = table.label_color("Custom panel A");
        assert_eq!(a1, a2);
        assert_ne!(a1, b);
    }

    #[test]
    fn labeled_fills_resolve_through_the_label_map() {
        use plan2d_model::Point2;
        let mut table = ColorTable::new();
        let polygon = |label: &str| ProjectedPolygon {
            points: vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(0.0, 1.0),
            ],
            kind: FillKind::Labeled(label.to_string()),
            depth: 0.0,
        };
        let a = table.fill_color(&polygon("Plant pot"));
        let b = table.fill_color(&polygon("Floor lamp"));
        assert_ne!(a, b);
        // Edge and fill of the same label share one color
        assert_eq!(table.edge_color(ElementClass::Other, Some("Plant pot")), a);
        assert_eq!(table.edge_color(ElementClass::Other, None), table.class_color(ElementClass::Other));
    }

    #[test]
    fn tables_are_independent() {
        let mut t1 = ColorTable::new();
        let mut t2 = ColorTable::new();
        t1.label_color("X");
        // First assignment in each table gets the first palette slot
        assert_eq!(t1.label_color("X"), t2.label_color("Y"));
    }
}
