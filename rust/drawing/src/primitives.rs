// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed drawing primitives.
//!
//! A [`Sheet`] is a canvas size plus an ordered primitive list; order is
//! paint order. The types are plain data with serde derives so sheets can
//! be shipped to a UI as JSON or serialized to SVG locally.

use serde::{Deserialize, Serialize};

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);

    /// CSS hex form, e.g. `#1a2b3c`
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Stroke style for lines and outlines
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub dashed: bool,
}

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// One drawing primitive in canvas pixel coordinates (y grows downward)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: Stroke,
    },
    Polygon {
        points: Vec<(f64, f64)>,
        fill: Color,
        opacity: f64,
        stroke: Option<Stroke>,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Text {
        x: f64,
        y: f64,
        size: f64,
        content: String,
        anchor: TextAnchor,
        color: Color,
    },
}

/// A composed drawing: canvas size plus paint-ordered primitives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheet {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub primitives: Vec<Primitive>,
}

impl Sheet {
    /// Serialize to JSON for downstream consumers
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_hex() {
        assert_eq!(Color::new(26, 43, 60).hex(), "#1a2b3c");
        assert_eq!(Color::WHITE.hex(), "#ffffff");
    }

    #[test]
    fn sheet_json_roundtrip() {
        let sheet = Sheet {
            width: 100,
            height: 50,
            title: "Door 1".into(),
            primitives: vec![Primitive::Line {
                x1: 0.0,
                y1: 0.0,
                x2: 10.0,
                y2: 10.0,
                stroke: Stroke {
                    color: Color::BLACK,
                    width: 1.0,
                    dashed: false,
                },
            }],
        };
        let json = sheet.to_json().unwrap();
        let back: Sheet = serde_json::from_str(&json).unwrap();
        assert_eq!(back.primitives, sheet.primitives);
        assert_eq!(back.title, "Door 1");
    }
}
