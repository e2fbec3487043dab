// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SVG serialization of composed sheets.
//!
//! One serializer over the typed primitive list; content outside the
//! viewBox (e.g. host-wall geometry beyond the frame) is cropped by the
//! viewer, which is the intended behavior.

use crate::primitives::{Primitive, Sheet, Stroke, TextAnchor};
use std::fmt::Write;

const DASH_PATTERN: &str = "6 4";

impl Sheet {
    /// Serialize the sheet to a standalone SVG document
    pub fn to_svg(&self) -> String {
        let mut out = String::with_capacity(4096 + self.primitives.len() * 96);
        let _ = write!(
            out,
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" "#,
                r#"width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
                "\n"
            ),
            w = self.width,
            h = self.height
        );
        let _ = writeln!(out, "<title>{}</title>", escape(&self.title));

        for primitive in &self.primitives {
            render_primitive(&mut out, primitive);
        }

        out.push_str("</svg>\n");
        out
    }
}

fn render_primitive(out: &mut String, primitive: &Primitive) {
    match primitive {
        Primitive::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
        } => {
            let _ = writeln!(
                out,
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}"{}/>"#,
                x1,
                y1,
                x2,
                y2,
                stroke_attrs(stroke)
            );
        }
        Primitive::Polygon {
            points,
            fill,
            opacity,
            stroke,
        } => {
            let mut attr = String::new();
            for (i, (x, y)) in points.iter().enumerate() {
                if i > 0 {
                    attr.push(' ');
                }
                let _ = write!(attr, "{:.2},{:.2}", x, y);
            }
            let stroke_part = stroke.map(|s| stroke_attrs(&s)).unwrap_or_default();
            let _ = writeln!(
                out,
                r#"<polygon points="{}" fill="{}" fill-opacity="{:.2}"{}/>"#,
                attr,
                fill.hex(),
                opacity,
                if stroke_part.is_empty() {
                    r#" stroke="none""#.to_string()
                } else {
                    stroke_part
                }
            );
        }
        Primitive::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        } => {
            let fill_part = match fill {
                Some(c) => format!(r#" fill="{}""#, c.hex()),
                None => r#" fill="none""#.to_string(),
            };
            let stroke_part = stroke.map(|s| stroke_attrs(&s)).unwrap_or_default();
            let _ = writeln!(
                out,
                r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"{}{}/>"#,
                x, y, width, height, fill_part, stroke_part
            );
        }
        Primitive::Text {
            x,
            y,
            size,
            content,
            anchor,
            color,
        } => {
            let anchor = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let _ = writeln!(
                out,
                concat!(
                    r#"<text x="{:.2}" y="{:.2}" font-size="{:.1}" "#,
                    r#"font-family="sans-serif" text-anchor="{}" fill="{}">{}</text>"#
                ),
                x,
                y,
                size,
                anchor,
                color.hex(),
                escape(content)
            );
        }
    }
}

fn stroke_attrs(stroke: &Stroke) -> String {
    let mut attrs = format!(
        r#" stroke="{}" stroke-width="{:.2}""#,
        stroke.color.hex(),
        stroke.width
    );
    if stroke.dashed {
        let _ = write!(attrs, r#" stroke-dasharray="{}""#, DASH_PATTERN);
    }
    attrs
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
