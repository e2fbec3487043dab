// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sheet composition.
//!
//! Takes the depth-sorted NDC content of one view and lays it onto a
//! pixel canvas: background, fills, edges, legend, labels, title block.
//! The NDC square [-1, 1] is fitted uniformly into the drawing area with
//! the Y axis flipped (canvas y grows downward).

use crate::color::ColorTable;
use crate::config::CanvasConfig;
use crate::error::{Error, Result};
use crate::primitives::{Color, Primitive, Sheet, Stroke, TextAnchor};
use plan2d_context::{DoorContext, SpaceContext};
use plan2d_model::ElementClass;
use plan2d_projection::{RenderMode, ViewDrawing, ViewKind};

/// Text metadata shown on a sheet
#[derive(Debug, Clone)]
pub struct SheetHeader {
    pub title: String,
    pub type_name: Option<String>,
    pub storey: Option<String>,
    pub element_id: u64,
    pub global_id: Option<String>,
}

impl SheetHeader {
    /// Header for a door view
    pub fn for_door(ctx: &DoorContext, view: ViewKind) -> Self {
        let view_label = match view {
            ViewKind::Elevation => "Elevation",
            ViewKind::Plan => "Plan",
        };
        Self {
            title: format!("Door {} - {}", ctx.door.id, view_label),
            type_name: ctx.door_type_name.clone(),
            storey: ctx.storey_name.clone(),
            element_id: ctx.door.id,
            global_id: ctx.door.global_id.clone(),
        }
    }

    /// Header for a space floor plan
    pub fn for_space(ctx: &SpaceContext) -> Self {
        Self {
            title: format!("Space {} - Floor plan", ctx.space.id),
            type_name: ctx.space_type_name.clone(),
            storey: ctx.storey_name.clone(),
            element_id: ctx.space.id,
            global_id: ctx.space.global_id.clone(),
        }
    }
}

fn class_label(class: ElementClass) -> &'static str {
    match class {
        ElementClass::Door => "Door",
        ElementClass::Wall => "Wall",
        ElementClass::Window => "Window",
        ElementClass::Device => "Device",
        ElementClass::Space => "Space",
        ElementClass::Slab => "Slab",
        ElementClass::Other => "Other",
    }
}

/// Composes sheets for one analysis session
pub struct Composer {
    config: CanvasConfig,
    colors: ColorTable,
}

impl Composer {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            config,
            colors: ColorTable::new(),
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Compose one view into a sheet
    pub fn compose(&mut self, header: &SheetHeader, drawing: &ViewDrawing) -> Result<Sheet> {
        let cfg = &self.config;
        let width = cfg.width as f64;
        let height = cfg.height as f64;
        let avail_w = width - 2.0 * cfg.margin;
        let avail_h = height - 2.0 * cfg.margin - cfg.title_block_height();
        if avail_w <= 0.0 || avail_h <= 0.0 {
            return Err(Error::CanvasTooSmall(cfg.width, cfg.height, cfg.margin));
        }

        // Uniform NDC -> pixel mapping, Y flipped
        let scale = (avail_w / 2.0).min(avail_h / 2.0);
        let cx = width / 2.0;
        let cy = cfg.margin + avail_h / 2.0;
        let map = |x: f64, y: f64| (cx + x * scale, cy - y * scale);

        let mut primitives = Vec::new();

        primitives.push(Primitive::Rect {
            x: 0.0,
            y: 0.0,
            width,
            height,
            fill: Some(cfg.background),
            stroke: None,
        });

        // Fills first, already back-to-front
        for polygon in &drawing.polygons {
            let points: Vec<(f64, f64)> =
                polygon.points.iter().map(|p| map(p.x, p.y)).collect();
            primitives.push(Primitive::Polygon {
                points,
                fill: self.colors.fill_color(polygon),
                opacity: cfg.fill_opacity,
                stroke: None,
            });
        }

        // Edges over the fills, already back-to-front
        for view_edge in &drawing.edges {
            let (x1, y1) = map(view_edge.edge.x1, view_edge.edge.y1);
            let (x2, y2) = map(view_edge.edge.x2, view_edge.edge.y2);
            let dashed = view_edge.edge.dashed;
            primitives.push(Primitive::Line {
                x1,
                y1,
                x2,
                y2,
                stroke: Stroke {
                    color: self
                        .colors
                        .edge_color(view_edge.class, view_edge.label.as_deref()),
                    width: if dashed {
                        cfg.symbol_stroke_width
                    } else {
                        cfg.stroke_width
                    },
                    dashed,
                },
            });
        }

        if drawing.mode == RenderMode::BoundingBox {
            primitives.push(Primitive::Text {
                x: cfg.margin,
                y: cfg.margin,
                size: 11.0,
                content: "approximate outline (no mesh geometry)".into(),
                anchor: TextAnchor::Start,
                color: Color::new(0x88, 0x33, 0x33),
            });
        }

        if cfg.legend {
            self.push_legend(drawing, &mut primitives);
        }
        if cfg.title_block {
            self.push_title_block(header, &mut primitives);
        }

        Ok(Sheet {
            width: cfg.width,
            height: cfg.height,
            title: header.title.clone(),
            primitives,
        })
    }

    /// Legend: one swatch per element class present in the view
    fn push_legend(&self, drawing: &ViewDrawing, out: &mut Vec<Primitive>) {
        let mut classes: Vec<ElementClass> = Vec::new();
        for edge in &drawing.edges {
            if !classes.contains(&edge.class) {
                classes.push(edge.class);
            }
        }

        let cfg = &self.config;
        let swatch = 10.0;
        let row = 16.0;
        let x = cfg.width as f64 - cfg.margin - 90.0;
        let mut y = cfg.margin;
        for class in classes {
            out.push(Primitive::Rect {
                x,
                y,
                width: swatch,
                height: swatch,
                fill: Some(self.colors.class_color(class)),
                stroke: None,
            });
            out.push(Primitive::Text {
                x: x + swatch + 6.0,
                y: y + swatch - 1.0,
                size: 11.0,
                content: class_label(class).into(),
                anchor: TextAnchor::Start,
                color: Color::BLACK,
            });
            y += row;
        }
    }

    /// Title block along the bottom edge
    fn push_title_block(&self, header: &SheetHeader, out: &mut Vec<Primitive>) {
        let cfg = &self.config;
        let width = cfg.width as f64;
        let height = cfg.height as f64;
        let block_h = cfg.title_block_height();
        let top = height - block_h;

        out.push(Primitive::Rect {
            x: 0.5,
            y: top,
            width: width - 1.0,
            height: block_h - 0.5,
            fill: None,
            stroke: Some(Stroke {
                color: Color::BLACK,
                width: 1.0,
                dashed: false,
            }),
        });
        out.push(Primitive::Text {
            x: 12.0,
            y: top + 24.0,
            size: 16.0,
            content: header.title.clone(),
            anchor: TextAnchor::Start,
            color: Color::BLACK,
        });

        let mut details: Vec<String> = Vec::new();
        if let Some(t) = &header.type_name {
            details.push(t.clone());
        }
        if let Some(s) = &header.storey {
            details.push(s.clone());
        }
        details.push(match &header.global_id {
            Some(g) => format!("id {} / {}", header.element_id, g),
            None => format!("id {}", header.element_id),
        });
        out.push(Primitive::Text {
            x: 12.0,
            y: top + 44.0,
            size: 11.0,
            content: details.join(" | "),
            anchor: TextAnchor::Start,
            color: Color::new(0x44, 0x44, 0x44),
        });
    }
}
