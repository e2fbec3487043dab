// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Canvas configuration.

use crate::primitives::Color;
use serde::{Deserialize, Serialize};

/// Target canvas and styling for composed sheets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Blank margin around the drawing area, in pixels
    pub margin: f64,
    /// Stroke width for element edges
    pub stroke_width: f64,
    /// Stroke width for symbol lines (swing arcs, outlines)
    pub symbol_stroke_width: f64,
    /// Fill opacity for projected polygons
    pub fill_opacity: f64,
    /// Background color
    pub background: Color,
    /// Whether to draw the class legend
    pub legend: bool,
    /// Whether to draw the title block
    pub title_block: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 700,
            margin: 40.0,
            stroke_width: 1.5,
            symbol_stroke_width: 1.0,
            fill_opacity: 0.35,
            background: Color::WHITE,
            legend: true,
            title_block: true,
        }
    }
}

impl CanvasConfig {
    /// Height reserved at the bottom for the title block
    pub(crate) fn title_block_height(&self) -> f64 {
        if self.title_block {
            64.0
        } else {
            0.0
        }
    }
}
