// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Door swing-arc synthesis for plan views.
//!
//! Parses the IFC-style opening-direction code and, for swing doors,
//! generates the standard plan symbol in world space: the closed leaf
//! line, a 90-degree arc from the latch to the open position, and a
//! dashed fully-open reference line. The sweep direction is chosen so
//! that the open leaf lands on the side the effective normal points;
//! because the symbol is generated in world space and projected like any
//! other edge, a flipped measured normal or a rotated plan camera cannot
//! mirror it incorrectly.

use nalgebra::{Point3, Rotation3, Vector3};

/// Opening mechanism parsed from the direction code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpeningKind {
    Swing,
    Sliding,
    Folding,
    None,
}

/// Which end of the width axis carries the hinge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HingeSide {
    Left,
    Right,
    /// Double door: one leaf per side
    Both,
}

/// Parsed opening style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningStyle {
    pub kind: OpeningKind,
    pub hinge: HingeSide,
}

/// Parse an opening-direction code such as `SINGLE_SWING_LEFT` or
/// `DOUBLE_DOOR_SINGLE_SWING`. Unknown codes parse to `OpeningKind::None`.
pub fn parse_opening_code(code: &str) -> OpeningStyle {
    let c = code.to_ascii_uppercase();
    let kind = if c.contains("SLIDING") {
        OpeningKind::Sliding
    } else if c.contains("FOLDING") {
        OpeningKind::Folding
    } else if c.contains("SWING") {
        OpeningKind::Swing
    } else {
        OpeningKind::None
    };
    let hinge = if c.contains("DOUBLE_DOOR") {
        HingeSide::Both
    } else if c.contains("RIGHT") {
        HingeSide::Right
    } else {
        // LEFT is also the fallback for codes that omit the side
        HingeSide::Left
    };
    OpeningStyle { kind, hinge }
}

/// Swing-arc generation parameters
#[derive(Debug, Clone, Copy)]
pub struct SwingConfig {
    /// Arc sweep in radians
    pub sweep: f64,
    /// Number of line segments approximating the arc
    pub segments: usize,
}

impl Default for SwingConfig {
    fn default() -> Self {
        Self {
            sweep: std::f64::consts::FRAC_PI_2,
            segments: 20,
        }
    }
}

/// A world-space symbol segment, projected later like mesh edges
#[derive(Debug, Clone, Copy)]
pub struct SymbolSegment {
    pub a: Point3<f64>,
    pub b: Point3<f64>,
    pub dashed: bool,
}

/// Synthesize the swing symbol for a door.
///
/// `center` is the door center, `normal` the effective facing normal,
/// `width` the door width along the width axis (vertical x normal).
/// Returns an empty list for non-swing openings.
pub fn synthesize_swing(
    style: OpeningStyle,
    center: Point3<f64>,
    normal: &Vector3<f64>,
    width: f64,
    config: &SwingConfig,
) -> Vec<SymbolSegment> {
    if style.kind != OpeningKind::Swing || width <= 0.0 {
        return Vec::new();
    }
    let n = {
        let norm = normal.norm();
        if norm < 1e-9 {
            return Vec::new();
        }
        normal / norm
    };
    let width_axis = {
        let w = Vector3::z().cross(&n);
        let norm = w.norm();
        if norm < 1e-9 {
            return Vec::new();
        }
        w / norm
    };
    let half = width / 2.0;

    let mut segments = Vec::new();
    match style.hinge {
        HingeSide::Left => leaf(
            center - width_axis * half,
            center + width_axis * half,
            &n,
            config,
            &mut segments,
        ),
        HingeSide::Right => leaf(
            center + width_axis * half,
            center - width_axis * half,
            &n,
            config,
            &mut segments,
        ),
        HingeSide::Both => {
            // Two half-width leaves latching at the center
            leaf(center - width_axis * half, center, &n, config, &mut segments);
            leaf(center + width_axis * half, center, &n, config, &mut segments);
        }
    }
    segments
}

/// One leaf: closed line, arc from closed to open, dashed open line.
///
/// The rotation sign is the one that lands the open position on the
/// normal side of the wall plane.
fn leaf(
    hinge: Point3<f64>,
    latch: Point3<f64>,
    normal: &Vector3<f64>,
    config: &SwingConfig,
    out: &mut Vec<SymbolSegment>,
) {
    let closed = latch - hinge;

    let candidate = Rotation3::from_axis_angle(&Vector3::z_axis(), config.sweep) * closed;
    let sign = if candidate.dot(normal) >= 0.0 { 1.0 } else { -1.0 };

    // Closed leaf line
    out.push(SymbolSegment {
        a: hinge,
        b: latch,
        dashed: false,
    });

    // Arc from the closed position to the open position
    let mut prev = latch;
    for i in 1..=config.segments {
        let angle = sign * config.sweep * (i as f64) / (config.segments as f64);
        let p = hinge + Rotation3::from_axis_angle(&Vector3::z_axis(), angle) * closed;
        out.push(SymbolSegment {
            a: prev,
            b: p,
            dashed: false,
        });
        prev = p;
    }

    // Dashed fully-open reference line
    out.push(SymbolSegment {
        a: hinge,
        b: prev,
        dashed: true,
    });
}
