// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! plan2d Drawing Composition
//!
//! Fits projected view content onto a pixel canvas and emits typed vector
//! primitives (lines, polygons, labels, legend, title block) plus an SVG
//! serializer. The primitive list is the output contract: downstream
//! consumers may serialize it to SVG, JSON, or anything else.

pub mod batch;
pub mod color;
pub mod composer;
pub mod config;
pub mod error;
pub mod primitives;
pub mod svg;

pub use batch::{render_door_sheets, render_space_sheets, BatchFailure, BatchOutcome};
pub use color::ColorTable;
pub use composer::{Composer, SheetHeader};
pub use config::CanvasConfig;
pub use error::{Error, Result};
pub use primitives::{Color, Primitive, Sheet, Stroke, TextAnchor};
