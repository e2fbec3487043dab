// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! plan2d Element Data Model
//!
//! Geometry primitives and the element data model consumed by the context
//! resolver and the drawing pipeline. Elements arrive fully loaded from an
//! external model-loading layer; this crate only reads them.

pub mod aabb;
pub mod element;
pub mod error;
pub mod filter;
pub mod mesh;
pub mod query;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point2, Point3, Vector2, Vector3};

pub use aabb::Aabb;
pub use element::{Element, ElementClass};
pub use error::{Error, Result};
pub use filter::ContextFilter;
pub use mesh::TriangleMesh;
pub use query::{ModelQuery, NoModelQuery, QueryError};
