// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed query interface over the external model.
//!
//! Spatial containment and type-definition relationships live in the
//! model-loading layer; the core never inspects raw property structures.
//! Every query returns `Ok(None)` for "not related" and `Err` only for
//! genuine lookup failures, which the resolver logs and degrades to
//! partial context.

use thiserror::Error;

/// Errors surfaced by the external model-query collaborator
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Unknown element id {0}")]
    UnknownElement(u64),

    #[error("Model query backend failure: {0}")]
    Backend(String),
}

/// Relationship queries answered by the model-loading layer.
///
/// Opening-direction codes follow the IFC door-operation vocabulary
/// (`SINGLE_SWING_LEFT`, `DOUBLE_DOOR_SINGLE_SWING`, `SLIDING_TO_RIGHT`,
/// ...); the instance-level value overrides the type-level one.
pub trait ModelQuery {
    /// Name of the nearest enclosing storey, if the element is contained
    fn containing_storey(&self, id: u64) -> Result<Option<String>, QueryError>;

    /// Opening-direction code set directly on the element instance
    fn operation_type(&self, id: u64) -> Result<Option<String>, QueryError>;

    /// Opening-direction code inherited from the element's type definition
    fn related_operation_type(&self, id: u64) -> Result<Option<String>, QueryError>;

    /// Human-readable type name (e.g. "Interior door 90x210")
    fn type_name(&self, id: u64) -> Result<Option<String>, QueryError>;
}

/// Null implementation: answers every query with `None`.
/// Used for tests and for models loaded without relationship data.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoModelQuery;

impl ModelQuery for NoModelQuery {
    fn containing_storey(&self, _id: u64) -> Result<Option<String>, QueryError> {
        Ok(None)
    }

    fn operation_type(&self, _id: u64) -> Result<Option<String>, QueryError> {
        Ok(None)
    }

    fn related_operation_type(&self, _id: u64) -> Result<Option<String>, QueryError> {
        Ok(None)
    }

    fn type_name(&self, _id: u64) -> Result<Option<String>, QueryError> {
        Ok(None)
    }
}
