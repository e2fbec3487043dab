// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! plan2d Element Context Resolution
//!
//! Resolves the contextual relationships a drawing needs before any
//! projection happens: which wall hosts a door, which devices sit in the
//! same wall plane next to it, which storey it belongs to, and what a
//! space's floor outline looks like. One [`ContextResolver`] is built per
//! analysis session; every relationship that cannot be resolved is
//! represented as `None`, never as an error.

pub mod door;
pub mod error;
pub mod normal;
pub mod outline;
pub mod resolver;
pub mod space;

pub use door::DoorContext;
pub use error::{Error, Result};
pub use normal::{EstimatedNormal, NormalMethod};
pub use outline::{FloorOutline, OutlineMethod};
pub use resolver::{ContextResolver, ResolverConfig};
pub use space::SpaceContext;
