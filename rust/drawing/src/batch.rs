// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batch sheet rendering.
//!
//! Fans out over resolved contexts with rayon. One failing element never
//! aborts the batch: its error is recorded alongside the sheets that did
//! render. Each worker owns its composer so color tables stay per-sheet
//! deterministic regardless of scheduling order.

use crate::composer::{Composer, SheetHeader};
use crate::config::CanvasConfig;
use crate::error::Result;
use crate::primitives::Sheet;
use plan2d_context::{DoorContext, SpaceContext};
use plan2d_model::ContextFilter;
use plan2d_projection::{render_elevation, render_plan, render_space_plan, ViewKind};
use rayon::prelude::*;
use serde::Serialize;

/// One element that failed to render
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    pub element_id: u64,
    pub message: String,
}

/// The sheets and failures of one batch run
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub sheets: Vec<Sheet>,
    pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

fn door_sheets(ctx: &DoorContext, config: &CanvasConfig) -> Result<Vec<Sheet>> {
    let mut composer = Composer::new(config.clone());
    let elevation = render_elevation(ctx)?;
    let plan = render_plan(ctx)?;
    Ok(vec![
        composer.compose(&SheetHeader::for_door(ctx, ViewKind::Elevation), &elevation)?,
        composer.compose(&SheetHeader::for_door(ctx, ViewKind::Plan), &plan)?,
    ])
}

fn space_sheets(ctx: &SpaceContext, config: &CanvasConfig) -> Result<Vec<Sheet>> {
    let mut composer = Composer::new(config.clone());
    let plan = render_space_plan(ctx)?;
    Ok(vec![composer.compose(&SheetHeader::for_space(ctx), &plan)?])
}

fn collect<T: Sync>(
    items: &[T],
    keep: impl Fn(&T) -> bool + Sync,
    id: impl Fn(&T) -> u64 + Sync,
    render: impl Fn(&T) -> Result<Vec<Sheet>> + Sync,
) -> BatchOutcome {
    let results: Vec<(u64, Result<Vec<Sheet>>)> = items
        .par_iter()
        .filter(|item| keep(item))
        .map(|item| (id(item), render(item)))
        .collect();

    let mut outcome = BatchOutcome::default();
    for (element_id, result) in results {
        match result {
            Ok(sheets) => outcome.sheets.extend(sheets),
            Err(err) => {
                tracing::warn!(element_id, error = %err, "sheet rendering failed");
                outcome.failures.push(BatchFailure {
                    element_id,
                    message: err.to_string(),
                });
            }
        }
    }
    outcome
}

/// Render elevation and plan sheets for every door context passing the filter
pub fn render_door_sheets(
    contexts: &[DoorContext],
    filter: &ContextFilter,
    config: &CanvasConfig,
) -> BatchOutcome {
    collect(
        contexts,
        |ctx| ctx.matches(filter),
        |ctx| ctx.door.id,
        |ctx| door_sheets(ctx, config),
    )
}

/// Render a floor-plan sheet for every space context passing the filter
pub fn render_space_sheets(
    contexts: &[SpaceContext],
    filter: &ContextFilter,
    config: &CanvasConfig,
) -> BatchOutcome {
    collect(
        contexts,
        |ctx| ctx.matches(filter),
        |ctx| ctx.space.id,
        |ctx| space_sheets(ctx, config),
    )
}
