//! Unit resolution shared by `add` and `edit`.

use fitlog_core::storage::{SqliteStorage, UnitKind};

use crate::app::AppContext;
use crate::helpers::resolve_unit;

/// Unit ID for a measured value: the explicit `--*-unit`, else `fallback`,
/// else the configured default.
pub fn unit_for(
    ctx: &AppContext,
    storage: &SqliteStorage,
    kind: UnitKind,
    explicit: Option<&str>,
    fallback: Option<i64>,
) -> anyhow::Result<i64> {
    if let Some(name) = explicit {
        return Ok(resolve_unit(storage, kind, name)?.id);
    }
    if let Some(id) = fallback {
        return Ok(id);
    }
    let default = match kind {
        UnitKind::Weight => ctx.weight_unit(),
        UnitKind::Distance => ctx.distance_unit(),
    };
    Ok(resolve_unit(storage, kind, &default)?.id)
}
