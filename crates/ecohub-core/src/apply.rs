//! Functional-boundary apply
//!
//! `apply()` takes ownership of a `Registry`, executes one command and hands
//! back the new state. Unlike the record store operations, a command that
//! targets a missing record is an error here, so that `apply_all()` can
//! abort a batch without leaving it half applied.
//!
//! ```
//! use ecohub_core::{apply::apply, Command, EntityKind, Fields, Registry};
//!
//! let cmd = Command::Create {
//!     entity: EntityKind::Challenge,
//!     fields: Fields::new().with("title", "Plant-Based Month"),
//! };
//! let (state, _applied) = apply(Registry::new(), cmd).unwrap();
//! assert_eq!(state.collection(EntityKind::Challenge).len(), 1);
//! ```

use crate::commands::{Applied, Command};
use crate::errors::{EcoHubError, Result};
use crate::ops::Registry;

/// Apply one command to `state`
///
/// # Errors
///
/// Returns `RecordNotFound` if an update or delete targets no record. The
/// state is consumed either way; use `apply_all` for all-or-nothing batches.
pub fn apply(mut state: Registry, cmd: Command) -> Result<(Registry, Applied)> {
    let applied = apply_in_place(&mut state, cmd)?;
    Ok((state, applied))
}

/// Apply a batch of commands atomically
///
/// The batch runs against a copy of `state`, which is left unchanged.
///
/// # Errors
///
/// Returns the first command error; no command of the batch takes effect.
pub fn apply_all<I>(state: &Registry, cmds: I) -> Result<(Registry, Vec<Applied>)>
where
    I: IntoIterator<Item = Command>,
{
    let mut next = state.clone();
    let mut outcomes = Vec::new();
    for cmd in cmds {
        outcomes.push(apply_in_place(&mut next, cmd)?);
    }
    Ok((next, outcomes))
}

fn apply_in_place(state: &mut Registry, cmd: Command) -> Result<Applied> {
    match cmd {
        Command::Create { entity, fields } => {
            let record = state.collection_mut(entity).create(fields);
            Ok(Applied::Created(record))
        }

        Command::Update { entity, id, fields } => state
            .collection_mut(entity)
            .update(id.clone(), fields)
            .map(Applied::Updated)
            .ok_or_else(|| EcoHubError::RecordNotFound {
                entity: entity.name().to_string(),
                id: id.to_string(),
            }),

        Command::Delete { entity, id } => {
            let resolved = id.resolve();
            match resolved {
                Some(record_id) if state.collection_mut(entity).delete(record_id) => {
                    Ok(Applied::Deleted(record_id))
                }
                _ => Err(EcoHubError::RecordNotFound {
                    entity: entity.name().to_string(),
                    id: id.to_string(),
                }),
            }
        }
    }
}
