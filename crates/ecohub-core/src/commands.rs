//! Mutation commands accepted by `apply()`

use crate::model::{EntityKind, Fields, Record, RecordId, RecordKey};

/// A single mutation against one entity collection
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Create {
        entity: EntityKind,
        fields: Fields,
    },

    /// Shallow-merge `fields` into an existing record
    Update {
        entity: EntityKind,
        id: RecordKey,
        fields: Fields,
    },

    Delete {
        entity: EntityKind,
        id: RecordKey,
    },
}

impl Command {
    pub fn entity(&self) -> EntityKind {
        match self {
            Command::Create { entity, .. }
            | Command::Update { entity, .. }
            | Command::Delete { entity, .. } => *entity,
        }
    }
}

/// What a successfully applied command did
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    Created(Record),
    Updated(Record),
    Deleted(RecordId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_entity() {
        let cmd = Command::Delete {
            entity: EntityKind::Connection,
            id: RecordKey::from(4u64),
        };
        assert_eq!(cmd.entity(), EntityKind::Connection);
    }

    #[test]
    fn test_command_clone_eq() {
        let cmd = Command::Update {
            entity: EntityKind::Challenge,
            id: RecordKey::from("1"),
            fields: Fields::new().with("title", "Updated"),
        };
        assert_eq!(cmd.clone(), cmd);
    }
}
