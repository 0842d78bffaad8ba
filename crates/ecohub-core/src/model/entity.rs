use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::EcoHubError;

/// The named entity types of the hub, one collection each
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Challenge,
    DailyFact,
    UserAchievement,
    Submission,
    Connection,
    Message,
    Review,
    User,
}

impl EntityKind {
    /// Every entity type, in registry (and seed import) order
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Challenge,
        EntityKind::DailyFact,
        EntityKind::UserAchievement,
        EntityKind::Submission,
        EntityKind::Connection,
        EntityKind::Message,
        EntityKind::Review,
        EntityKind::User,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Challenge => "Challenge",
            EntityKind::DailyFact => "DailyFact",
            EntityKind::UserAchievement => "UserAchievement",
            EntityKind::Submission => "Submission",
            EntityKind::Connection => "Connection",
            EntityKind::Message => "Message",
            EntityKind::Review => "Review",
            EntityKind::User => "User",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the canonical name in any case, with `_` / `-` separators
/// ignored: `DailyFact`, `daily_fact` and `daily-fact` are the same kind.
impl FromStr for EntityKind {
    type Err = EcoHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect();

        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| EcoHubError::UnknownEntity {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_and_variants() {
        assert_eq!("Challenge".parse::<EntityKind>(), Ok(EntityKind::Challenge));
        assert_eq!("daily_fact".parse::<EntityKind>(), Ok(EntityKind::DailyFact));
        assert_eq!(
            "user-achievement".parse::<EntityKind>(),
            Ok(EntityKind::UserAchievement)
        );
        assert_eq!("USER".parse::<EntityKind>(), Ok(EntityKind::User));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "Leaderboard".parse::<EntityKind>().unwrap_err();
        assert_eq!(
            err,
            EcoHubError::UnknownEntity {
                name: "Leaderboard".to_string()
            }
        );
    }

    #[test]
    fn test_names_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.name().parse::<EntityKind>(), Ok(kind));
        }
    }
}
