//! Group naming and standing-slot allocation.

use super::errors::{TournamentError, TournamentResult};
use super::models::{NewGroup, NewStanding};

/// Groups are lettered A through Z
pub const MAX_GROUPS: u32 = 26;

/// Groups and empty standing slots to insert for one generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPlan {
    pub groups: Vec<NewGroup>,
    pub standings: Vec<NewStanding>,
}

/// Reject group counts that cannot be lettered
pub fn validate_group_count(number_of_groups: i64) -> TournamentResult<u32> {
    u32::try_from(number_of_groups)
        .ok()
        .filter(|count| (1..=MAX_GROUPS).contains(count))
        .ok_or_else(|| {
            TournamentError::InvalidArgument(format!(
                "number_of_groups must be between 1 and {MAX_GROUPS}, got {number_of_groups}"
            ))
        })
}

/// First `count` uppercase letters, capped at [`MAX_GROUPS`]
pub fn group_names(count: u32) -> Vec<String> {
    ('A'..='Z')
        .take(count.min(MAX_GROUPS) as usize)
        .map(String::from)
        .collect()
}

/// Slots per group: teams divided evenly, never fewer than one.
///
/// Zero or negative team counts still give one slot per group.
pub fn slots_per_group(number_of_teams: i64, number_of_groups: u32) -> usize {
    let slots = number_of_teams
        .checked_div(i64::from(number_of_groups))
        .unwrap_or(0)
        .max(1);
    usize::try_from(slots).unwrap_or(usize::MAX)
}

/// Lay out groups and their empty standing slots, one group at a time
pub fn plan(
    tournament_id: &str,
    number_of_teams: i64,
    number_of_groups: i64,
) -> TournamentResult<GroupPlan> {
    let number_of_groups = validate_group_count(number_of_groups)?;

    let names = group_names(number_of_groups);
    let slots = slots_per_group(number_of_teams, number_of_groups);

    let mut standings = Vec::with_capacity(names.len().saturating_mul(slots));
    for name in &names {
        for _ in 0..slots {
            standings.push(NewStanding::empty_slot(tournament_id, name.as_str()));
        }
    }

    let groups = names
        .into_iter()
        .map(|name| NewGroup {
            tournament_id: tournament_id.to_string(),
            name,
        })
        .collect();

    Ok(GroupPlan { groups, standings })
}
