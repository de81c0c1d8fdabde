//! Round-one bracket pairing.

use super::models::{FIRST_ROUND, NewMatch};

/// Pair teams sequentially into round-one matches: 0 vs 1, 2 vs 3, and so on.
///
/// With an odd number of teams the last match has no second team.
pub fn pair_round_one(tournament_id: &str, team_ids: &[String]) -> Vec<NewMatch> {
    team_ids
        .chunks(2)
        .map(|pair| NewMatch {
            tournament_id: tournament_id.to_string(),
            round: FIRST_ROUND,
            team1_id: pair.first().cloned(),
            team2_id: pair.get(1).cloned(),
            winner_id: None,
        })
        .collect()
}
