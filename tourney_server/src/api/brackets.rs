//! Bracket (match) API handlers.
//!
//! Generate round-one matches from the attached teams:
//! ```bash
//! curl -X POST http://localhost:8000/tournaments/TOURNAMENT_ID/brackets/generate
//! ```
//!
//! Record a winner:
//! ```bash
//! curl -X PUT http://localhost:8000/matches/MATCH_ID \
//!   -H "Content-Type: application/json" \
//!   -d '{"winner_id": "TEAM_ID"}'
//! ```

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tourney::tournament::{Match, MatchPatch};

use super::AppState;
use super::error::{ApiResult, api_error};
use super::tournaments::OkResponse;
use crate::metrics;

#[derive(Debug, Serialize, Deserialize)]
pub struct BracketsGenerated {
    pub created: usize,
}

/// Pair the tournament's teams into round-one matches.
///
/// Teams are paired in attach order; an odd team out gets a match with no
/// second team. Repeated calls append duplicate matches.
///
/// # Errors
///
/// - `400 Bad Request`: malformed id
/// - `404 Not Found`: no tournament with that id
/// - `500 Internal Server Error`: database not configured
pub async fn generate_brackets(
    State(state): State<AppState>,
    Path(tournament_id): Path<String>,
) -> ApiResult<BracketsGenerated> {
    let created = state
        .tournament_manager
        .generate_brackets(&tournament_id)
        .await
        .map_err(api_error)?;

    metrics::documents_created_total("match", created);
    Ok(Json(BracketsGenerated { created }))
}

pub async fn list_matches(
    State(state): State<AppState>,
    Path(tournament_id): Path<String>,
) -> ApiResult<Vec<Match>> {
    state
        .tournament_manager
        .list_matches(&tournament_id)
        .await
        .map(Json)
        .map_err(api_error)
}

/// Partially update a match. Only non-null fields are written.
pub async fn update_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Json(patch): Json<MatchPatch>,
) -> ApiResult<OkResponse> {
    state
        .tournament_manager
        .update_match(&match_id, patch)
        .await
        .map_err(api_error)?;

    Ok(OkResponse::ok())
}
