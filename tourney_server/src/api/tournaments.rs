//! Tournament API handlers.
//!
//! # Examples
//!
//! Create a tournament:
//! ```bash
//! curl -X POST http://localhost:8000/tournaments \
//!   -H "Content-Type: application/json" \
//!   -d '{"tournament_name": "PUBG Open", "game": "PUBG Mobile"}'
//! ```
//!
//! Attach a team:
//! ```bash
//! curl -X POST http://localhost:8000/tournaments/TOURNAMENT_ID/teams \
//!   -H "Content-Type: application/json" \
//!   -d '{"team_id": "TEAM_ID"}'
//! ```

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tourney::tournament::Tournament;

use super::AppState;
use super::error::{ApiResult, api_error};
use crate::metrics;

#[derive(Debug, Deserialize)]
pub struct TournamentQuery {
    pub game: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTournamentRequest {
    pub tournament_name: String,
    pub game: String,
}

#[derive(Debug, Deserialize)]
pub struct AttachTeamRequest {
    pub team_id: String,
}

/// `{"ok": true}` acknowledgement
#[derive(Debug, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Json<Self> {
        Json(Self { ok: true })
    }
}

/// List tournaments, optionally filtered by `?game=<exact name>`.
///
/// Returns an empty list when no database is configured.
pub async fn list_tournaments(
    State(state): State<AppState>,
    Query(query): Query<TournamentQuery>,
) -> ApiResult<Vec<Tournament>> {
    state
        .tournament_manager
        .list_tournaments(query.game.as_deref())
        .await
        .map(Json)
        .map_err(api_error)
}

/// Get a single tournament.
///
/// # Errors
///
/// - `400 Bad Request`: malformed id
/// - `404 Not Found`: no tournament with that id
/// - `500 Internal Server Error`: database not configured
pub async fn get_tournament(
    State(state): State<AppState>,
    Path(tournament_id): Path<String>,
) -> ApiResult<Tournament> {
    state
        .tournament_manager
        .get_tournament(&tournament_id)
        .await
        .map(Json)
        .map_err(api_error)
}

/// Create a tournament with an empty team list.
pub async fn create_tournament(
    State(state): State<AppState>,
    Json(request): Json<CreateTournamentRequest>,
) -> ApiResult<Tournament> {
    let tournament = state
        .tournament_manager
        .create_tournament(request.tournament_name, request.game)
        .await
        .map_err(api_error)?;

    metrics::documents_created_total("tournament", 1);
    Ok(Json(tournament))
}

/// Attach an existing team to a tournament.
///
/// # Errors
///
/// - `400 Bad Request`: either id is malformed
/// - `404 Not Found`: the team does not exist
/// - `500 Internal Server Error`: database not configured
pub async fn attach_team(
    State(state): State<AppState>,
    Path(tournament_id): Path<String>,
    Json(request): Json<AttachTeamRequest>,
) -> ApiResult<OkResponse> {
    state
        .tournament_manager
        .attach_team(&tournament_id, &request.team_id)
        .await
        .map_err(api_error)?;

    Ok(OkResponse::ok())
}
