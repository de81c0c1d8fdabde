//! Group and standing API handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tourney::tournament::{Group, GroupGenerationSummary, Standing, StandingPatch};

use super::AppState;
use super::error::{ApiResult, api_error};
use super::tournaments::OkResponse;
use crate::metrics;

#[derive(Debug, Deserialize)]
pub struct GroupGenerationRequest {
    pub number_of_teams: i64,
    pub number_of_groups: i64,
}

/// Create lettered groups and empty standing slots for a tournament.
///
/// # Request Body
///
/// ```json
/// {"number_of_teams": 10, "number_of_groups": 3}
/// ```
///
/// # Response
///
/// ```json
/// {"groups_created": 3, "standing_slots": 9}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: malformed id, or `number_of_groups` outside 1..=26
///
/// A zero or negative `number_of_teams` still yields one slot per group.
/// - `404 Not Found`: no tournament with that id
/// - `500 Internal Server Error`: database not configured
pub async fn generate_groups(
    State(state): State<AppState>,
    Path(tournament_id): Path<String>,
    Json(request): Json<GroupGenerationRequest>,
) -> ApiResult<GroupGenerationSummary> {
    let summary = state
        .tournament_manager
        .generate_groups(
            &tournament_id,
            request.number_of_teams,
            request.number_of_groups,
        )
        .await
        .map_err(api_error)?;

    metrics::documents_created_total("group", summary.groups_created);
    metrics::documents_created_total("standing", summary.standing_slots);
    Ok(Json(summary))
}

pub async fn list_groups(
    State(state): State<AppState>,
    Path(tournament_id): Path<String>,
) -> ApiResult<Vec<Group>> {
    state
        .tournament_manager
        .list_groups(&tournament_id)
        .await
        .map(Json)
        .map_err(api_error)
}

pub async fn list_standings(
    State(state): State<AppState>,
    Path(tournament_id): Path<String>,
) -> ApiResult<Vec<Standing>> {
    state
        .tournament_manager
        .list_standings(&tournament_id)
        .await
        .map(Json)
        .map_err(api_error)
}

/// Partially update a standing slot. Only non-null fields are written.
pub async fn update_standing(
    State(state): State<AppState>,
    Path(standing_id): Path<String>,
    Json(patch): Json<StandingPatch>,
) -> ApiResult<OkResponse> {
    state
        .tournament_manager
        .update_standing(&standing_id, patch)
        .await
        .map_err(api_error)?;

    Ok(OkResponse::ok())
}
