//! Team and player API handlers.

use axum::{Json, extract::State};
use tourney::tournament::{NewPlayer, NewTeam, Player, Team};

use super::AppState;
use super::error::{ApiResult, api_error};
use crate::metrics;

pub async fn list_teams(State(state): State<AppState>) -> ApiResult<Vec<Team>> {
    state
        .tournament_manager
        .list_teams()
        .await
        .map(Json)
        .map_err(api_error)
}

/// Create a team from `{"team_name": ..., "team_logo": ...}`.
pub async fn create_team(
    State(state): State<AppState>,
    Json(request): Json<NewTeam>,
) -> ApiResult<Team> {
    let team = state
        .tournament_manager
        .create_team(request)
        .await
        .map_err(api_error)?;

    metrics::documents_created_total("team", 1);
    Ok(Json(team))
}

pub async fn list_players(State(state): State<AppState>) -> ApiResult<Vec<Player>> {
    state
        .tournament_manager
        .list_players()
        .await
        .map(Json)
        .map_err(api_error)
}

/// Create a player from `{"IGN", "UID", "player_photo"?, "team_id"?}`.
pub async fn create_player(
    State(state): State<AppState>,
    Json(request): Json<NewPlayer>,
) -> ApiResult<Player> {
    let player = state
        .tournament_manager
        .create_player(request)
        .await
        .map_err(api_error)?;

    metrics::documents_created_total("player", 1);
    Ok(Json(player))
}
