//! HTTP API for the tournament server.
//!
//! # Modules
//!
//! - [`tournaments`]: tournament listing, creation and team attachment
//! - [`teams`]: team and player registration
//! - [`brackets`]: round-one bracket generation and match updates
//! - [`groups`]: group generation, standings and standing updates
//! - [`request_id`]: `x-request-id` propagation
//! - [`error`]: mapping of domain errors onto status codes
//!
//! # Endpoints Overview
//!
//! ```text
//! GET  /                                        - Service banner
//! GET  /test                                    - Diagnostics
//! GET  /games                                   - Game catalog
//! GET  /tournaments?game=<name>                 - List tournaments
//! POST /tournaments                             - Create tournament
//! GET  /tournaments/{tournament_id}             - Get tournament
//! POST /tournaments/{tournament_id}/teams       - Attach team
//! GET  /teams, POST /teams                      - Teams
//! GET  /players, POST /players                  - Players
//! POST /tournaments/{tournament_id}/brackets/generate
//! GET  /tournaments/{tournament_id}/matches
//! PUT  /matches/{match_id}
//! POST /tournaments/{tournament_id}/groups/generate
//! GET  /tournaments/{tournament_id}/groups
//! GET  /tournaments/{tournament_id}/standings
//! PUT  /standings/{standing_id}
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tourney::{TournamentManager, db::MemoryStore};
//! use tourney_server::api::{AppState, create_router};
//! use tourney_server::config::ConfigStatus;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = AppState {
//!     tournament_manager: Arc::new(TournamentManager::with_store(Arc::new(MemoryStore::new()))),
//!     status: ConfigStatus::default(),
//! };
//!
//! let app = create_router(state);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # CORS
//!
//! CORS is fully permissive: any origin, method and header.

pub mod brackets;
pub mod error;
pub mod groups;
pub mod request_id;
pub mod teams;
pub mod tournaments;

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    response::Json,
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use tourney::{
    TournamentManager,
    games::{self, Game},
};
use tower_http::cors::CorsLayer;

use crate::config::ConfigStatus;
use crate::metrics;

/// Message returned by `GET /`
pub const ROOT_MESSAGE: &str = "Esports Tournament Management System Backend";

/// Longest store error excerpt shown by the diagnostics endpoint
const DIAGNOSTIC_ERROR_CHARS: usize = 80;

/// Application state shared across all HTTP handlers.
///
/// Cloned for each request; the manager sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub tournament_manager: Arc<TournamentManager>,
    pub status: ConfigStatus,
}

/// Create the complete API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    let tournament_routes = Router::new()
        .route(
            "/tournaments",
            get(tournaments::list_tournaments).post(tournaments::create_tournament),
        )
        .route("/tournaments/{tournament_id}", get(tournaments::get_tournament))
        .route(
            "/tournaments/{tournament_id}/teams",
            post(tournaments::attach_team),
        );

    let roster_routes = Router::new()
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route("/players", get(teams::list_players).post(teams::create_player));

    let bracket_routes = Router::new()
        .route(
            "/tournaments/{tournament_id}/brackets/generate",
            post(brackets::generate_brackets),
        )
        .route(
            "/tournaments/{tournament_id}/matches",
            get(brackets::list_matches),
        )
        .route("/matches/{match_id}", put(brackets::update_match));

    let group_routes = Router::new()
        .route(
            "/tournaments/{tournament_id}/groups/generate",
            post(groups::generate_groups),
        )
        .route("/tournaments/{tournament_id}/groups", get(groups::list_groups))
        .route(
            "/tournaments/{tournament_id}/standings",
            get(groups::list_standings),
        )
        .route("/standings/{standing_id}", put(groups::update_standing));

    Router::new()
        .route("/", get(root))
        .route("/test", get(diagnostics))
        .route("/games", get(list_games))
        .merge(tournament_routes)
        .merge(roster_routes)
        .merge(bracket_routes)
        .merge(group_routes)
        .layer(axum::middleware::from_fn(metrics::track_requests))
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: ROOT_MESSAGE.to_string(),
    })
}

async fn list_games() -> Json<Vec<Game>> {
    Json(games::catalog())
}

/// Diagnostics report returned by `GET /test`
#[derive(Debug, Serialize, Deserialize)]
pub struct Diagnostics {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

fn presence(set: bool) -> String {
    if set { "✅ Set" } else { "❌ Not Set" }.to_string()
}

/// Report backend, configuration and store status.
///
/// Never fails: a store error is summarized in the `database` field.
///
/// ```bash
/// curl http://localhost:8000/test
/// # {"backend":"✅ Running","database":"✅ Connected & Working",...}
/// ```
async fn diagnostics(State(state): State<AppState>) -> Json<Diagnostics> {
    let manager = &state.tournament_manager;

    let (database, connection_status, collections) = if !manager.is_configured() {
        ("❌ Not Available".to_string(), "Not Connected", Vec::new())
    } else {
        match manager.collection_names().await {
            Ok(names) => ("✅ Connected & Working".to_string(), "Connected", names),
            Err(e) => {
                tracing::warn!(error = %e, "Diagnostics could not list collections");
                let excerpt: String = e
                    .to_string()
                    .chars()
                    .take(DIAGNOSTIC_ERROR_CHARS)
                    .collect();
                (format!("❌ Error: {excerpt}"), "Connected", Vec::new())
            }
        }
    };

    Json(Diagnostics {
        backend: "✅ Running".to_string(),
        database,
        database_url: presence(state.status.database_url_set),
        database_name: presence(state.status.database_name_set),
        connection_status: connection_status.to_string(),
        collections,
    })
}
