//! Integration tests for the HTTP API.
//!
//! The router is driven with `oneshot` against an in-memory store, so no
//! MongoDB instance is needed.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tourney::TournamentManager;
use tourney::db::bson::{Document, oid::ObjectId};
use tourney::db::{DocumentStore, MemoryStore, StoreError, StoreResult};
use tourney_server::api::{AppState, create_router};
use tourney_server::config::ConfigStatus;
use tower::ServiceExt; // For `oneshot` method

const MISSING_ID: &str = "0123456789abcdef01234567";

fn configured_app() -> axum::Router {
    let state = AppState {
        tournament_manager: Arc::new(TournamentManager::with_store(Arc::new(MemoryStore::new()))),
        status: ConfigStatus {
            database_url_set: true,
            database_name_set: true,
        },
    };
    create_router(state)
}

fn unconfigured_app() -> axum::Router {
    let state = AppState {
        tournament_manager: Arc::new(TournamentManager::unconfigured()),
        status: ConfigStatus::default(),
    };
    create_router(state)
}

/// Store whose every call fails with a long error message
struct FailingStore;

const LONG_OPERATOR: &str = "$renameEverythingInThisCollectionUsingAVeryLongOperatorNameThatKeepsGoingAndGoing";

fn failure() -> StoreError {
    StoreError::UnsupportedOperator(LONG_OPERATOR.to_string())
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn insert_one(&self, _: &str, _: Document) -> StoreResult<ObjectId> {
        Err(failure())
    }

    async fn insert_many(&self, _: &str, _: Vec<Document>) -> StoreResult<Vec<ObjectId>> {
        Err(failure())
    }

    async fn find(&self, _: &str, _: Document) -> StoreResult<Vec<Document>> {
        Err(failure())
    }

    async fn find_one(&self, _: &str, _: Document) -> StoreResult<Option<Document>> {
        Err(failure())
    }

    async fn update_one(&self, _: &str, _: Document, _: Document) -> StoreResult<u64> {
        Err(failure())
    }

    async fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        Err(failure())
    }
}

fn failing_app() -> axum::Router {
    let state = AppState {
        tournament_manager: Arc::new(TournamentManager::with_store(Arc::new(FailingStore))),
        status: ConfigStatus {
            database_url_set: true,
            database_name_set: true,
        },
    };
    create_router(state)
}

async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn create_team(app: &axum::Router, name: &str) -> String {
    let (status, body) = send(app, "POST", "/teams", Some(json!({ "team_name": name }))).await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().unwrap().to_string()
}

async fn create_tournament(app: &axum::Router, name: &str, game: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/tournaments",
        Some(json!({ "tournament_name": name, "game": game })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().unwrap().to_string()
}

// ============================================================================
// Static Endpoints
// ============================================================================

#[tokio::test]
async fn test_root_message() {
    let app = configured_app();
    let (status, body) = send(&app, "GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Esports Tournament Management System Backend");
}

#[tokio::test]
async fn test_games_catalog() {
    let app = unconfigured_app();
    let (status, body) = send(&app, "GET", "/games", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "name": "PUBG Mobile", "icon": "pubg.png" },
            { "name": "Honor of Kings", "icon": "hok.png" }
        ])
    );
}

// ============================================================================
// Diagnostics
// ============================================================================

#[tokio::test]
async fn test_diagnostics_without_database() {
    let app = unconfigured_app();
    let (status, body) = send(&app, "GET", "/test", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["backend"], "✅ Running");
    assert_eq!(body["database"], "❌ Not Available");
    assert_eq!(body["database_url"], "❌ Not Set");
    assert_eq!(body["database_name"], "❌ Not Set");
    assert_eq!(body["connection_status"], "Not Connected");
    assert_eq!(body["collections"], json!([]));
}

#[tokio::test]
async fn test_diagnostics_lists_collections() {
    let app = configured_app();
    create_team(&app, "Alpha").await;
    create_tournament(&app, "Cup", "PUBG Mobile").await;

    let (status, body) = send(&app, "GET", "/test", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "✅ Connected & Working");
    assert_eq!(body["database_url"], "✅ Set");
    assert_eq!(body["database_name"], "✅ Set");
    assert_eq!(body["connection_status"], "Connected");
    assert_eq!(body["collections"], json!(["team", "tournament"]));
}

#[tokio::test]
async fn test_diagnostics_summarizes_store_error() {
    let app = failing_app();
    let (status, body) = send(&app, "GET", "/test", None).await;

    let full_message = failure().to_string();
    assert!(full_message.chars().count() > 80);
    let excerpt: String = full_message.chars().take(80).collect();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["backend"], "✅ Running");
    assert_eq!(body["database"], format!("❌ Error: {excerpt}"));
    assert_eq!(body["connection_status"], "Connected");
    assert_eq!(body["collections"], json!([]));
}

#[tokio::test]
async fn test_store_failure_is_sanitized() {
    let app = failing_app();
    let (status, body) = send(&app, "POST", "/teams", Some(json!({ "team_name": "Alpha" }))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Internal server error");
}

// ============================================================================
// Tournaments, Teams and Players
// ============================================================================

#[tokio::test]
async fn test_create_and_get_tournament() {
    let app = configured_app();
    let tid = create_tournament(&app, "PUBG Open", "PUBG Mobile").await;

    let (status, body) = send(&app, "GET", &format!("/tournaments/{tid}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], tid.as_str());
    assert_eq!(body["name"], "PUBG Open");
    assert_eq!(body["game"], "PUBG Mobile");
    assert_eq!(body["team_ids"], json!([]));
}

#[tokio::test]
async fn test_list_tournaments_filters_by_game() {
    let app = configured_app();
    create_tournament(&app, "Open", "PUBG Mobile").await;
    create_tournament(&app, "Kings Cup", "Honor of Kings").await;

    let (_, all) = send(&app, "GET", "/tournaments", None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (status, filtered) = send(&app, "GET", "/tournaments?game=Honor%20of%20Kings", None).await;
    assert_eq!(status, StatusCode::OK);
    let filtered = filtered.as_array().unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["name"], "Kings Cup");
}

#[tokio::test]
async fn test_get_tournament_malformed_and_missing() {
    let app = configured_app();

    let (status, body) = send(&app, "GET", "/tournaments/not-an-id", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid tournament id");

    let (status, body) = send(&app, "GET", &format!("/tournaments/{MISSING_ID}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Not found");
}

#[tokio::test]
async fn test_attach_team_is_idempotent() {
    let app = configured_app();
    let tid = create_tournament(&app, "Cup", "PUBG Mobile").await;
    let team_id = create_team(&app, "Alpha").await;

    for _ in 0..2 {
        let (status, body) = send(
            &app,
            "POST",
            &format!("/tournaments/{tid}/teams"),
            Some(json!({ "team_id": team_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));
    }

    let (_, body) = send(&app, "GET", &format!("/tournaments/{tid}"), None).await;
    assert_eq!(body["team_ids"], json!([team_id]));
}

#[tokio::test]
async fn test_attach_team_errors() {
    let app = configured_app();
    let tid = create_tournament(&app, "Cup", "PUBG Mobile").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/tournaments/{tid}/teams"),
        Some(json!({ "team_id": "bogus" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid IDs");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/tournaments/{tid}/teams"),
        Some(json!({ "team_id": MISSING_ID })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Team not found");
}

#[tokio::test]
async fn test_players_round_trip_field_names() {
    let app = configured_app();
    let team_id = create_team(&app, "Alpha").await;

    let (status, created) = send(
        &app,
        "POST",
        "/players",
        Some(json!({ "IGN": "Ace", "UID": "5123", "team_id": team_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["IGN"], "Ace");
    assert_eq!(created["UID"], "5123");
    assert_eq!(created["player_photo"], Value::Null);
    assert!(created["id"].is_string());

    let (_, players) = send(&app, "GET", "/players", None).await;
    assert_eq!(players.as_array().unwrap().len(), 1);
    assert_eq!(players[0]["team_id"], team_id.as_str());
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let app = configured_app();
    let (status, _) = send(&app, "POST", "/teams", Some(json!({ "logo": "x.png" }))).await;
    assert!(status.is_client_error());
}

// ============================================================================
// Brackets
// ============================================================================

#[tokio::test]
async fn test_bracket_generation_and_winner_update() {
    let app = configured_app();
    let tid = create_tournament(&app, "Cup", "PUBG Mobile").await;

    let mut team_ids = Vec::new();
    for name in ["Alpha", "Bravo", "Charlie"] {
        let team_id = create_team(&app, name).await;
        send(
            &app,
            "POST",
            &format!("/tournaments/{tid}/teams"),
            Some(json!({ "team_id": team_id })),
        )
        .await;
        team_ids.push(team_id);
    }

    let uri = format!("/tournaments/{tid}/brackets/generate");
    let (status, body) = send(&app, "POST", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "created": 2 }));

    let (_, matches) = send(&app, "GET", &format!("/tournaments/{tid}/matches"), None).await;
    let matches = matches.as_array().unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0]["team1_id"], team_ids[0].as_str());
    assert_eq!(matches[0]["team2_id"], team_ids[1].as_str());
    assert_eq!(matches[1]["team1_id"], team_ids[2].as_str());
    assert_eq!(matches[1]["team2_id"], Value::Null);
    assert_eq!(matches[0]["round"], 1);

    let match_id = matches[0]["id"].as_str().unwrap();
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/matches/{match_id}"),
        Some(json!({ "winner_id": team_ids[0] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));

    let (_, matches) = send(&app, "GET", &format!("/tournaments/{tid}/matches"), None).await;
    assert_eq!(matches[0]["winner_id"], team_ids[0].as_str());
    assert_eq!(matches[0]["team1_id"], team_ids[0].as_str());
}

#[tokio::test]
async fn test_uppercase_ids_round_trip_through_generation_and_listing() {
    let app = configured_app();
    let tid = create_tournament(&app, "Cup", "PUBG Mobile").await.to_uppercase();
    let alpha = create_team(&app, "Alpha").await.to_uppercase();
    let bravo = create_team(&app, "Bravo").await.to_uppercase();

    for team_id in [&alpha, &bravo] {
        let (status, _) = send(
            &app,
            "POST",
            &format!("/tournaments/{tid}/teams"),
            Some(json!({ "team_id": team_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, tournament) = send(&app, "GET", &format!("/tournaments/{tid}"), None).await;
    assert_eq!(tournament["team_ids"], json!([alpha, bravo]));

    let uri = format!("/tournaments/{tid}/brackets/generate");
    let (_, body) = send(&app, "POST", &uri, None).await;
    assert_eq!(body, json!({ "created": 1 }));

    let (_, matches) = send(&app, "GET", &format!("/tournaments/{tid}/matches"), None).await;
    let matches = matches.as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["tournament_id"], tid.as_str());
    assert_eq!(matches[0]["team1_id"], alpha.as_str());
    assert_eq!(matches[0]["team2_id"], bravo.as_str());

    let (status, _) = send(
        &app,
        "POST",
        &format!("/tournaments/{tid}/groups/generate"),
        Some(json!({ "number_of_teams": 2, "number_of_groups": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, groups) = send(&app, "GET", &format!("/tournaments/{tid}/groups"), None).await;
    assert_eq!(groups.as_array().unwrap().len(), 2);
    let (_, standings) = send(&app, "GET", &format!("/tournaments/{tid}/standings"), None).await;
    assert_eq!(standings.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_bracket_generation_for_missing_tournament() {
    let app = configured_app();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/tournaments/{MISSING_ID}/brackets/generate"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Tournament not found");
}

#[tokio::test]
async fn test_update_match_with_malformed_id() {
    let app = configured_app();

    let (status, body) = send(&app, "PUT", "/matches/xyz", Some(json!({ "winner_id": "a" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid match id");
}

// ============================================================================
// Groups and Standings
// ============================================================================

#[tokio::test]
async fn test_group_generation_and_standing_update() {
    let app = configured_app();
    let tid = create_tournament(&app, "League", "Honor of Kings").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/tournaments/{tid}/groups/generate"),
        Some(json!({ "number_of_teams": 10, "number_of_groups": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "groups_created": 3, "standing_slots": 9 }));

    let (_, groups) = send(&app, "GET", &format!("/tournaments/{tid}/groups"), None).await;
    let names: Vec<&str> = groups
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["A", "B", "C"]);

    let (_, standings) = send(&app, "GET", &format!("/tournaments/{tid}/standings"), None).await;
    let standings = standings.as_array().unwrap();
    assert_eq!(standings.len(), 9);
    assert_eq!(standings[0]["total_points"], 0);
    assert_eq!(standings[0]["team_name"], Value::Null);

    let standing_id = standings[0]["id"].as_str().unwrap();
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/standings/{standing_id}"),
        Some(json!({ "team_name": "Alpha", "total_points": 15 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, standings) = send(&app, "GET", &format!("/tournaments/{tid}/standings"), None).await;
    assert_eq!(standings[0]["team_name"], "Alpha");
    assert_eq!(standings[0]["total_points"], 15);
    assert_eq!(standings[0]["group_name"], "A");
}

#[tokio::test]
async fn test_group_generation_rejects_zero_groups() {
    let app = configured_app();
    let tid = create_tournament(&app, "League", "Honor of Kings").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/tournaments/{tid}/groups/generate"),
        Some(json!({ "number_of_teams": 8, "number_of_groups": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("number_of_groups"));
}

#[tokio::test]
async fn test_negative_team_count_still_creates_slots() {
    let app = configured_app();
    let tid = create_tournament(&app, "League", "Honor of Kings").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/tournaments/{tid}/groups/generate"),
        Some(json!({ "number_of_teams": -4, "number_of_groups": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "groups_created": 2, "standing_slots": 2 }));
}

#[tokio::test]
async fn test_update_standing_with_malformed_id() {
    let app = configured_app();

    let patch = json!({ "total_points": 3 });
    let (status, body) = send(&app, "PUT", "/standings/123", Some(patch)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid standing id");
}

// ============================================================================
// Unconfigured Store
// ============================================================================

#[tokio::test]
async fn test_lists_are_empty_without_database() {
    let app = unconfigured_app();

    for uri in [
        "/tournaments",
        "/teams",
        "/players",
        "/tournaments/abc/matches",
        "/tournaments/abc/groups",
        "/tournaments/abc/standings",
    ] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::OK, "GET {uri}");
        assert_eq!(body, json!([]), "GET {uri}");
    }
}

#[tokio::test]
async fn test_writes_fail_without_database() {
    let app = unconfigured_app();

    let cases = [
        ("POST", "/tournaments".to_string(), Some(json!({ "tournament_name": "x", "game": "y" }))),
        ("POST", "/teams".to_string(), Some(json!({ "team_name": "x" }))),
        ("GET", "/tournaments/not-an-id".to_string(), None),
        ("POST", format!("/tournaments/{MISSING_ID}/brackets/generate"), None),
        ("PUT", format!("/matches/{MISSING_ID}"), Some(json!({ "winner_id": "a" }))),
    ];

    for (method, uri, body) in cases {
        let (status, response) = send(&app, method, &uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
        assert_eq!(response["detail"], "Database not configured", "{method} {uri}");
    }
}

// ============================================================================
// Middleware
// ============================================================================

#[tokio::test]
async fn test_request_id_header_is_generated_and_propagated() {
    let app = configured_app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let generated = response.headers().get("x-request-id").unwrap();
    assert!(!generated.is_empty());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/games")
                .header("x-request-id", "trace-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers().get("x-request-id").unwrap(), "trace-42");
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = configured_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/games")
                .header("origin", "https://example.org")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = configured_app();
    let (status, _) = send(&app, "GET", "/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
