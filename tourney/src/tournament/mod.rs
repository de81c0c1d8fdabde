//! Tournament module: teams, players, brackets, groups and standings.
//!
//! This module provides tournament management functionality including:
//! - Tournament, team and player creation
//! - Attaching teams to tournaments
//! - Round-one bracket generation by sequential pairing
//! - Group and standing-slot generation
//! - Partial updates of matches and standings
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tourney::db::MemoryStore;
//! use tourney::tournament::{NewTeam, TournamentManager};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = TournamentManager::with_store(Arc::new(MemoryStore::new()));
//!
//!     let tournament = manager.create_tournament("PUBG Open", "PUBG Mobile").await?;
//!     let team = manager
//!         .create_team(NewTeam { team_name: "Alpha".to_string(), team_logo: None })
//!         .await?;
//!
//!     manager
//!         .attach_team(&tournament.id.to_hex(), &team.id.to_hex())
//!         .await?;
//!     let created = manager.generate_brackets(&tournament.id.to_hex()).await?;
//!     println!("Created {} match(es)", created);
//!
//!     Ok(())
//! }
//! ```

pub mod bracket;
pub mod errors;
pub mod groups;
pub mod manager;
pub mod models;

pub use errors::{TournamentError, TournamentResult};
pub use manager::TournamentManager;
pub use models::{
    DocumentId, Group, GroupGenerationSummary, Match, MatchPatch, NewGroup, NewMatch, NewPlayer,
    NewStanding, NewTeam, NewTournament, Player, Standing, StandingPatch, Team, Tournament,
};
