//! # Tourney
//!
//! Domain library for an esports tournament backend: tournaments, teams,
//! players, round-one brackets, groups and standings kept in a document
//! store.
//!
//! ## Core Modules
//!
//! - [`db`]: document store trait with MongoDB and in-memory implementations
//! - [`tournament`]: models and the [`TournamentManager`] operations
//! - [`games`]: static game catalog
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use tourney::{TournamentManager, db::MemoryStore};
//!
//! let manager = TournamentManager::with_store(Arc::new(MemoryStore::new()));
//! assert!(manager.is_configured());
//! ```

/// Document store abstraction and backends.
pub mod db;

/// Static game catalog.
pub mod games;

/// Tournament models and operations.
pub mod tournament;

pub use tournament::{TournamentError, TournamentManager, TournamentResult};
