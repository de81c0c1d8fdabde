//! Static catalog of supported games.

use serde::{Deserialize, Serialize};

/// A game tournaments can be run for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub name: String,
    pub icon: Option<String>,
}

impl Game {
    fn new(name: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            icon: Some(icon.to_string()),
        }
    }
}

/// Games shown on the landing page. Not persisted.
pub fn catalog() -> Vec<Game> {
    vec![
        Game::new("PUBG Mobile", "pubg.png"),
        Game::new("Honor of Kings", "hok.png"),
    ]
}
