//! Tournament data models.
//!
//! Each stored entity comes in two shapes: a `New*` insert form without an
//! identifier, and a record form read back from the store. Records carry the
//! store identifier under `_id` when read and render it as a hex string under
//! `id` when serialized for clients.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize, Serializer, de::DeserializeOwned};

/// Store identifier type
pub type DocumentId = ObjectId;

/// Round number given to every match created by bracket generation
pub const FIRST_ROUND: i32 = 1;

/// A stored record type and the collection it lives in
pub trait Record: DeserializeOwned {
    const COLLECTION: &'static str;
}

/// An insert form that becomes a [`Record`] once the store assigns an id
pub trait NewDocument: Serialize {
    type Record: Record;

    fn into_record(self, id: DocumentId) -> Self::Record;
}

fn serialize_id<S>(id: &DocumentId, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&id.to_hex())
}

/// Team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(
        rename(serialize = "id", deserialize = "_id"),
        serialize_with = "serialize_id"
    )]
    pub id: DocumentId,
    pub team_name: String,
    pub team_logo: Option<String>,
}

/// Team insert form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTeam {
    pub team_name: String,
    #[serde(default)]
    pub team_logo: Option<String>,
}

impl Record for Team {
    const COLLECTION: &'static str = "team";
}

impl NewDocument for NewTeam {
    type Record = Team;

    fn into_record(self, id: DocumentId) -> Team {
        Team {
            id,
            team_name: self.team_name,
            team_logo: self.team_logo,
        }
    }
}

/// Player
///
/// `team_id` is a loose reference: it is neither validated nor kept in sync
/// with the team collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(
        rename(serialize = "id", deserialize = "_id"),
        serialize_with = "serialize_id"
    )]
    pub id: DocumentId,
    /// In-game name
    #[serde(rename = "IGN")]
    pub ign: String,
    /// In-game unique identifier
    #[serde(rename = "UID")]
    pub uid: String,
    pub player_photo: Option<String>,
    pub team_id: Option<String>,
}

/// Player insert form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlayer {
    #[serde(rename = "IGN")]
    pub ign: String,
    #[serde(rename = "UID")]
    pub uid: String,
    #[serde(default)]
    pub player_photo: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
}

impl Record for Player {
    const COLLECTION: &'static str = "player";
}

impl NewDocument for NewPlayer {
    type Record = Player;

    fn into_record(self, id: DocumentId) -> Player {
        Player {
            id,
            ign: self.ign,
            uid: self.uid,
            player_photo: self.player_photo,
            team_id: self.team_id,
        }
    }
}

/// Tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    #[serde(
        rename(serialize = "id", deserialize = "_id"),
        serialize_with = "serialize_id"
    )]
    pub id: DocumentId,
    pub name: String,
    pub game: String,
    /// Attached teams in attach order, without duplicates
    #[serde(default)]
    pub team_ids: Vec<String>,
}

/// Tournament insert form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTournament {
    pub name: String,
    pub game: String,
    pub team_ids: Vec<String>,
}

impl NewTournament {
    /// A tournament with no teams attached yet
    pub fn new(name: impl Into<String>, game: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            game: game.into(),
            team_ids: Vec::new(),
        }
    }
}

impl Record for Tournament {
    const COLLECTION: &'static str = "tournament";
}

impl NewDocument for NewTournament {
    type Record = Tournament;

    fn into_record(self, id: DocumentId) -> Tournament {
        Tournament {
            id,
            name: self.name,
            game: self.game,
            team_ids: self.team_ids,
        }
    }
}

/// Bracket match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    #[serde(
        rename(serialize = "id", deserialize = "_id"),
        serialize_with = "serialize_id"
    )]
    pub id: DocumentId,
    pub tournament_id: String,
    pub round: i32,
    pub team1_id: Option<String>,
    pub team2_id: Option<String>,
    pub winner_id: Option<String>,
}

/// Match insert form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMatch {
    pub tournament_id: String,
    pub round: i32,
    pub team1_id: Option<String>,
    pub team2_id: Option<String>,
    pub winner_id: Option<String>,
}

impl Record for Match {
    const COLLECTION: &'static str = "match";
}

impl NewDocument for NewMatch {
    type Record = Match;

    fn into_record(self, id: DocumentId) -> Match {
        Match {
            id,
            tournament_id: self.tournament_id,
            round: self.round,
            team1_id: self.team1_id,
            team2_id: self.team2_id,
            winner_id: self.winner_id,
        }
    }
}

/// Group within a tournament, named by a single uppercase letter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(
        rename(serialize = "id", deserialize = "_id"),
        serialize_with = "serialize_id"
    )]
    pub id: DocumentId,
    pub tournament_id: String,
    pub name: String,
}

/// Group insert form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGroup {
    pub tournament_id: String,
    pub name: String,
}

impl Record for Group {
    const COLLECTION: &'static str = "group";
}

impl NewDocument for NewGroup {
    type Record = Group;

    fn into_record(self, id: DocumentId) -> Group {
        Group {
            id,
            tournament_id: self.tournament_id,
            name: self.name,
        }
    }
}

/// Scoreboard slot within a group. An unassigned slot has no `team_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    #[serde(
        rename(serialize = "id", deserialize = "_id"),
        serialize_with = "serialize_id"
    )]
    pub id: DocumentId,
    pub tournament_id: String,
    pub group_name: String,
    pub team_id: Option<String>,
    pub team_country_flag: Option<String>,
    pub team_logo: Option<String>,
    pub team_name: Option<String>,
    #[serde(default)]
    pub total_points: i64,
}

/// Standing insert form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStanding {
    pub tournament_id: String,
    pub group_name: String,
    pub team_id: Option<String>,
    pub team_country_flag: Option<String>,
    pub team_logo: Option<String>,
    pub team_name: Option<String>,
    pub total_points: i64,
}

impl NewStanding {
    /// An unassigned slot with zero points
    pub fn empty_slot(tournament_id: impl Into<String>, group_name: impl Into<String>) -> Self {
        Self {
            tournament_id: tournament_id.into(),
            group_name: group_name.into(),
            team_id: None,
            team_country_flag: None,
            team_logo: None,
            team_name: None,
            total_points: 0,
        }
    }
}

impl Record for Standing {
    const COLLECTION: &'static str = "standing";
}

impl NewDocument for NewStanding {
    type Record = Standing;

    fn into_record(self, id: DocumentId) -> Standing {
        Standing {
            id,
            tournament_id: self.tournament_id,
            group_name: self.group_name,
            team_id: self.team_id,
            team_country_flag: self.team_country_flag,
            team_logo: self.team_logo,
            team_name: self.team_name,
            total_points: self.total_points,
        }
    }
}

/// Partial match update. Absent or null fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team1_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team2_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<String>,
}

impl MatchPatch {
    pub fn is_empty(&self) -> bool {
        self.team1_id.is_none() && self.team2_id.is_none() && self.winner_id.is_none()
    }
}

/// Partial standing update. Absent or null fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_country_flag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_points: Option<i64>,
}

impl StandingPatch {
    pub fn is_empty(&self) -> bool {
        self.team_id.is_none()
            && self.team_country_flag.is_none()
            && self.team_logo.is_none()
            && self.team_name.is_none()
            && self.total_points.is_none()
    }
}

/// Outcome of group generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupGenerationSummary {
    pub groups_created: usize,
    pub standing_slots: usize,
}
