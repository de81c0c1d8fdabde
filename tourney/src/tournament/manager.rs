//! Tournament manager: every create, list, attach, generate and update
//! operation the API exposes.

use std::sync::Arc;

use log::{debug, info};
use mongodb::bson::{Document, doc, oid::ObjectId};

use super::bracket::pair_round_one;
use super::errors::{TournamentError, TournamentResult};
use super::groups;
use super::models::{
    DocumentId, Group, GroupGenerationSummary, Match, MatchPatch, NewDocument, NewPlayer,
    NewTeam, NewTournament, Player, Record, Standing, StandingPatch, Team, Tournament,
};
use crate::db::DocumentStore;

/// Tournament manager
///
/// Holds an optional store handle: without one, list operations return empty
/// results and every other operation fails with
/// [`TournamentError::StoreUnavailable`].
#[derive(Clone)]
pub struct TournamentManager {
    store: Option<Arc<dyn DocumentStore>>,
}

fn parse_id(raw: &str, error: &'static str) -> TournamentResult<DocumentId> {
    ObjectId::parse_str(raw).map_err(|_| TournamentError::InvalidIdentifier(error))
}

impl TournamentManager {
    /// Create a new tournament manager
    pub fn new(store: Option<Arc<dyn DocumentStore>>) -> Self {
        Self { store }
    }

    /// Manager backed by the given store
    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        Self::new(Some(store))
    }

    /// Manager with no store configured
    pub fn unconfigured() -> Self {
        Self::new(None)
    }

    /// Whether a store is configured
    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    fn store(&self) -> TournamentResult<&dyn DocumentStore> {
        self.store
            .as_deref()
            .ok_or(TournamentError::StoreUnavailable)
    }

    async fn insert<N: NewDocument>(&self, new: N) -> TournamentResult<N::Record> {
        let store = self.store()?;
        let document = mongodb::bson::to_document(&new)?;
        let id = store
            .insert_one(<N::Record as Record>::COLLECTION, document)
            .await?;
        Ok(new.into_record(id))
    }

    async fn insert_all<N: NewDocument>(&self, items: Vec<N>) -> TournamentResult<usize> {
        if items.is_empty() {
            return Ok(0);
        }

        let store = self.store()?;
        let documents = items
            .iter()
            .map(mongodb::bson::to_document)
            .collect::<Result<Vec<_>, _>>()?;
        let ids = store
            .insert_many(<N::Record as Record>::COLLECTION, documents)
            .await?;
        Ok(ids.len())
    }

    async fn list<R: Record>(&self, filter: Document) -> TournamentResult<Vec<R>> {
        let Some(store) = self.store.as_deref() else {
            return Ok(Vec::new());
        };

        store
            .find(R::COLLECTION, filter)
            .await?
            .into_iter()
            .map(|document| {
                mongodb::bson::from_document(document).map_err(TournamentError::from)
            })
            .collect()
    }

    async fn find_by_id<R: Record>(&self, id: DocumentId) -> TournamentResult<Option<R>> {
        let store = self.store()?;
        match store.find_one(R::COLLECTION, doc! { "_id": id }).await? {
            Some(document) => Ok(Some(mongodb::bson::from_document(document)?)),
            None => Ok(None),
        }
    }

    async fn apply_patch<R: Record>(
        &self,
        id: DocumentId,
        fields: Document,
    ) -> TournamentResult<()> {
        let matched = self
            .store()?
            .update_one(R::COLLECTION, doc! { "_id": id }, doc! { "$set": fields })
            .await?;
        debug!("Patched {} {} (matched {})", R::COLLECTION, id, matched);
        Ok(())
    }

    /// List tournaments, optionally only those for an exact game name
    pub async fn list_tournaments(
        &self,
        game: Option<&str>,
    ) -> TournamentResult<Vec<Tournament>> {
        let filter = match game {
            Some(game) if !game.is_empty() => doc! { "game": game },
            _ => doc! {},
        };
        self.list(filter).await
    }

    /// Get a tournament by id
    pub async fn get_tournament(&self, tournament_id: &str) -> TournamentResult<Tournament> {
        self.store()?;
        let id = parse_id(tournament_id, "Invalid tournament id")?;
        self.find_by_id(id)
            .await?
            .ok_or(TournamentError::NotFound("Not found"))
    }

    /// Create a tournament with no teams attached
    pub async fn create_tournament(
        &self,
        name: impl Into<String>,
        game: impl Into<String>,
    ) -> TournamentResult<Tournament> {
        let tournament = self.insert(NewTournament::new(name, game)).await?;
        info!(
            "Created tournament {} ({}) for {}",
            tournament.name, tournament.id, tournament.game
        );
        Ok(tournament)
    }

    /// Attach an existing team to a tournament
    ///
    /// The team id is stored exactly as submitted. Attaching the same string
    /// again leaves `team_ids` unchanged.
    /// The tournament itself is not looked up: attaching to an absent
    /// tournament matches nothing and is a no-op.
    pub async fn attach_team(&self, tournament_id: &str, team_id: &str) -> TournamentResult<()> {
        let store = self.store()?;
        let tournament_oid = parse_id(tournament_id, "Invalid IDs")?;
        let team_oid = parse_id(team_id, "Invalid IDs")?;

        if self.find_by_id::<Team>(team_oid).await?.is_none() {
            return Err(TournamentError::NotFound("Team not found"));
        }

        let matched = store
            .update_one(
                Tournament::COLLECTION,
                doc! { "_id": tournament_oid },
                doc! { "$addToSet": { "team_ids": team_id } },
            )
            .await?;
        debug!(
            "Attached team {} to tournament {} (matched {})",
            team_oid, tournament_oid, matched
        );
        Ok(())
    }

    pub async fn list_teams(&self) -> TournamentResult<Vec<Team>> {
        self.list(doc! {}).await
    }

    pub async fn create_team(&self, team: NewTeam) -> TournamentResult<Team> {
        let team = self.insert(team).await?;
        info!("Created team {} ({})", team.team_name, team.id);
        Ok(team)
    }

    pub async fn list_players(&self) -> TournamentResult<Vec<Player>> {
        self.list(doc! {}).await
    }

    /// Create a player. Neither UID uniqueness nor the team reference is checked.
    pub async fn create_player(&self, player: NewPlayer) -> TournamentResult<Player> {
        let player = self.insert(player).await?;
        info!("Created player {} ({})", player.ign, player.id);
        Ok(player)
    }

    /// Generate round-one matches from the tournament's attached teams
    ///
    /// Matches carry `tournament_id` as given, so listing by the same string
    /// finds them. Returns the number of matches created. Calling this again appends
    /// another full set of matches.
    pub async fn generate_brackets(&self, tournament_id: &str) -> TournamentResult<usize> {
        self.store()?;
        let id = parse_id(tournament_id, "Invalid tournament id")?;
        let tournament: Tournament = self
            .find_by_id(id)
            .await?
            .ok_or(TournamentError::NotFound("Tournament not found"))?;

        let matches = pair_round_one(tournament_id, &tournament.team_ids);
        let created = self.insert_all(matches).await?;

        info!(
            "Generated {} round-one match(es) for tournament {} from {} team(s)",
            created,
            id,
            tournament.team_ids.len()
        );
        Ok(created)
    }

    /// Matches whose `tournament_id` equals the given string
    pub async fn list_matches(&self, tournament_id: &str) -> TournamentResult<Vec<Match>> {
        self.list(doc! { "tournament_id": tournament_id }).await
    }

    /// Apply the present fields of `patch` to a match
    ///
    /// The winner is not checked against the two teams, and a missing match
    /// is not reported.
    pub async fn update_match(&self, match_id: &str, patch: MatchPatch) -> TournamentResult<()> {
        self.store()?;
        let id = parse_id(match_id, "Invalid match id")?;
        if patch.is_empty() {
            return Ok(());
        }
        self.apply_patch::<Match>(id, mongodb::bson::to_document(&patch)?)
            .await
    }

    /// Create lettered groups and their empty standing slots
    pub async fn generate_groups(
        &self,
        tournament_id: &str,
        number_of_teams: i64,
        number_of_groups: i64,
    ) -> TournamentResult<GroupGenerationSummary> {
        self.store()?;
        let id = parse_id(tournament_id, "Invalid tournament id")?;
        let plan = groups::plan(tournament_id, number_of_teams, number_of_groups)?;

        if self.find_by_id::<Tournament>(id).await?.is_none() {
            return Err(TournamentError::NotFound("Tournament not found"));
        }

        let groups_created = self.insert_all(plan.groups).await?;
        let standing_slots = self.insert_all(plan.standings).await?;

        info!(
            "Generated {} group(s) with {} standing slot(s) for tournament {}",
            groups_created, standing_slots, id
        );
        Ok(GroupGenerationSummary {
            groups_created,
            standing_slots,
        })
    }

    pub async fn list_groups(&self, tournament_id: &str) -> TournamentResult<Vec<Group>> {
        self.list(doc! { "tournament_id": tournament_id }).await
    }

    pub async fn list_standings(&self, tournament_id: &str) -> TournamentResult<Vec<Standing>> {
        self.list(doc! { "tournament_id": tournament_id }).await
    }

    /// Apply the present fields of `patch` to a standing slot
    pub async fn update_standing(
        &self,
        standing_id: &str,
        patch: StandingPatch,
    ) -> TournamentResult<()> {
        self.store()?;
        let id = parse_id(standing_id, "Invalid standing id")?;
        if patch.is_empty() {
            return Ok(());
        }
        self.apply_patch::<Standing>(id, mongodb::bson::to_document(&patch)?)
            .await
    }

    /// Collection names currently present in the store
    pub async fn collection_names(&self) -> TournamentResult<Vec<String>> {
        Ok(self.store()?.list_collection_names().await?)
    }
}
