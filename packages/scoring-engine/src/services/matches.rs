use tracing::{debug, info};

use crate::domain::live::LiveScoringSession;
use crate::domain::retrospective::RetrospectiveScoreEntry;
use crate::domain::rules::{BestOf, MatchConfig};
use crate::domain::state::{GameScore, Side};
use crate::errors::domain::DomainError;
use crate::repos::matches::{MatchRecord, MatchRepo};

/// Writes scoring-session output back to the match store.
///
/// The sessions never touch storage themselves; callers hand their state to
/// this service after the transition that produced it.
pub struct MatchService<R> {
    repo: R,
}

impl<R: MatchRepo> MatchService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub async fn create_match(
        &self,
        player_id: &str,
        opponent_id: &str,
        match_length: BestOf,
    ) -> Result<MatchRecord, DomainError> {
        let record = MatchRecord::new(player_id, opponent_id, match_length);
        self.repo.insert(record.clone()).await?;
        info!(match_id = %record.id, player_id, opponent_id, games = match_length.games(), "Match created");
        Ok(record)
    }

    pub async fn get_match(&self, match_id: &str) -> Result<MatchRecord, DomainError> {
        self.repo.get(match_id).await
    }

    /// Start (or continue) live scoring from the games already stored.
    pub async fn open_live_session(
        &self,
        match_id: &str,
        config: MatchConfig,
        first_server: Side,
    ) -> Result<LiveScoringSession, DomainError> {
        let record = self.repo.get(match_id).await?;
        ensure_length(&record, &config)?;
        debug!(match_id, stored_games = record.games.len(), "Opening live session");
        Ok(LiveScoringSession::resume(
            config,
            record.participants(),
            first_server,
            record.games.clone(),
        ))
    }

    /// Store the session's completed games and the status derived from them.
    ///
    /// Writes only when the game list differs from what is stored.
    pub async fn sync_live_session(
        &self,
        match_id: &str,
        session: &LiveScoringSession,
    ) -> Result<MatchRecord, DomainError> {
        let mut record = self.repo.get(match_id).await?;
        if record.games.as_slice() == session.completed_games() {
            debug!(match_id, "Stored games already current");
            return Ok(record);
        }
        self.write_games(&mut record, session.completed_games().to_vec())
            .await?;
        Ok(record)
    }

    pub async fn open_retrospective(
        &self,
        match_id: &str,
        config: MatchConfig,
    ) -> Result<RetrospectiveScoreEntry, DomainError> {
        let record = self.repo.get(match_id).await?;
        ensure_length(&record, &config)?;
        Ok(RetrospectiveScoreEntry::from_games(config, &record.games))
    }

    /// Store a whole-match entry if it passes the save gate.
    ///
    /// A rejected save returns `DomainError::Validation` carrying the gate's reason.
    pub async fn save_retrospective(
        &self,
        match_id: &str,
        entry: &RetrospectiveScoreEntry,
        allow_incomplete_save: bool,
    ) -> Result<MatchRecord, DomainError> {
        let mut record = self.repo.get(match_id).await?;
        ensure_length(&record, entry.config())?;

        let check = entry.can_save(allow_incomplete_save);
        if !check.can_save {
            let reason = check.reason.unwrap_or_default();
            debug!(match_id, %reason, "Save rejected");
            return Err(DomainError::validation(reason));
        }

        let games = entry.decided_games(&record.participants());
        self.write_games(&mut record, games).await?;
        Ok(record)
    }

    async fn write_games(
        &self,
        record: &mut MatchRecord,
        games: Vec<GameScore>,
    ) -> Result<(), DomainError> {
        let status_before = record.status;
        record.apply_games(games);
        self.repo.update(record.clone()).await?;

        if record.status != status_before {
            info!(
                match_id = %record.id,
                status = record.status.as_str(),
                winner_id = record.winner_id.as_deref().unwrap_or(""),
                "Match status changed"
            );
        } else {
            debug!(match_id = %record.id, games = record.games.len(), "Match games stored");
        }
        Ok(())
    }
}

fn ensure_length(record: &MatchRecord, config: &MatchConfig) -> Result<(), DomainError> {
    if record.match_length != config.best_of() {
        return Err(DomainError::validation(format!(
            "match {} is {}, scoring format is {}",
            record.id,
            record.match_length,
            config.best_of()
        )));
    }
    Ok(())
}
