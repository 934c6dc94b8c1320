//! Match record shape and the persistence port the caller writes through.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use ulid::Ulid;

use crate::domain::match_rules::{is_match_complete, match_winner};
use crate::domain::rules::BestOf;
use crate::domain::state::{GameScore, Participants};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    InProgress,
    Completed,
}

impl MatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchStatus::InProgress => "in_progress",
            MatchStatus::Completed => "completed",
        }
    }
}

/// Stored match, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: String,
    pub player_id: String,
    pub opponent_id: String,
    pub match_length: BestOf,
    pub status: MatchStatus,
    pub games: Vec<GameScore>,
    pub winner_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl MatchRecord {
    pub fn new(
        player_id: impl Into<String>,
        opponent_id: impl Into<String>,
        match_length: BestOf,
    ) -> Self {
        Self {
            id: Ulid::new().to_string(),
            player_id: player_id.into(),
            opponent_id: opponent_id.into(),
            match_length,
            status: MatchStatus::InProgress,
            games: Vec::new(),
            winner_id: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn participants(&self) -> Participants {
        Participants::new(self.player_id.clone(), self.opponent_id.clone())
    }

    /// Replace the game list and derive `status` / `winner_id` from it.
    pub fn apply_games(&mut self, games: Vec<GameScore>) {
        self.games = games;
        let winner = match_winner(
            &self.games,
            self.match_length,
            &self.player_id,
            &self.opponent_id,
        );
        self.winner_id = winner.map(str::to_string);
        self.status = if is_match_complete(
            &self.games,
            self.match_length,
            &self.player_id,
            &self.opponent_id,
        ) {
            MatchStatus::Completed
        } else {
            MatchStatus::InProgress
        };
    }
}

/// Persistence port for match records.
#[async_trait]
pub trait MatchRepo: Send + Sync {
    async fn get(&self, id: &str) -> Result<MatchRecord, DomainError>;

    async fn insert(&self, record: MatchRecord) -> Result<(), DomainError>;

    /// Overwrite an existing record.
    async fn update(&self, record: MatchRecord) -> Result<(), DomainError>;
}

/// Process-local store used by tests and the command-line driver.
#[derive(Debug, Default)]
pub struct InMemoryMatchRepo {
    matches: RwLock<HashMap<String, MatchRecord>>,
}

impl InMemoryMatchRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.matches.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.read().is_empty()
    }
}

#[async_trait]
impl MatchRepo for InMemoryMatchRepo {
    async fn get(&self, id: &str) -> Result<MatchRecord, DomainError> {
        self.matches
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Match, format!("match {id}")))
    }

    async fn insert(&self, record: MatchRecord) -> Result<(), DomainError> {
        let mut matches = self.matches.write();
        if matches.contains_key(&record.id) {
            return Err(DomainError::conflict(
                ConflictKind::DuplicateMatchId,
                format!("match {} already exists", record.id),
            ));
        }
        matches.insert(record.id.clone(), record);
        Ok(())
    }

    async fn update(&self, record: MatchRecord) -> Result<(), DomainError> {
        let mut matches = self.matches.write();
        match matches.get_mut(&record.id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(DomainError::not_found(
                NotFoundKind::Match,
                format!("match {}", record.id),
            )),
        }
    }
}
