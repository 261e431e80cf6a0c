use crate::commands::CommandNotifier;
use crate::report::{valid_total_sets, ScoreReport};
use crate::sync::{ScoreSync, SyncError};
use crate::types::{
    ClearScorePayload, Match, SetForfeitPayload, SetScorePayload, SharedMatch,
    CLEAR_SCORE_ENDPOINT, SET_FORFEIT_ENDPOINT, SET_SCORE_ENDPOINT,
};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

// ── Errors ─────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("invalid transition: {0}")]
    Validation(String),
    #[error("payload encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Sync(#[from] SyncError),
}

// ── Transition engine ──────────────────────────────────────────────────

/// Drives the four score transitions for a single match. The shared
/// record is mutated optimistically; the last server-confirmed state is
/// kept so a failed write can be rolled back instead of leaving the
/// record diverged until the next full reload. Transitions take
/// `&mut self`, so only one write per match is ever in flight.
pub struct MatchEditor {
    league_name: String,
    record: SharedMatch,
    confirmed: Match,
    sync: std::sync::Arc<dyn ScoreSync>,
    notifier: std::sync::Arc<dyn CommandNotifier>,
    reload_pending: bool,
}

impl MatchEditor {
    pub fn new(
        league_name: &str,
        record: SharedMatch,
        sync: std::sync::Arc<dyn ScoreSync>,
        notifier: std::sync::Arc<dyn CommandNotifier>,
    ) -> Self {
        let confirmed = {
            let guard = record.lock().unwrap_or_else(|e| e.into_inner());
            guard.clone()
        };
        MatchEditor {
            league_name: league_name.to_string(),
            record,
            confirmed,
            sync,
            notifier,
            reload_pending: false,
        }
    }

    /// Editor wired to the real backing service described by `config`.
    pub fn with_http_sync(
        config: &crate::config::ConsoleConfig,
        record: SharedMatch,
        notifier: std::sync::Arc<dyn CommandNotifier>,
    ) -> Self {
        let sync = std::sync::Arc::new(crate::sync::HttpSync::new(&config.api_base_url));
        MatchEditor::new(&config.league_name, record, sync, notifier)
    }

    /// Records `winner_id` as the winner with a clean sweep; the loser's
    /// score starts at zero and is edited separately. Valid both for an
    /// undecided match and as a re-pick of an already decided one.
    pub fn set_winner(&mut self, winner_id: &str, loser_id: &str) -> Result<(), EditorError> {
        debug!("set winner {winner_id} over {loser_id}");
        let (match_id, sets_needed) = {
            let guard = self.lock_record();
            (guard.id, guard.sets_needed)
        };
        let payload = SetScorePayload {
            league_name: self.league_name.clone(),
            match_id,
            winner_id: winner_id.to_string(),
            sets: sets_needed,
        };
        let winner = winner_id.to_string();
        self.commit(
            SET_SCORE_ENDPOINT,
            serde_json::to_value(&payload)?,
            true,
            move |record| {
                record.winner_id = Some(winner);
                record.sets = sets_needed;
            },
        )
    }

    /// Updates the losing side's sets from raw field input. Only legal
    /// while a winner is recorded (the field is disabled otherwise);
    /// unparseable, negative, or winner-matching values are rejected
    /// before any request is sent.
    pub fn update_loser_score(
        &mut self,
        winner_id: &str,
        loser_id: &str,
        loser_sets_raw: &str,
    ) -> Result<(), EditorError> {
        let (match_id, sets_needed, decided) = {
            let guard = self.lock_record();
            (guard.id, guard.sets_needed, guard.winner_id.is_some())
        };
        if !decided {
            return Err(EditorError::Validation(
                "cannot set a loser score before a winner is recorded".to_string(),
            ));
        }
        let loser_sets: u32 = loser_sets_raw.trim().parse().map_err(|_| {
            EditorError::Validation(format!("loser score {loser_sets_raw:?} is not a number"))
        })?;
        if loser_sets >= sets_needed {
            return Err(EditorError::Validation(format!(
                "loser score {loser_sets} must be below {sets_needed}"
            )));
        }
        debug!("update loser score: {loser_id} took {loser_sets} sets off {winner_id}");

        let total_sets = sets_needed + loser_sets;
        let payload = SetScorePayload {
            league_name: self.league_name.clone(),
            match_id,
            winner_id: winner_id.to_string(),
            sets: total_sets,
        };
        self.commit(
            SET_SCORE_ENDPOINT,
            serde_json::to_value(&payload)?,
            true,
            move |record| {
                record.sets = total_sets;
            },
        )
    }

    /// Flips the forfeit flag, independent of winner state.
    pub fn toggle_forfeit(&mut self) -> Result<(), EditorError> {
        let (match_id, forfeit) = {
            let guard = self.lock_record();
            (guard.id, !guard.forfeit)
        };
        let payload = SetForfeitPayload {
            league_name: self.league_name.clone(),
            match_id,
            forfeit,
        };
        self.commit(
            SET_FORFEIT_ENDPOINT,
            serde_json::to_value(&payload)?,
            true,
            move |record| {
                record.forfeit = forfeit;
            },
        )
    }

    /// Resets winner, sets, and date played. Only offered once a winner
    /// exists; the forfeit flag is left alone.
    pub fn clear_score(&mut self) -> Result<(), EditorError> {
        let match_id = {
            let guard = self.lock_record();
            if guard.winner_id.is_none() {
                return Err(EditorError::Validation(
                    "no score to clear".to_string(),
                ));
            }
            guard.id
        };
        let payload = ClearScorePayload {
            league_name: self.league_name.clone(),
            match_id,
        };
        self.commit(
            CLEAR_SCORE_ENDPOINT,
            serde_json::to_value(&payload)?,
            false,
            |record| {
                record.winner_id = None;
                record.sets = 0;
                record.date_played = None;
            },
        )
    }

    /// Applies a chat-reported result as one set-score write: winner
    /// plus the reported total sets.
    pub fn apply_report(&mut self, report: &ScoreReport) -> Result<(), EditorError> {
        let (match_id, sets_needed) = {
            let guard = self.lock_record();
            (guard.id, guard.sets_needed)
        };
        if !valid_total_sets(report.total_sets, sets_needed) {
            return Err(EditorError::Validation(format!(
                "reported total {} out of range for best-of-{}",
                report.total_sets,
                sets_needed * 2 - 1
            )));
        }
        let payload = SetScorePayload {
            league_name: self.league_name.clone(),
            match_id,
            winner_id: report.winner_id.clone(),
            sets: report.total_sets,
        };
        let winner = report.winner_id.clone();
        let total = report.total_sets;
        self.commit(
            SET_SCORE_ENDPOINT,
            serde_json::to_value(&payload)?,
            true,
            move |record| {
                record.winner_id = Some(winner);
                record.sets = total;
            },
        )
    }

    /// Consumes the reload marker raised by score-affecting transitions,
    /// so dependent effects re-synchronize exactly once.
    pub fn take_reload_flag(&mut self) -> bool {
        std::mem::take(&mut self.reload_pending)
    }

    /// Current view of the shared record.
    pub fn snapshot(&self) -> Match {
        self.lock_record().clone()
    }

    fn lock_record(&self) -> std::sync::MutexGuard<'_, Match> {
        self.record.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Optimistically applies `apply`, then persists. On success the
    /// confirmed snapshot advances and the command scheduler is poked;
    /// on failure the shared record is reverted to the last confirmed
    /// state and the error is logged and returned.
    fn commit<F>(
        &mut self,
        endpoint: &str,
        payload: Value,
        score_affecting: bool,
        apply: F,
    ) -> Result<(), EditorError>
    where
        F: FnOnce(&mut Match),
    {
        {
            let mut guard = self.lock_record();
            apply(&mut guard);
        }
        match self.sync.send(endpoint, &payload) {
            Ok(()) => {
                let snapshot = self.lock_record().clone();
                self.confirmed = snapshot;
                self.notifier.commands_pending(&self.league_name);
                if score_affecting {
                    self.reload_pending = true;
                }
                Ok(())
            }
            Err(e) => {
                error!("match {}: {endpoint} failed, reverting local edit: {e}", self.confirmed.id);
                let mut guard = self.lock_record();
                *guard = self.confirmed.clone();
                Err(EditorError::Sync(e))
            }
        }
    }
}
