use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

// ── Constants ──────────────────────────────────────────────────────────

pub const CLEAR_SCORE_ENDPOINT: &str = "clear-score";
pub const SET_SCORE_ENDPOINT: &str = "set-score";
pub const SET_FORFEIT_ENDPOINT: &str = "set-forfeit";

pub const BYE_NAME: &str = "Bye";

// ── Shared state type aliases ──────────────────────────────────────────

/// The match record under edit, shared with the match-list collaborator.
pub type SharedMatch = Arc<Mutex<Match>>;

// ── Domain types ───────────────────────────────────────────────────────

/// One scheduled match. `sets` encodes the total completed sets once a
/// winner exists: the winner took `sets_needed`, the loser the remainder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: i64,
    pub grouping: String,
    pub player_1_id: Option<String>,
    pub player_2_id: Option<String>,
    pub sets_needed: u32,
    pub sets: u32,
    pub winner_id: Option<String>,
    pub forfeit: bool,
    pub date_played: Option<DateTime<Utc>>,
    pub week: Option<NaiveDate>,
    pub season: i64,
}

impl Match {
    pub fn shared(self) -> SharedMatch {
        Arc::new(Mutex::new(self))
    }
}

/// Roster entry, supplied by the player-board collaborator. Read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
}

/// Which side of the match a UI row belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerSlot {
    One,
    Two,
}

// ── Request payload types ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearScorePayload {
    pub league_name: String,
    pub match_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetScorePayload {
    pub league_name: String,
    pub match_id: i64,
    pub winner_id: String,
    pub sets: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetForfeitPayload {
    pub league_name: String,
    pub match_id: i64,
    pub forfeit: bool,
}
