use crate::types::{Match, PlayerSlot};

// ── Derived state ──────────────────────────────────────────────────────

/// Flags derived from `(winner_id, forfeit)`. A match can be decided and
/// forfeited at the same time: a forfeit still carries a winner and score
/// for group rank and tiebreaker purposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchState {
    pub decided: bool,
    pub forfeited: bool,
}

pub fn match_state(record: &Match) -> MatchState {
    MatchState {
        decided: record.winner_id.is_some(),
        forfeited: record.forfeit,
    }
}

/// The clear-score control is only offered once a winner is recorded.
pub fn clear_score_visible(record: &Match) -> bool {
    record.winner_id.is_some()
}

// ── Score display ──────────────────────────────────────────────────────

/// Displayed scores for both slots: empty strings while undecided,
/// otherwise `sets_needed` for the winner and `sets - sets_needed` for
/// the loser, as decimal strings.
pub fn score_displays(record: &Match) -> (String, String) {
    let Some(winner_id) = record.winner_id.as_deref() else {
        return (String::new(), String::new());
    };
    let winner_score = record.sets_needed.to_string();
    let loser_score = record.sets.saturating_sub(record.sets_needed).to_string();
    if record.player_1_id.as_deref() == Some(winner_id) {
        (winner_score, loser_score)
    } else if record.player_2_id.as_deref() == Some(winner_id) {
        (loser_score, winner_score)
    } else {
        (String::new(), String::new())
    }
}

/// A slot's score field only takes input while the opposing player holds
/// the win, so only the losing side's score is ever editable and the two
/// fields can never be edited at once.
pub fn score_field_enabled(record: &Match, slot: PlayerSlot) -> bool {
    let opposing = match slot {
        PlayerSlot::One => record.player_2_id.as_deref(),
        PlayerSlot::Two => record.player_1_id.as_deref(),
    };
    match (record.winner_id.as_deref(), opposing) {
        (Some(winner), Some(opponent)) => winner == opponent,
        _ => false,
    }
}
