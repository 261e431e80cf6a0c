use crate::players::resolve_name;
use crate::types::{Match, Player};
use std::collections::HashMap;

// ── Group standings ────────────────────────────────────────────────────

/// One row of a group table: match and set win/loss counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupStanding {
    pub player_id: String,
    pub match_wins: u32,
    pub match_losses: u32,
    pub set_wins: u32,
    pub set_losses: u32,
}

impl GroupStanding {
    fn new(player_id: &str) -> Self {
        GroupStanding {
            player_id: player_id.to_string(),
            match_wins: 0,
            match_losses: 0,
            set_wins: 0,
            set_losses: 0,
        }
    }

    pub fn set_diff(&self) -> i64 {
        i64::from(self.set_wins) - i64::from(self.set_losses)
    }
}

/// Per-player standings over the decided matches of a group, best record
/// first. Forfeited matches count here: a forfeit still carries a winner
/// and score for group rank and tiebreaker purposes.
pub fn gather_scores(matches: &[Match]) -> Vec<GroupStanding> {
    let mut by_player: HashMap<String, GroupStanding> = HashMap::new();

    for record in matches {
        let Some(winner_id) = record.winner_id.as_deref() else {
            continue;
        };
        let loser_id = if record.player_1_id.as_deref() == Some(winner_id) {
            record.player_2_id.as_deref()
        } else {
            record.player_1_id.as_deref()
        };
        let loser_sets = record.sets.saturating_sub(record.sets_needed);

        let winner = by_player
            .entry(winner_id.to_string())
            .or_insert_with(|| GroupStanding::new(winner_id));
        winner.match_wins += 1;
        winner.set_wins += record.sets_needed;
        winner.set_losses += loser_sets;

        if let Some(loser_id) = loser_id {
            let loser = by_player
                .entry(loser_id.to_string())
                .or_insert_with(|| GroupStanding::new(loser_id));
            loser.match_losses += 1;
            loser.set_wins += loser_sets;
            loser.set_losses += record.sets_needed;
        }
    }

    let mut standings: Vec<GroupStanding> = by_player.into_values().collect();
    standings.sort_by(|a, b| {
        b.match_wins
            .cmp(&a.match_wins)
            .then(b.set_diff().cmp(&a.set_diff()))
            .then(b.set_wins.cmp(&a.set_wins))
            .then(a.player_id.cmp(&b.player_id))
    });
    standings
}

/// Schedule slice for one season of play.
pub fn matches_for_season(matches: &[Match], season: i64) -> Vec<Match> {
    matches
        .iter()
        .filter(|record| record.season == season)
        .cloned()
        .collect()
}

// ── Historical leaderboard ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    pub name: String,
    pub sets_won: u32,
    pub sets_lost: u32,
    pub winrate: f64,
}

/// Set-level win rates across all decided matches. Forfeits are excluded:
/// a result recorded without play carries no historical weight. Best rate
/// first (pass `best_first = false` for the loserboard).
pub fn leaderboard(matches: &[Match], players: &[Player], best_first: bool) -> Vec<LeaderboardRow> {
    let played: Vec<Match> = matches
        .iter()
        .filter(|record| !record.forfeit)
        .cloned()
        .collect();

    let mut rows: Vec<LeaderboardRow> = gather_scores(&played)
        .into_iter()
        .filter(|standing| standing.set_wins + standing.set_losses > 0)
        .map(|standing| {
            let total = f64::from(standing.set_wins + standing.set_losses);
            LeaderboardRow {
                name: resolve_name(Some(&standing.player_id), players),
                sets_won: standing.set_wins,
                sets_lost: standing.set_losses,
                winrate: (f64::from(standing.set_wins) / total * 10_000.0).round() / 100.0,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        let ordering = b
            .winrate
            .partial_cmp(&a.winrate)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.name.cmp(&b.name));
        if best_first {
            ordering
        } else {
            ordering.reverse()
        }
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_match(id: i64, p1: &str, p2: &str, winner: &str, sets: u32) -> Match {
        Match {
            id,
            grouping: "A".to_string(),
            player_1_id: Some(p1.to_string()),
            player_2_id: Some(p2.to_string()),
            sets_needed: 3,
            sets,
            winner_id: Some(winner.to_string()),
            forfeit: false,
            date_played: None,
            week: None,
            season: 1,
        }
    }

    #[test]
    fn test_gather_scores_counts_sets_and_matches() {
        let matches = vec![
            make_match(1, "u1", "u2", "u1", 5), // u1 3-2 u2
            make_match(2, "u1", "u3", "u1", 3), // u1 3-0 u3
            make_match(3, "u2", "u3", "u3", 4), // u3 3-1 u2
        ];
        let standings = gather_scores(&matches);

        assert_eq!(standings[0].player_id, "u1");
        assert_eq!(standings[0].match_wins, 2);
        assert_eq!(standings[0].match_losses, 0);
        assert_eq!(standings[0].set_wins, 6);
        assert_eq!(standings[0].set_losses, 2);

        let u2 = standings.iter().find(|s| s.player_id == "u2").unwrap();
        assert_eq!(u2.match_wins, 0);
        assert_eq!(u2.match_losses, 2);
        assert_eq!(u2.set_wins, 3);
        assert_eq!(u2.set_losses, 6);
    }

    #[test]
    fn test_gather_scores_skips_undecided() {
        let mut record = make_match(1, "u1", "u2", "u1", 3);
        record.winner_id = None;
        record.sets = 0;
        assert!(gather_scores(&[record]).is_empty());
    }

    #[test]
    fn test_gather_scores_includes_forfeits() {
        let mut record = make_match(1, "u1", "u2", "u1", 3);
        record.forfeit = true;
        let standings = gather_scores(&[record]);
        assert_eq!(standings[0].player_id, "u1");
        assert_eq!(standings[0].match_wins, 1);
    }

    #[test]
    fn test_gather_scores_bye_only_credits_present_player() {
        let mut record = make_match(1, "u1", "u2", "u1", 3);
        record.player_2_id = None;
        let standings = gather_scores(&[record]);
        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].player_id, "u1");
    }

    #[test]
    fn test_leaderboard_excludes_forfeits() {
        let players = vec![
            Player { id: "u1".to_string(), name: "Ana".to_string() },
            Player { id: "u2".to_string(), name: "Bo".to_string() },
        ];
        let mut forfeited = make_match(2, "u1", "u2", "u2", 3);
        forfeited.forfeit = true;
        let matches = vec![make_match(1, "u1", "u2", "u1", 4), forfeited];

        let rows = leaderboard(&matches, &players, true);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Ana");
        assert_eq!(rows[0].sets_won, 3);
        assert_eq!(rows[0].sets_lost, 1);
        assert_eq!(rows[0].winrate, 75.0);
        assert_eq!(rows[1].name, "Bo");
        assert_eq!(rows[1].winrate, 25.0);
    }

    #[test]
    fn test_loserboard_order() {
        let players = vec![
            Player { id: "u1".to_string(), name: "Ana".to_string() },
            Player { id: "u2".to_string(), name: "Bo".to_string() },
        ];
        let matches = vec![make_match(1, "u1", "u2", "u1", 4)];
        let rows = leaderboard(&matches, &players, false);
        assert_eq!(rows[0].name, "Bo");
    }

    #[test]
    fn test_matches_for_season() {
        let mut other = make_match(2, "u1", "u2", "u1", 3);
        other.season = 2;
        let matches = vec![make_match(1, "u1", "u2", "u1", 3), other];
        let season = matches_for_season(&matches, 2);
        assert_eq!(season.len(), 1);
        assert_eq!(season[0].id, 2);
    }
}
