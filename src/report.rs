use tracing::debug;

// ── Score reports ──────────────────────────────────────────────────────

/// A result reported through chat rather than the console: who won, who
/// lost, and the total sets played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    pub winner_id: String,
    pub loser_id: String,
    pub total_sets: u32,
}

/// The store-side bound on a total: the winner took `sets_needed`, the
/// loser at most `sets_needed - 1`.
pub fn valid_total_sets(total: u32, sets_needed: u32) -> bool {
    total >= sets_needed && total <= sets_needed * 2 - 1
}

/// Extracts an `a-b` score pair from free text, e.g. "3-1" out of
/// "me over <@u2> 3-1". The first digit-dash-digit run wins.
pub fn parse_score(text: &str) -> Option<(u32, u32)> {
    let bytes = text.as_bytes();
    let dash = text.find('-')?;
    if dash == 0 || dash + 1 >= bytes.len() {
        return None;
    }
    let left = (bytes[dash - 1] as char).to_digit(10)?;
    let right = (bytes[dash + 1] as char).to_digit(10)?;
    Some((left, right))
}

fn parse_first_mention(text: &str) -> Option<(String, &str)> {
    let start = text.find("<@")?;
    let rest = &text[start + 2..];
    let end = rest.find('>')?;
    let id = rest[..end].trim().to_uppercase();
    if id.is_empty() {
        return None;
    }
    Some((id, &rest[end + 1..]))
}

impl ScoreReport {
    /// Parses the three accepted report forms:
    ///   `me over <@them> a-b`    — poster won
    ///   `<@them> over me a-b`    — poster lost
    ///   `<@winner> <@loser> a-b` — admin form, both sides named
    pub fn parse(text: &str, poster_id: &str, is_admin: bool) -> Option<ScoreReport> {
        let trimmed = text.trim();

        let (winner, loser) = if is_admin && trimmed.starts_with("<@") {
            let (first, rest) = parse_first_mention(trimmed)?;
            let (second, _) = parse_first_mention(rest)?;
            (first, second)
        } else if let Some(rest) = trimmed.strip_prefix("me over ") {
            let (them, _) = parse_first_mention(rest)?;
            (poster_id.to_uppercase(), them)
        } else if trimmed.starts_with("<@") && trimmed.contains("over me") {
            let (them, _) = parse_first_mention(trimmed)?;
            (them, poster_id.to_uppercase())
        } else {
            debug!("unrecognized report format: {trimmed:?}");
            return None;
        };

        if winner == loser {
            debug!("report names the same player on both sides");
            return None;
        }

        let (winner_sets, loser_sets) = parse_score(trimmed)?;
        if loser_sets >= winner_sets {
            return None;
        }
        Some(ScoreReport {
            winner_id: winner,
            loser_id: loser,
            total_sets: winner_sets + loser_sets,
        })
    }
}
