use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::mpsc::Sender;
use std::sync::Mutex;
use tracing::warn;

// ── Events ─────────────────────────────────────────────────────────────

/// Wire form: `{"type":"need_to_check_for_commands","checkForCommandsToRun":true}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LeagueEvent {
    #[serde(rename_all = "camelCase")]
    NeedToCheckForCommands {
        league_name: String,
        check_for_commands_to_run: bool,
    },
}

// ── Notifier ───────────────────────────────────────────────────────────

/// Raised after every persisted transition so the downstream command
/// processor re-evaluates its queue.
pub trait CommandNotifier: Send + Sync {
    fn commands_pending(&self, league_name: &str);
}

/// Notifier backed by an mpsc channel to the scheduler collaborator.
pub struct ChannelNotifier {
    tx: Mutex<Sender<LeagueEvent>>,
}

impl ChannelNotifier {
    pub fn new(tx: Sender<LeagueEvent>) -> Self {
        ChannelNotifier { tx: Mutex::new(tx) }
    }
}

impl CommandNotifier for ChannelNotifier {
    fn commands_pending(&self, league_name: &str) {
        let event = LeagueEvent::NeedToCheckForCommands {
            league_name: league_name.to_string(),
            check_for_commands_to_run: true,
        };
        let guard = self.tx.lock().unwrap_or_else(|e| e.into_inner());
        if guard.send(event).is_err() {
            // Scheduler hung up; the next full reload picks the work up.
            warn!("command scheduler channel closed, dropping re-check for {league_name}");
        }
    }
}

// ── Pending command ledger ─────────────────────────────────────────────

/// Per-league FIFO of raw store commands awaiting the scheduler. This is
/// the queue the `commands_pending` signal tells the scheduler to drain.
#[derive(Default)]
pub struct PendingCommands {
    per_league: Mutex<HashMap<String, Vec<String>>>,
}

impl PendingCommands {
    pub fn new() -> Self {
        PendingCommands::default()
    }

    pub fn add(&self, league_name: &str, command: String) {
        let mut guard = self.per_league.lock().unwrap_or_else(|e| e.into_inner());
        guard.entry(league_name.to_string()).or_default().push(command);
    }

    /// Drains and returns the league's queue in insertion order.
    pub fn take(&self, league_name: &str) -> Vec<String> {
        let mut guard = self.per_league.lock().unwrap_or_else(|e| e.into_inner());
        guard.remove(league_name).unwrap_or_default()
    }

    pub fn is_empty(&self, league_name: &str) -> bool {
        let guard = self.per_league.lock().unwrap_or_else(|e| e.into_inner());
        guard.get(league_name).map(|queue| queue.is_empty()).unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    #[test]
    fn test_event_wire_form() {
        let event = LeagueEvent::NeedToCheckForCommands {
            league_name: "melee".to_string(),
            check_for_commands_to_run: true,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "need_to_check_for_commands");
        assert_eq!(json["checkForCommandsToRun"], true);
        assert_eq!(json["leagueName"], "melee");
    }

    #[test]
    fn test_channel_notifier_emits_event() {
        let (tx, rx) = channel();
        let notifier = ChannelNotifier::new(tx);
        notifier.commands_pending("melee");
        let event = rx.try_recv().unwrap();
        assert_eq!(
            event,
            LeagueEvent::NeedToCheckForCommands {
                league_name: "melee".to_string(),
                check_for_commands_to_run: true,
            }
        );
    }

    #[test]
    fn test_channel_notifier_survives_closed_channel() {
        let (tx, rx) = channel();
        drop(rx);
        let notifier = ChannelNotifier::new(tx);
        notifier.commands_pending("melee");
    }

    #[test]
    fn test_pending_commands_fifo_per_league() {
        let pending = PendingCommands::new();
        pending.add("melee", "UPDATE match SET sets=3".to_string());
        pending.add("melee", "UPDATE match SET sets=5".to_string());
        pending.add("pong", "DELETE FROM match".to_string());

        assert!(!pending.is_empty("melee"));
        let drained = pending.take("melee");
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0], "UPDATE match SET sets=3");
        assert!(pending.is_empty("melee"));

        // other league untouched
        assert_eq!(pending.take("pong").len(), 1);
    }

    #[test]
    fn test_pending_commands_take_unknown_league() {
        let pending = PendingCommands::new();
        assert!(pending.take("nobody").is_empty());
        assert!(pending.is_empty("nobody"));
    }
}
