pub mod types;
pub mod config;
pub mod players;
pub mod score;
pub mod report;
pub mod sync;
pub mod commands;
pub mod editor;
pub mod standings;

pub use commands::{ChannelNotifier, CommandNotifier, LeagueEvent, PendingCommands};
pub use config::ConsoleConfig;
pub use editor::{EditorError, MatchEditor};
pub use players::resolve_name;
pub use report::ScoreReport;
pub use score::{clear_score_visible, match_state, score_displays, score_field_enabled, MatchState};
pub use standings::{gather_scores, leaderboard, GroupStanding, LeaderboardRow};
pub use sync::{HttpSync, ScoreSync, SyncError};
pub use types::{Match, Player, PlayerSlot, SharedMatch};

use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber for hosts that don't bring their own.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}
