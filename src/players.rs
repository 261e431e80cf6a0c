use crate::types::{Player, BYE_NAME};

/// Display name for a match slot. A missing id is a bye; an id with no
/// roster entry degrades to showing the raw id.
pub fn resolve_name(player_id: Option<&str>, players: &[Player]) -> String {
    let Some(id) = player_id else {
        return BYE_NAME.to_string();
    };
    for player in players {
        if player.id == id {
            return player.name.clone();
        }
    }
    id.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_players() -> Vec<Player> {
        vec![
            Player { id: "u1".to_string(), name: "Ana".to_string() },
            Player { id: "u2".to_string(), name: "Bo".to_string() },
        ]
    }

    #[test]
    fn test_resolve_name_bye() {
        assert_eq!(resolve_name(None, &make_players()), "Bye");
        assert_eq!(resolve_name(None, &[]), "Bye");
    }

    #[test]
    fn test_resolve_name_lookup() {
        let players = make_players();
        assert_eq!(resolve_name(Some("u1"), &players), "Ana");
        assert_eq!(resolve_name(Some("u2"), &players), "Bo");
    }

    #[test]
    fn test_resolve_name_unknown_id_falls_back_to_raw() {
        assert_eq!(resolve_name(Some("u9"), &[]), "u9");
        assert_eq!(resolve_name(Some("u9"), &make_players()), "u9");
    }
}
