/// Seed data for the simulated broadcast
///
/// This module provides the consistent, deterministic starting state every
/// feed begins from, plus the phrase and user pools the generators draw
/// from. It is used for:
/// 1. Seeding a `LiveFeed` at construction time
/// 2. Unit tests - ensuring tests have predictable data
/// 3. Benchmarks - providing consistent data for performance testing
use chrono::{Duration, Local};

use crate::types::{
    Badge, ChatKind, ChatMessage, CommentaryEntry, CommentaryKind, GameStatus, MatchSnapshot,
    Player, Point, Team, TeamStats,
};

pub const HOME_TEAM: &str = "Toronto Maple Leafs";
pub const AWAY_TEAM: &str = "Montreal Canadiens";

/// Lines the commentary generator picks from, uniformly at random.
pub const COMMENTARY_LINES: &[&str] = &[
    "Great defensive play by the home team, breaking up that rush.",
    "The puck movement has been excellent tonight from both teams.",
    "That's a textbook example of how to forecheck effectively.",
    "The goaltender is seeing the puck well tonight, tracking every shot.",
    "Beautiful passing sequence leads to a scoring chance!",
    "The crowd is on their feet after that big hit along the boards.",
    "Excellent stick work to break up that two-on-one opportunity.",
    "The power play unit is setting up nicely in the offensive zone.",
];

/// Lines the chat generator picks from.
pub const CHAT_LINES: &[&str] = &[
    "Great save!",
    "What a hit!",
    "Come on ref, that was a penalty!",
    "This game is intense!",
    "Beautiful passing play",
    "The crowd is electric tonight!",
    "That was close!",
    "Amazing stick work",
];

/// Screen names the chat generator posts as.
pub const CHAT_USERS: &[&str] = &[
    "HockeyFan123",
    "PuckLover",
    "IceWarrior",
    "GoalieGuru",
    "SlapShotKing",
    "PowerPlayPro",
];

/// The match state every feed starts from: TOR up 2-1 on MTL midway
/// through the second period.
pub fn seed_snapshot() -> MatchSnapshot {
    MatchSnapshot {
        players: seed_players(),
        puck: Point::new(300.0, 150.0),
        home_team: HOME_TEAM.to_string(),
        away_team: AWAY_TEAM.to_string(),
        home_score: 2,
        away_score: 1,
        period: 2,
        time_remaining: "15:42".to_string(),
        status: GameStatus::Live,
        home_stats: TeamStats {
            shots: 18,
            hits: 12,
            faceoff_wins: 15,
        },
        away_stats: TeamStats {
            shots: 14,
            hits: 16,
            faceoff_wins: 13,
        },
    }
}

/// Twelve skaters at their opening positions. Ids stay stable for the
/// whole session.
pub fn seed_players() -> Vec<Player> {
    vec![
        player(1, "John Smith", Team::Home, 91, 150.0, 100.0),
        player(2, "Mike Johnson", Team::Home, 34, 200.0, 150.0),
        player(3, "Dave Wilson", Team::Home, 16, 180.0, 200.0),
        player(4, "Tom Brown", Team::Home, 88, 120.0, 120.0),
        player(5, "Steve Davis", Team::Home, 27, 160.0, 180.0),
        player(6, "Alex Miller", Team::Home, 1, 80.0, 150.0),
        player(7, "Pierre Dubois", Team::Away, 67, 450.0, 120.0),
        player(8, "Jean Tremblay", Team::Away, 22, 400.0, 160.0),
        player(9, "Marc Leclerc", Team::Away, 45, 420.0, 200.0),
        player(10, "Luc Bergeron", Team::Away, 13, 480.0, 140.0),
        player(11, "Claude Roy", Team::Away, 71, 440.0, 180.0),
        player(12, "Carey Price", Team::Away, 31, 520.0, 150.0),
    ]
}

fn player(id: u32, name: &str, team: Team, number: u32, x: f64, y: f64) -> Player {
    Player {
        id,
        name: name.to_string(),
        team,
        number,
        position: Point::new(x, y),
    }
}

/// The three booth lines already on the board when the feed starts.
pub fn seed_commentary() -> Vec<CommentaryEntry> {
    vec![
        CommentaryEntry {
            id: 1,
            text: "What a save by Price! He stretches across the crease to deny Smith's \
                   one-timer from the slot."
                .to_string(),
            timestamp: "15:42".to_string(),
            kind: CommentaryKind::Play,
            speaker: Some("Play-by-Play".to_string()),
        },
        CommentaryEntry {
            id: 2,
            text: "The Maple Leafs are really controlling the pace in this second period. \
                   They've outshot Montreal 12-6 so far."
                .to_string(),
            timestamp: "15:38".to_string(),
            kind: CommentaryKind::Analysis,
            speaker: Some("Analyst".to_string()),
        },
        CommentaryEntry {
            id: 3,
            text: "You can feel the energy in the building tonight. This rivalry never gets old!"
                .to_string(),
            timestamp: "15:35".to_string(),
            kind: CommentaryKind::Color,
            speaker: Some("Color Commentary".to_string()),
        },
    ]
}

/// The chat backlog present at startup, oldest first.
pub fn seed_chat() -> Vec<ChatMessage> {
    let now = Local::now();
    vec![
        ChatMessage {
            id: 1,
            user: "HockeyMod".to_string(),
            body: "Welcome to the live chat! Keep it respectful and enjoy the game!".to_string(),
            sent_at: now - Duration::minutes(5),
            kind: ChatKind::System,
            badges: vec![Badge::Mod],
            color: None,
        },
        ChatMessage {
            id: 2,
            user: "LeafsFan92".to_string(),
            body: "LET'S GO LEAFS!".to_string(),
            sent_at: now - Duration::minutes(4),
            kind: ChatKind::Message,
            badges: vec![Badge::Vip],
            color: Some("#3B82F6".to_string()),
        },
        ChatMessage {
            id: 3,
            user: "HabsNation".to_string(),
            body: "Price is looking sharp tonight!".to_string(),
            sent_at: now - Duration::minutes(3),
            kind: ChatKind::Message,
            badges: Vec::new(),
            color: Some("#EF4444".to_string()),
        },
        ChatMessage {
            id: 4,
            user: "System".to_string(),
            body: "GOAL! Matthews scores for Toronto!".to_string(),
            sent_at: now - Duration::minutes(2),
            kind: ChatKind::GoalEvent,
            badges: Vec::new(),
            color: None,
        },
        ChatMessage {
            id: 5,
            user: "HockeyAnalyst".to_string(),
            body: "What a shot! Top shelf where mama hides the cookies!".to_string(),
            sent_at: now - Duration::minutes(1),
            kind: ChatKind::Message,
            badges: vec![Badge::Verified],
            color: Some("#10B981".to_string()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RinkExtent;
    use std::collections::HashSet;

    #[test]
    fn test_seed_players_have_unique_stable_ids() {
        let players = seed_players();
        assert_eq!(players.len(), 12);
        let ids: HashSet<u32> = players.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), players.len());
    }

    #[test]
    fn test_seed_positions_start_inside_the_rink() {
        let rink = RinkExtent::default();
        let snapshot = seed_snapshot();
        assert!(rink.contains(snapshot.puck));
        for p in &snapshot.players {
            assert!(rink.contains(p.position), "{} spawned out of bounds", p.name);
        }
    }

    #[test]
    fn test_seed_rosters_split_six_a_side() {
        let players = seed_players();
        let home = players.iter().filter(|p| p.team == Team::Home).count();
        assert_eq!(home, 6);
        assert_eq!(players.len() - home, 6);
    }

    #[test]
    fn test_seed_sequences_are_creation_ordered() {
        let commentary = seed_commentary();
        assert_eq!(commentary.len(), 3);
        assert!(commentary.windows(2).all(|w| w[0].id < w[1].id));

        let chat = seed_chat();
        assert_eq!(chat.len(), 5);
        assert!(chat.windows(2).all(|w| w[0].id < w[1].id));
        assert!(chat.windows(2).all(|w| w[0].sent_at <= w[1].sent_at));
    }
}
