/// Shared types used across the application
///
/// This module contains the match-state and event types shared between
/// the feed simulator, the commands, and the binary (main.rs).
use chrono::{DateTime, Local};
use std::fmt;

/// A 2D position on the rink, in the same coordinate space the original
/// broadcast board draws in (origin top-left, x grows toward the away goal).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Rectangular playing extent. Positions are clamped into this box after
/// every perturbation; coordinates never wrap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RinkExtent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl RinkExtent {
    /// Clamp a point into the extent on both axes.
    pub fn clamp(&self, p: Point) -> Point {
        Point {
            x: p.x.clamp(self.min_x, self.max_x),
            y: p.y.clamp(self.min_y, self.max_y),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

impl Default for RinkExtent {
    fn default() -> Self {
        RinkExtent {
            min_x: 20.0,
            min_y: 20.0,
            max_x: 580.0,
            max_y: 280.0,
        }
    }
}

/// Which bench a player belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    Home,
    Away,
}

/// One skater (or goalie) on the board. The id is stable for the whole
/// session; the draw order of the players vector is not significant.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub team: Team,
    pub number: u32,
    pub position: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Live,
    Paused,
    Ended,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Live => write!(f, "LIVE"),
            GameStatus::Paused => write!(f, "PAUSED"),
            GameStatus::Ended => write!(f, "FINAL"),
        }
    }
}

/// Per-team aggregate counters shown in the stats panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TeamStats {
    pub shots: u32,
    pub hits: u32,
    pub faceoff_wins: u32,
}

/// One complete copy of match state. The simulator replaces the contents
/// inside a tick; consumers only ever receive clones.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSnapshot {
    pub players: Vec<Player>,
    pub puck: Point,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    pub period: u32,
    /// Display clock, e.g. "15:42". Inert label; the simulator does not
    /// run a countdown.
    pub time_remaining: String,
    pub status: GameStatus,
    pub home_stats: TeamStats,
    pub away_stats: TeamStats,
}

impl MatchSnapshot {
    pub fn score_line(&self) -> String {
        format!(
            "{} {} - {} {}",
            self.home_team, self.home_score, self.away_score, self.away_team
        )
    }
}

/// Commentary booth voice categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentaryKind {
    Play,
    Analysis,
    Color,
}

impl CommentaryKind {
    /// The booth label the broadcast attaches to each category.
    pub fn speaker_label(&self) -> &'static str {
        match self {
            CommentaryKind::Play => "Play-by-Play",
            CommentaryKind::Analysis => "Analyst",
            CommentaryKind::Color => "Color Commentary",
        }
    }
}

impl fmt::Display for CommentaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentaryKind::Play => write!(f, "play"),
            CommentaryKind::Analysis => write!(f, "analysis"),
            CommentaryKind::Color => write!(f, "color"),
        }
    }
}

/// One line of synthetic commentary. Ids are monotonically
/// creation-ordered within the commentary sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentaryEntry {
    pub id: u64,
    pub text: String,
    /// Pre-formatted MM:SS display label, stamped at creation.
    pub timestamp: String,
    pub kind: CommentaryKind,
    pub speaker: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    Message,
    GoalEvent,
    System,
}

/// Badges rendered next to a chat author's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Mod,
    Vip,
    Verified,
    Viewer,
}

/// One chat message. Ids are monotonically creation-ordered within the
/// chat sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub user: String,
    pub body: String,
    pub sent_at: DateTime<Local>,
    pub kind: ChatKind,
    pub badges: Vec<Badge>,
    /// CSS-style display color for the author name, when one was assigned.
    pub color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_inside_extent_is_identity() {
        let rink = RinkExtent::default();
        let p = Point::new(300.0, 150.0);
        assert_eq!(rink.clamp(p), p);
    }

    #[test]
    fn test_clamp_pulls_back_out_of_bounds_coordinates() {
        let rink = RinkExtent::default();
        assert_eq!(
            rink.clamp(Point::new(-40.0, 1000.0)),
            Point::new(20.0, 280.0)
        );
        assert_eq!(rink.clamp(Point::new(600.0, 10.0)), Point::new(580.0, 20.0));
    }

    #[test]
    fn test_contains_matches_clamp_fixpoint() {
        let rink = RinkExtent::default();
        let inside = Point::new(20.0, 280.0);
        let outside = Point::new(19.9, 150.0);
        assert!(rink.contains(inside));
        assert!(!rink.contains(outside));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(GameStatus::Live.to_string(), "LIVE");
        assert_eq!(GameStatus::Ended.to_string(), "FINAL");
    }

    #[test]
    fn test_speaker_labels() {
        assert_eq!(CommentaryKind::Play.speaker_label(), "Play-by-Play");
        assert_eq!(CommentaryKind::Analysis.speaker_label(), "Analyst");
        assert_eq!(CommentaryKind::Color.speaker_label(), "Color Commentary");
    }
}
