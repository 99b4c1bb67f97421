/// Durable user preferences
///
/// A flat, typed preference set persisted as one JSON blob under a fixed
/// file name. Load merges stored values over defaults so every schema key
/// always has a value; every mutation rewrites the whole blob. Malformed
/// or missing storage silently falls back to defaults, and a failed write
/// degrades to in-memory state - neither is ever surfaced as an error.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use xdg::BaseDirectories;

use crate::error::{PrefError, PrefResult};

/// Fixed, versionless storage file name.
pub const PREFS_FILE: &str = "preferences.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentarySpeed {
    Slow,
    Normal,
    Fast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentaryStyle {
    Professional,
    Casual,
    Energetic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Dark,
    Light,
    Auto,
}

impl fmt::Display for CommentarySpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentarySpeed::Slow => write!(f, "slow"),
            CommentarySpeed::Normal => write!(f, "normal"),
            CommentarySpeed::Fast => write!(f, "fast"),
        }
    }
}

impl fmt::Display for CommentaryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentaryStyle::Professional => write!(f, "professional"),
            CommentaryStyle::Casual => write!(f, "casual"),
            CommentaryStyle::Energetic => write!(f, "energetic"),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Dark => write!(f, "dark"),
            ThemeMode::Light => write!(f, "light"),
            ThemeMode::Auto => write!(f, "auto"),
        }
    }
}

/// The full preference schema. Field names serialize in camelCase to stay
/// compatible with blobs written by the web demo this replaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    pub commentary_speed: CommentarySpeed,
    pub commentary_style: CommentaryStyle,
    pub auto_play: bool,
    pub sound_effects: bool,
    pub theme: ThemeMode,
    pub animations: bool,
    pub compact_mode: bool,
    pub show_player_numbers: bool,
    pub goal_notifications: bool,
    pub period_notifications: bool,
    pub social_notifications: bool,
    pub game_start_notifications: bool,
    pub analytics: bool,
    pub personalized_content: bool,
    pub share_data: bool,
    /// Keys present in storage that this build does not recognize. They
    /// ride along on every rewrite; `reset()` drops them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            commentary_speed: CommentarySpeed::Normal,
            commentary_style: CommentaryStyle::Professional,
            auto_play: true,
            sound_effects: true,
            theme: ThemeMode::Dark,
            animations: true,
            compact_mode: false,
            show_player_numbers: true,
            goal_notifications: true,
            period_notifications: true,
            social_notifications: false,
            game_start_notifications: true,
            analytics: true,
            personalized_content: true,
            share_data: false,
            extra: Map::new(),
        }
    }
}

/// A single-key preference change, one variant per schema key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrefUpdate {
    CommentarySpeed(CommentarySpeed),
    CommentaryStyle(CommentaryStyle),
    AutoPlay(bool),
    SoundEffects(bool),
    Theme(ThemeMode),
    Animations(bool),
    CompactMode(bool),
    ShowPlayerNumbers(bool),
    GoalNotifications(bool),
    PeriodNotifications(bool),
    SocialNotifications(bool),
    GameStartNotifications(bool),
    Analytics(bool),
    PersonalizedContent(bool),
    ShareData(bool),
}

impl PrefUpdate {
    /// Parse a key/value pair as typed by a user, e.g. `("theme", "light")`.
    /// Keys use the storage spelling (camelCase).
    pub fn parse(key: &str, value: &str) -> PrefResult<Self> {
        let invalid = || PrefError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "commentarySpeed" => match value {
                "slow" => Ok(Self::CommentarySpeed(CommentarySpeed::Slow)),
                "normal" => Ok(Self::CommentarySpeed(CommentarySpeed::Normal)),
                "fast" => Ok(Self::CommentarySpeed(CommentarySpeed::Fast)),
                _ => Err(invalid()),
            },
            "commentaryStyle" => match value {
                "professional" => Ok(Self::CommentaryStyle(CommentaryStyle::Professional)),
                "casual" => Ok(Self::CommentaryStyle(CommentaryStyle::Casual)),
                "energetic" => Ok(Self::CommentaryStyle(CommentaryStyle::Energetic)),
                _ => Err(invalid()),
            },
            "theme" => match value {
                "dark" => Ok(Self::Theme(ThemeMode::Dark)),
                "light" => Ok(Self::Theme(ThemeMode::Light)),
                "auto" => Ok(Self::Theme(ThemeMode::Auto)),
                _ => Err(invalid()),
            },
            "autoPlay" => parse_bool(value).map(Self::AutoPlay).ok_or_else(invalid),
            "soundEffects" => parse_bool(value).map(Self::SoundEffects).ok_or_else(invalid),
            "animations" => parse_bool(value).map(Self::Animations).ok_or_else(invalid),
            "compactMode" => parse_bool(value).map(Self::CompactMode).ok_or_else(invalid),
            "showPlayerNumbers" => parse_bool(value)
                .map(Self::ShowPlayerNumbers)
                .ok_or_else(invalid),
            "goalNotifications" => parse_bool(value)
                .map(Self::GoalNotifications)
                .ok_or_else(invalid),
            "periodNotifications" => parse_bool(value)
                .map(Self::PeriodNotifications)
                .ok_or_else(invalid),
            "socialNotifications" => parse_bool(value)
                .map(Self::SocialNotifications)
                .ok_or_else(invalid),
            "gameStartNotifications" => parse_bool(value)
                .map(Self::GameStartNotifications)
                .ok_or_else(invalid),
            "analytics" => parse_bool(value).map(Self::Analytics).ok_or_else(invalid),
            "personalizedContent" => parse_bool(value)
                .map(Self::PersonalizedContent)
                .ok_or_else(invalid),
            "shareData" => parse_bool(value).map(Self::ShareData).ok_or_else(invalid),
            _ => Err(PrefError::UnknownKey(key.to_string())),
        }
    }

    /// The storage spelling of the key this update touches.
    pub fn key(&self) -> &'static str {
        match self {
            Self::CommentarySpeed(_) => "commentarySpeed",
            Self::CommentaryStyle(_) => "commentaryStyle",
            Self::AutoPlay(_) => "autoPlay",
            Self::SoundEffects(_) => "soundEffects",
            Self::Theme(_) => "theme",
            Self::Animations(_) => "animations",
            Self::CompactMode(_) => "compactMode",
            Self::ShowPlayerNumbers(_) => "showPlayerNumbers",
            Self::GoalNotifications(_) => "goalNotifications",
            Self::PeriodNotifications(_) => "periodNotifications",
            Self::SocialNotifications(_) => "socialNotifications",
            Self::GameStartNotifications(_) => "gameStartNotifications",
            Self::Analytics(_) => "analytics",
            Self::PersonalizedContent(_) => "personalizedContent",
            Self::ShareData(_) => "shareData",
        }
    }

    fn apply(self, prefs: &mut Preferences) {
        match self {
            Self::CommentarySpeed(v) => prefs.commentary_speed = v,
            Self::CommentaryStyle(v) => prefs.commentary_style = v,
            Self::AutoPlay(v) => prefs.auto_play = v,
            Self::SoundEffects(v) => prefs.sound_effects = v,
            Self::Theme(v) => prefs.theme = v,
            Self::Animations(v) => prefs.animations = v,
            Self::CompactMode(v) => prefs.compact_mode = v,
            Self::ShowPlayerNumbers(v) => prefs.show_player_numbers = v,
            Self::GoalNotifications(v) => prefs.goal_notifications = v,
            Self::PeriodNotifications(v) => prefs.period_notifications = v,
            Self::SocialNotifications(v) => prefs.social_notifications = v,
            Self::GameStartNotifications(v) => prefs.game_start_notifications = v,
            Self::Analytics(v) => prefs.analytics = v,
            Self::PersonalizedContent(v) => prefs.personalized_content = v,
            Self::ShareData(v) => prefs.share_data = v,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// The store. Owns the in-memory set; callers observe via `prefs()` and
/// mutate only through `update`/`reset`.
pub struct PreferenceStore {
    prefs: Preferences,
    path: Option<PathBuf>,
}

impl PreferenceStore {
    /// Open the store at its XDG location, merging any persisted blob
    /// over the defaults.
    pub fn open() -> Self {
        Self::from_path(default_prefs_path())
    }

    /// Open the store against an explicit file path.
    pub fn open_at(path: impl Into<PathBuf>) -> Self {
        Self::from_path(Some(path.into()))
    }

    fn from_path(path: Option<PathBuf>) -> Self {
        let prefs = match path.as_deref() {
            Some(p) => load_from(p),
            None => Preferences::default(),
        };
        PreferenceStore { prefs, path }
    }

    /// The current typed preference set.
    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Apply one key's new value, then persist the entire set.
    pub fn update(&mut self, change: PrefUpdate) {
        debug!("PREFS: updating {}", change.key());
        change.apply(&mut self.prefs);
        self.persist();
    }

    /// Replace the entire set with defaults and persist. Unrecognized
    /// stored keys are discarded.
    pub fn reset(&mut self) {
        debug!("PREFS: resetting to defaults");
        self.prefs = Preferences::default();
        self.persist();
    }

    fn persist(&self) {
        let Some(path) = self.path.as_deref() else {
            return;
        };
        if let Err(e) = write_blob(path, &self.prefs) {
            // Degraded durability: keep serving the in-memory set.
            warn!("PREFS: failed to persist to {}: {}", path.display(), e);
        }
    }
}

fn load_from(path: &Path) -> Preferences {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => {
            debug!("PREFS: no stored preferences at {}, using defaults", path.display());
            return Preferences::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(prefs) => prefs,
        Err(e) => {
            debug!("PREFS: malformed preference blob ({}), using defaults", e);
            Preferences::default()
        }
    }
}

fn write_blob(path: &Path, prefs: &Preferences) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let blob = serde_json::to_string(prefs)?;
    fs::write(path, blob)
}

pub fn default_prefs_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join(PREFS_FILE))
}
