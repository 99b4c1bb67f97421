use crate::prefs::{PreferenceStore, PrefUpdate};
use anyhow::{Context, Result};

/// Display the current preference set and where it is stored.
pub fn show() -> Result<()> {
    let store = PreferenceStore::open();

    let (path_str, exists) = match store.path() {
        Some(path) => (path.display().to_string(), path.exists()),
        None => ("Unable to determine preferences path".to_string(), false),
    };

    println!(
        "Preferences File: {} (Exists: {})",
        path_str,
        if exists { "yes" } else { "no" }
    );
    println!();
    println!("Current Preferences:");
    println!("====================");

    let p = store.prefs();
    println!("commentarySpeed: {}", p.commentary_speed);
    println!("commentaryStyle: {}", p.commentary_style);
    println!("autoPlay: {}", p.auto_play);
    println!("soundEffects: {}", p.sound_effects);
    println!("theme: {}", p.theme);
    println!("animations: {}", p.animations);
    println!("compactMode: {}", p.compact_mode);
    println!("showPlayerNumbers: {}", p.show_player_numbers);
    println!("goalNotifications: {}", p.goal_notifications);
    println!("periodNotifications: {}", p.period_notifications);
    println!("socialNotifications: {}", p.social_notifications);
    println!("gameStartNotifications: {}", p.game_start_notifications);
    println!("analytics: {}", p.analytics);
    println!("personalizedContent: {}", p.personalized_content);
    println!("shareData: {}", p.share_data);

    if !p.extra.is_empty() {
        println!();
        println!("Unrecognized keys (preserved): {}", p.extra.len());
    }

    Ok(())
}

/// Set one preference key and persist the whole set.
pub fn set(key: &str, value: &str) -> Result<()> {
    let update = PrefUpdate::parse(key, value)
        .with_context(|| format!("Cannot set '{}' to '{}'", key, value))?;

    let mut store = PreferenceStore::open();
    store.update(update);
    println!("{} = {}", key, value);
    Ok(())
}

/// Restore every preference to its default and persist.
pub fn reset() -> Result<()> {
    let mut store = PreferenceStore::open();
    store.reset();
    println!("Preferences reset to defaults.");
    Ok(())
}
