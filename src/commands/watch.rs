use crate::commands::period_label;
use crate::config::Config;
use crate::feed::LiveFeed;
use crate::prefs::PreferenceStore;
use crate::teams;
use crate::types::{ChatKind, ChatMessage, CommentaryEntry};
use anyhow::Result;
use std::time::Duration;
use tracing::info;

/// How often the console polls the feed for new events
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Polls between repeated score lines
const SCORE_LINE_EVERY: u32 = 10;

/// Run the simulated feed and stream its events to stdout for `seconds`.
///
/// The commentary gate follows the `autoPlay` preference unless `--paused`
/// forces it off; chat and player motion run either way.
pub async fn run(config: &Config, seconds: u64, force_paused: bool) -> Result<()> {
    let store = PreferenceStore::open();
    let playing = !force_paused && store.prefs().auto_play;

    let mut feed = LiveFeed::new(config.feed_tuning());
    feed.set_playing(playing).await;
    feed.start().await;
    info!("WATCH: feed started (playing: {})", playing);

    display_header(&feed, playing).await;

    let mut last_commentary = latest_commentary_id(&feed).await;
    let mut last_chat = latest_chat_id(&feed).await;

    let mut poll = tokio::time::interval(POLL_INTERVAL);
    poll.tick().await; // First tick completes immediately
    let started = tokio::time::Instant::now();
    let mut polls: u32 = 0;

    while started.elapsed() < Duration::from_secs(seconds) {
        poll.tick().await;
        polls += 1;

        for entry in feed.commentary().await {
            if entry.id > last_commentary {
                last_commentary = entry.id;
                display_commentary(&entry);
            }
        }
        for message in feed.chat().await {
            if message.id > last_chat {
                last_chat = message.id;
                display_chat(&message, &config.time_format);
            }
        }
        if polls % SCORE_LINE_EVERY == 0 {
            display_score_line(&feed).await;
        }
    }

    feed.stop().await;
    info!("WATCH: feed stopped");
    println!("\n--- feed disconnected ---");
    Ok(())
}

async fn display_header(feed: &LiveFeed, playing: bool) {
    let snapshot = feed.snapshot().await;
    println!(
        "{} {} - {} {}  |  {} Period - {}  |  {}",
        teams::short_code(&snapshot.home_team),
        snapshot.home_score,
        snapshot.away_score,
        teams::short_code(&snapshot.away_team),
        period_label(snapshot.period),
        snapshot.time_remaining,
        snapshot.status,
    );
    println!(
        "commentary: {}\n",
        if playing { "playing" } else { "paused" }
    );
}

async fn display_score_line(feed: &LiveFeed) {
    let snapshot = feed.snapshot().await;
    println!(
        "  · {}  ({} Period - {})",
        snapshot.score_line(),
        period_label(snapshot.period),
        snapshot.time_remaining,
    );
}

fn display_commentary(entry: &CommentaryEntry) {
    let speaker = entry.speaker.as_deref().unwrap_or("Booth");
    println!(
        "[{}] {:<8} {:<16} {}",
        entry.timestamp, entry.kind, speaker, entry.text
    );
}

fn display_chat(message: &ChatMessage, time_format: &str) {
    let stamp = message.sent_at.format(time_format);
    match message.kind {
        ChatKind::Message => println!("[{}] <{}> {}", stamp, message.user, message.body),
        ChatKind::GoalEvent => println!("[{}] *** {} ***", stamp, message.body),
        ChatKind::System => println!("[{}] -- {} --", stamp, message.body),
    }
}

async fn latest_commentary_id(feed: &LiveFeed) -> u64 {
    feed.commentary().await.last().map(|c| c.id).unwrap_or(0)
}

async fn latest_chat_id(feed: &LiveFeed) -> u64 {
    feed.chat().await.last().map(|m| m.id).unwrap_or(0)
}
