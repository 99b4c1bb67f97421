/// Simulated live match feed
///
/// `LiveFeed` owns the evolving match snapshot and the two bounded event
/// sequences (booth commentary, fan chat) and drives them from three
/// independent tick cadences. There is no external input and no I/O: every
/// tick applies a bounded random perturbation or appends a synthesized
/// event. Consumers read clones of the current state and can never mutate
/// feed-owned data.
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::fixtures;
use crate::types::{
    ChatKind, ChatMessage, CommentaryEntry, CommentaryKind, MatchSnapshot, Point, RinkExtent,
};

/// Cadences, retention caps, and motion bounds for the simulation.
///
/// The defaults are the values the original broadcast demo ran with. No
/// invariant depends on their magnitude; they only have to stay bounded.
#[derive(Debug, Clone)]
pub struct FeedTuning {
    pub position_interval: Duration,
    pub commentary_interval: Duration,
    pub chat_interval: Duration,
    pub commentary_cap: usize,
    pub chat_cap: usize,
    /// Max per-axis offset a player moves in one tick.
    pub player_step: f64,
    /// Max per-axis offset the puck moves in one tick.
    pub puck_step: f64,
    pub rink: RinkExtent,
}

impl Default for FeedTuning {
    fn default() -> Self {
        FeedTuning {
            position_interval: Duration::from_millis(2000),
            commentary_interval: Duration::from_millis(8000),
            chat_interval: Duration::from_millis(8000),
            commentary_cap: 10,
            chat_cap: 50,
            player_step: 5.0,
            puck_step: 7.5,
            rink: RinkExtent::default(),
        }
    }
}

/// Everything the feed owns. Lives behind one lock; every tick body takes
/// the write guard for a synchronous mutation, so ticks of one cadence
/// never overlap.
struct FeedState {
    snapshot: MatchSnapshot,
    commentary: Vec<CommentaryEntry>,
    chat: Vec<ChatMessage>,
    playing: bool,
    connected: bool,
    next_commentary_id: u64,
    next_chat_id: u64,
}

impl FeedState {
    fn seeded() -> Self {
        let commentary = fixtures::seed_commentary();
        let chat = fixtures::seed_chat();
        let next_commentary_id = commentary.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let next_chat_id = chat.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        FeedState {
            snapshot: fixtures::seed_snapshot(),
            commentary,
            chat,
            playing: false,
            connected: false,
            next_commentary_id,
            next_chat_id,
        }
    }
}

type SharedFeedState = Arc<RwLock<FeedState>>;

/// The live feed service. Construct, `start()`, read, `stop()`.
pub struct LiveFeed {
    state: SharedFeedState,
    tuning: FeedTuning,
    seed: Option<u64>,
    shutdown: Option<watch::Sender<bool>>,
    tasks: Vec<JoinHandle<()>>,
}

impl LiveFeed {
    /// A feed seeded from fixtures, with entropy-seeded randomness.
    pub fn new(tuning: FeedTuning) -> Self {
        LiveFeed {
            state: Arc::new(RwLock::new(FeedState::seeded())),
            tuning,
            seed: None,
            shutdown: None,
            tasks: Vec::new(),
        }
    }

    /// A feed whose three tick streams draw from RNGs derived from `seed`,
    /// for reproducible runs.
    pub fn with_seed(tuning: FeedTuning, seed: u64) -> Self {
        let mut feed = Self::new(tuning);
        feed.seed = Some(seed);
        feed
    }

    fn cadence_rng(&self, cadence: u64) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(cadence)),
            None => StdRng::from_entropy(),
        }
    }

    /// Begin ticking. Idempotent: a second call while running is a no-op
    /// and never duplicates timers.
    pub async fn start(&mut self) {
        if self.shutdown.is_some() {
            debug!("FEED: start requested while already running");
            return;
        }

        let (tx, rx) = watch::channel(false);
        self.state.write().await.connected = true;

        self.tasks = vec![
            tokio::spawn(position_loop(
                Arc::clone(&self.state),
                self.tuning.clone(),
                self.cadence_rng(0),
                rx.clone(),
            )),
            tokio::spawn(commentary_loop(
                Arc::clone(&self.state),
                self.tuning.clone(),
                self.cadence_rng(1),
                rx.clone(),
            )),
            tokio::spawn(chat_loop(
                Arc::clone(&self.state),
                self.tuning.clone(),
                self.cadence_rng(2),
                rx,
            )),
        ];
        self.shutdown = Some(tx);
        debug!("FEED: started");
    }

    /// Halt ticking. Safe to call when not running, and safe to call
    /// twice. A tick already dispatched may still complete, but no
    /// further tick is scheduled once the signal lands.
    pub async fn stop(&mut self) {
        let Some(tx) = self.shutdown.take() else {
            return;
        };
        let _ = tx.send(true);
        for task in self.tasks.drain(..) {
            let _ = task.await;
        }
        self.state.write().await.connected = false;
        debug!("FEED: stopped");
    }

    /// Clone of the latest match snapshot. Never triggers a tick.
    pub async fn snapshot(&self) -> MatchSnapshot {
        self.state.read().await.snapshot.clone()
    }

    /// The bounded commentary sequence, oldest first.
    pub async fn commentary(&self) -> Vec<CommentaryEntry> {
        self.state.read().await.commentary.clone()
    }

    /// The bounded chat sequence, oldest first.
    pub async fn chat(&self) -> Vec<ChatMessage> {
        self.state.read().await.chat.clone()
    }

    /// The playback gate. Only commentary synthesis honors it; position
    /// motion and chat run regardless.
    pub async fn set_playing(&self, playing: bool) {
        self.state.write().await.playing = playing;
    }

    pub async fn is_playing(&self) -> bool {
        self.state.read().await.playing
    }

    /// True between `start()` and `stop()`.
    pub async fn is_connected(&self) -> bool {
        self.state.read().await.connected
    }
}

impl Drop for LiveFeed {
    fn drop(&mut self) {
        // Dropping without stop() must not leave timers running.
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(true);
        }
    }
}

async fn position_loop(
    state: SharedFeedState,
    tuning: FeedTuning,
    mut rng: StdRng,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval(tuning.position_interval);
    interval.tick().await; // First tick completes immediately

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let mut feed = state.write().await;
                advance_positions(&mut feed.snapshot, &tuning, &mut rng);
            }
            _ = shutdown.changed() => break,
        }
    }
}

async fn commentary_loop(
    state: SharedFeedState,
    tuning: FeedTuning,
    mut rng: StdRng,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval(tuning.commentary_interval);
    interval.tick().await;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let mut feed = state.write().await;
                if !feed.playing {
                    continue;
                }
                let id = feed.next_commentary_id;
                feed.next_commentary_id += 1;
                let stamp = Local::now().format("%M:%S").to_string();
                let entry = synthesize_commentary(id, stamp, &mut rng);
                push_bounded(&mut feed.commentary, entry, tuning.commentary_cap);
            }
            _ = shutdown.changed() => break,
        }
    }
}

async fn chat_loop(
    state: SharedFeedState,
    tuning: FeedTuning,
    mut rng: StdRng,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval(tuning.chat_interval);
    interval.tick().await;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let mut feed = state.write().await;
                let id = feed.next_chat_id;
                feed.next_chat_id += 1;
                let message = synthesize_chat(id, Local::now(), &mut rng);
                push_bounded(&mut feed.chat, message, tuning.chat_cap);
            }
            _ = shutdown.changed() => break,
        }
    }
}

/// One position tick: every player and the puck take an independent
/// uniform offset per axis, then clamp back into the rink. No velocity,
/// no collisions.
pub fn advance_positions(snapshot: &mut MatchSnapshot, tuning: &FeedTuning, rng: &mut impl Rng) {
    for player in &mut snapshot.players {
        player.position = jitter(player.position, tuning.player_step, &tuning.rink, rng);
    }
    snapshot.puck = jitter(snapshot.puck, tuning.puck_step, &tuning.rink, rng);
}

fn jitter(p: Point, step: f64, rink: &RinkExtent, rng: &mut impl Rng) -> Point {
    let moved = Point::new(
        p.x + rng.gen_range(-step..=step),
        p.y + rng.gen_range(-step..=step),
    );
    rink.clamp(moved)
}

/// Synthesize one booth line: uniform category, uniform phrase, speaker
/// label matched to the category.
pub fn synthesize_commentary(id: u64, timestamp: String, rng: &mut impl Rng) -> CommentaryEntry {
    let kind = match rng.gen_range(0..3) {
        0 => CommentaryKind::Play,
        1 => CommentaryKind::Analysis,
        _ => CommentaryKind::Color,
    };
    let text = fixtures::COMMENTARY_LINES[rng.gen_range(0..fixtures::COMMENTARY_LINES.len())];
    CommentaryEntry {
        id,
        text: text.to_string(),
        timestamp,
        kind,
        speaker: Some(kind.speaker_label().to_string()),
    }
}

/// Synthesize one fan message: uniform user and phrase from their own
/// pools, a random display hue per message.
pub fn synthesize_chat(id: u64, sent_at: DateTime<Local>, rng: &mut impl Rng) -> ChatMessage {
    let user = fixtures::CHAT_USERS[rng.gen_range(0..fixtures::CHAT_USERS.len())];
    let body = fixtures::CHAT_LINES[rng.gen_range(0..fixtures::CHAT_LINES.len())];
    let hue: u32 = rng.gen_range(0..360);
    ChatMessage {
        id,
        user: user.to_string(),
        body: body.to_string(),
        sent_at,
        kind: ChatKind::Message,
        badges: Vec::new(),
        color: Some(format!("hsl({}, 70%, 60%)", hue)),
    }
}

/// Append to a bounded sequence, dropping from the front past `cap`.
/// Hard truncation, not time-based expiry.
pub fn push_bounded<T>(entries: &mut Vec<T>, entry: T, cap: usize) {
    entries.push(entry);
    if entries.len() > cap {
        let overflow = entries.len() - cap;
        entries.drain(..overflow);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Team;

    fn test_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    /// Tight tuning for paused-clock tests: positions every 10ms,
    /// events every 40ms.
    fn fast_tuning() -> FeedTuning {
        FeedTuning {
            position_interval: Duration::from_millis(10),
            commentary_interval: Duration::from_millis(40),
            chat_interval: Duration::from_millis(40),
            ..FeedTuning::default()
        }
    }

    #[test]
    fn test_positions_stay_in_bounds_over_many_ticks() {
        let mut rng = test_rng();
        let tuning = FeedTuning::default();
        let mut snapshot = fixtures::seed_snapshot();

        for _ in 0..500 {
            advance_positions(&mut snapshot, &tuning, &mut rng);
            assert!(tuning.rink.contains(snapshot.puck));
            for p in &snapshot.players {
                assert!(tuning.rink.contains(p.position), "{} escaped the rink", p.name);
            }
        }
    }

    #[test]
    fn test_oversized_steps_clamp_instead_of_wrapping() {
        let mut rng = test_rng();
        let tuning = FeedTuning {
            player_step: 5000.0,
            puck_step: 5000.0,
            ..FeedTuning::default()
        };
        let mut snapshot = fixtures::seed_snapshot();

        for _ in 0..50 {
            advance_positions(&mut snapshot, &tuning, &mut rng);
            assert!(tuning.rink.contains(snapshot.puck));
            for p in &snapshot.players {
                assert!(tuning.rink.contains(p.position));
            }
        }
    }

    #[test]
    fn test_position_ticks_keep_player_identity() {
        let mut rng = test_rng();
        let tuning = FeedTuning::default();
        let mut snapshot = fixtures::seed_snapshot();
        let before: Vec<(u32, Team)> = snapshot.players.iter().map(|p| (p.id, p.team)).collect();

        for _ in 0..100 {
            advance_positions(&mut snapshot, &tuning, &mut rng);
        }

        let after: Vec<(u32, Team)> = snapshot.players.iter().map(|p| (p.id, p.team)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_position_ticks_leave_score_and_clock_alone() {
        let mut rng = test_rng();
        let tuning = FeedTuning::default();
        let mut snapshot = fixtures::seed_snapshot();
        let seed = snapshot.clone();

        for _ in 0..20 {
            advance_positions(&mut snapshot, &tuning, &mut rng);
        }

        assert_eq!(snapshot.home_score, seed.home_score);
        assert_eq!(snapshot.away_score, seed.away_score);
        assert_eq!(snapshot.period, seed.period);
        assert_eq!(snapshot.time_remaining, seed.time_remaining);
        assert_eq!(snapshot.home_stats, seed.home_stats);
        assert_eq!(snapshot.away_stats, seed.away_stats);
    }

    #[test]
    fn test_same_seed_same_walk() {
        let tuning = FeedTuning::default();
        let mut a = fixtures::seed_snapshot();
        let mut b = fixtures::seed_snapshot();
        let mut rng_a = StdRng::seed_from_u64(123);
        let mut rng_b = StdRng::seed_from_u64(123);

        for _ in 0..10 {
            advance_positions(&mut a, &tuning, &mut rng_a);
            advance_positions(&mut b, &tuning, &mut rng_b);
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_push_bounded_drops_oldest_keeps_order() {
        let mut entries: Vec<u64> = Vec::new();
        for id in 1..=15 {
            push_bounded(&mut entries, id, 10);
        }
        assert_eq!(entries.len(), 10);
        assert_eq!(entries.first(), Some(&6));
        assert_eq!(entries.last(), Some(&15));
        assert!(entries.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_synthesized_commentary_draws_from_the_pool() {
        let mut rng = test_rng();
        for id in 0..50 {
            let entry = synthesize_commentary(id, "12:34".to_string(), &mut rng);
            assert!(fixtures::COMMENTARY_LINES.contains(&entry.text.as_str()));
            assert_eq!(entry.speaker.as_deref(), Some(entry.kind.speaker_label()));
        }
    }

    #[test]
    fn test_synthesized_chat_draws_from_the_pools() {
        let mut rng = test_rng();
        for id in 0..50 {
            let msg = synthesize_chat(id, Local::now(), &mut rng);
            assert!(fixtures::CHAT_USERS.contains(&msg.user.as_str()));
            assert!(fixtures::CHAT_LINES.contains(&msg.body.as_str()));
            assert_eq!(msg.kind, ChatKind::Message);
        }
    }

    #[tokio::test]
    async fn test_stop_is_idempotent_and_safe_before_start() {
        let mut feed = LiveFeed::with_seed(fast_tuning(), 7);
        feed.stop().await;
        assert!(!feed.is_connected().await);

        feed.start().await;
        assert!(feed.is_connected().await);

        feed.stop().await;
        feed.stop().await;
        assert!(!feed.is_connected().await);
    }

    #[tokio::test]
    async fn test_start_twice_does_not_duplicate_timers() {
        let mut feed = LiveFeed::with_seed(fast_tuning(), 7);
        feed.start().await;
        let running = feed.tasks.len();
        feed.start().await;
        assert_eq!(feed.tasks.len(), running);
        feed.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_paused_feed_moves_players_and_chat_but_not_commentary() {
        let mut feed = LiveFeed::with_seed(fast_tuning(), 7);
        let seed_commentary = feed.commentary().await;
        let seed_positions: Vec<Point> =
            feed.snapshot().await.players.iter().map(|p| p.position).collect();

        feed.start().await;
        assert!(!feed.is_playing().await);
        tokio::time::sleep(Duration::from_millis(130)).await;
        feed.stop().await;

        // Commentary is gated on playing; chat and motion are not.
        assert_eq!(feed.commentary().await, seed_commentary);
        assert!(feed.chat().await.len() > 5);
        let moved: Vec<Point> =
            feed.snapshot().await.players.iter().map(|p| p.position).collect();
        assert_ne!(moved, seed_positions);
    }

    #[tokio::test(start_paused = true)]
    async fn test_playing_feed_appends_commentary_up_to_the_cap() {
        let tuning = FeedTuning {
            commentary_cap: 5,
            ..fast_tuning()
        };
        let mut feed = LiveFeed::with_seed(tuning, 7);
        feed.set_playing(true).await;
        feed.start().await;
        tokio::time::sleep(Duration::from_millis(400)).await;
        feed.stop().await;

        let commentary = feed.commentary().await;
        assert_eq!(commentary.len(), 5);
        // Retained entries are the most recent, still in creation order.
        assert!(commentary.windows(2).all(|w| w[0].id < w[1].id));
        assert!(commentary.first().map(|c| c.id).unwrap_or(0) > 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_future_ticks() {
        let mut feed = LiveFeed::with_seed(fast_tuning(), 7);
        feed.start().await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        feed.stop().await;

        let chat_len = feed.chat().await.len();
        let snapshot = feed.snapshot().await;
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(feed.chat().await.len(), chat_len);
        assert_eq!(feed.snapshot().await, snapshot);
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_cap_holds_under_load() {
        let tuning = FeedTuning {
            chat_cap: 8,
            ..fast_tuning()
        };
        let mut feed = LiveFeed::with_seed(tuning, 11);
        feed.start().await;
        tokio::time::sleep(Duration::from_millis(600)).await;
        feed.stop().await;

        let chat = feed.chat().await;
        assert_eq!(chat.len(), 8);
        assert!(chat.windows(2).all(|w| w[0].id < w[1].id));
    }
}
