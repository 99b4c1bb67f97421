use crate::commands::period_label;
use crate::config::Config;
use crate::feed::LiveFeed;
use crate::teams;
use crate::types::{GameStatus, MatchSnapshot, TeamStats};
use anyhow::Result;

// Layout Constants
/// Width of the scoreboard box border
const BOX_WIDTH: usize = 60;

/// Width of the team code column in the stats table
const TEAM_CODE_WIDTH: usize = 6;

/// Width of one stats column
const STAT_COL_WIDTH: usize = 8;

/// Render the current match snapshot once and exit.
pub async fn run(config: &Config) -> Result<()> {
    let feed = LiveFeed::new(config.feed_tuning());
    let snapshot = feed.snapshot().await;
    display_scoreboard(&snapshot);
    Ok(())
}

fn display_scoreboard(snapshot: &MatchSnapshot) {
    let home = teams::short_code(&snapshot.home_team);
    let away = teams::short_code(&snapshot.away_team);

    println!("{}", build_box_border('┌'));
    println!(
        "│ {:<6} {:>2}    {:^8}    {:>2}  {:<6}{:pad$}│",
        away,
        snapshot.away_score,
        snapshot.status.to_string(),
        snapshot.home_score,
        home,
        "",
        pad = BOX_WIDTH - 36
    );
    println!(
        "│ {:<width$} │",
        status_line(snapshot),
        width = BOX_WIDTH - 2
    );
    println!("{}", build_box_border('├'));
    println!("{}", build_stats_header());
    display_stats_line(&home, &snapshot.home_stats);
    display_stats_line(&away, &snapshot.away_stats);
    println!("{}", build_box_border('└'));
}

fn status_line(snapshot: &MatchSnapshot) -> String {
    match snapshot.status {
        GameStatus::Ended => "FINAL".to_string(),
        GameStatus::Paused => format!("{} Period - Paused", period_label(snapshot.period)),
        GameStatus::Live => format!(
            "{} Period - {}",
            period_label(snapshot.period),
            snapshot.time_remaining
        ),
    }
}

fn build_box_border(style: char) -> String {
    let end_char = match style {
        '┌' => '┐',
        '├' => '┤',
        '└' => '┘',
        _ => '│',
    };
    format!("{}{:─<width$}{}", style, "", end_char, width = BOX_WIDTH)
}

fn build_stats_header() -> String {
    let mut header = format!("│ {:<width$}", "", width = TEAM_CODE_WIDTH);
    for label in ["SOG", "HIT", "FO W"] {
        header.push_str(&format!("{:^width$}", label, width = STAT_COL_WIDTH));
    }
    let used = 2 + TEAM_CODE_WIDTH + 3 * STAT_COL_WIDTH;
    header.push_str(&format!("{:pad$}│", "", pad = BOX_WIDTH - used + 1));
    header
}

fn display_stats_line(code: &str, stats: &TeamStats) {
    let mut line = format!("│ {:<width$}", code, width = TEAM_CODE_WIDTH);
    for value in [stats.shots, stats.hits, stats.faceoff_wins] {
        line.push_str(&format!("{:^width$}", value, width = STAT_COL_WIDTH));
    }
    let used = 2 + TEAM_CODE_WIDTH + 3 * STAT_COL_WIDTH;
    line.push_str(&format!("{:pad$}│", "", pad = BOX_WIDTH - used + 1));
    println!("{}", line);
}
