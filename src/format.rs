use crate::config::{self, F1_TEAM_KEY};
use crate::model::game::GameRecord;

/// Render a list of games under a header, one paragraph per line.
///
/// Games are listed in ascending start-time order (stable, ties keep fetch
/// order). Tracked teams with no game get a fallback line in table order; the
/// F1 entry is optional and never gets one.
pub fn format_games(games: &[GameRecord], header: &str) -> String {
    if games.is_empty() {
        return format!("{}\nNo upcoming games found.", header);
    }

    let mut ordered: Vec<&GameRecord> = games.iter().collect();
    ordered.sort_by_key(|g| g.start_time);

    let mut lines: Vec<String> = Vec::with_capacity(ordered.len());
    for game in &ordered {
        let date_str = game.start_time.format("%b %d").to_string(); // "Jul 27"
        let time_str = game.start_time.format("%I:%M %p").to_string(); // "02:00 PM"
        if game.team_key == F1_TEAM_KEY {
            lines.push(format!(
                "*Formula 1* races in the *{}* on {}, {} ET",
                game.opponent, date_str, time_str
            ));
        } else {
            lines.push(format!(
                "*{}* vs *{}* on {}, {} ET",
                config::display_name(game.team_key),
                game.opponent,
                date_str,
                time_str
            ));
        }
    }

    for &(key, name) in config::TEAM_NAMES {
        if key == F1_TEAM_KEY {
            continue;
        }
        if !games.iter().any(|g| g.team_key == key) {
            lines.push(format!(
                "No games currently scheduled for *{}* on TheSportsDB.",
                name
            ));
        }
    }

    format!("{}\n\n{}", header, lines.join("\n\n"))
}
