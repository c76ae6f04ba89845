use chrono::DateTime;
use chrono_tz::Tz;

use crate::format::format_games;
use crate::sportsdb::SportsDb;

/// The three literal chat commands, plus the catch-all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    UpcomingGames,
    GamesToday,
    Help,
    Unknown,
}

/// Case-insensitive match against the literal command strings.
pub fn parse_command(text: &str) -> Command {
    match text.trim().to_lowercase().as_str() {
        "upcoming games" => Command::UpcomingGames,
        "games today" => Command::GamesToday,
        "help" => Command::Help,
        _ => Command::Unknown,
    }
}

/// Build the reply text for an inbound command. Fetching happens here so the
/// reply always reflects fresh upstream data.
pub fn reply_for(command: Command, sportsdb: &SportsDb, now: DateTime<Tz>) -> String {
    match command {
        Command::UpcomingGames => {
            let games = sportsdb.fetch_next_games();
            format_games(&games, "\u{1f51c} *Upcoming Games:*")
        }
        Command::GamesToday => {
            let games = sportsdb.fetch_games_today(now);
            format_games(&games, "\u{1f4c5} *Games Today:*")
        }
        Command::Help => "\u{1f916} *Available Commands:*\n\
             - `upcoming games`: Show the next scheduled game for each team\n\
             - `games today`: Show all games scheduled for today\n\
             - `help`: Show this help message"
            .to_string(),
        Command::Unknown => {
            "\u{2753} Unknown command. Type `help` to see available commands.".to_string()
        }
    }
}
