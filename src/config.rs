use chrono_tz::Tz;

/// Tracked teams: (team_key, TheSportsDB team id). F1 is handled separately via
/// the next-league-event endpoint and is not part of this table.
pub const TEAM_IDS: &[(&str, &str)] = &[
    ("USA", "134514"),          // US Men's National Team
    ("CRC", "134505"),          // Costa Rica National Team
    ("ATL_FALCONS", "134942"),
    ("ATL_HAWKS", "134880"),
    ("ATL_MLB", "135268"),      // Atlanta Braves
    ("ATL_UTD", "135851"),      // Atlanta United
    ("GATECH_FOOTBALL", "136893"),
    ("GATECH_BASKETBALL", "138614"),
];

/// Display names, in the fixed enumeration order used for fallback lines.
pub const TEAM_NAMES: &[(&str, &str)] = &[
    ("USA", "USA"),
    ("CRC", "Costa Rica"),
    ("ATL_FALCONS", "Atlanta Falcons"),
    ("ATL_HAWKS", "Atlanta Hawks"),
    ("ATL_MLB", "Atlanta Braves"),
    ("ATL_UTD", "Atlanta United"),
    ("GATECH_FOOTBALL", "Georgia Tech Football"),
    ("GATECH_BASKETBALL", "Georgia Tech Basketball"),
    ("F1", "Formula 1"),
];

pub const F1_TEAM_KEY: &str = "F1";

/// TheSportsDB Formula 1 league id for the next-race lookup.
pub const F1_LEAGUE_ID: &str = "4370";

pub const SPORTSDB_BASE_URL: &str = "https://www.thesportsdb.com/api/v1/json/123";

pub const TELEGRAM_BOT_TOKEN: &str = "0000000000:REPLACE_WITH_REAL_BOT_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "0000000000";

/// All display times and calendar-date comparisons use this zone.
pub const DISPLAY_TZ: Tz = chrono_tz::US::Eastern;

/// Full display name for a team key, falling back to the raw key if unmapped.
pub fn display_name(team_key: &str) -> &str {
    TEAM_NAMES
        .iter()
        .find(|(key, _)| *key == team_key)
        .map(|(_, name)| *name)
        .unwrap_or(team_key)
}
