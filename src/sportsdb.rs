use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::{info, instrument, warn};
use ureq::Agent;

use crate::config;
use crate::model::event::{Event, EventsResponse};
use crate::model::game::GameRecord;

/// Which side of an event the tracked team occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

/// Client for TheSportsDB next-events endpoints.
pub struct SportsDb {
    agent: Agent,
    base_url: String,
}

impl SportsDb {
    pub fn new() -> Self {
        Self::with_base_url(config::SPORTSDB_BASE_URL)
    }

    /// Construct against a different base URL (used by tests to avoid network).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        // The upstream applies no timeout of its own; a hung request would
        // otherwise block the fetch path indefinitely.
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(10)))
            .build()
            .new_agent();
        Self { agent, base_url: base_url.into() }
    }

    fn get_events(&self, url: &str) -> Result<EventsResponse, String> {
        match self.agent.get(url).call() {
            Ok(response) => {
                let mut body = response.into_body();
                match body.read_to_string() {
                    Ok(text) => serde_json::from_str::<EventsResponse>(&text)
                        .map_err(|e| format!("failed to deserialize events response: {}", e)),
                    Err(e) => Err(format!("failed to read response body: {}", e)),
                }
            }
            Err(e) => Err(format!("request failed: {}", e)),
        }
    }

    /// Fetch the next Formula 1 race. Returns None when the league has nothing
    /// scheduled or the response is unusable; the F1 entry is optional.
    pub fn fetch_next_f1_event(&self) -> Option<GameRecord> {
        let url = format!("{}/eventsnextleague.php?id={}", self.base_url, config::F1_LEAGUE_ID);
        let response = match self.get_events(&url) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "Failed to fetch next F1 event");
                return None;
            }
        };
        // No events at all is the normal "nothing scheduled" case, not a fault
        let event = response.events?.into_iter().next()?;
        f1_record_from_event(event)
    }

    /// Fetch the next game for every tracked team, plus the next F1 race when
    /// one exists. Per-team failures are logged and that team is omitted; the
    /// batch itself never fails. Result order is unspecified.
    #[instrument(level = "info", skip(self))]
    pub fn fetch_next_games(&self) -> Vec<GameRecord> {
        let mut games: Vec<GameRecord> = Vec::new();

        if let Some(f1) = self.fetch_next_f1_event() {
            games.push(f1);
        }

        for &(team_key, team_id) in config::TEAM_IDS {
            let url = format!("{}/eventsnext.php?id={}", self.base_url, team_id);
            let response = match self.get_events(&url) {
                Ok(r) => r,
                Err(e) => {
                    warn!(team_key, error = %e, "Failed to fetch next events");
                    continue;
                }
            };
            let Some(events) = response.events else {
                continue;
            };
            // Soonest upcoming event comes first in the response
            let Some(event) = events.first() else {
                continue;
            };
            match game_from_event(team_key, team_id, event) {
                Ok(game) => games.push(game),
                Err(e) => warn!(team_key, error = %e, "Skipping team with unusable event"),
            }
        }

        info!(count = games.len(), "Fetched next games");
        games
    }

    /// Games whose start date (in the display timezone) equals `now`'s date.
    /// Re-fetches from upstream on every call.
    pub fn fetch_games_today(&self, now: DateTime<Tz>) -> Vec<GameRecord> {
        let today = now.date_naive();
        self.fetch_next_games()
            .into_iter()
            .filter(|g| g.start_time.date_naive() == today)
            .collect()
    }

    /// Games whose start date (in the display timezone) falls on the day after
    /// `now`'s date. Re-fetches from upstream on every call.
    pub fn fetch_games_tomorrow(&self, now: DateTime<Tz>) -> Vec<GameRecord> {
        let tomorrow = now.date_naive() + chrono::Duration::days(1);
        self.fetch_next_games()
            .into_iter()
            .filter(|g| g.start_time.date_naive() == tomorrow)
            .collect()
    }
}

impl Default for SportsDb {
    fn default() -> Self {
        Self::new()
    }
}

/// Event times come back empty or null often enough that midnight UTC is the
/// working default.
fn effective_time(time: Option<&str>) -> &str {
    match time {
        Some(t) if !t.is_empty() => t,
        _ => "00:00:00",
    }
}

/// Turn the next F1 league event into a GameRecord. Events missing their name
/// or date are logged and dropped, like the per-team path does.
pub fn f1_record_from_event(event: Event) -> Option<GameRecord> {
    let Some(date) = event.date.as_deref() else {
        warn!("F1 event has no dateEvent; omitting F1 entry");
        return None;
    };
    let time = effective_time(event.time.as_deref());
    let start_time = match parse_game_time(date, time) {
        Ok(dt) => dt,
        Err(e) => {
            warn!(error = %e, "Failed to parse F1 event date/time");
            return None;
        }
    };
    let Some(name) = event.name else {
        warn!("F1 event has no strEvent; omitting F1 entry");
        return None;
    };
    Some(GameRecord { team_key: config::F1_TEAM_KEY, opponent: name, start_time })
}

/// Parse TheSportsDB "YYYY-MM-DD" + "HH:MM:SS" strings, taken as UTC, into the
/// display timezone.
pub fn parse_game_time(date: &str, time: &str) -> Result<DateTime<Tz>, String> {
    let naive = NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M:%S")
        .map_err(|e| format!("invalid event date/time '{} {}': {}", date, time, e))?;
    Ok(Utc.from_utc_datetime(&naive).with_timezone(&config::DISPLAY_TZ))
}

/// Resolve which side is ours and who the opponent is. Numeric id match wins;
/// otherwise a case-insensitive substring match of our display name against the
/// home/away name strings; otherwise None (caller treats us as home).
pub fn resolve_opponent(event: &Event, team_id: &str, team_name: &str) -> (String, Option<Side>) {
    let by_id = match (event.home_id.as_deref(), event.away_id.as_deref()) {
        (Some(h), _) if h == team_id => Some(Side::Home),
        (_, Some(a)) if a == team_id => Some(Side::Away),
        _ => None,
    };

    let side = by_id.or_else(|| {
        let needle = team_name.to_lowercase();
        let name_matches = |s: Option<&str>| {
            s.map(|n| n.to_lowercase().contains(&needle)).unwrap_or(false)
        };
        if name_matches(event.home_team.as_deref()) {
            Some(Side::Home)
        } else if name_matches(event.away_team.as_deref()) {
            Some(Side::Away)
        } else {
            None
        }
    });

    let opponent = match side {
        Some(Side::Away) => event.home_team.as_deref(),
        // Unresolved defaults to home-as-us, so the opponent is the away side
        Some(Side::Home) | None => event.away_team.as_deref(),
    };

    (opponent.unwrap_or("Unknown").to_string(), side)
}

/// Build a GameRecord for a tracked team from one upstream event.
pub fn game_from_event(
    team_key: &'static str,
    team_id: &str,
    event: &Event,
) -> Result<GameRecord, String> {
    let date = event
        .date
        .as_deref()
        .ok_or_else(|| format!("event for {} has no dateEvent", team_key))?;
    let time = effective_time(event.time.as_deref());
    let start_time = parse_game_time(date, time)?;

    let (opponent, side) = resolve_opponent(event, team_id, config::display_name(team_key));
    if side.is_none() {
        warn!(team_key, opponent = %opponent, "Could not resolve home/away side; assuming home");
    }

    Ok(GameRecord { team_key, opponent, start_time })
}
