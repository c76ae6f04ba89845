use chrono::DateTime;
use chrono_tz::Tz;

/// One upcoming fixture for a tracked team, normalized to the display timezone.
/// Records are immutable once constructed; every fetch builds fresh ones.
#[derive(Clone, Debug, PartialEq)]
pub struct GameRecord {
    pub team_key: &'static str,
    pub opponent: String,
    pub start_time: DateTime<Tz>,
}
