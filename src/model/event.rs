use serde::{Deserialize, Serialize};

/// Response envelope for both `eventsnext.php` and `eventsnextleague.php`.
/// TheSportsDB returns `"events": null` (not an empty array) when nothing is
/// scheduled, so the field has to be optional.
#[derive(Debug, Serialize, Deserialize)]
pub struct EventsResponse {
    pub events: Option<Vec<Event>>,
}

/// One upcoming event as returned by TheSportsDB. Every field is optional
/// upstream; missing pieces are handled at conversion time.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "strEvent")]
    pub name: Option<String>,
    #[serde(rename = "dateEvent")]
    pub date: Option<String>,
    #[serde(rename = "strTime")]
    pub time: Option<String>,
    #[serde(rename = "strHomeTeam")]
    pub home_team: Option<String>,
    #[serde(rename = "strAwayTeam")]
    pub away_team: Option<String>,
    #[serde(rename = "idHomeTeam")]
    pub home_id: Option<String>,
    #[serde(rename = "idAwayTeam")]
    pub away_id: Option<String>,
}
