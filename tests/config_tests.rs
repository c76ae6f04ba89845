use events_alert_bot::config::{
    display_name, DISPLAY_TZ, F1_LEAGUE_ID, F1_TEAM_KEY, TEAM_IDS, TEAM_NAMES,
};

#[test]
fn every_tracked_team_has_a_display_name() {
    assert_eq!(TEAM_IDS.len(), 8);
    // The name map carries the tracked teams plus the synthetic F1 entry
    assert_eq!(TEAM_NAMES.len(), TEAM_IDS.len() + 1);
    for (key, _) in TEAM_IDS {
        assert!(
            TEAM_NAMES.iter().any(|(k, _)| k == key),
            "no display name for {}",
            key
        );
    }
    assert!(TEAM_NAMES.iter().any(|(k, _)| *k == F1_TEAM_KEY));
}

#[test]
fn display_name_maps_keys_and_falls_back_to_raw_key() {
    assert_eq!(display_name("ATL_MLB"), "Atlanta Braves");
    assert_eq!(display_name("GATECH_FOOTBALL"), "Georgia Tech Football");
    assert_eq!(display_name("F1"), "Formula 1");
    assert_eq!(display_name("SOMETHING_ELSE"), "SOMETHING_ELSE");
}

#[test]
fn fixed_zone_and_f1_league_are_pinned() {
    assert_eq!(DISPLAY_TZ, chrono_tz::US::Eastern);
    assert_eq!(F1_LEAGUE_ID, "4370");
}
