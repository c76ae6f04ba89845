use chrono::TimeZone;

use events_alert_bot::alerts::{alert_is_current, schedule_game_alerts, AlertEngine};
use events_alert_bot::config::DISPLAY_TZ;
use events_alert_bot::model::game::GameRecord;
use events_alert_bot::scheduler::{AlertKind, JobAction, JobCategory, Scheduler};
use events_alert_bot::sportsdb::SportsDb;
use events_alert_bot::telegram::Telegram;

fn at(d: u32, h: u32, m: u32) -> chrono::DateTime<chrono_tz::Tz> {
    DISPLAY_TZ.with_ymd_and_hms(2025, 7, d, h, m, 0).unwrap()
}

fn game(team_key: &'static str, d: u32, h: u32, m: u32) -> GameRecord {
    GameRecord {
        team_key,
        opponent: "Panama".to_string(),
        start_time: at(d, h, m),
    }
}

#[test]
fn game_well_ahead_gets_warning_and_start_alert() {
    let mut sched = Scheduler::new(DISPLAY_TZ);
    let games = vec![game("USA", 27, 14, 0)];

    schedule_game_alerts(&mut sched, &games, at(27, 9, 0));
    assert_eq!(sched.count(JobCategory::Reminder), 2);

    let due = sched.run_pending(at(27, 13, 0));
    assert_eq!(
        due,
        vec![JobAction::GameAlert { game: games[0].clone(), kind: AlertKind::OneHourWarning }]
    );

    let due = sched.run_pending(at(27, 14, 0));
    assert_eq!(
        due,
        vec![JobAction::GameAlert { game: games[0].clone(), kind: AlertKind::StartingNow }]
    );
}

#[test]
fn game_within_the_hour_gets_only_start_alert() {
    let mut sched = Scheduler::new(DISPLAY_TZ);
    let games = vec![game("USA", 27, 14, 0)];

    schedule_game_alerts(&mut sched, &games, at(27, 13, 30));
    assert_eq!(sched.count(JobCategory::Reminder), 1);

    let due = sched.run_pending(at(27, 14, 0));
    assert_eq!(
        due,
        vec![JobAction::GameAlert { game: games[0].clone(), kind: AlertKind::StartingNow }]
    );
}

#[test]
fn game_already_started_gets_no_jobs() {
    let mut sched = Scheduler::new(DISPLAY_TZ);
    let games = vec![game("USA", 27, 14, 0)];

    schedule_game_alerts(&mut sched, &games, at(27, 15, 0));
    assert_eq!(sched.count(JobCategory::Reminder), 0);
}

#[test]
fn tomorrows_game_scheduled_tonight_fires_tomorrow() {
    // The 20:01 prepare-tomorrow pass registers alerts for the next day;
    // the HH:MM next-occurrence rule lands them on the right date.
    let mut sched = Scheduler::new(DISPLAY_TZ);
    let games = vec![game("USA", 27, 14, 0)];

    schedule_game_alerts(&mut sched, &games, at(26, 20, 1));
    assert_eq!(sched.count(JobCategory::Reminder), 2);

    assert!(sched.run_pending(at(26, 23, 58)).is_empty());

    let due = sched.run_pending(at(27, 13, 0));
    assert_eq!(due.len(), 1, "warning fires on the game's day, not tonight");
}

#[test]
fn start_installs_the_five_daily_anchors() {
    // Unreachable upstream: startup still has to arm the timetable, the
    // reminder rebuild just finds no games
    let mut engine = AlertEngine::new(
        SportsDb::with_base_url("http://127.0.0.1:9"),
        Telegram::with_base_url("http://127.0.0.1:9", "1"),
    );
    engine.start(at(27, 9, 0));

    let sched = engine.scheduler();
    assert_eq!(sched.count(JobCategory::Anchor), 5);
    assert_eq!(sched.count(JobCategory::Reminder), 0);

    let runs = sched.next_runs(JobCategory::Anchor);
    // 00:01 already passed at 09:00 and arms for the 28th; the rest fire today
    assert!(runs.contains(&at(28, 0, 1)), "full reset missing: {:?}", runs);
    assert!(runs.contains(&at(27, 10, 0)), "morning summary missing: {:?}", runs);
    assert!(runs.contains(&at(27, 20, 0)), "evening summary missing: {:?}", runs);
    assert!(runs.contains(&at(27, 20, 1)), "prepare-tomorrow missing: {:?}", runs);
    assert!(runs.contains(&at(27, 23, 59)), "end-of-day cleanup missing: {:?}", runs);
}

#[test]
fn alert_guard_checks_calendar_date_at_fire_time() {
    let g = game("USA", 27, 14, 0);
    assert!(alert_is_current(&g, at(27, 13, 0)));
    assert!(
        !alert_is_current(&g, at(28, 13, 0)),
        "a job firing after the day rolled over must be suppressed"
    );
}
