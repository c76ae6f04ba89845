use chrono::{DateTime, Duration, NaiveTime, Utc};
use chrono_tz::Tz;
use tracing::{error, info};

use crate::config;
use crate::format::format_games;
use crate::model::game::GameRecord;
use crate::scheduler::{AlertKind, JobAction, JobCategory, Scheduler};
use crate::sportsdb::SportsDb;
use crate::telegram::Telegram;

/// Drives the daily alert timetable: owns the fetcher, the chat client, and the
/// job registry, and is the only thing that registers or clears jobs.
pub struct AlertEngine {
    sportsdb: SportsDb,
    telegram: Telegram,
    scheduler: Scheduler,
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid wall-clock time")
}

impl AlertEngine {
    pub fn new(sportsdb: SportsDb, telegram: Telegram) -> Self {
        Self { sportsdb, telegram, scheduler: Scheduler::new(config::DISPLAY_TZ) }
    }

    /// Read-only view of the job registry.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Register the fixed daily anchors and build today's reminder schedule.
    /// Called once at startup.
    pub fn start(&mut self, now: DateTime<Tz>) {
        let anchors = [
            (hm(0, 1), JobAction::FullReset),
            (hm(10, 0), JobAction::MorningSummary),
            (hm(20, 0), JobAction::EveningSummary),
            (hm(20, 1), JobAction::PrepareTomorrow),
            (hm(23, 59), JobAction::EndOfDayCleanup),
        ];
        for (fire_at, action) in anchors {
            self.scheduler.add(fire_at, JobCategory::Anchor, action, now);
        }
        info!(anchors = self.scheduler.count(JobCategory::Anchor), "Installed daily anchors");
        self.schedule_one_hour_warnings(false, now);
    }

    /// "Check due jobs, sleep 30 seconds, repeat." Runs on the scheduler thread
    /// for the process lifetime.
    pub fn run(&mut self) -> ! {
        loop {
            let now = Utc::now().with_timezone(&config::DISPLAY_TZ);
            for action in self.scheduler.run_pending(now) {
                self.dispatch(action, now);
            }
            std::thread::sleep(std::time::Duration::from_secs(30));
        }
    }

    pub fn dispatch(&mut self, action: JobAction, now: DateTime<Tz>) {
        match action {
            JobAction::FullReset => {
                info!("00:01 full reset: rebuilding today's schedule");
                self.schedule_one_hour_warnings(false, now);
            }
            JobAction::EndOfDayCleanup => {
                info!("23:59 cleanup: clearing reminders and re-adding for late games");
                self.schedule_one_hour_warnings(false, now);
            }
            JobAction::PrepareTomorrow => {
                self.schedule_one_hour_warnings(true, now);
            }
            JobAction::MorningSummary => self.alert_games_today(now),
            JobAction::EveningSummary => self.alert_games_tomorrow(now),
            JobAction::GameAlert { game, kind } => self.send_alert_for_game(&game, kind, now),
        }
    }

    /// Clear the reminder category and register warning/start jobs for the
    /// target day's games.
    pub fn schedule_one_hour_warnings(&mut self, for_tomorrow: bool, now: DateTime<Tz>) {
        let day_label = if for_tomorrow { "tomorrow" } else { "today" };
        info!(day = day_label, "Scheduling one-hour warnings");

        self.scheduler.clear(JobCategory::Reminder);

        let games = if for_tomorrow {
            self.sportsdb.fetch_games_tomorrow(now)
        } else {
            self.sportsdb.fetch_games_today(now)
        };
        schedule_game_alerts(&mut self.scheduler, &games, now);
    }

    fn alert_games_today(&self, now: DateTime<Tz>) {
        let games = self.sportsdb.fetch_games_today(now);
        let msg = format_games(&games, "\u{1f4c5} *Today's Games:*");
        info!(message = %msg, "Sending today's game alert");
        if let Err(e) = self.telegram.send_message(&msg) {
            error!(error = %e, "Failed to send today's summary");
        }
    }

    fn alert_games_tomorrow(&self, now: DateTime<Tz>) {
        let games = self.sportsdb.fetch_games_tomorrow(now);
        let msg = format_games(&games, "\u{23ed} *Tomorrow's Games:*");
        info!(message = %msg, "Sending tomorrow's game alert");
        if let Err(e) = self.telegram.send_message(&msg) {
            error!(error = %e, "Failed to send tomorrow's summary");
        }
    }

    /// Guarded send: a job armed before a day rollover must not fire on the
    /// wrong day, so the game's date is re-checked at fire time.
    fn send_alert_for_game(&self, game: &GameRecord, kind: AlertKind, now: DateTime<Tz>) {
        if !alert_is_current(game, now) {
            info!(
                team_key = game.team_key,
                game_date = %game.start_time.date_naive(),
                "Game date no longer today; skipping alert"
            );
            return;
        }
        let msg = match kind {
            AlertKind::OneHourWarning => reminder_message(game),
            AlertKind::StartingNow => start_message(game),
        };
        if let Err(e) = self.telegram.send_message(&msg) {
            error!(error = %e, team_key = game.team_key, "Failed to send game alert");
        }
    }
}

/// True when the game still falls on the current calendar date in the display
/// timezone.
pub fn alert_is_current(game: &GameRecord, now: DateTime<Tz>) -> bool {
    game.start_time.date_naive() == now.date_naive()
}

/// Register one-shot reminder and start-alert jobs for each game whose times
/// are still ahead of `now`. Same-minute jobs fire independently.
pub fn schedule_game_alerts(scheduler: &mut Scheduler, games: &[GameRecord], now: DateTime<Tz>) {
    for game in games {
        let reminder_time = game.start_time - Duration::hours(1);
        if reminder_time > now {
            let action = JobAction::GameAlert { game: game.clone(), kind: AlertKind::OneHourWarning };
            if let Some(at) = scheduler.add(reminder_time.time(), JobCategory::Reminder, action, now) {
                info!(team_key = game.team_key, fire_at = %at, "Scheduled one-hour warning");
            }
        }
        if game.start_time > now {
            let action = JobAction::GameAlert { game: game.clone(), kind: AlertKind::StartingNow };
            if let Some(at) = scheduler.add(game.start_time.time(), JobCategory::Reminder, action, now) {
                info!(team_key = game.team_key, fire_at = %at, "Scheduled start alert");
            }
        }
    }
}

fn reminder_message(game: &GameRecord) -> String {
    format!(
        "\u{23f0} *Reminder:*\n*{}* play vs *{}* at {} ET (in 1 hour)",
        config::display_name(game.team_key),
        game.opponent,
        game.start_time.format("%I:%M %p")
    )
}

fn start_message(game: &GameRecord) -> String {
    format!(
        "\u{1f6a8} *Starting now:*\n*{}* vs *{}*",
        config::display_name(game.team_key),
        game.opponent
    )
}
