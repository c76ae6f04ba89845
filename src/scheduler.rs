use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Timelike};
use chrono_tz::Tz;
use tracing::warn;

use crate::model::game::GameRecord;

/// Anchor jobs recur daily for the process lifetime; reminder jobs are one-shot
/// and are the only category the daily resets clear.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobCategory {
    Anchor,
    Reminder,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    OneHourWarning,
    StartingNow,
}

/// What a job does when it fires. Actions are plain data so the run loop can
/// dispatch them without re-entering the scheduler from inside a callback.
#[derive(Clone, Debug, PartialEq)]
pub enum JobAction {
    /// 00:01 — clear reminders and rebuild today's schedule.
    FullReset,
    /// 10:00 — send the summary of today's games.
    MorningSummary,
    /// 20:00 — send the summary of tomorrow's games.
    EveningSummary,
    /// 20:01 — clear reminders and build tomorrow's schedule.
    PrepareTomorrow,
    /// 23:59 — clear reminders and re-add any still pending for today.
    EndOfDayCleanup,
    GameAlert { game: GameRecord, kind: AlertKind },
}

#[derive(Clone, Debug)]
struct Job {
    fire_at: NaiveTime,
    category: JobCategory,
    action: JobAction,
    next_run: DateTime<Tz>,
}

/// Wall-clock job registry at minute resolution. Owned by the scheduler thread;
/// nothing else registers or clears jobs.
#[derive(Debug)]
pub struct Scheduler {
    tz: Tz,
    jobs: Vec<Job>,
}

impl Scheduler {
    pub fn new(tz: Tz) -> Self {
        Self { tz, jobs: Vec::new() }
    }

    /// Register a job firing daily at `fire_at` (seconds ignored), starting
    /// with the next occurrence strictly after `now`. Returns the first fire
    /// time, or None when the wall-clock time does not exist in the zone.
    pub fn add(
        &mut self,
        fire_at: NaiveTime,
        category: JobCategory,
        action: JobAction,
        now: DateTime<Tz>,
    ) -> Option<DateTime<Tz>> {
        let fire_at = truncate_to_minute(fire_at);
        let first_run = match self.occurrence_on(now.date_naive(), fire_at) {
            Some(dt) if dt > now => Some(dt),
            _ => self.occurrence_on(now.date_naive() + Duration::days(1), fire_at),
        };
        let Some(next_run) = first_run else {
            warn!(%fire_at, "Job time unrepresentable in timezone; not scheduling");
            return None;
        };
        self.jobs.push(Job { fire_at, category, action, next_run });
        Some(next_run)
    }

    /// Remove every job in the given category.
    pub fn clear(&mut self, category: JobCategory) {
        self.jobs.retain(|job| job.category != category);
    }

    pub fn count(&self, category: JobCategory) -> usize {
        self.jobs.iter().filter(|job| job.category == category).count()
    }

    /// Next fire times for a category, in registration order.
    pub fn next_runs(&self, category: JobCategory) -> Vec<DateTime<Tz>> {
        self.jobs
            .iter()
            .filter(|job| job.category == category)
            .map(|job| job.next_run)
            .collect()
    }

    /// Collect the actions of all jobs whose fire time has arrived. Anchors
    /// re-arm for the next day; reminders are consumed.
    pub fn run_pending(&mut self, now: DateTime<Tz>) -> Vec<JobAction> {
        let tz = self.tz;
        let mut due: Vec<JobAction> = Vec::new();
        self.jobs.retain_mut(|job| {
            if now < job.next_run {
                return true;
            }
            due.push(job.action.clone());
            match job.category {
                JobCategory::Anchor => {
                    job.next_run = next_occurrence_after(tz, job.next_run, job.fire_at, now);
                    true
                }
                JobCategory::Reminder => false,
            }
        });
        due
    }

    fn occurrence_on(&self, date: NaiveDate, fire_at: NaiveTime) -> Option<DateTime<Tz>> {
        self.tz.from_local_datetime(&date.and_time(fire_at)).earliest()
    }
}

fn truncate_to_minute(t: NaiveTime) -> NaiveTime {
    t.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(t)
}

/// First wall-clock occurrence of `fire_at` after both `from` and `now`.
/// Skipping past `now` keeps an anchor from replaying every missed day after a
/// long stall.
fn next_occurrence_after(
    tz: Tz,
    from: DateTime<Tz>,
    fire_at: NaiveTime,
    now: DateTime<Tz>,
) -> DateTime<Tz> {
    let mut date = from.date_naive();
    loop {
        date = date + Duration::days(1);
        match tz.from_local_datetime(&date.and_time(fire_at)).earliest() {
            Some(dt) if dt > now => return dt,
            // Nonexistent local time (DST gap) or still in the past: keep going
            _ => continue,
        }
    }
}
