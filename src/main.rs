use std::thread;
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

use events_alert_bot::alerts::AlertEngine;
use events_alert_bot::commands::{parse_command, reply_for};
use events_alert_bot::config;
use events_alert_bot::sportsdb::SportsDb;
use events_alert_bot::telegram::Telegram;

/// Handle inbound chat commands until an error escapes; the supervisor loop in
/// main restarts polling from scratch.
fn poll_updates(telegram: &Telegram, sportsdb: &SportsDb) -> Result<(), String> {
    // Updates queued while the bot was down are stale; skip past them.
    let mut offset = telegram.drop_pending()?;
    loop {
        let updates = telegram.get_updates(offset, 25)?;
        for update in updates {
            offset = update.update_id + 1;
            let Some(message) = update.message else { continue };
            let Some(text) = message.text else { continue };
            let now = Utc::now().with_timezone(&config::DISPLAY_TZ);
            let reply = reply_for(parse_command(&text), sportsdb, now);
            if let Err(e) = telegram.reply(message.chat.id, &reply) {
                error!(error = %e, "Failed to reply to command");
            }
        }
    }
}

fn main() {
    // Daily-rotated log file, keeping one backup alongside the live file.
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("events")
        .filename_suffix("log")
        .max_log_files(2)
        .build("./logs")
        .expect("failed to initialize log file appender");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(file_writer.and(std::io::stderr))
        .with_ansi(false)
        .init();

    // Scheduler thread: started once, never restarted. All job registration
    // and clearing happens on this thread.
    thread::spawn(|| {
        let mut engine = AlertEngine::new(
            SportsDb::new(),
            Telegram::new(config::TELEGRAM_BOT_TOKEN, config::TELEGRAM_CHAT_ID),
        );
        let now = Utc::now().with_timezone(&config::DISPLAY_TZ);
        engine.start(now);
        engine.run();
    });

    let sportsdb = SportsDb::new();
    let telegram = Telegram::new(config::TELEGRAM_BOT_TOKEN, config::TELEGRAM_CHAT_ID);
    loop {
        info!("Starting Telegram bot polling");
        if let Err(e) = poll_updates(&telegram, &sportsdb) {
            error!(error = %e, "Bot polling failed; restarting in 10 seconds");
            thread::sleep(Duration::from_secs(10));
        }
    }
}
