pub mod alerts;
pub mod commands;
pub mod config;
pub mod format;
pub mod model;
pub mod scheduler;
pub mod sportsdb;
pub mod telegram;
