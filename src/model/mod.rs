pub mod event;
pub mod game;
