pub mod about;
pub mod config;
pub mod list;
pub mod watch;
