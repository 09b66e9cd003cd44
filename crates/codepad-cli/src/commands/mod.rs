pub mod config;
pub mod context;
pub mod languages;
pub mod load;
pub mod prefs;
pub mod run;
pub mod save;
pub mod watch;
