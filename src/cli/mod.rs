mod config;
pub use self::config::Config;

pub mod actions;
pub mod globals;

mod start;
pub use self::start::{get_config_path, start, start_from};

mod commands;
