mod config;
pub mod logging;

pub use config::{
    CONFIG_FILE_NAME, PROGRAM_LOG_LEVEL, PROGRAM_NAME, config_dir, default_config_path,
    xdg_or_home,
};

pub use logging::init;
