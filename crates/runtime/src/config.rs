use std::path::PathBuf;

pub const PROGRAM_NAME: &str = "glint";
pub const PROGRAM_LOG_LEVEL: &str = "GLINT_LOG_LEVEL";
pub const CONFIG_FILE_NAME: &str = "config.json";

pub fn xdg_or_home(xdg_var: &str, home_suffix: &str) -> PathBuf {
    if let Some(dir) = std::env::var_os(xdg_var)
        && !dir.is_empty()
    {
        PathBuf::from(dir)
    } else {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(home_suffix)
    }
}

/// Directory holding the user's filter configuration.
///
/// `XDG_CONFIG_HOME` wins when set, then the platform config dir,
/// then `$HOME/.config`.
pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return PathBuf::from(xdg).join(PROGRAM_NAME);
    }

    dirs::config_dir()
        .unwrap_or_else(|| xdg_or_home("XDG_CONFIG_HOME", ".config"))
        .join(PROGRAM_NAME)
}

/// Default config file path. The file is optional.
pub fn default_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
