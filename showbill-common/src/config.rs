//! Configuration loading and root folder resolution

use std::path::{Path, PathBuf};

/// Environment variable consulted when no CLI argument is given
pub const ROOT_ENV_VAR: &str = "SHOWBILL_ROOT";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "showbill.db";

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. `SHOWBILL_ROOT` environment variable
/// 3. TOML config file (`root_folder` key)
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_ENV_VAR) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(config_path) = find_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(root_folder);
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Path of the SQLite database inside the root folder
pub fn database_path(root_folder: &Path) -> PathBuf {
    root_folder.join(DATABASE_FILE)
}

/// Create the root folder if it does not exist yet
pub fn ensure_root_exists(root_folder: &Path) -> crate::Result<()> {
    std::fs::create_dir_all(root_folder)?;
    Ok(())
}

/// Locate the configuration file for the platform, if any exists
fn find_config_file() -> Option<PathBuf> {
    // ~/.config/showbill/config.toml first, then /etc/showbill/config.toml
    if let Some(user_config) = dirs::config_dir().map(|d| d.join("showbill").join("config.toml")) {
        if user_config.exists() {
            return Some(user_config);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/showbill/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("showbill"))
        .unwrap_or_else(|| PathBuf::from("./showbill_data"))
}
