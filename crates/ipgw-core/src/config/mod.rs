//! Configuration management for pkuipgw
//!
//! Account settings live in an INI file with a single `[PKUIPGW]` section:
//!
//! ```ini
//! [PKUIPGW]
//! user = 1800012345
//! password = secret
//! fee = 0
//! ```
//!
//! The file is looked up at an explicit path, else beside the executable,
//! else at `/etc/pkuipgw.conf`.

mod settings;

pub use settings::{Overrides, Settings};

use ini::{Ini, ParseOption, Properties};
use ipgw_protocol::Password;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// INI section holding the account settings
pub const CONFIG_SECTION: &str = "PKUIPGW";

/// File name looked up beside the executable
pub const CONFIG_FILE_NAME: &str = "pkuipgw.conf";

/// System-wide configuration file
pub const SYSTEM_CONFIG_PATH: &str = "/etc/pkuipgw.conf";

/// Where the configuration file was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path given on the command line; must exist
    Explicit(PathBuf),
    /// `pkuipgw.conf` next to the running executable
    BesideExecutable(PathBuf),
    /// System-wide file; may be absent
    System(PathBuf),
}

impl ConfigSource {
    /// Path of the file
    pub fn path(&self) -> &Path {
        match self {
            ConfigSource::Explicit(p) | ConfigSource::BesideExecutable(p) | ConfigSource::System(p) => p,
        }
    }

    /// Whether loading fails when the file is missing
    pub fn is_required(&self) -> bool {
        matches!(self, ConfigSource::Explicit(_))
    }
}

/// Values read from the `[PKUIPGW]` section
///
/// Missing keys take the built-in defaults (`""`, `""`, `false`).
#[derive(Debug, Clone, Default)]
pub struct FileConfig {
    /// Account name
    pub user: String,
    /// Account password
    pub password: Password,
    /// Use the fee network
    pub fee: bool,
}

/// Pick the configuration file to read
pub fn locate_config(explicit: Option<&Path>) -> ConfigSource {
    locate_config_with(explicit, executable_dir().as_deref())
}

fn locate_config_with(explicit: Option<&Path>, exe_dir: Option<&Path>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    if let Some(dir) = exe_dir {
        let beside = dir.join(CONFIG_FILE_NAME);
        if beside.is_file() {
            return ConfigSource::BesideExecutable(beside);
        }
    }

    ConfigSource::System(PathBuf::from(SYSTEM_CONFIG_PATH))
}

fn executable_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

/// Load the `[PKUIPGW]` section from `source`
///
/// An optional source that does not exist yields the defaults. Values are
/// taken literally: quotes and backslashes are part of the value.
pub fn load_config(source: &ConfigSource) -> Result<FileConfig, ConfigError> {
    let path = source.path();

    if !path.is_file() {
        if source.is_required() || path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        return Ok(FileConfig::default());
    }

    tracing::debug!(path = %path.display(), "Loading config file");

    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    let ini = Ini::load_from_file_opt(path, options)?;

    let Some(section) = find_section(&ini) else {
        tracing::warn!("Config file has no [{}] section", CONFIG_SECTION);
        return Ok(FileConfig::default());
    };

    let fee = match lookup(section, "fee") {
        Some(value) => parse_fee(value)?,
        None => false,
    };

    Ok(FileConfig {
        user: lookup(section, "user").unwrap_or_default().to_string(),
        password: Password::from(lookup(section, "password").unwrap_or_default()),
        fee,
    })
}

// Section and key names match case-insensitively; a repeated key takes the
// last value.
fn find_section(ini: &Ini) -> Option<&Properties> {
    ini.iter()
        .filter(|(name, _)| name.is_some_and(|n| n.eq_ignore_ascii_case(CONFIG_SECTION)))
        .map(|(_, props)| props)
        .last()
}

fn lookup<'a>(section: &'a Properties, key: &str) -> Option<&'a str> {
    section
        .iter()
        .filter(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v)
        .last()
}

/// Parse the `fee` value
///
/// Integers follow the usual truthiness (non-zero is true); common boolean
/// words are accepted too.
pub fn parse_fee(value: &str) -> Result<bool, ConfigError> {
    let value = value.trim();
    if let Ok(n) = value.parse::<i64>() {
        return Ok(n != 0);
    }

    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" => Ok(true),
        "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::Invalid(format!(
            "fee must be 0 or 1, got {:?}",
            other
        ))),
    }
}
