//! Effective account settings
//!
//! A command-line value overrides the config file, which overrides the
//! built-in defaults. Empty strings on the command line count as absent.

use ipgw_protocol::{Credentials, Password};

use super::FileConfig;

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--user`
    pub user: Option<String>,
    /// `--password`
    pub password: Option<Password>,
    /// `--fee`
    pub fee: Option<bool>,
    /// `--ip`
    pub ip: Option<String>,
}

/// Settings after applying overrides to the config file
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Account name
    pub user: String,
    /// Account password
    pub password: Password,
    /// Use the fee network
    pub fee: bool,
    /// Address for `disconnip`
    pub ip: Option<String>,
}

impl Settings {
    /// Merge command-line overrides over the file values
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Self {
        let user = overrides
            .user
            .filter(|u| !u.is_empty())
            .unwrap_or(file.user);

        let password = overrides
            .password
            .filter(|p| !p.is_empty())
            .unwrap_or(file.password);

        let fee = overrides.fee.unwrap_or(file.fee);
        let ip = overrides.ip.filter(|ip| !ip.is_empty());

        Self {
            user,
            password,
            fee,
            ip,
        }
    }

    /// Credentials for building a request
    pub fn credentials(&self) -> Credentials {
        Credentials {
            user: self.user.clone(),
            password: self.password.clone(),
            fee: self.fee,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(user: &str, password: &str, fee: bool) -> FileConfig {
        FileConfig {
            user: user.to_string(),
            password: Password::from(password),
            fee,
        }
    }

    #[test]
    fn test_flag_overrides_file() {
        let overrides = Overrides {
            user: Some("bob".to_string()),
            ..Default::default()
        };
        let settings = Settings::resolve(file("alice", "pw", false), overrides);
        assert_eq!(settings.user, "bob");
        assert_eq!(settings.password.expose(), "pw");
    }

    #[test]
    fn test_file_used_without_flag() {
        let settings = Settings::resolve(file("alice", "pw", true), Overrides::default());
        assert_eq!(settings.user, "alice");
        assert!(settings.fee);
    }

    #[test]
    fn test_empty_flag_counts_as_absent() {
        let overrides = Overrides {
            user: Some(String::new()),
            password: Some(Password::default()),
            ip: Some(String::new()),
            ..Default::default()
        };
        let settings = Settings::resolve(file("alice", "pw", false), overrides);
        assert_eq!(settings.user, "alice");
        assert_eq!(settings.password.expose(), "pw");
        assert_eq!(settings.ip, None);
    }

    #[test]
    fn test_fee_flag_can_disable_file_fee() {
        let overrides = Overrides {
            fee: Some(false),
            ..Default::default()
        };
        let settings = Settings::resolve(file("alice", "pw", true), overrides);
        assert!(!settings.fee);
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(FileConfig::default(), Overrides::default());
        assert_eq!(settings.user, "");
        assert!(settings.password.is_empty());
        assert!(!settings.fee);
        assert_eq!(settings.ip, None);
    }

    #[test]
    fn test_credentials() {
        let settings = Settings::resolve(file("alice", "pw", true), Overrides::default());
        let creds = settings.credentials();
        assert_eq!(creds.user, "alice");
        assert_eq!(creds.password.expose(), "pw");
        assert!(creds.fee);
    }
}
