//! Server configuration from environment variables and the command line.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use log::LevelFilter;

pub const DEFAULT_PORT: u16 = 3000;

pub const ENV_BIND: &str = "CHECKERS_BIND";
pub const ENV_PORT: &str = "CHECKERS_PORT";
pub const ENV_LOG: &str = "CHECKERS_LOG";

pub const USAGE: &str = "\
usage: checkers_relay [--bind <ip>] [--port <n>] [--log-level <level>]

  --bind <ip>           address to listen on (env CHECKERS_BIND, default 0.0.0.0)
  --port <n>            TCP port, 0 picks a free one (env CHECKERS_PORT, default 3000)
  --log-level <level>   off, error, warn, info, debug or trace (env CHECKERS_LOG, default info)
  --help                print this message";

/// Error type for configuration parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A flag or variable holds a value that does not parse
    InvalidValue { key: String, value: String },
    /// A flag was given without its value
    MissingValue { flag: String },
    /// Unrecognized command line argument
    UnknownArgument { arg: String },
    /// `--help` was given
    HelpRequested,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value '{value}' for {key}")
            }
            ConfigError::MissingValue { flag } => write!(f, "Missing value for {flag}"),
            ConfigError::UnknownArgument { arg } => write!(f, "Unknown argument '{arg}'"),
            ConfigError::HelpRequested => f.write_str(USAGE),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Listening address and log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: IpAddr,
    pub port: u16,
    pub log_level: LevelFilter,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            log_level: LevelFilter::Info,
        }
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

impl ServerConfig {
    /// Read the process environment, then the process arguments.
    pub fn from_env_and_args() -> Result<Self, ConfigError> {
        Self::from_sources(|key| std::env::var(key).ok(), std::env::args().skip(1))
    }

    /// Build a configuration from an environment lookup and an argument
    /// list (without the program name). Arguments override the environment.
    pub fn from_sources<F, I>(env: F, args: I) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
        I: IntoIterator<Item = String>,
    {
        let mut config = ServerConfig::default();
        if let Some(value) = env(ENV_BIND) {
            config.bind = parse_value(ENV_BIND, &value)?;
        }
        if let Some(value) = env(ENV_PORT) {
            config.port = parse_value(ENV_PORT, &value)?;
        }
        if let Some(value) = env(ENV_LOG) {
            config.log_level = parse_value(ENV_LOG, &value)?;
        }

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
                None => (arg.clone(), None),
            };
            if flag == "--help" || flag == "-h" {
                return Err(ConfigError::HelpRequested);
            }
            if !matches!(flag.as_str(), "--bind" | "--port" | "--log-level") {
                return Err(ConfigError::UnknownArgument { arg });
            }
            let value = inline
                .or_else(|| args.next())
                .ok_or_else(|| ConfigError::MissingValue { flag: flag.clone() })?;
            match flag.as_str() {
                "--bind" => config.bind = parse_value(&flag, &value)?,
                "--port" => config.port = parse_value(&flag, &value)?,
                _ => config.log_level = parse_value(&flag, &value)?,
            }
        }
        Ok(config)
    }

    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_sources(no_env, Vec::new()).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_args_override_env() {
        let env: HashMap<&str, &str> = [(ENV_PORT, "4000"), (ENV_LOG, "warn")].into_iter().collect();
        let lookup = |key: &str| env.get(key).map(|v| (*v).to_string());
        let config =
            ServerConfig::from_sources(lookup, args(&["--port", "5000", "--bind=127.0.0.1"])).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.log_level, LevelFilter::Warn);
        assert_eq!(config.bind, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn test_log_level_is_case_insensitive() {
        let config = ServerConfig::from_sources(no_env, args(&["--log-level", "DEBUG"])).unwrap();
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            ServerConfig::from_sources(no_env, args(&["--port", "70000"])),
            Err(ConfigError::InvalidValue {
                key: "--port".to_string(),
                value: "70000".to_string()
            })
        );
        assert_eq!(
            ServerConfig::from_sources(no_env, args(&["--bind"])),
            Err(ConfigError::MissingValue {
                flag: "--bind".to_string()
            })
        );
        assert_eq!(
            ServerConfig::from_sources(no_env, args(&["--verbose"])),
            Err(ConfigError::UnknownArgument {
                arg: "--verbose".to_string()
            })
        );
        assert_eq!(
            ServerConfig::from_sources(no_env, args(&["--help"])),
            Err(ConfigError::HelpRequested)
        );
    }

    #[test]
    fn test_bad_env_value() {
        let lookup = |key: &str| (key == ENV_BIND).then(|| "not-an-ip".to_string());
        assert!(matches!(
            ServerConfig::from_sources(lookup, Vec::new()),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
