//! Connection parameters, read from the environment.

use std::fmt;

use crate::{Error, Result};

pub const HOST_VAR: &str = "REDIS_HOST";
pub const PORT_VAR: &str = "REDIS_PORT";
pub const PASSWORD_VAR: &str = "REDIS_PASSWORD";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 6379;

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
}

impl Config {
    pub fn new(host: impl Into<String>, port: u16) -> Config {
        Config {
            host: host.into(),
            port,
            password: None,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Config {
        self.password = Some(password.into());
        self
    }

    /// Reads `REDIS_HOST`, `REDIS_PORT` and `REDIS_PASSWORD`.
    ///
    /// Unset or empty variables fall back to a local server without
    /// authentication. A port that does not parse is an error.
    pub fn from_env() -> Result<Config> {
        Config::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let host = var(HOST_VAR).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match var(PORT_VAR) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                Error::Config(format!("{PORT_VAR}={raw:?} is not a valid port: {e}"))
            })?,
            None => DEFAULT_PORT,
        };
        let password = var(PASSWORD_VAR);

        Ok(Config {
            host,
            port,
            password,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
