//! Server configuration.

use std::time::Duration;

use wordduel_session::SessionConfig;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the server needs to know before it binds.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the WebSocket listener binds to.
    ///
    /// Default: `127.0.0.1:8080`.
    pub bind_addr: String,

    /// Seconds an in-game connection may stay silent before it is
    /// closed. Players waiting for an opponent are exempt.
    ///
    /// Default: 0 (never).
    pub read_timeout_secs: u64,

    /// Largest inbound frame that is decoded. Bigger frames get an
    /// `error` reply.
    ///
    /// Default: 4096.
    pub max_message_bytes: usize,

    pub session: SessionConfig,

    /// How often idle duels are reaped and old finished duels pruned.
    /// 0 disables the housekeeping task.
    ///
    /// Default: 30.
    pub reaper_interval_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            read_timeout_secs: 0,
            max_message_bytes: 4096,
            session: SessionConfig::default(),
            reaper_interval_secs: 30,
        }
    }
}

impl ServerConfig {
    /// Reads overrides from the process environment.
    ///
    /// | Variable                       | Field                        |
    /// |--------------------------------|------------------------------|
    /// | `WORDDUEL_BIND`                | `bind_addr`                  |
    /// | `PORT`                         | `bind_addr = 0.0.0.0:$PORT`  |
    /// | `WORDDUEL_READ_TIMEOUT_SECS`   | `read_timeout_secs`          |
    /// | `WORDDUEL_IDLE_TIMEOUT_SECS`   | `session.idle_timeout_secs`  |
    ///
    /// `WORDDUEL_BIND` wins over `PORT`. Unset variables keep defaults.
    ///
    /// # Errors
    /// [`ConfigError::Invalid`] if a variable is set but unparsable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading through `lookup`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(addr) = lookup("WORDDUEL_BIND") {
            config.bind_addr = addr;
        } else if let Some(port) = lookup("PORT") {
            let port: u16 = parse("PORT", port)?;
            config.bind_addr = format!("0.0.0.0:{port}");
        }
        if let Some(value) = lookup("WORDDUEL_READ_TIMEOUT_SECS") {
            config.read_timeout_secs =
                parse("WORDDUEL_READ_TIMEOUT_SECS", value)?;
        }
        if let Some(value) = lookup("WORDDUEL_IDLE_TIMEOUT_SECS") {
            config.session.idle_timeout_secs =
                parse("WORDDUEL_IDLE_TIMEOUT_SECS", value)?;
        }

        Ok(config)
    }

    pub(crate) fn read_timeout(&self) -> Option<Duration> {
        (self.read_timeout_secs > 0)
            .then(|| Duration::from_secs(self.read_timeout_secs))
    }

    pub(crate) fn reaper_interval(&self) -> Option<Duration> {
        (self.reaper_interval_secs > 0)
            .then(|| Duration::from_secs(self.reaper_interval_secs))
    }
}

fn parse<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value,
    })
}
