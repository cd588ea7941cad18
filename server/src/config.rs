use std::{env, fmt::Display, net::IpAddr, str::FromStr};

use tracing::info;

/// Runtime configuration, resolved once at process start. Every field has a
/// literal default and an environment override; nothing else in the crate
/// reads the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address for the HTTP listener.
    pub addr: IpAddr,
    /// Bind port for the HTTP listener.
    pub port: u16,
    /// Path of the SQLite database file, created on first run.
    pub database: String,
    /// User id recorded for writes that arrive without an author identity.
    /// With real authentication this would be the authenticated user.
    pub actor_id: i32,
}

impl Config {
    pub fn load() -> Self {
        Self {
            addr: try_load("POTLUCK_ADDR", "0.0.0.0"),
            port: try_load("POTLUCK_PORT", "5005"),
            database: try_load("POTLUCK_DATABASE", "potluck.db"),
            actor_id: try_load("POTLUCK_ACTOR", "1"),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let raw = match env::var(key) {
        Ok(value) => value,
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default.to_string()
        }
    };

    raw.parse()
        .unwrap_or_else(|e| panic!("invalid {key} value {raw:?}: {e}"))
}
