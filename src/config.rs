use anyhow::{anyhow, Context, Result};
use dotenv::dotenv;
use std::env;
use std::time::Duration;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8088";
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub pool_size: u32,
    /// Bounds both pool checkout and each statement.
    pub database_timeout: Duration,
}

impl Config {
    /// Reads the configuration from the environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").ok_or_else(|| anyhow!("DATABASE_URL must be set"))?;
        let bind_address =
            lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_owned());
        let pool_size = match lookup("DATABASE_POOL_SIZE") {
            Some(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("DATABASE_POOL_SIZE is not a number: {}", raw))?,
            None => DEFAULT_POOL_SIZE,
        };
        if pool_size == 0 {
            return Err(anyhow!("DATABASE_POOL_SIZE must be at least 1"));
        }
        let timeout_secs = match lookup("DATABASE_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("DATABASE_TIMEOUT_SECS is not a number: {}", raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(anyhow!("DATABASE_TIMEOUT_SECS must be at least 1"));
        }
        Ok(Self {
            database_url,
            bind_address,
            pool_size,
            database_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
