//! Environment/runtime helpers
//!
//! Loads `.env` once and parses typed values out of environment variables.

use std::str::FromStr;

use tracing::debug;

use crate::CoreError;

/// Load `.env` from the working directory if present.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(_) => debug!("no .env file found"),
    }
}

/// Read and parse an environment variable; `Ok(None)` when unset.
pub fn var_parse<T>(key: &str) -> Result<Option<T>, CoreError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| CoreError::Parse(format!("{key}={raw}: {e}"))),
        Err(_) => Ok(None),
    }
}
