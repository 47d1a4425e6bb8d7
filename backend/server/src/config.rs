use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use tracing::{info, warn};

use crate::error::AppError;

pub const DEFAULT_PORT: &str = "1111";
pub const DEFAULT_DATABASE: &str = "personal";
pub const DEFAULT_COLLECTION: &str = "pho-tracker";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub mongodb_uri: Option<String>,
    pub database: String,
    pub collection: String,
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        Self::from_vars(|key| env::var(key).ok().or_else(|| read_secret(key)))
    }

    pub fn from_vars<F>(var: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mongodb_uri = var("MONGODB_URI").filter(|uri| !uri.trim().is_empty());
        if mongodb_uri.is_none() {
            warn!("MONGODB_URI not found, database calls will fail");
        }

        Ok(Self {
            port: try_load(&var, "RUST_PORT", DEFAULT_PORT)?,
            mongodb_uri,
            database: try_load(&var, "MONGODB_DATABASE", DEFAULT_DATABASE)?,
            collection: try_load(&var, "MONGODB_COLLECTION", DEFAULT_COLLECTION)?,
        })
    }
}

fn try_load<T, F>(var: &F, key: &str, default: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    var(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .trim()
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            AppError::Config {
                key: key.to_string(),
                reason: e.to_string(),
            }
        })
}

fn read_secret(secret_name: &str) -> Option<String> {
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path).ok().map(|s| s.trim().to_string())
}
