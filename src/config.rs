use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub session_file: PathBuf,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_base_url = env::var("PARKKI_API_BASE_URL")
            .map_err(|_| anyhow!("PARKKI_API_BASE_URL environment variable is required"))?;

        let session_file = env::var("PARKKI_SESSION_FILE")
            .unwrap_or_else(|_| "./session.json".to_string())
            .into();

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            api_base_url,
            session_file,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the env mutations cannot race each other.
    #[test]
    fn log_level_comes_from_env_with_info_default() {
        env::remove_var("LOG_LEVEL");
        env::set_var("PARKKI_API_BASE_URL", "https://backend.example/parkki");

        let config = Config::from_env().unwrap();
        assert_eq!(config.log_level, "info");

        env::set_var("LOG_LEVEL", "debug");
        let config = Config::from_env().unwrap();
        assert_eq!(config.log_level, "debug");

        env::remove_var("LOG_LEVEL");
        env::remove_var("PARKKI_API_BASE_URL");
    }
}
