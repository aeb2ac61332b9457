pub const TOKEN_VAR: &str = "TELOXIDE_TOKEN";
pub const DB_PATH_VAR: &str = "QUIZ_DB_PATH";
const DEFAULT_DB_PATH: &str = "db.sqlite";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{0} is set but empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bot_token: String,
    pub database_path: String,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// `.env` should already be loaded by then.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = lookup(TOKEN_VAR).ok_or(ConfigError::Missing(TOKEN_VAR))?;
        if bot_token.trim().is_empty() {
            return Err(ConfigError::Empty(TOKEN_VAR));
        }

        let database_path = lookup(DB_PATH_VAR)
            .filter(|path| !path.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

        Ok(Self {
            bot_token,
            database_path,
        })
    }
}
