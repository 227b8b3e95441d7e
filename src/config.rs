use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Verses, words and authored questions
    pub database_path: PathBuf,
    /// Telegram dialogue state
    pub dialogue_db_path: PathBuf,
    pub bind_address: String,
    /// Seed files, see `seed::SeedPaths::in_dir`
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("al-asas.sqlite"),
            dialogue_db_path: PathBuf::from("db.sqlite"),
            bind_address: "0.0.0.0:8080".to_string(),
            data_dir: PathBuf::from("data"),
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the environment
    pub fn from_env() -> Self {
        if let Err(e) = dotenv::dotenv() {
            log::debug!("No .env file loaded: {}", e);
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let defaults = Self::default();
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            database_path: value("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            dialogue_db_path: value("DIALOGUE_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.dialogue_db_path),
            bind_address: value("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            data_dir: value("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
        }
    }
}
