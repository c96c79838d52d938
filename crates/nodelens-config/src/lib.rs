pub mod general;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use general::{CacheConfig, GeneralConfig, LoggingConfig};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

pub const DEFAULT_CONFIG: &str = include_str!("defaults.toml");

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded defaults must parse")
    }
}

impl AppConfig {
    /// Defaults merged with the user config file, when one exists.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(path) = Self::user_config_path() {
            if path.exists() {
                match std::fs::read_to_string(&path) {
                    Ok(contents) => match toml::from_str::<AppConfig>(&contents) {
                        Ok(user) => config.merge(user),
                        Err(e) => eprintln!("Warning: invalid config at {}: {e}", path.display()),
                    },
                    Err(e) => eprintln!("Warning: could not read {}: {e}", path.display()),
                }
            }
        }

        config
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let mut config = Self::default();
        let contents = std::fs::read_to_string(path)?;
        let user: AppConfig = toml::from_str(&contents)?;
        config.merge(user);
        Ok(config)
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("nodelens").join("config.toml")
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("nodelens").join("config.toml"))
    }

    fn merge(&mut self, user: AppConfig) {
        self.general = user.general;
        self.cache = user.cache;
        self.logging = user.logging;
    }

    /// Environment overrides, applied after file merge and before CLI
    /// flags. Invalid values are ignored.
    pub fn apply_env(&mut self) {
        let vars: Vec<(String, String)> = std::env::vars().collect();
        self.apply_env_pairs(vars.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    fn apply_env_pairs<'a>(&mut self, vars: impl Iterator<Item = (&'a str, &'a str)>) {
        for (key, value) in vars {
            match key {
                "NODELENS_CACHE_TTL" => {
                    if let Ok(secs) = value.parse() {
                        self.cache.ttl_secs = secs;
                    }
                }
                "NODELENS_CACHE_ENABLED" => {
                    self.cache.enabled = value != "0" && !value.eq_ignore_ascii_case("false");
                }
                "NODELENS_CACHE_DIR" => {
                    self.cache.dir = Some(value.to_string());
                }
                "NODELENS_LOG_LEVEL" => {
                    self.logging.level = value.to_string();
                }
                _ => {}
            }
        }
    }
}

pub type Config = AppConfig;
