use std::sync::OnceLock;

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default)]
    pub log_json: bool,
}

fn default_database_url() -> String {
    "notes.db".into()
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Self>()?;

        Ok(config)
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

pub fn config() -> crate::Result<&'static Config> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    let config = Config::from_env()?;
    Ok(CONFIG.get_or_init(|| config))
}

#[cfg(test)]
pub fn config_override<F>(override_config: F) -> crate::Result<&'static Config>
where
    F: FnOnce(Config) -> Config,
{
    let config = override_config(Config::from_env()?);
    Ok(CONFIG.get_or_init(|| config))
}
