use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings{
    pub application: ApplicationSettings,
    pub database: DatabaseSettings
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApplicationSettings{
    pub host: String,
    pub port: u16
}

#[derive(Deserialize, Debug, Clone)]
pub struct DatabaseSettings{
    pub path: String,
    pub max_connections: u32,
    pub busy_timeout_ms: u64
}

impl DatabaseSettings {
    pub fn busy_timeout(&self) -> Duration{
        Duration::from_millis(self.busy_timeout_ms)
    }
}

impl Settings{
    // configuration/base.yaml, overridden by e.g. APP_APPLICATION__PORT=8080
    pub fn get() -> Result<Self, ConfigError>{
        Config::builder()
            .add_source(File::with_name("configuration/base.yaml"))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
            )
            .build()?
            .try_deserialize::<Settings>()
    }
}
