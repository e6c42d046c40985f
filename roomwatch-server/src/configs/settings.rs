use std::env;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Directory holding one JSON snapshot per collection
    pub directory: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sweeper {
    /// Seconds a device may stay silent before it is evicted
    pub staleness_threshold: u64,
    /// Seconds between two sweeps
    pub poll_interval: u64,
}

impl Sweeper {
    pub fn staleness_threshold(&self) -> Duration {
        Duration::from_secs(self.staleness_threshold)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }
}

impl Default for Sweeper {
    fn default() -> Self {
        Self {
            staleness_threshold: 120,
            poll_interval: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    pub snapshot: Snapshot,
    #[serde(default)]
    pub sweeper: Sweeper,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        let settings: Settings = Config::builder()
            .add_source(File::with_name("configs/default"))
            .add_source(File::with_name(&format!("configs/{run_mode}")).required(false))
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()?;

        if settings.sweeper.poll_interval == 0 {
            return Err(ConfigError::Message(
                "sweeper.poll_interval must be greater than 0".into(),
            ));
        }

        Ok(settings)
    }
}
