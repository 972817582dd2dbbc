use super::error::ConfigError;
use crate::collection::params::CollectionParams;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;

/// (De)Serializable application configuration. Persists the collection
/// parameters between sessions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub path: PathBuf,

    pub collection: CollectionParams,
}

impl Config {
    pub fn new() -> Self {
        Config {
            path: PathBuf::from("red_commander.yml"),
            collection: CollectionParams::default(),
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let mut file = File::create(&self.path)?;
        let yaml_str = serde_yaml::to_string::<Config>(self)?;
        file.write_all(yaml_str.as_bytes())?;
        Ok(())
    }

    pub fn load(&mut self, path: PathBuf) -> Result<(), ConfigError> {
        let mut file = File::open(&path)?;
        let mut yaml_str = String::new();
        file.read_to_string(&mut yaml_str)?;
        *self = serde_yaml::from_str::<Config>(&yaml_str)?;
        self.path = path;
        Ok(())
    }
}
