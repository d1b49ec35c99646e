//! Server settings read from the environment.

use anyhow::Context;
use hexword_core::{Dictionary, GameConfig, SeedWords};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Word list, one word per line
    pub dictionary_path: Option<PathBuf>,
    /// JSON file holding a `GameConfig`
    pub game_config_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Read `SERVER_ADDR`, `DICTIONARY_PATH` and `GAME_CONFIG`
    pub fn from_env() -> anyhow::Result<Self> {
        let addr = std::env::var("SERVER_ADDR")
            .unwrap_or_else(|_| DEFAULT_ADDR.into())
            .parse()
            .context("SERVER_ADDR is not a socket address")?;

        Ok(Self {
            addr,
            dictionary_path: std::env::var_os("DICTIONARY_PATH").map(PathBuf::from),
            game_config_path: std::env::var_os("GAME_CONFIG").map(PathBuf::from),
        })
    }

    pub fn load_dictionary(&self, seeds: &SeedWords) -> anyhow::Result<Dictionary> {
        match &self.dictionary_path {
            Some(path) => load_dictionary(path),
            None => {
                warn!("DICTIONARY_PATH not set, only the seed words will count as words");
                Ok(Dictionary::from_words(seeds.words())?)
            }
        }
    }

    pub fn load_game_config(&self) -> anyhow::Result<GameConfig> {
        match &self.game_config_path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading game config {}", path.display()))?;
                let config = GameConfig::from_json(&text)
                    .with_context(|| format!("parsing game config {}", path.display()))?;
                info!(path = %path.display(), "Loaded game config");
                Ok(config)
            }
            None => Ok(GameConfig::default()),
        }
    }
}

fn load_dictionary(path: &Path) -> anyhow::Result<Dictionary> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading dictionary {}", path.display()))?;
    let dictionary =
        Dictionary::parse(&text).with_context(|| format!("parsing dictionary {}", path.display()))?;
    info!(path = %path.display(), words = dictionary.len(), "Loaded dictionary");
    Ok(dictionary)
}
