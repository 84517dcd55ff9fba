use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::ensure_spendlens_home;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub assistant: AssistantSection,
    pub chat: ChatSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantSection {
    /// Any OpenAI-compatible chat-completions server. The default targets a
    /// local LM Studio instance.
    pub base_url: String,
    pub model: String,
    pub temperature: f32,

    /// Bearer token for hosted endpoints; local servers need none.
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSection {
    pub max_turns_context: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assistant: AssistantSection {
                base_url: "http://localhost:1234".to_string(),
                model: "mistral-7b-instruct-v0.1".to_string(),
                temperature: 0.7,
                api_key: None,
            },
            chat: ChatSection {
                max_turns_context: 12,
            },
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_spendlens_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let cfg = Config::default();
    save_config(&cfg)?;
    println!("Wrote {}", p.display());
    Ok(())
}
