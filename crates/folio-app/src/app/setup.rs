use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use folio_api::{ChatConfig, ChatMode};

use crate::cli::Cli;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "folio.toml";

/// Application configuration derived from CLI arguments, environment and config file
#[derive(Debug)]
pub struct AppConfig {
    pub chat: ChatConfig,
    /// Config file that was read, if any
    pub config_file: Option<PathBuf>,
    /// Transcript directory; `None` when transcripts are disabled
    pub transcript_dir: Option<PathBuf>,
}

/// Set up application configuration from CLI arguments
pub fn setup_from_cli(cli: &Cli) -> Result<AppConfig> {
    setup_with_env(cli, |key| env::var(key).ok())
}

/// Same as [`setup_from_cli`], reading `FOLIO_*` variables through `lookup`
pub fn setup_with_env<F>(cli: &Cli, lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    // Precedence: CLI flags > FOLIO_* env > config file > defaults
    let config_file = match &cli.config {
        Some(path) => Some(path.clone()),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            path.is_file().then_some(path)
        }
    };

    let mut chat = match &config_file {
        Some(path) => load_config_file(path)?,
        None => ChatConfig::default(),
    };
    chat.apply_overrides(lookup);
    apply_cli_overrides(&mut chat, cli);

    if chat.mode == ChatMode::Remote {
        let endpoint = chat
            .endpoint_url()
            .context("Remote mode needs a valid chat endpoint")?;
        log::info!("Forwarding questions to {}", endpoint);
    } else {
        log::info!("Answering from knowledge base at {}", chat.knowledge_url);
    }

    Ok(AppConfig {
        chat,
        config_file,
        transcript_dir: (!cli.no_transcript).then(|| cli.log_dir.clone()),
    })
}

/// Read a [`ChatConfig`] from a TOML file; missing keys keep their defaults
pub fn load_config_file(path: &Path) -> Result<ChatConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: ChatConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

fn apply_cli_overrides(chat: &mut ChatConfig, cli: &Cli) {
    if let Some(mode) = cli.mode {
        chat.mode = mode;
    }
    if let Some(base_url) = &cli.base_url {
        chat.base_url = base_url.clone();
    }
    if let Some(endpoint) = &cli.endpoint {
        chat.endpoint = endpoint.clone();
    }
    if let Some(knowledge) = &cli.knowledge {
        chat.knowledge_url = knowledge.clone();
    }
    if let Some(delay) = cli.thinking_delay_ms {
        chat.thinking_delay_ms = delay;
    }
}
