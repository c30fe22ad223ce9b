use std::{fs, path::Path, path::PathBuf, time::Duration};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "console.toml";
pub const DEFAULT_METRICS_LIMIT: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    pub credentials_path: PathBuf,
    pub page_size: Option<u32>,
    pub metrics_limit: u32,
    pub request_timeout_secs: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5000/api".into(),
            credentials_path: PathBuf::from("./.admin-console/credentials.json"),
            page_size: None,
            metrics_limit: DEFAULT_METRICS_LIMIT,
            request_timeout_secs: 30,
        }
    }
}

impl ConsoleConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_base_url: Option<String>,
    credentials_path: Option<PathBuf>,
    page_size: Option<u32>,
    metrics_limit: Option<u32>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then the optional TOML file, then environment overrides.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<ConsoleConfig> {
    let mut config = ConsoleConfig::default();

    let explicit = path.is_some();
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(path) {
        Ok(raw) => apply_file(&mut config, &raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?,
        Err(err) if !explicit && err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    }

    apply_env(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

fn apply_file(config: &mut ConsoleConfig, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileConfig = toml::from_str(raw)?;
    if let Some(v) = file_cfg.api_base_url {
        config.api_base_url = v;
    }
    if let Some(v) = file_cfg.credentials_path {
        config.credentials_path = v;
    }
    if let Some(v) = file_cfg.page_size {
        config.page_size = Some(v);
    }
    if let Some(v) = file_cfg.metrics_limit {
        config.metrics_limit = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        config.request_timeout_secs = v;
    }
    Ok(())
}

fn apply_env(config: &mut ConsoleConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("ADMIN_API_URL") {
        config.api_base_url = v;
    }
    if let Some(v) = lookup("APP__API_BASE_URL") {
        config.api_base_url = v;
    }

    if let Some(v) = lookup("APP__CREDENTIALS_PATH") {
        config.credentials_path = PathBuf::from(v);
    }

    if let Some(v) = lookup("APP__PAGE_SIZE") {
        if let Ok(parsed) = v.parse::<u32>() {
            config.page_size = Some(parsed).filter(|size| *size > 0);
        }
    }

    if let Some(v) = lookup("APP__METRICS_LIMIT") {
        if let Ok(parsed) = v.parse::<u32>() {
            config.metrics_limit = parsed;
        }
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            config.request_timeout_secs = parsed;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
