use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use anyhow::anyhow;
use dirs::home_dir;
use estate_backend_client::DEFAULT_API_BASE;
use estate_backend_client::DEFAULT_TIMEOUT;
use estate_catalog::SessionConfig;
use serde::Deserialize;

pub const ESTATE_HOME_ENV: &str = "ESTATE_HOME";
pub const API_BASE_ENV: &str = "ESTATE_API_BASE";
const CONFIG_FILE: &str = "config.toml";

/// Settings read from `config.toml`.
///
/// ```toml
/// api_base = "http://catalog.internal:8080/api/v1/real-estate"
/// timeout_secs = 30
///
/// [session]
/// page_size = 10
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub api_base: Option<String>,
    pub timeout_secs: Option<u64>,
    pub session: SessionConfig,
}

impl CliConfig {
    /// Loads `explicit`, or `config.toml` under the estate home when no path
    /// was given. Only the implicit file may be absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => (estate_home()?.join(CONFIG_FILE), false),
        };
        let mut config = if path.exists() || required {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Self::parse(&raw).with_context(|| format!("invalid config {}", path.display()))?
        } else {
            Self::default()
        };
        if let Ok(api_base) = std::env::var(API_BASE_ENV)
            && !api_base.is_empty()
        {
            config.api_base = Some(api_base);
        }
        Ok(config)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.session.validate()?;
        Ok(config)
    }

    /// The service base, with a command-line value taking precedence.
    pub fn api_base<'a>(&'a self, flag: Option<&'a str>) -> &'a str {
        flag.or(self.api_base.as_deref()).unwrap_or(DEFAULT_API_BASE)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_secs.map_or(DEFAULT_TIMEOUT, Duration::from_secs)
    }
}

/// `$ESTATE_HOME`, falling back to `~/.estate`.
pub fn estate_home() -> Result<PathBuf> {
    if let Ok(env_home) = std::env::var(ESTATE_HOME_ENV)
        && !env_home.is_empty()
    {
        return Ok(PathBuf::from(env_home));
    }

    let mut home = home_dir().ok_or_else(|| anyhow!("Could not locate home directory"))?;
    home.push(".estate");
    Ok(home)
}
