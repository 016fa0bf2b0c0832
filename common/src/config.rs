use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// SlideSynth client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Base URL of the slide generation backend
    pub api_url: String,
    /// Directory downloaded presentations are saved into
    pub download_dir: PathBuf,
    pub log_path: Option<PathBuf>,
    pub check_health_on_start: bool,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            download_dir: PathBuf::from("."),
            log_path: None,
            check_health_on_start: true,
        }
    }
}

impl SynthConfig {
    /// Get config file path
    pub fn config_path() -> Result<PathBuf> {
        Self::config_path_in(dirs::config_dir())
            .ok_or_else(|| anyhow::anyhow!("Cannot find config directory"))
    }

    fn config_path_in(config_dir: Option<PathBuf>) -> Option<PathBuf> {
        config_dir.map(|dir| dir.join("slidesynth").join("config.json"))
    }

    /// Load configuration from the default location
    pub async fn load() -> Result<Self> {
        Self::load_in(dirs::config_dir()).await
    }

    /// Defaults when the platform has no config directory (e.g. `HOME` unset)
    async fn load_in(config_dir: Option<PathBuf>) -> Result<Self> {
        match Self::config_path_in(config_dir) {
            Some(path) => Self::load_from(&path).await,
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`, falling back to defaults when it does not exist
    pub async fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = tokio::fs::read_to_string(path).await?;
            let config: SynthConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    pub fn apply_env(self) -> Self {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply `SLIDESYNTH_*` overrides read through `lookup`.
    pub fn apply_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SLIDESYNTH_API_URL").filter(|v| !v.is_empty()) {
            self.api_url = url;
        }
        if let Some(dir) = lookup("SLIDESYNTH_DOWNLOAD_DIR").filter(|v| !v.is_empty()) {
            self.download_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup("SLIDESYNTH_LOG_PATH").filter(|v| !v.is_empty()) {
            self.log_path = Some(PathBuf::from(path));
        }
        self
    }

    pub fn log_path_or_default(&self) -> PathBuf {
        self.log_path
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("slidesynth.log"))
    }
}
