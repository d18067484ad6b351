use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub share: ShareConfig,
    #[serde(default)]
    pub access: AccessConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Backend base URL, e.g. "https://host/api"
    pub base_url: String,
    /// Prefix of the data resources under `base_url`; auth lives at `/auth`
    #[serde(default = "default_data_path")]
    pub data_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShareConfig {
    #[serde(default = "default_share_target")]
    pub target_url: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            target_url: default_share_target(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AccessConfig {
    /// Users allowed to edit or delete billing rows
    #[serde(default)]
    pub billing_editors: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Where the signed-in user is remembered between commands
    #[serde(default = "default_session_file")]
    pub file: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: default_session_file(),
        }
    }
}

fn default_data_path() -> String {
    "/data".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_output_dir() -> String {
    "target/reports".to_string()
}

fn default_share_target() -> String {
    "https://wa.me/".to_string()
}

fn default_session_file() -> String {
    "target/session.json".to_string()
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "https://return-processor-backend.onrender.com/api"
data_path = "/data"
timeout_secs = 30

[export]
output_dir = "target/reports"

[share]
target_url = "https://wa.me/"

[access]
billing_editors = ["shubham", "akash"]

[session]
file = "target/session.json"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Explicit path (from `--config`)
/// 2. Next to the executable (for production)
/// 3. Falls back to embedded default config
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        tracing::info!("Loading config from: {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        return parse_config(&contents);
    }

    // Try to find config.toml next to the executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    // Fall back to default config
    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if config.api.base_url.trim().is_empty() {
        anyhow::bail!("api.base_url must not be empty");
    }
    Ok(config)
}

/// Get the report output directory from configuration
/// Resolves relative paths relative to the current directory
pub fn get_output_dir(config: &Config) -> PathBuf {
    resolve(&config.export.output_dir)
}

pub fn get_session_file(config: &Config) -> PathBuf {
    resolve(&config.session.file)
}

fn resolve(path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.share.target_url, "https://wa.me/");
        assert_eq!(config.access.billing_editors, vec!["shubham", "akash"]);
    }

    #[test]
    fn test_optional_sections_default() {
        let config = parse_config("[api]\nbase_url = \"http://localhost:3001/api\"\n").unwrap();
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.api.data_path, "/data");
        assert_eq!(config.export.output_dir, "target/reports");
        assert_eq!(config.share.target_url, "https://wa.me/");
        assert_eq!(config.session.file, "target/session.json");
        assert!(get_session_file(&config).ends_with("target/session.json"));
    }

    #[test]
    fn test_empty_base_url_rejected() {
        assert!(parse_config("[api]\nbase_url = \" \"\n").is_err());
    }
}
