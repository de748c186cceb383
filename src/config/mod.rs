pub mod model;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub use model::{AppConfig, FormConfig, LoggingConfig};

const CONFIG_ENV: &str = "PUZZLE_UPLOAD_CONFIG";

fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("puzzle-upload")
        .join("config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    load_config_from(&config_path())
}

fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    if config.forms.is_empty() {
        anyhow::bail!("Config {} declares no forms", path.display());
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("puzzle-upload-cfg-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let cfg = load_config_from(Path::new("/nonexistent/puzzle-upload/config.toml")).unwrap();
        assert_eq!(cfg.forms.len(), 2);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let path = temp_file("bad.toml", "[server\nbase_url = ");
        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_empty_forms_rejected() {
        let path = temp_file("empty.toml", "forms = []\n");
        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn test_loads_file() {
        let path = temp_file("ok.toml", "[server]\nyear = 2022\n");
        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.server.year, 2022);
    }
}
