//! Initialize the configuration directory: create ~/.kitchensink, a default config,
//! the log directory and the static asset directory.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::{self, Config};

/// Create the config directory and default files if they do not exist.
/// - Creates the config directory (parent of config file path).
/// - Writes `config.json` with the default settings if missing.
/// - Creates the log file's directory and the static asset directory (`buttons/`, `rich/`).
pub fn init_config_dir(config_path: &Path) -> Result<PathBuf> {
    let config_dir = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(config_dir)
        .with_context(|| format!("creating config directory {}", config_dir.display()))?;

    if !config_path.exists() {
        let default_config = serde_json::to_string_pretty(&Config::default())
            .context("serializing default config")?;
        std::fs::write(config_path, default_config)
            .with_context(|| format!("writing default config to {}", config_path.display()))?;
        log::info!("created default config at {}", config_path.display());
    }

    let (config, _) = config::load_config(Some(config_path.to_path_buf()))?;

    if let Some(ref log_path) = config.settings.logger.path {
        let log_file = config::resolve_relative(config_path, log_path);
        if let Some(log_dir) = log_file.parent() {
            std::fs::create_dir_all(log_dir)
                .with_context(|| format!("creating log directory {}", log_dir.display()))?;
            log::info!("log directory ready at {}", log_dir.display());
        }
    }

    let static_dir = config::resolve_relative(config_path, &config.server.static_dir);
    for sub in ["buttons", "rich"] {
        let dir = static_dir.join(sub);
        if !dir.exists() {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("creating static directory {}", dir.display()))?;
            log::info!("created static directory at {}", dir.display());
        } else {
            log::debug!("static directory already exists at {}, skipping", dir.display());
        }
    }

    Ok(config_dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_layout_and_is_repeatable() {
        let dir = std::env::temp_dir().join(format!("kitchensink-init-{}", uuid::Uuid::new_v4()));
        let config_path = dir.join("config.json");

        let out = init_config_dir(&config_path).unwrap();
        assert_eq!(out, dir);
        assert!(config_path.exists());
        assert!(dir.join("logs").is_dir());
        assert!(dir.join("public/static/buttons").is_dir());
        assert!(dir.join("public/static/rich").is_dir());

        let (config, _) = config::load_config(Some(config_path.clone())).unwrap();
        assert_eq!(config, Config::default());

        std::fs::write(&config_path, r#"{"server":{"port":9999}}"#).unwrap();
        init_config_dir(&config_path).unwrap();
        let (config, _) = config::load_config(Some(config_path)).unwrap();
        assert_eq!(config.server.port, 9999);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
