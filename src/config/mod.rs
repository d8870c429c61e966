mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::scoring::{ScoringConfig, ScoringEngine};

/// Get the config directory path (~/.config/lead-scorer/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("lead-scorer"))
}

/// Get the default config file path (~/.config/lead-scorer/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Ensure the parent directory of `path` exists
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory at {}", dir.display()))?;
        }
    }
    Ok(())
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/lead-scorer/config.yaml) and falls back to built-in defaults
///   when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p
        }
        None => {
            let default_path = get_config_path()?;
            if !default_path.exists() {
                debug!(path = %default_path.display(), "no config file, using built-in scoring tables");
                return Ok(Config::default());
            }
            default_path
        }
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    parse_config(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))
}

/// Parse a config document
pub fn parse_config(content: &str) -> Result<Config> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_saphyr::from_str(content)?;
    Ok(config)
}

/// Load config and build a validated engine from it.
///
/// Validation failures come back as `ScoringError::Configuration` inside the
/// `anyhow::Error`, so callers can downcast to report every message.
pub fn load_engine(path: Option<PathBuf>) -> Result<ScoringEngine> {
    let config = load_config(path)?;
    let engine = ScoringEngine::new(config.effective_scoring())?;
    Ok(engine)
}

/// Write a config file holding the default scoring tables.
///
/// Refuses to overwrite an existing file unless `force` is set. The write is
/// atomic: readers see either the old file or the complete new one.
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    ensure_parent_dir(path)?;

    let config = Config {
        scoring: Some(ScoringConfig::default()),
    };
    let yaml = serde_saphyr::to_string(&config).context("Failed to serialize default config")?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(b"# lead-scorer configuration\n")
        .and_then(|_| file.write_all(yaml.as_bytes()))
        .context("Failed to write config")?;
    file.commit().context("Failed to save config")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringError;

    #[test]
    fn test_parse_empty_document() {
        assert_eq!(parse_config("").unwrap(), Config::default());
        assert_eq!(parse_config("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_partial_scoring() {
        let config = parse_config(
            r#"
scoring:
  temperature:
    hot: 75
    warm: 45
"#,
        )
        .unwrap();
        let scoring = config.effective_scoring();
        assert_eq!(scoring.temperature.hot, 75);
        assert_eq!(scoring.decay, ScoringConfig::default().decay);
    }

    #[test]
    fn test_parse_rejects_unknown_top_level_key() {
        assert!(parse_config("queries: []").is_err());
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        let err = load_config(Some(missing)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_write_then_load_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        write_default_config(&path, false).unwrap();
        let loaded = load_config(Some(path.clone())).unwrap();
        assert_eq!(loaded.effective_scoring(), ScoringConfig::default());

        // Second write without force is refused
        assert!(write_default_config(&path, false).is_err());
        assert!(write_default_config(&path, true).is_ok());
    }

    #[test]
    fn test_load_engine_reports_validation_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            r#"
scoring:
  decay:
    daily_decay_rate: 1.5
  temperature:
    hot: 30
    warm: 40
"#,
        )
        .unwrap();

        let err = load_engine(Some(path)).unwrap_err();
        match err.downcast_ref::<ScoringError>() {
            Some(ScoringError::Configuration(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }
}
