//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level notexam configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotexamConfig {
    /// Output directory for session reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Shuffle question order at session start.
    #[serde(default)]
    pub shuffle_questions: bool,
    /// Shuffle the options within each question.
    #[serde(default)]
    pub shuffle_options: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./notexam-results")
}

impl Default for NotexamConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            shuffle_questions: false,
            shuffle_options: false,
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `notexam.toml` in the current directory
/// 2. `~/.config/notexam/config.toml`
pub fn load_config_from(path: Option<&Path>) -> Result<NotexamConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("notexam.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<NotexamConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => NotexamConfig::default(),
    };

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("notexam"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = NotexamConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("./notexam-results"));
        assert!(!config.shuffle_questions);
        assert!(!config.shuffle_options);
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
shuffle_questions = true
"#;
        let config: NotexamConfig = toml::from_str(toml_str).unwrap();
        assert!(config.shuffle_questions);
        assert!(!config.shuffle_options);
        assert_eq!(config.output_dir, PathBuf::from("./notexam-results"));
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let result = load_config_from(Some(Path::new("definitely-missing.toml")));
        assert!(result.is_err());
    }
}
