//! Scoring config parser.
//!
//! Loads scoring configs from TOML or JSON files and directories, and
//! validates them. Both snake_case keys and the host's camelCase keys are
//! accepted.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::{ConfigError, ConfigFormat};
use crate::model::{KeywordAlternative, KeywordGroup, ScoringConfig};

/// Intermediate structure for parsing config files.
#[derive(Debug, Deserialize)]
struct RawConfigFile {
    #[serde(default, alias = "keywordGroups")]
    keyword_groups: Option<Vec<RawKeywordGroup>>,
    #[serde(default, alias = "feedbackDefault")]
    feedback: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawKeywordGroup {
    #[serde(default)]
    points: Option<u32>,
    #[serde(default)]
    alternatives: Vec<KeywordAlternative>,
}

/// Parse a single config file. The format follows the file extension.
pub fn parse_config(path: &Path) -> Result<ScoringConfig, ConfigError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let format = ConfigFormat::from_extension(ext)?;

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&content, format)
}

/// Parse config content in the given format (useful for testing).
pub fn parse_config_str(content: &str, format: ConfigFormat) -> Result<ScoringConfig, ConfigError> {
    let raw: RawConfigFile = match format {
        ConfigFormat::Toml => toml::from_str(content).map_err(|e| ConfigError::Parse {
            format,
            message: e.message().to_string(),
        })?,
        ConfigFormat::Json => serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            format,
            message: e.to_string(),
        })?,
    };

    let groups = raw
        .keyword_groups
        .ok_or(ConfigError::MissingGroups)?
        .into_iter()
        .enumerate()
        .map(|(index, g)| {
            let points = g.points.ok_or(ConfigError::MissingPoints { group: index })?;
            Ok(KeywordGroup {
                alternatives: g.alternatives,
                points,
            })
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;

    Ok(ScoringConfig {
        groups,
        feedback: raw.feedback,
    })
}

/// Recursively load every `.toml` and `.json` config in a directory.
///
/// Files that fail to parse are skipped with a warning. Returned configs are
/// paired with their path and sorted by path.
pub fn load_config_directory(dir: &Path) -> Result<Vec<(std::path::PathBuf, ScoringConfig)>> {
    let mut configs = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            configs.extend(load_config_directory(&path)?);
        } else if path
            .extension()
            .is_some_and(|ext| ext == "toml" || ext == "json")
        {
            match parse_config(&path) {
                Ok(config) => configs.push((path, config)),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    configs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(configs)
}

/// A warning from config validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The keyword group index (if applicable).
    pub group: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a scoring config for common authoring mistakes.
pub fn validate_config(config: &ScoringConfig) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if config.groups.is_empty() {
        warnings.push(ValidationWarning {
            group: None,
            message: "config has no keyword groups; every response scores 0".into(),
        });
    }

    for (index, group) in config.groups.iter().enumerate() {
        let mut warn = |message: String| {
            warnings.push(ValidationWarning {
                group: Some(index),
                message,
            })
        };

        if group.alternatives.is_empty() {
            warn("group has no alternatives and can never match".into());
        }

        if group.points == 0 {
            warn("group is worth 0 points".into());
        }

        let mut seen = std::collections::HashSet::new();
        for alt in &group.alternatives {
            if alt.phrase.trim().is_empty() {
                warn("alternative phrase is empty".into());
                continue;
            }
            if alt.phrase.trim() != alt.phrase {
                warn(format!(
                    "alternative '{}' has leading or trailing whitespace",
                    alt.phrase
                ));
            }
            let key = if alt.options.case_sensitive {
                alt.phrase.clone()
            } else {
                alt.phrase.to_lowercase()
            };
            if !seen.insert(key) {
                warn(format!("duplicate alternative: {}", alt.phrase));
            }
        }
    }

    warnings
}
