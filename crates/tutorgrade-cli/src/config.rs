//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// How command output is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Top-level tutorgrade configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorgradeConfig {
    /// JSON file holding the submission log.
    #[serde(default = "default_submissions_path")]
    pub submissions_path: PathBuf,
    /// Student id used by `grade` when `--student` is omitted.
    #[serde(default = "default_student")]
    pub default_student: String,
    /// Reviewer id used by `review` when `--reviewer` is omitted.
    #[serde(default = "default_reviewer")]
    pub default_reviewer: String,
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_submissions_path() -> PathBuf {
    PathBuf::from("./tutorgrade-submissions.json")
}
fn default_student() -> String {
    "anonymous".to_string()
}
fn default_reviewer() -> String {
    "teacher".to_string()
}

impl Default for TutorgradeConfig {
    fn default() -> Self {
        Self {
            submissions_path: default_submissions_path(),
            default_student: default_student(),
            default_reviewer: default_reviewer(),
            output_format: OutputFormat::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
/// Unset variables resolve to the empty string. Substituted values are not
/// expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `tutorgrade.toml` in the current directory
/// 2. `~/.config/tutorgrade/config.toml`
///
/// `TUTORGRADE_SUBMISSIONS` overrides `submissions_path`.
pub fn load_config_from(path: Option<&Path>) -> Result<TutorgradeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("tutorgrade.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TutorgradeConfig::default(),
    };

    if let Ok(path) = std::env::var("TUTORGRADE_SUBMISSIONS") {
        config.submissions_path = PathBuf::from(path);
    }

    Ok(config)
}

fn parse_config(content: &str) -> Result<TutorgradeConfig> {
    let mut config: TutorgradeConfig = toml::from_str(content)?;
    config.submissions_path =
        PathBuf::from(resolve_env_vars(&config.submissions_path.to_string_lossy()));
    config.default_student = resolve_env_vars(&config.default_student);
    config.default_reviewer = resolve_env_vars(&config.default_reviewer);
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("tutorgrade"))
}
