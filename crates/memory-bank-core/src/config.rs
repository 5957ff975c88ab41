use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Optional `.memory_bank/config.yaml`. Every field has a default, so an
/// absent or partial file is always valid input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Archive subdirectory, relative to the store directory.
    #[serde(default = "default_archive_dir")]
    pub archive_dir: String,
    #[serde(default = "default_archive_file")]
    pub archive_file: String,
    /// Written at the top level of the store when `archive_dir` can't be created.
    #[serde(default = "default_fallback_archive_file")]
    pub fallback_archive_file: String,
    #[serde(default = "default_task_placeholder")]
    pub task_placeholder: String,
    #[serde(default = "default_build_phase")]
    pub default_build_phase: String,
}

fn default_version() -> u32 {
    1
}

fn default_archive_dir() -> String {
    "docs/archive".to_string()
}

fn default_archive_file() -> String {
    "project-archive.md".to_string()
}

fn default_fallback_archive_file() -> String {
    "project-archive.md".to_string()
}

fn default_task_placeholder() -> String {
    "Task description pending".to_string()
}

fn default_build_phase() -> String {
    "Main Implementation".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            archive_dir: default_archive_dir(),
            archive_file: default_archive_file(),
            fallback_archive_file: default_fallback_archive_file(),
            task_placeholder: default_task_placeholder(),
            default_build_phase: default_build_phase(),
        }
    }
}

impl Config {
    /// Load the config for `root`, falling back to defaults when no file exists.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Archive path as shown to the user, relative to the store directory.
    pub fn archive_display_path(&self) -> String {
        let dir = self.archive_dir.trim_end_matches('/');
        if dir.is_empty() {
            self.archive_file.clone()
        } else {
            format!("{dir}/{}", self.archive_file)
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Messages of the error-level warnings, joined; `None` when usable.
    pub fn blocking_errors(&self) -> Option<String> {
        let errors: Vec<String> = self
            .validate()
            .into_iter()
            .filter(|w| w.level == WarnLevel::Error)
            .map(|w| w.message)
            .collect();
        if errors.is_empty() {
            None
        } else {
            Some(errors.join("; "))
        }
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        for (field, value) in [
            ("archive_file", &self.archive_file),
            ("fallback_archive_file", &self.fallback_archive_file),
        ] {
            if !paths::is_plain_filename(value) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("{field} '{value}' must be a plain file name"),
                });
            } else if !value.ends_with(".md") {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("{field} '{value}' is not a markdown file"),
                });
            }
        }

        if Path::new(&self.archive_dir).is_absolute() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "archive_dir '{}' must be relative to the memory bank directory",
                    self.archive_dir
                ),
            });
        }
        if self.archive_dir.split(['/', '\\']).any(|c| c == "..") {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "archive_dir '{}' must not leave the memory bank directory",
                    self.archive_dir
                ),
            });
        }

        if self.task_placeholder.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "task_placeholder is empty".to_string(),
            });
        }
        if self.default_build_phase.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "default_build_phase is empty".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
