use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::color_policy::ColorPolicy;
use crate::persistence::OutputLayout;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "TICONV_CONFIG";

pub const DEFAULT_INPUT: &str = "input.txt";
pub const DEFAULT_REJECTS: &str = "badeqn.txt";

#[derive(Debug, Default, Deserialize)]
pub struct TiconvConfig {
    pub app: Option<AppConfig>,
    pub input: Option<InputConfig>,
    pub output: Option<OutputConfig>,
    pub colors: Option<ColorsConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct InputConfig {
    pub path: Option<String>,
    pub rejects: Option<String>,
    /// Run every input line through the plaintext filter before parsing.
    #[serde(default)]
    pub plaintext: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    pub dir: Option<String>,
    pub prefix: Option<String>,
    pub extension: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ColorsConfig {
    /// Inclusive `[min, max]` range of numeric color codes accepted by the UI.
    pub numeric_range: Option<[u32; 2]>,
}

/// UI configuration options derived from config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
}

/// Values supplied on the command line; `Some` wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub input: Option<PathBuf>,
    pub rejects: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub plaintext: bool,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub input: PathBuf,
    pub rejects: PathBuf,
    pub plaintext: bool,
    pub output: OutputLayout,
    pub color_policy: ColorPolicy,
    pub ui: UiOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(None, SettingsOverrides::default())
    }
}

impl Settings {
    #[must_use]
    pub fn resolve(config: Option<&TiconvConfig>, overrides: SettingsOverrides) -> Self {
        let app = config.and_then(|c| c.app.as_ref());
        let input = config.and_then(|c| c.input.as_ref());
        let output = config.and_then(|c| c.output.as_ref());
        let colors = config.and_then(|c| c.colors.as_ref());

        let input_path = overrides
            .input
            .or_else(|| input.and_then(|i| i.path.as_deref()).map(expand_path))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
        let rejects = overrides
            .rejects
            .or_else(|| input.and_then(|i| i.rejects.as_deref()).map(expand_path))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REJECTS));

        let mut layout = OutputLayout::default();
        if let Some(output) = output {
            if let Some(dir) = output.dir.as_deref() {
                layout.dir = expand_path(dir);
            }
            if let Some(prefix) = &output.prefix {
                layout.prefix.clone_from(prefix);
            }
            if let Some(extension) = &output.extension {
                layout.extension = extension.trim_start_matches('.').to_owned();
            }
        }
        if let Some(dir) = overrides.out_dir {
            layout.dir = dir;
        }

        let color_policy = colors
            .and_then(|c| c.numeric_range)
            .map_or(ColorPolicy::Any, |[min, max]| {
                ColorPolicy::numeric_range(min, max)
            });

        Self {
            input: input_path,
            rejects,
            plaintext: overrides.plaintext || input.is_some_and(|i| i.plaintext),
            output: layout,
            color_policy,
            ui: UiOptions {
                ascii_only: app.is_some_and(|a| a.ascii_only),
                high_contrast: app.is_some_and(|a| a.high_contrast),
            },
        }
    }
}

fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(expand_env_vars(raw))
}

/// Expand `${VAR}` references; unset variables expand to nothing.
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let var = &after[..end];
        if !var.is_empty() {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

impl TiconvConfig {
    /// Load the config from its default location. A missing file is `Ok(None)`.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    /// Load a specific config file; the file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }
}

/// Per-user state directory (`~/.ticonv`).
#[must_use]
pub fn ticonv_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".ticonv"))
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(explicit) = env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(explicit));
    }
    ticonv_dir().map(|dir| dir.join("config.toml"))
}
