//! Console configuration.
//!
//! With the `config` feature, a [`ConsoleConfig`] can be loaded from and
//! saved to a RON file.

#[cfg(feature = "config")]
use std::path::{Path, PathBuf};
#[cfg(feature = "config")]
use std::{fmt, fs, io};

/// Default config file name.
pub const DEFAULT_CONFIG_FILE: &str = "console.ron";

/// Tunables for statement splitting and nested evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ConsoleConfig {
    /// Character separating statements on one line.
    pub delimiter: char,
    /// Maximum nesting of parenthesized expressions.
    pub max_depth: usize,
    /// Maximum length in bytes of one parenthesized expression.
    pub max_nested_len: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            delimiter: ';',
            max_depth: 32,
            max_nested_len: 255,
        }
    }
}

#[cfg(feature = "config")]
impl ConsoleConfig {
    /// Load config from a RON file.
    ///
    /// Fields missing from the file keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        ron::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save config to a RON file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let write_err = |source: io::Error| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new())
            .map_err(ConfigError::Render)?;
        fs::write(path, text).map_err(write_err)
    }

    /// Load config from file, falling back to defaults on any error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            tracing::debug!("Console: using default config ({})", err);
            Self::default()
        })
    }
}

/// Failure to load or save a [`ConsoleConfig`].
#[cfg(feature = "config")]
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Read { path: PathBuf, source: io::Error },
    /// The file or its directory could not be written.
    Write { path: PathBuf, source: io::Error },
    /// The file is not valid config RON.
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    /// The config could not be rendered as RON.
    Render(ron::Error),
}

#[cfg(feature = "config")]
impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "cannot read console config {}: {}", path.display(), source)
            }
            ConfigError::Write { path, source } => {
                write!(f, "cannot write console config {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "invalid console config {}: {}", path.display(), source)
            }
            ConfigError::Render(source) => write!(f, "cannot render console config: {}", source),
        }
    }
}

#[cfg(feature = "config")]
impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } | ConfigError::Write { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Render(source) => Some(source),
        }
    }
}
