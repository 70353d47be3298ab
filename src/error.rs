//! Error types for loading diagram catalogs and running conversions

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading the diagram catalog
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The document is empty, has no `diagrams` key, or the mapping is empty
    #[error("no diagram definitions found in config")]
    NoDiagrams,

    #[error("no diagram named '{name}' (available: {})", available.join(", "))]
    UnknownDiagram { name: String, available: Vec<String> },
}

/// Errors that abort a conversion
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The renderer process could not be started at all
    #[error("failed to run renderer '{}': {source}", program.display())]
    RendererInvocation { program: PathBuf, source: io::Error },

    #[error("{context}: {source}")]
    Io { context: String, source: io::Error },
}

impl ConvertError {
    /// Wrap an I/O error with a short description of what was being done
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a renderer invocation error
    pub fn invocation(program: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::RendererInvocation {
            program: program.into(),
            source,
        }
    }
}
