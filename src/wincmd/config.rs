//! Configuration loading.
//!
//! `defaults/wincmd.default.toml` is embedded into the crate so that the
//! documented defaults and runtime behavior stay in sync. Callers layer user
//! files and single-key overrides on top through [`Loader`] before
//! deserializing into [`WincmdConfig`].

use crate::wincmd::error::ConfigError;
use crate::wincmd::processor::OutputFormat;
use crate::wincmd::stemming::Architecture;
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/wincmd.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WincmdConfig {
    pub normalizer: NormalizerConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NormalizerConfig {
    /// Kept as text so an unknown literal is reported as
    /// [`ConfigError::InvalidArchitecture`] rather than a generic load error.
    pub architecture: String,
    pub max_depth: usize,
}

impl NormalizerConfig {
    pub fn architecture(&self) -> Result<Architecture, ConfigError> {
        self.architecture.parse()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// Stacks configuration sources; later sources win over earlier ones.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Only the embedded `wincmd.default.toml` so far.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Add a TOML file that must exist when [`Loader::build`] runs.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Add a TOML file that is skipped when absent, e.g. a per-user file.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Pin one dotted key, e.g. `normalizer.architecture` from `--arch`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value).map_err(load_error)?;
        Ok(self)
    }

    /// Merge every source and deserialize the result.
    pub fn build(self) -> Result<WincmdConfig, ConfigError> {
        self.builder
            .build()
            .map_err(load_error)?
            .try_deserialize()
            .map_err(load_error)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

fn load_error(err: ::config::ConfigError) -> ConfigError {
    ConfigError::Load(err.to_string())
}

/// The embedded defaults with nothing layered on top.
pub fn load_defaults() -> Result<WincmdConfig, ConfigError> {
    Loader::new().build()
}
