//! The optional `vdmgen.toml` configuration file.
//!
//! Every option of `vdmgen generate` can be set under a `[generator]` table;
//! flags given on the command line take precedence.
//!
//! ```toml
//! [generator]
//! input-dir = "service-specs"
//! output-dir = "services"
//! use-swagger = true
//! aggregator-npm-package-name = "@acme/all-services"
//! ```

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::Deserialize;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "vdmgen.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub generator: GeneratorConfig,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GeneratorConfig {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub service_mapping: Option<PathBuf>,
    pub use_swagger: Option<bool>,
    pub force_overwrite: Option<bool>,
    pub generate_package_json: Option<bool>,
    pub changelog_file: Option<PathBuf>,
    pub aggregator_npm_package_name: Option<String>,
    pub aggregator_directory_name: Option<String>,
    pub version_in_package_json: Option<String>,
}

impl ConfigFile {
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).wrap_err_with(|| format!("Invalid config file {}", origin.display()))
    }

    pub fn open(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content, path)
    }

    /// Load `explicit` if given, else `vdmgen.toml` when present, else defaults.
    ///
    /// Relative paths in the file are resolved against the file's directory.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let mut config = Self::open(&path)?;
        if let Some(base) = path.parent() {
            config.generator.resolve_paths(base);
        }
        Ok(config)
    }
}

impl GeneratorConfig {
    fn resolve_paths(&mut self, base: &Path) {
        for path in [
            &mut self.input_dir,
            &mut self.output_dir,
            &mut self.service_mapping,
            &mut self.changelog_file,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
