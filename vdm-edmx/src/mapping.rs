use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ServiceMappingError {
    #[error("failed to read service mapping '{path}'")]
    #[diagnostic(code(vdmgen::mapping::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse service mapping '{path}'")]
    #[diagnostic(
        code(vdmgen::mapping::parse),
        help(
            "expected an object keyed by metadata file name whose values carry directoryName, servicePath and npmPackageName"
        )
    )]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Naming overrides for one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMapping {
    pub directory_name: String,
    pub service_path: String,
    pub npm_package_name: String,
}

/// Service mappings keyed by the metadata file name without extension
/// (e.g. `API_TEST_SRV`). Serializes as the `service-mapping.json` format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceMappings(IndexMap<String, ServiceMapping>);

impl ServiceMappings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a mapping file.
    pub fn open(path: &Path) -> Result<Self, ServiceMappingError> {
        let content = std::fs::read_to_string(path).map_err(|source| ServiceMappingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse mapping JSON, using `origin` for error messages.
    pub fn parse(content: &str, origin: &Path) -> Result<Self, ServiceMappingError> {
        serde_json::from_str(content).map_err(|source| ServiceMappingError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn get(&self, original_file_name: &str) -> Option<&ServiceMapping> {
        self.0.get(original_file_name)
    }

    /// Mapping for a service: by metadata file name, then by namespace.
    pub fn lookup(&self, original_file_name: &str, namespace: &str) -> Option<&ServiceMapping> {
        self.get(original_file_name).or_else(|| self.get(namespace))
    }

    pub fn insert(&mut self, original_file_name: impl Into<String>, mapping: ServiceMapping) {
        self.0.insert(original_file_name.into(), mapping);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ServiceMapping)> {
        self.0.iter()
    }

    /// Pretty JSON, two-space indented, with a trailing newline.
    pub fn to_json(&self) -> String {
        let mut json = serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| "{}".to_string());
        json.push('\n');
        json
    }
}
