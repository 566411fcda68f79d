//! Optional OpenAPI (swagger) document shipped next to a metadata file.
//!
//! Only a few fields are read: the base path, the external documentation
//! link and the descriptions of definitions and their properties.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum SwaggerError {
    #[error("failed to read swagger document '{path}'")]
    #[diagnostic(code(vdmgen::swagger::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse swagger document '{path}'")]
    #[diagnostic(code(vdmgen::swagger::parse))]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwaggerDocument {
    #[serde(default)]
    pub base_path: Option<String>,
    #[serde(default)]
    pub external_docs: Option<ExternalDocs>,
    #[serde(default)]
    pub definitions: IndexMap<String, SwaggerDefinition>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExternalDocs {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SwaggerDefinition {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub properties: IndexMap<String, SwaggerProperty>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SwaggerProperty {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl SwaggerDocument {
    pub fn open(path: &Path) -> Result<Self, SwaggerError> {
        let content = std::fs::read_to_string(path).map_err(|source| SwaggerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SwaggerError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn documentation_url(&self) -> Option<&str> {
        self.external_docs.as_ref()?.url.as_deref()
    }

    /// Definitions are keyed `Namespace.Type` in published documents, but a
    /// bare type name is accepted too.
    fn definition(&self, namespace: &str, type_name: &str) -> Option<&SwaggerDefinition> {
        self.definitions
            .get(&format!("{}.{}", namespace, type_name))
            .or_else(|| self.definitions.get(type_name))
    }

    pub fn type_description(&self, namespace: &str, type_name: &str) -> Option<&str> {
        let definition = self.definition(namespace, type_name)?;
        definition
            .description
            .as_deref()
            .or(definition.title.as_deref())
            .filter(|d| !d.trim().is_empty())
    }

    pub fn property_description(
        &self,
        namespace: &str,
        type_name: &str,
        property: &str,
    ) -> Option<&str> {
        let property = self.definition(namespace, type_name)?.properties.get(property)?;
        property
            .description
            .as_deref()
            .or(property.title.as_deref())
            .filter(|d| !d.trim().is_empty())
    }
}
