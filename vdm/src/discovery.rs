//! Finding the metadata documents below an input directory.

use std::path::{Path, PathBuf};

use eyre::{Context, Result, bail};
use tracing::debug;
use vdmgen_codegen::pipeline::ServiceInput;
use vdmgen_edmx::SwaggerDocument;
use walkdir::WalkDir;

const EXTENSIONS: &[&str] = &["edmx", "xml"];

/// One metadata document, which becomes one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSource {
    pub path: PathBuf,
    /// File stem, e.g. `API_TEST_SRV`.
    pub original_file_name: String,
}

impl ServiceSource {
    fn from_path(path: PathBuf) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        if !EXTENSIONS.contains(&extension.as_str()) {
            return None;
        }
        let original_file_name = path.file_stem()?.to_str()?.to_string();
        Some(Self {
            path,
            original_file_name,
        })
    }

    /// The Swagger document next to the metadata, `<stem>.json`.
    pub fn swagger_path(&self) -> PathBuf {
        self.path.with_extension("json")
    }

    /// Read the document, and its Swagger sibling when asked to and present.
    pub fn load(&self, use_swagger: bool) -> Result<ServiceInput> {
        let text = std::fs::read_to_string(&self.path)
            .wrap_err_with(|| format!("Failed to read {}", self.path.display()))?;
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.original_file_name.clone());

        let swagger_path = self.swagger_path();
        let swagger = if use_swagger && swagger_path.is_file() {
            debug!(swagger = %swagger_path.display(), "reading swagger document");
            Some(SwaggerDocument::open(&swagger_path)?)
        } else {
            None
        };

        Ok(ServiceInput::new(&self.original_file_name, name, text).with_swagger(swagger))
    }
}

/// All `*.edmx` and `*.xml` files below `input_dir`, sorted by path.
pub fn discover(input_dir: &Path) -> Result<Vec<ServiceSource>> {
    if !input_dir.is_dir() {
        bail!("Input directory {} does not exist", input_dir.display());
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(input_dir).follow_links(true) {
        let entry =
            entry.wrap_err_with(|| format!("Failed to read directory {}", input_dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(source) = ServiceSource::from_path(entry.into_path()) {
            sources.push(source);
        }
    }
    sources.sort_by(|a, b| a.path.cmp(&b.path));

    debug!(input = %input_dir.display(), services = sources.len(), "discovered services");
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_filters_and_sorts() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("nested");
        std::fs::create_dir_all(&nested).unwrap();
        for file in [
            "B_SRV.edmx",
            "A_SRV.EDMX",
            "service-mapping.json",
            "notes.txt",
            "nested/C_SRV.xml",
        ] {
            std::fs::write(temp.path().join(file), "").unwrap();
        }

        let sources = discover(temp.path()).unwrap();
        let names: Vec<&str> = sources
            .iter()
            .map(|s| s.original_file_name.as_str())
            .collect();

        assert_eq!(names, vec!["A_SRV", "B_SRV", "C_SRV"]);
    }

    #[test]
    fn test_missing_input_directory() {
        let temp = tempfile::tempdir().unwrap();
        let err = discover(&temp.path().join("missing")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_swagger_is_optional() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("API_X_SRV.edmx");
        std::fs::write(&path, "<edmx/>").unwrap();
        std::fs::write(
            temp.path().join("API_X_SRV.json"),
            r#"{ "basePath": "/x" }"#,
        )
        .unwrap();
        let source = ServiceSource::from_path(path).unwrap();

        let without = source.load(false).unwrap();
        assert!(without.swagger.is_none());
        assert_eq!(without.original_file_name, "API_X_SRV");

        let with = source.load(true).unwrap();
        assert_eq!(
            with.swagger.and_then(|s| s.base_path).as_deref(),
            Some("/x")
        );
    }
}
