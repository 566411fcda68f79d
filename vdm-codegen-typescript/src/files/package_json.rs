//! package.json generator for service and aggregator packages.

use eyre::Result;
use indexmap::IndexMap;
use serde::Serialize;

use crate::type_mapper::CORE_MODULE;

const CORE_VERSION: &str = "^1.17.2";
const TYPESCRIPT_VERSION: &str = "~3.8.3";

/// The package.json of a generated package.
///
/// Keys are written in declaration order, dependencies in insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct PackageJson {
    name: String,
    version: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    homepage: Option<String>,
    main: String,
    types: String,
    #[serde(rename = "publishConfig")]
    publish_config: PublishConfig,
    scripts: IndexMap<String, String>,
    dependencies: IndexMap<String, String>,
    #[serde(rename = "devDependencies")]
    dev_dependencies: IndexMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
struct PublishConfig {
    access: &'static str,
}

impl PackageJson {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let mut scripts = IndexMap::new();
        scripts.insert("compile".to_string(), "npx tsc".to_string());

        let mut dev_dependencies = IndexMap::new();
        dev_dependencies.insert("typescript".to_string(), TYPESCRIPT_VERSION.to_string());

        Self {
            name: name.into(),
            version: version.into(),
            description: String::new(),
            homepage: None,
            main: "./index.js".to_string(),
            types: "./index.d.ts".to_string(),
            publish_config: PublishConfig { access: "public" },
            scripts,
            dependencies: IndexMap::new(),
            dev_dependencies,
        }
    }

    /// The package of one generated service.
    pub fn service(
        name: impl Into<String>,
        version: impl Into<String>,
        original_file_name: &str,
    ) -> Self {
        Self::new(name, version)
            .with_description(format!(
                "Typed client for the OData service {}",
                original_file_name
            ))
            .with_dependency((CORE_MODULE, CORE_VERSION))
    }

    /// A package bundling the packages of several services.
    pub fn aggregator(
        name: impl Into<String>,
        version: impl Into<String>,
        services: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let version = version.into();
        let dependencies: Vec<Dependency> = services
            .into_iter()
            .map(|service| Dependency::new(service, format!("^{}", version)))
            .collect();
        Self::new(name, version)
            .with_description("Typed clients for a set of OData services")
            .with_dependencies(dependencies)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_homepage(mut self, homepage: Option<String>) -> Self {
        self.homepage = homepage;
        self
    }

    pub fn with_dependency(mut self, dep: impl Into<Dependency>) -> Self {
        let dep = dep.into();
        self.dependencies.insert(dep.name, dep.version);
        self
    }

    pub fn with_dependencies(mut self, deps: impl IntoIterator<Item = impl Into<Dependency>>) -> Self {
        for dep in deps {
            self = self.with_dependency(dep);
        }
        self
    }

    /// Pretty JSON with two-space indentation and a trailing newline.
    pub fn render(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// A dependency with name and version.
#[derive(Debug, Clone)]
pub struct Dependency {
    name: String,
    version: String,
}

impl Dependency {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for Dependency {
    fn from((name, version): (N, V)) -> Self {
        Self::new(name, version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_package() {
        let json = PackageJson::service("@vdm/test-service", "1.2.3", "API_TEST_SRV")
            .render()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["name"], "@vdm/test-service");
        assert_eq!(value["version"], "1.2.3");
        assert_eq!(value["dependencies"]["@sap-cloud-sdk/core"], CORE_VERSION);
        assert_eq!(value["devDependencies"]["typescript"], TYPESCRIPT_VERSION);
        assert!(value.get("homepage").is_none());
        assert!(json.ends_with("}\n"));
        assert!(json.starts_with("{\n  \"name\": \"@vdm/test-service\",\n  \"version\""));
    }

    #[test]
    fn test_aggregator_depends_on_services() {
        let json = PackageJson::aggregator("@vdm/all", "1.0.0", ["@vdm/a", "@vdm/b"])
            .render()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let deps = value["dependencies"].as_object().unwrap();
        assert_eq!(deps.len(), 2);
        assert_eq!(deps["@vdm/a"], "^1.0.0");
        assert_eq!(deps["@vdm/b"], "^1.0.0");
    }

    #[test]
    fn test_homepage() {
        let json = PackageJson::new("x", "1.0.0")
            .with_homepage(Some("https://api.example.com/docs".to_string()))
            .render()
            .unwrap();
        assert!(json.contains("\"homepage\": \"https://api.example.com/docs\""));
    }
}
