//! Check operation - metadata validation without writing code.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use eyre::{Context, Result};
use rayon::prelude::*;
use tracing::debug;
use vdmgen_codegen::pipeline::{
    CompilationContext, Pipeline, ServiceMappingPlugin, Severity, TracingPlugin,
};
use vdmgen_codegen_typescript::{TS_NAMING, TypeScriptTypeMapper};
use vdmgen_edmx::ServiceMappings;

use super::{describe_error, load_mappings};
use crate::{
    discovery::{ServiceSource, discover},
    reports::{CheckReport, ServiceCheck},
};

/// Options for the check operation.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub input_dir: PathBuf,
    pub service_mapping: Option<PathBuf>,
    pub use_swagger: bool,
    /// Write each built model as `<dir>/<original file name>.json`.
    pub dump_model: Option<PathBuf>,
}

fn format_diagnostic(message: &str, location: Option<&str>) -> String {
    match location {
        Some(loc) => format!("{}\n  --> {}", message, loc),
        None => message.to_string(),
    }
}

fn dump(ctx: &CompilationContext, dir: &Path) -> Result<()> {
    let Some(service) = &ctx.service else {
        return Ok(());
    };
    let path = dir.join(format!("{}.json", service.original_file_name));
    let json = serde_json::to_string_pretty(service).wrap_err("Failed to serialize model")?;
    std::fs::write(&path, json).wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    debug!(model = %path.display(), "model written");
    Ok(())
}

fn check_service(
    mappings: Arc<ServiceMappings>,
    source: &ServiceSource,
    opts: &CheckOptions,
) -> ServiceCheck {
    let pipeline = Pipeline::new(TS_NAMING, Arc::new(TypeScriptTypeMapper))
        .plugin(TracingPlugin)
        .plugin(ServiceMappingPlugin::new(mappings));

    let mut report = ServiceCheck {
        original_file_name: source.original_file_name.clone(),
        path: source.path.clone(),
        ..Default::default()
    };

    let mut ctx = match source.load(opts.use_swagger) {
        Ok(input) => CompilationContext::new(input),
        Err(err) => {
            report.failure = Some(describe_error(&err));
            return report;
        }
    };
    let outcome = pipeline.run_context(&mut ctx);

    for diag in &ctx.diagnostics {
        let message = format_diagnostic(&diag.message, diag.location.as_deref());
        match diag.severity {
            Severity::Error => report.errors.push(message),
            Severity::Warning => report.warnings.push(message),
            Severity::Info => report.infos.push(message),
        }
    }

    // Validation failures are already listed as error diagnostics.
    let outcome = outcome.and_then(|()| match &opts.dump_model {
        Some(dir) => dump(&ctx, dir),
        None => Ok(()),
    });
    if let Err(err) = outcome
        && report.errors.is_empty()
    {
        report.failure = Some(describe_error(&err));
    }
    report
}

/// Execute the check operation.
///
/// Runs every discovered service through parsing, validation and model
/// building, collecting diagnostics per service.
pub fn check(opts: &CheckOptions) -> Result<CheckReport> {
    let sources = discover(&opts.input_dir)?;
    let mappings = Arc::new(load_mappings(opts.service_mapping.as_deref())?);
    if let Some(dir) = &opts.dump_model {
        std::fs::create_dir_all(dir)
            .wrap_err_with(|| format!("Failed to create {}", dir.display()))?;
    }

    let services = sources
        .par_iter()
        .map(|source| check_service(Arc::clone(&mappings), source, opts))
        .collect();

    Ok(CheckReport {
        input_dir: opts.input_dir.clone(),
        services,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const THING: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<edmx:Edmx Version="1.0" xmlns:edmx="http://schemas.microsoft.com/ado/2007/06/edmx" xmlns:m="http://schemas.microsoft.com/ado/2007/08/dataservices/metadata">
  <edmx:DataServices m:DataServiceVersion="2.0">
    <Schema Namespace="NS" xmlns="http://schemas.microsoft.com/ado/2008/09/edm">
      <EntityType Name="A_ThingType">
        <Key><PropertyRef Name="Id"/></Key>
        <Property Name="Id" Type="Edm.String" Nullable="false"/>
      </EntityType>
      <EntityContainer Name="C" m:IsDefaultEntityContainer="true">
        <EntitySet Name="A_Thing" EntityType="NS.A_ThingType"/>
      </EntityContainer>
    </Schema>
  </edmx:DataServices>
</edmx:Edmx>"#;

    fn options(input: &Path) -> CheckOptions {
        CheckOptions {
            input_dir: input.to_path_buf(),
            service_mapping: None,
            use_swagger: false,
            dump_model: None,
        }
    }

    #[test]
    fn test_check_valid_service() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("API_THING_SRV.edmx"), THING).unwrap();

        let report = check(&options(temp.path())).unwrap();

        assert!(report.is_valid());
        assert_eq!(report.services.len(), 1);
        assert_eq!(report.services[0].original_file_name, "API_THING_SRV");
        assert!(report.services[0].failure.is_none());
    }

    #[test]
    fn test_check_reports_parse_failure() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("API_BROKEN_SRV.edmx"), "<edmx:Edmx").unwrap();
        std::fs::write(temp.path().join("API_THING_SRV.edmx"), THING).unwrap();

        let report = check(&options(temp.path())).unwrap();

        assert!(!report.is_valid());
        assert!(report.services[0].failure.is_some());
        assert!(report.services[1].failure.is_none());
    }

    #[test]
    fn test_dump_model_writes_json() {
        let temp = tempfile::tempdir().unwrap();
        let input = temp.path().join("input");
        std::fs::create_dir_all(&input).unwrap();
        std::fs::write(input.join("API_THING_SRV.edmx"), THING).unwrap();
        let models = temp.path().join("models");

        let opts = CheckOptions {
            dump_model: Some(models.clone()),
            ..options(&input)
        };
        check(&opts).unwrap();

        let json = std::fs::read_to_string(models.join("API_THING_SRV.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["directoryName"], "thing-service");
    }
}
