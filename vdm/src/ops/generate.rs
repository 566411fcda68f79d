//! Generate operation - metadata documents to TypeScript packages.
//!
//! Services are built in parallel, each into memory. Output directories are
//! then claimed in discovery order, and only services whose whole pipeline
//! succeeded are written.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use eyre::{Context, Result};
use rayon::prelude::*;
use tracing::{error, info, warn};
use vdmgen_codegen::{
    aggregate::{DirectoryClaims, service_mapping},
    language::{GenerateResult, LanguageCodegen},
    pipeline::{Pipeline, ServiceMappingPlugin, TracingPlugin},
};
use vdmgen_codegen_typescript::{
    EmitOptions, EmittedFile, Generator, TS_NAMING, TypeScriptTypeMapper, emit_aggregator,
    emit_service,
};
use vdmgen_core::{File, Overwrite};
use vdmgen_edmx::ServiceMappings;
use vdmgen_ir::VdmServiceMetadata;

use super::{describe_error, load_mappings};
use crate::{
    discovery::{ServiceSource, discover},
    reports::{
        GenerateReport, GenerationResult, PreviewFile, PreviewResult, ServiceFailure,
        ServiceSummary, WrittenResult,
    },
};

pub const SERVICE_MAPPING_FILE: &str = "service-mapping.json";
pub const CHANGELOG_FILE: &str = "CHANGELOG.md";

/// Aggregator package depending on every generated service package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorOptions {
    pub npm_package_name: String,
    pub directory_name: String,
}

/// Options for the generate operation.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Mapping file to read; a missing default file is not an error.
    pub service_mapping: Option<PathBuf>,
    pub use_swagger: bool,
    pub force_overwrite: bool,
    pub generate_package_json: bool,
    pub changelog_file: Option<PathBuf>,
    pub aggregator: Option<AggregatorOptions>,
    pub version: Option<String>,
    pub dry_run: bool,
}

impl GenerateOptions {
    fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            generate_package_json: self.generate_package_json,
            version: self.version.clone(),
        }
    }
}

/// A service whose pipeline and emission succeeded.
struct BuiltService {
    service: VdmServiceMetadata,
    files: Vec<EmittedFile>,
    warnings: Vec<String>,
}

/// Run one service from its document to its files.
fn build_service(
    pipeline: &Pipeline,
    source: &ServiceSource,
    opts: &GenerateOptions,
) -> Result<BuiltService> {
    info!(service = %source.original_file_name, "generating service");
    let input = source.load(opts.use_swagger)?;
    let mut ctx = pipeline.run(input)?;
    let warnings = ctx.warnings().map(ToString::to_string).collect();
    let service = ctx.take_service()?;
    let files = emit_service(&service, &opts.emit_options())?;
    Ok(BuiltService {
        service,
        files,
        warnings,
    })
}

/// Copy the changelog into `dir`, returning a warning on failure.
fn copy_changelog(changelog: &Path, dir: &Path) -> Option<String> {
    let target = dir.join(CHANGELOG_FILE);
    let copied = std::fs::create_dir_all(dir).and_then(|_| std::fs::copy(changelog, &target));
    match copied {
        Ok(_) => None,
        Err(err) => {
            let message = format!(
                "could not copy {} to {}: {}",
                changelog.display(),
                target.display(),
                err
            );
            warn!("{}", message);
            Some(message)
        }
    }
}

fn summary(built: &BuiltService) -> ServiceSummary {
    ServiceSummary {
        original_file_name: built.service.original_file_name.clone(),
        directory_name: built.service.directory_name.clone(),
        entities: built.service.entities.len(),
        complex_types: built.service.complex_types.len(),
        function_imports: built.service.function_imports.len(),
    }
}

/// Execute the generate operation.
///
/// Fails only for problems of the whole run (unreadable input directory or
/// mapping file, unwritable output directory). Failures of single services
/// are collected in the report.
pub fn generate(opts: &GenerateOptions) -> Result<GenerateReport> {
    let sources = discover(&opts.input_dir)?;
    if sources.is_empty() {
        warn!(input = %opts.input_dir.display(), "no metadata documents found");
    }
    let mappings = Arc::new(load_mappings(opts.service_mapping.as_deref())?);

    let outcomes: Vec<(ServiceSource, Result<BuiltService>)> = sources
        .into_par_iter()
        .map(|source| {
            let pipeline = pipeline(Arc::clone(&mappings));
            let outcome = build_service(&pipeline, &source, opts);
            (source, outcome)
        })
        .collect();

    let mut failures = Vec::new();
    let mut warnings = Vec::new();
    let mut claims = DirectoryClaims::new();
    let mut accepted = Vec::new();
    for (source, outcome) in outcomes {
        let claimed = outcome.and_then(|built| {
            claims.claim(&built.service)?;
            Ok(built)
        });
        match claimed {
            Ok(built) => {
                warnings.extend(
                    built
                        .warnings
                        .iter()
                        .map(|w| format!("{}: {}", source.original_file_name, w)),
                );
                accepted.push(built);
            }
            Err(err) => {
                error!(service = %source.original_file_name, "{:#}", err);
                failures.push(ServiceFailure {
                    original_file_name: source.original_file_name,
                    path: source.path,
                    message: describe_error(&err),
                });
            }
        }
    }

    let mut run_files = Vec::new();
    if !accepted.is_empty() {
        run_files.push(EmittedFile::text(
            SERVICE_MAPPING_FILE,
            service_mapping(accepted.iter().map(|b| &b.service)).to_json(),
        ));
    }
    if let Some(aggregator) = &opts.aggregator {
        run_files.push(emit_aggregator(
            &aggregator.directory_name,
            &aggregator.npm_package_name,
            accepted.iter().map(|b| b.service.npm_package_name.as_str()),
            &opts.emit_options(),
        )?);
    }

    let services = accepted.iter().map(summary).collect();
    let result = if opts.dry_run {
        preview(&accepted, &run_files)
    } else {
        let written = write(opts, accepted, run_files, &mut failures, &mut warnings)?;
        GenerationResult::Written(written)
    };

    Ok(GenerateReport {
        output_dir: opts.output_dir.clone(),
        services,
        failures,
        warnings,
        result,
    })
}

fn pipeline(mappings: Arc<ServiceMappings>) -> Pipeline {
    Pipeline::new(TS_NAMING, Arc::new(TypeScriptTypeMapper))
        .plugin(TracingPlugin)
        .plugin(ServiceMappingPlugin::new(mappings))
}

fn preview(accepted: &[BuiltService], run_files: &[EmittedFile]) -> GenerationResult {
    let files = accepted
        .iter()
        .flat_map(|b| b.files.iter())
        .chain(run_files)
        .map(|file| PreviewFile {
            path: file.relative_path().to_string(),
            content: file.rendered(),
        })
        .collect();
    GenerationResult::Preview(PreviewResult { files })
}

fn write(
    opts: &GenerateOptions,
    accepted: Vec<BuiltService>,
    run_files: Vec<EmittedFile>,
    failures: &mut Vec<ServiceFailure>,
    warnings: &mut Vec<String>,
) -> Result<WrittenResult> {
    std::fs::create_dir_all(&opts.output_dir).wrap_err_with(|| {
        format!(
            "Failed to create output directory {}",
            opts.output_dir.display()
        )
    })?;

    let written: Vec<(VdmServiceMetadata, Result<GenerateResult>)> =
        accepted
            .into_par_iter()
            .map(|built| {
                let result = Generator::from_files(built.files)
                    .force_overwrite(opts.force_overwrite)
                    .generate(&opts.output_dir);
                (built.service, result)
            })
            .collect();

    let mut report = WrittenResult::default();
    let mut directories = Vec::new();
    for (service, result) in written {
        match result {
            Ok(result) => {
                info!(
                    service = %service.original_file_name,
                    written = result.written.len(),
                    skipped = result.skipped.len(),
                    "service generated"
                );
                report.written += result.written.len();
                report.skipped.extend(result.skipped);
                directories.push(opts.output_dir.join(&service.directory_name));
            }
            Err(err) => {
                error!(service = %service.original_file_name, "{:#}", err);
                failures.push(ServiceFailure {
                    original_file_name: service.original_file_name.clone(),
                    path: opts.output_dir.join(&service.directory_name),
                    message: describe_error(&err),
                });
            }
        }
    }

    for file in run_files {
        if file.relative_path() == SERVICE_MAPPING_FILE {
            File::new(opts.output_dir.join(SERVICE_MAPPING_FILE), file.rendered())
                .with_overwrite(Overwrite::Always)
                .write()?;
            report.written += 1;
            continue;
        }
        let result = Generator::from_files(vec![file])
            .force_overwrite(opts.force_overwrite)
            .generate(&opts.output_dir)?;
        report.written += result.written.len();
        report.skipped.extend(result.skipped);
    }
    if let Some(aggregator) = &opts.aggregator {
        directories.push(opts.output_dir.join(&aggregator.directory_name));
    }

    if let Some(changelog) = &opts.changelog_file {
        warnings.extend(
            directories
                .iter()
                .filter_map(|dir| copy_changelog(changelog, dir)),
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVICE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
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

    struct Fixture {
        _temp: tempfile::TempDir,
        input: PathBuf,
        output: PathBuf,
    }

    fn fixture(services: &[(&str, &str)]) -> Fixture {
        let temp = tempfile::tempdir().unwrap();
        let input = temp.path().join("input");
        let output = temp.path().join("output");
        std::fs::create_dir_all(&input).unwrap();
        for (name, content) in services {
            let path = input.join(name);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }
        Fixture {
            _temp: temp,
            input,
            output,
        }
    }

    fn options(fixture: &Fixture) -> GenerateOptions {
        GenerateOptions {
            input_dir: fixture.input.clone(),
            output_dir: fixture.output.clone(),
            service_mapping: None,
            use_swagger: false,
            force_overwrite: false,
            generate_package_json: false,
            changelog_file: None,
            aggregator: None,
            version: None,
            dry_run: false,
        }
    }

    #[test]
    fn test_generate_writes_service_and_mapping() {
        let fixture = fixture(&[("API_THING_SRV.edmx", SERVICE)]);

        let report = generate(&options(&fixture)).unwrap();

        assert!(report.is_success());
        assert_eq!(report.services.len(), 1);
        assert_eq!(report.services[0].directory_name, "thing-service");
        let dir = fixture.output.join("thing-service");
        assert!(dir.join("Thing.ts").is_file());
        assert!(dir.join("ThingRequestBuilder.ts").is_file());
        assert!(dir.join("index.ts").is_file());
        assert!(dir.join("tsconfig.json").is_file());
        assert!(!dir.join("package.json").exists());

        let mapping =
            std::fs::read_to_string(fixture.output.join(SERVICE_MAPPING_FILE)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&mapping).unwrap();
        assert_eq!(json["API_THING_SRV"]["directoryName"], "thing-service");
    }

    #[test]
    fn test_failed_service_does_not_stop_siblings() {
        let fixture = fixture(&[
            ("API_BROKEN_SRV.edmx", "<edmx:Edmx"),
            ("API_THING_SRV.edmx", SERVICE),
        ]);

        let report = generate(&options(&fixture)).unwrap();

        assert!(!report.is_success());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].original_file_name, "API_BROKEN_SRV");
        assert_eq!(report.services.len(), 1);
        assert!(fixture.output.join("thing-service").join("Thing.ts").is_file());
        assert!(!fixture.output.join("broken-service").exists());
    }

    #[test]
    fn test_duplicate_directory_fails_later_service() {
        let fixture = fixture(&[
            ("API_THING_SRV.edmx", SERVICE),
            ("nested/API_THING_SRV.xml", SERVICE),
        ]);

        let report = generate(&options(&fixture)).unwrap();

        assert_eq!(report.services.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("nested/API_THING_SRV.xml"));
        assert!(report.failures[0].message.contains("thing-service"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let fixture = fixture(&[("API_THING_SRV.edmx", SERVICE)]);
        let opts = GenerateOptions {
            dry_run: true,
            ..options(&fixture)
        };

        let report = generate(&opts).unwrap();

        assert!(!fixture.output.exists());
        let GenerationResult::Preview(preview) = report.result else {
            panic!("expected a preview");
        };
        let paths: Vec<&str> = preview.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths.first(), Some(&"thing-service/Thing.ts"));
        assert_eq!(paths.last(), Some(&SERVICE_MAPPING_FILE));
    }

    #[test]
    fn test_existing_files_need_force_overwrite() {
        let fixture = fixture(&[("API_THING_SRV.edmx", SERVICE)]);
        generate(&options(&fixture)).unwrap();
        let index = fixture.output.join("thing-service").join("index.ts");
        std::fs::write(&index, "// edited\n").unwrap();

        let report = generate(&options(&fixture)).unwrap();
        let GenerationResult::Written(written) = &report.result else {
            panic!("expected written files");
        };
        assert!(written.skipped.contains(&"thing-service/index.ts".to_string()));
        assert_eq!(std::fs::read_to_string(&index).unwrap(), "// edited\n");

        let opts = GenerateOptions {
            force_overwrite: true,
            ..options(&fixture)
        };
        generate(&opts).unwrap();
        assert_ne!(std::fs::read_to_string(&index).unwrap(), "// edited\n");
    }

    #[test]
    fn test_package_json_aggregator_and_changelog() {
        let fixture = fixture(&[("API_THING_SRV.edmx", SERVICE)]);
        let changelog = fixture.input.join("CHANGELOG.md");
        std::fs::write(&changelog, "# Changes\n").unwrap();
        let opts = GenerateOptions {
            generate_package_json: true,
            changelog_file: Some(changelog),
            aggregator: Some(AggregatorOptions {
                npm_package_name: "@acme/all".to_string(),
                directory_name: "all".to_string(),
            }),
            version: Some("3.0.0".to_string()),
            ..options(&fixture)
        };

        let report = generate(&opts).unwrap();

        assert!(report.warnings.is_empty());
        let service_dir = fixture.output.join("thing-service");
        assert!(service_dir.join("package.json").is_file());
        assert!(service_dir.join(CHANGELOG_FILE).is_file());

        let aggregator = std::fs::read_to_string(fixture.output.join("all/package.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&aggregator).unwrap();
        assert_eq!(json["name"], "@acme/all");
        assert_eq!(json["dependencies"]["thing-service"], "^3.0.0");
        assert!(fixture.output.join("all").join(CHANGELOG_FILE).is_file());
    }

    #[test]
    fn test_failed_changelog_copy_is_a_warning() {
        let fixture = fixture(&[("API_THING_SRV.edmx", SERVICE)]);
        let opts = GenerateOptions {
            changelog_file: Some(fixture.input.join("missing.md")),
            ..options(&fixture)
        };

        let report = generate(&opts).unwrap();

        assert!(report.is_success());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("missing.md"));
    }
}
