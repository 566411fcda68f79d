use std::path::{Path, PathBuf};

use clap::Args;
use eyre::{Result, eyre};

use crate::{
    config::{ConfigFile, GeneratorConfig},
    ops::{self, AggregatorOptions, GenerateOptions},
    reports::{Report, TerminalOutput},
};

const SERVICE_MAPPING_FILE: &str = ops::generate::SERVICE_MAPPING_FILE;

#[derive(Args, Default)]
pub struct GenerateCommand {
    /// Directory searched recursively for *.edmx and *.xml files
    #[arg(short, long)]
    pub input_dir: Option<PathBuf>,

    /// Directory the service packages are written to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Service mapping file (defaults to <input-dir>/service-mapping.json)
    #[arg(short, long)]
    pub service_mapping: Option<PathBuf>,

    /// Read <name>.json Swagger files next to the metadata documents
    #[arg(long)]
    pub use_swagger: bool,

    /// Replace files that already exist
    #[arg(long)]
    pub force_overwrite: bool,

    /// Write a package.json for every service
    #[arg(long)]
    pub generate_package_json: bool,

    /// Copied into every service and aggregator directory
    #[arg(long)]
    pub changelog_file: Option<PathBuf>,

    /// Also generate a package depending on all service packages
    #[arg(long)]
    pub aggregator_npm_package_name: Option<String>,

    /// Directory of the aggregator package (defaults to its package name)
    #[arg(long, requires = "aggregator_npm_package_name")]
    pub aggregator_directory_name: Option<String>,

    /// Version written to generated package.json files
    #[arg(long)]
    pub version_in_package_json: Option<String>,

    /// Print the generated files instead of writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Configuration file (defaults to ./vdmgen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// `<input-dir>/service-mapping.json` when it exists.
pub(super) fn default_mapping(input_dir: &Path) -> Option<PathBuf> {
    let path = input_dir.join(SERVICE_MAPPING_FILE);
    path.is_file().then_some(path)
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let config = ConfigFile::load(self.config.as_deref())?;
        let opts = self.options(config.generator)?;

        let report = ops::generate(&opts)?;
        report.render(&mut TerminalOutput::new());

        if !report.is_success() {
            std::process::exit(1);
        }
        Ok(())
    }

    /// Merge flags over the configuration file.
    fn options(&self, config: GeneratorConfig) -> Result<GenerateOptions> {
        let input_dir = self
            .input_dir
            .clone()
            .or(config.input_dir)
            .ok_or_else(|| eyre!("No input directory given, pass --input-dir"))?;
        let output_dir = self
            .output_dir
            .clone()
            .or(config.output_dir)
            .ok_or_else(|| eyre!("No output directory given, pass --output-dir"))?;
        let service_mapping = self
            .service_mapping
            .clone()
            .or(config.service_mapping)
            .or_else(|| default_mapping(&input_dir));

        let aggregator = self
            .aggregator_npm_package_name
            .clone()
            .or(config.aggregator_npm_package_name)
            .map(|npm_package_name| AggregatorOptions {
                directory_name: self
                    .aggregator_directory_name
                    .clone()
                    .or(config.aggregator_directory_name)
                    .unwrap_or_else(|| npm_package_name.clone()),
                npm_package_name,
            });

        Ok(GenerateOptions {
            input_dir,
            output_dir,
            service_mapping,
            use_swagger: self.use_swagger || config.use_swagger.unwrap_or(false),
            force_overwrite: self.force_overwrite || config.force_overwrite.unwrap_or(false),
            generate_package_json: self.generate_package_json
                || config.generate_package_json.unwrap_or(false),
            changelog_file: self.changelog_file.clone().or(config.changelog_file),
            aggregator,
            version: self
                .version_in_package_json
                .clone()
                .or(config.version_in_package_json),
            dry_run: self.dry_run,
        })
    }
}
