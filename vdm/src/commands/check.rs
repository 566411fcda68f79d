use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::generate::default_mapping;
use crate::{
    ops::{self, CheckOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Directory searched recursively for *.edmx and *.xml files
    #[arg(short, long)]
    pub input_dir: PathBuf,

    /// Service mapping file (defaults to <input-dir>/service-mapping.json)
    #[arg(short, long)]
    pub service_mapping: Option<PathBuf>,

    /// Read <name>.json Swagger files next to the metadata documents
    #[arg(long)]
    pub use_swagger: bool,

    /// Write each built service model as JSON into this directory
    #[arg(long, value_name = "DIR")]
    pub dump_model: Option<PathBuf>,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let opts = CheckOptions {
            input_dir: self.input_dir.clone(),
            service_mapping: self
                .service_mapping
                .clone()
                .or_else(|| default_mapping(&self.input_dir)),
            use_swagger: self.use_swagger,
            dump_model: self.dump_model.clone(),
        };
        let report = ops::check(&opts)?;
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
