//! Cross-service outputs of a generation run.

use std::collections::HashMap;

use miette::Diagnostic;
use thiserror::Error;
use vdmgen_edmx::{ServiceMapping, ServiceMappings};
use vdmgen_ir::VdmServiceMetadata;

/// Two services of one run want the same output directory.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("service '{service}' resolves to directory '{directory}', already used by '{first}'")]
#[diagnostic(
    code(vdmgen::aggregate::duplicate_directory),
    help("give one of the services another directoryName in the service mapping file")
)]
pub struct DuplicateDirectoryError {
    pub service: String,
    pub directory: String,
    pub first: String,
}

/// Hands out output directories, first come first served.
#[derive(Debug, Default)]
pub struct DirectoryClaims {
    claimed: HashMap<String, String>,
}

impl DirectoryClaims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the directory of `service`, failing if an earlier service holds it.
    pub fn claim(&mut self, service: &VdmServiceMetadata) -> Result<(), DuplicateDirectoryError> {
        if let Some(first) = self.claimed.get(&service.directory_name) {
            return Err(DuplicateDirectoryError {
                service: service.original_file_name.clone(),
                directory: service.directory_name.clone(),
                first: first.clone(),
            });
        }
        self.claimed.insert(
            service.directory_name.clone(),
            service.original_file_name.clone(),
        );
        Ok(())
    }
}

/// The mapping that regenerates `services` under the same names, keyed by
/// original file name in the order given.
pub fn service_mapping<'a>(
    services: impl IntoIterator<Item = &'a VdmServiceMetadata>,
) -> ServiceMappings {
    let mut mappings = ServiceMappings::new();
    for service in services {
        mappings.insert(
            service.original_file_name.clone(),
            ServiceMapping {
                directory_name: service.directory_name.clone(),
                service_path: service.service_path.clone(),
                npm_package_name: service.npm_package_name.clone(),
            },
        );
    }
    mappings
}
