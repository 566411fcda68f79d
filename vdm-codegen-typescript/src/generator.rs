//! TypeScript code generator for one service.

use std::path::Path;

use eyre::Result;
use tracing::debug;
use vdmgen_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile};
use vdmgen_core::{GeneratedFile, Overwrite, WriteResult};
use vdmgen_ir::VdmServiceMetadata;

use crate::{
    code_file::EmittedFile,
    emitter::{EmitOptions, emit_service},
};

/// TypeScript code generator producing the client package of a service.
///
/// All files are emitted when the generator is created, so a generator that
/// exists can always be previewed and only filesystem errors remain for
/// [`LanguageCodegen::generate`].
pub struct Generator {
    files: Vec<EmittedFile>,
    force_overwrite: bool,
}

impl LanguageCodegen for Generator {
    fn language(&self) -> &'static str {
        "typescript"
    }

    fn file_extension(&self) -> &'static str {
        "ts"
    }

    fn preview(&self) -> Vec<PreviewFile> {
        self.files
            .iter()
            .map(|file| PreviewFile {
                path: file.relative_path().to_string(),
                content: file.rendered(),
            })
            .collect()
    }

    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        let mut result = GenerateResult::default();
        for emitted in &self.files {
            let mut file = emitted.to_file(output_dir);
            if self.force_overwrite {
                file = file.with_overwrite(Overwrite::Always);
            }
            let path = emitted.relative_path().to_string();
            match file.write()? {
                WriteResult::Written => result.written.push(path),
                WriteResult::Skipped => {
                    debug!(file = %path, "kept existing file");
                    result.skipped.push(path)
                }
            }
        }
        Ok(result)
    }
}

impl Generator {
    pub fn new(service: &VdmServiceMetadata, options: &EmitOptions) -> Result<Self> {
        Ok(Self::from_files(emit_service(service, options)?))
    }

    /// A generator writing already emitted files, e.g. an aggregator package.
    pub fn from_files(files: Vec<EmittedFile>) -> Self {
        Self {
            files,
            force_overwrite: false,
        }
    }

    /// Replace existing files instead of skipping them.
    pub fn force_overwrite(mut self, force: bool) -> Self {
        self.force_overwrite = force;
        self
    }

    pub fn files(&self) -> &[EmittedFile] {
        &self.files
    }
}
