//! Generate command report data structures.

use std::path::PathBuf;

use super::{
    output::{Output, Report},
    plural,
};

/// Report data from a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    pub output_dir: PathBuf,
    /// Services that were generated (or would be, in a dry run).
    pub services: Vec<ServiceSummary>,
    /// Services that were skipped because of an error.
    pub failures: Vec<ServiceFailure>,
    /// Pipeline warnings, prefixed by the service they belong to.
    pub warnings: Vec<String>,
    pub result: GenerationResult,
}

impl GenerateReport {
    /// Whether every discovered service was generated.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSummary {
    pub original_file_name: String,
    pub directory_name: String,
    pub entities: usize,
    pub complex_types: usize,
    pub function_imports: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFailure {
    pub original_file_name: String,
    /// Metadata document, or output directory when writing failed.
    pub path: PathBuf,
    pub message: String,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result when files were written to disk.
#[derive(Debug, Default)]
pub struct WrittenResult {
    pub written: usize,
    /// Existing files left alone, relative to the output directory.
    pub skipped: Vec<String>,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    pub files: Vec<PreviewFile>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        if let GenerationResult::Preview(preview) = &self.result {
            self.render_preview(out, preview);
            out.newline();
        }

        for warning in &self.warnings {
            out.warning(warning);
        }
        if !self.warnings.is_empty() {
            out.newline();
        }

        if !self.services.is_empty() {
            out.section(&format!("Services ({})", self.services.len()));
            for service in &self.services {
                out.added_item(&format!(
                    "{} -> {} ({}, {}, {})",
                    service.original_file_name,
                    service.directory_name,
                    plural(service.entities, "entity type"),
                    plural(service.complex_types, "complex type"),
                    plural(service.function_imports, "function import"),
                ));
            }
        }

        if !self.failures.is_empty() {
            out.newline();
            out.section(&format!("Failed ({})", self.failures.len()));
            for failure in &self.failures {
                out.removed_item(&format!(
                    "{} ({})",
                    failure.original_file_name,
                    failure.path.display()
                ));
                for line in failure.message.lines() {
                    out.preformatted(&format!("      {}", line));
                }
            }
        }

        if let GenerationResult::Written(written) = &self.result {
            self.render_written(out, written);
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        if !written.skipped.is_empty() {
            out.newline();
            out.section("Kept existing files (use --force-overwrite to replace)");
            for path in &written.skipped {
                out.list_item(path);
            }
        }

        out.newline();
        out.key_value(
            "Generated",
            &format!(
                "{} in {}",
                plural(written.written, "file"),
                self.output_dir.display()
            ),
        );
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!(
            "{} would be generated",
            plural(preview.files.len(), "file")
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    fn report(result: GenerationResult) -> GenerateReport {
        GenerateReport {
            output_dir: PathBuf::from("out"),
            services: vec![ServiceSummary {
                original_file_name: "API_TEST_SRV".to_string(),
                directory_name: "test-service".to_string(),
                entities: 10,
                complex_types: 2,
                function_imports: 1,
            }],
            failures: vec![ServiceFailure {
                original_file_name: "API_BROKEN_SRV".to_string(),
                path: PathBuf::from("specs/API_BROKEN_SRV.edmx"),
                message: "unexpected end of document".to_string(),
            }],
            warnings: vec!["API_TEST_SRV: something was dropped".to_string()],
            result,
        }
    }

    #[test]
    fn test_render_written() {
        let report = report(GenerationResult::Written(WrittenResult {
            written: 24,
            skipped: vec!["test-service/index.ts".to_string()],
        }));
        let mut out = BufferOutput::default();
        report.render(&mut out);
        let text = out.text();

        assert!(!report.is_success());
        assert!(text.contains("warning: API_TEST_SRV: something was dropped"));
        assert!(text.contains(
            "  + API_TEST_SRV -> test-service (10 entity types, 2 complex types, 1 function import)"
        ));
        assert!(text.contains("  x API_BROKEN_SRV (specs/API_BROKEN_SRV.edmx)"));
        assert!(text.contains("      unexpected end of document"));
        assert!(text.contains("  - test-service/index.ts"));
        assert!(text.ends_with("Generated: 24 files in out"));
    }

    #[test]
    fn test_render_preview() {
        let report = report(GenerationResult::Preview(PreviewResult {
            files: vec![PreviewFile {
                path: "test-service/index.ts".to_string(),
                content: "export * from './TestEntity';".to_string(),
            }],
        }));
        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert_eq!(out.lines[0], "── test-service/index.ts ──");
        assert_eq!(out.lines[1], "export * from './TestEntity';");
        assert_eq!(out.lines[2], "── Summary ──");
        assert_eq!(out.lines[3], "1 file would be generated");
        assert!(!out.text().contains("Generated:"));
    }
}
