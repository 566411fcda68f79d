//! Check command report data structures.

use std::path::PathBuf;

use super::{
    output::{Output, Report},
    plural,
};

/// Diagnostics of one service.
#[derive(Debug, Default)]
pub struct ServiceCheck {
    pub original_file_name: String,
    pub path: PathBuf,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    /// Error that stopped the pipeline without producing diagnostics.
    pub failure: Option<String>,
}

impl ServiceCheck {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty() && self.failure.is_none()
    }
}

/// Report data from metadata validation.
#[derive(Debug)]
pub struct CheckReport {
    pub input_dir: PathBuf,
    pub services: Vec<ServiceCheck>,
}

impl CheckReport {
    /// Whether every service passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.services.iter().all(ServiceCheck::is_valid)
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for service in &self.services {
            let name = &service.original_file_name;
            if let Some(failure) = &service.failure {
                out.error(&format!("{} ({}): {}", name, service.path.display(), failure));
            }
            for error in &service.errors {
                out.error(&format!("{}: {}", name, error));
            }
            for warning in &service.warnings {
                out.warning(&format!("{}: {}", name, warning));
            }
            for info in &service.infos {
                out.preformatted(&format!("info: {}: {}", name, info));
            }
        }

        let noisy = self
            .services
            .iter()
            .any(|s| !s.is_valid() || !s.warnings.is_empty());
        if noisy {
            out.newline();
        }

        let valid = self.services.iter().filter(|s| s.is_valid()).count();
        if self.is_valid() {
            out.preformatted(&format!(
                "✓ {} in {} valid",
                plural(valid, "service"),
                self.input_dir.display()
            ));
        } else {
            out.preformatted(&format!(
                "{} of {} services in {} are invalid",
                self.services.len() - valid,
                self.services.len(),
                self.input_dir.display()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_render_invalid_service() {
        let report = CheckReport {
            input_dir: PathBuf::from("specs"),
            services: vec![
                ServiceCheck {
                    original_file_name: "API_A_SRV".to_string(),
                    warnings: vec!["navigation property dropped".to_string()],
                    ..Default::default()
                },
                ServiceCheck {
                    original_file_name: "API_B_SRV".to_string(),
                    errors: vec!["entity set refers to unknown type".to_string()],
                    ..Default::default()
                },
            ],
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert!(!report.is_valid());
        assert_eq!(
            out.lines,
            vec![
                "warning: API_A_SRV: navigation property dropped",
                "error: API_B_SRV: entity set refers to unknown type",
                "",
                "1 of 2 services in specs are invalid",
            ]
        );
    }

    #[test]
    fn test_render_valid() {
        let report = CheckReport {
            input_dir: PathBuf::from("specs"),
            services: vec![ServiceCheck::default()],
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert_eq!(out.lines, vec!["✓ 1 service in specs valid"]);
    }
}
