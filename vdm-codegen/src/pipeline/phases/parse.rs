//! Parse phase - reads the metadata documents into a raw schema.

use eyre::Result;
use vdmgen_edmx::parse_documents;

use crate::pipeline::{CompilationContext, Phase};

pub struct ParsePhase;

impl Phase for ParsePhase {
    fn name(&self) -> &'static str {
        "parse"
    }

    fn description(&self) -> &'static str {
        "Parse and merge the EDMX documents of the service"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let raw = parse_documents(&ctx.input.sources()).map_err(|e| eyre::Report::new(*e))?;
        ctx.raw = Some(raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use vdmgen_edmx::SchemaParseError;

    use super::*;
    use crate::pipeline::ServiceInput;

    #[test]
    fn test_parse_phase() {
        let text = crate::testing::edmx("NS", r#"<EntityContainer Name="C"/>"#);
        let mut ctx = CompilationContext::new(ServiceInput::new("NS", "NS.edmx", text));

        ParsePhase.run(&mut ctx).unwrap();

        assert_eq!(ctx.raw().unwrap().namespace, "NS");
    }

    #[test]
    fn test_parse_error_keeps_its_type() {
        let mut ctx = CompilationContext::new(ServiceInput::new("BROKEN", "BROKEN.edmx", "<edmx"));

        let err = ParsePhase.run(&mut ctx).unwrap_err();

        assert!(err.downcast_ref::<SchemaParseError>().is_some());
        assert!(ctx.raw.is_none());
    }
}
