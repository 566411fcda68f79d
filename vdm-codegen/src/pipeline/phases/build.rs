//! Build phase - resolves names and types into the service model.

use std::sync::Arc;

use eyre::Result;
use tracing::warn;

use crate::{
    language::{EdmTypeMapper, NamingConvention},
    model::{ModelBuilder, ModelInput},
    names::NameRegistry,
    pipeline::{CompilationContext, Phase},
};

/// Builds the [`VdmServiceMetadata`](vdmgen_ir::VdmServiceMetadata) with a
/// fresh [`NameRegistry`] per service.
pub struct BuildPhase {
    naming: NamingConvention,
    mapper: Arc<dyn EdmTypeMapper>,
}

impl BuildPhase {
    pub fn new(naming: NamingConvention, mapper: Arc<dyn EdmTypeMapper>) -> Self {
        Self { naming, mapper }
    }
}

impl Phase for BuildPhase {
    fn name(&self) -> &'static str {
        "build"
    }

    fn description(&self) -> &'static str {
        "Resolve names and types into the service model"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let raw = ctx.raw()?;
        let mut names = NameRegistry::new(&raw.namespace, self.naming);
        let input = ModelInput::new(raw, &ctx.input.original_file_name)
            .with_mapping(ctx.input.mapping.as_ref())
            .with_swagger(ctx.input.swagger.as_ref());
        let built = ModelBuilder::new(input, &mut names, self.mapper.as_ref()).build()?;

        for diagnostic in built.diagnostics {
            warn!(service = ctx.original_file_name(), "{}", diagnostic);
            ctx.add_diagnostic(diagnostic);
        }
        ctx.service = Some(built.service);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        pipeline::{ServiceInput, phases::ParsePhase},
        testing::{StubMapper, edmx, test_naming},
    };

    #[test]
    fn test_build_phase() {
        let text = edmx(
            "API_X_SRV",
            r#"<EntityType Name="A_ThingType">
        <Key><PropertyRef Name="Id"/></Key>
        <Property Name="Id" Type="Edm.Guid" Nullable="false"/>
      </EntityType>
      <EntityContainer Name="C">
        <EntitySet Name="A_Thing" EntityType="API_X_SRV.A_ThingType"/>
      </EntityContainer>"#,
        );
        let mut ctx = CompilationContext::new(ServiceInput::new("API_X_SRV", "API_X_SRV.edmx", text));
        ParsePhase.run(&mut ctx).unwrap();

        BuildPhase::new(test_naming(), Arc::new(StubMapper))
            .run(&mut ctx)
            .unwrap();

        let service = ctx.take_service().unwrap();
        assert_eq!(service.directory_name, "x-service");
        assert_eq!(service.entities[0].class_name, "Thing");
    }

    #[test]
    fn test_build_without_parse_fails() {
        let mut ctx = CompilationContext::new(ServiceInput::new("X", "X.edmx", ""));
        let result = BuildPhase::new(test_naming(), Arc::new(StubMapper)).run(&mut ctx);
        assert!(result.is_err());
    }
}
