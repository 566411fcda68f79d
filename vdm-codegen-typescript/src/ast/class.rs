//! TypeScript class builder.

use vdmgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::{Declaration, DeclarationKind, Param, doc_fragments, fns::format_params};

/// A class field.
#[derive(Debug, Clone)]
pub struct Property {
    name: String,
    ty: Option<String>,
    value: Option<String>,
    doc: Option<String>,
    is_static: bool,
    /// `!` (definitely assigned) or `?` (optional) after the name.
    marker: Option<char>,
}

impl Property {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            value: None,
            doc: None,
            is_static: false,
            marker: None,
        }
    }

    pub fn ty(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    /// Initializer expression.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// `name?: T` when nullable, `name!: T` otherwise.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.marker = Some(if nullable { '?' } else { '!' });
        self
    }

    fn declaration(&self) -> String {
        let mut line = String::new();
        if self.is_static {
            line.push_str("static ");
        }
        line.push_str(&self.name);
        if let Some(marker) = self.marker {
            line.push(marker);
        }
        if let Some(ty) = &self.ty {
            line.push_str(": ");
            line.push_str(ty);
        }
        if let Some(value) = &self.value {
            line.push_str(" = ");
            line.push_str(value);
        }
        line.push(';');
        line
    }
}

/// A class method.
#[derive(Debug, Clone)]
pub struct Method {
    name: String,
    doc: Option<String>,
    is_static: bool,
    params: Vec<Param>,
    return_type: Option<String>,
    body: Vec<String>,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            is_static: false,
            params: Vec::new(),
            return_type: None,
            body: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn params(mut self, params: impl IntoIterator<Item = Param>) -> Self {
        self.params.extend(params);
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    /// Add raw body content (can contain multiple lines).
    pub fn body(mut self, content: impl Into<String>) -> Self {
        for line in content.into().lines() {
            self.body.push(line.to_string());
        }
        self
    }

    fn signature(&self) -> String {
        let static_kw = if self.is_static { "static " } else { "" };
        let params = format_params(&self.params);
        match &self.return_type {
            Some(ret) => format!("{}{}({}): {} {{", static_kw, self.name, params, ret),
            None => format!("{}{}({}) {{", static_kw, self.name, params),
        }
    }
}

/// A member of a class body.
#[derive(Debug, Clone)]
pub enum ClassMember {
    Property(Property),
    Method(Method),
}

impl ClassMember {
    fn is_method(&self) -> bool {
        matches!(self, Self::Method(_))
    }

    fn to_fragments(&self) -> Vec<CodeFragment> {
        match self {
            Self::Property(property) => {
                let mut fragments = doc_fragments(&property.doc);
                fragments.push(CodeFragment::Line(property.declaration()));
                fragments
            }
            Self::Method(method) => {
                let mut fragments = doc_fragments(&method.doc);
                let body = method
                    .body
                    .iter()
                    .map(|line| CodeFragment::Line(line.clone()))
                    .collect();
                fragments.push(CodeFragment::braced(method.signature(), body, "}"));
                fragments
            }
        }
    }
}

/// Builder for TypeScript classes.
///
/// Properties are listed without blank lines between them; methods are
/// separated from whatever precedes them by a blank line.
#[derive(Debug, Clone)]
pub struct Class {
    name: String,
    doc: Option<String>,
    type_params: Option<String>,
    extends: Option<String>,
    implements: Vec<String>,
    members: Vec<ClassMember>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            type_params: None,
            extends: None,
            implements: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Type parameter list without angle brackets, e.g. `EntityT extends Entity`.
    pub fn type_params(mut self, params: impl Into<String>) -> Self {
        self.type_params = Some(params.into());
        self
    }

    pub fn extends(mut self, base: impl Into<String>) -> Self {
        self.extends = Some(base.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.implements.push(interface.into());
        self
    }

    pub fn property(mut self, property: Property) -> Self {
        self.members.push(ClassMember::Property(property));
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.members.push(ClassMember::Method(method));
        self
    }

    /// Build the class as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(self);
        builder.build()
    }

    fn header(&self) -> String {
        let mut header = format!("export class {}", self.name);
        if let Some(params) = &self.type_params {
            header.push_str(&format!("<{}>", params));
        }
        if let Some(base) = &self.extends {
            header.push_str(&format!(" extends {}", base));
        }
        if !self.implements.is_empty() {
            header.push_str(&format!(" implements {}", self.implements.join(", ")));
        }
        header.push_str(" {");
        header
    }
}

impl Renderable for Class {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut body = Vec::new();
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 && member.is_method() {
                body.push(CodeFragment::Blank);
            }
            body.extend(member.to_fragments());
        }

        let mut fragments = doc_fragments(&self.doc);
        fragments.push(CodeFragment::braced(self.header(), body, "}"));
        fragments
    }
}

impl Declaration for Class {
    fn kind(&self) -> DeclarationKind {
        DeclarationKind::Class
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_class() {
        let c = Class::new("Empty").build();
        assert_eq!(c, "export class Empty {\n}\n");
    }

    #[test]
    fn test_class_header() {
        let c = Class::new("TestComplexTypeField")
            .type_params("EntityT extends Entity")
            .extends("ComplexTypeField<EntityT>")
            .build();
        assert_eq!(
            c,
            "export class TestComplexTypeField<EntityT extends Entity> extends ComplexTypeField<EntityT> {\n}\n"
        );

        let c = Class::new("TestEntity")
            .extends("Entity")
            .implements("TestEntityType")
            .build();
        assert!(c.starts_with("export class TestEntity extends Entity implements TestEntityType {"));
    }

    #[test]
    fn test_properties() {
        let c = Class::new("TestEntity")
            .property(Property::new("_entityName").static_().value("'A_TestEntity'"))
            .property(Property::new("keyPropertyGuid").ty("string").nullable(false))
            .property(Property::new("stringProperty").ty("string").nullable(true))
            .build();
        assert_eq!(
            c,
            "export class TestEntity {\n  static _entityName = 'A_TestEntity';\n  keyPropertyGuid!: string;\n  stringProperty?: string;\n}\n"
        );
    }

    #[test]
    fn test_methods_are_separated() {
        let c = Class::new("TestEntityRequestBuilder")
            .property(Property::new("x").ty("number"))
            .method(
                Method::new("getAll")
                    .returns("GetAllRequestBuilder<TestEntity>")
                    .body("return new GetAllRequestBuilder(TestEntity);"),
            )
            .method(
                Method::new("builder")
                    .static_()
                    .doc("Returns an entity builder.")
                    .param(Param::new("a", "string")),
            )
            .build();
        assert_eq!(
            c,
            "export class TestEntityRequestBuilder {\n  x: number;\n\n  getAll(): GetAllRequestBuilder<TestEntity> {\n    return new GetAllRequestBuilder(TestEntity);\n  }\n\n  /**\n   * Returns an entity builder.\n   */\n  static builder(a: string) {\n  }\n}\n"
        );
    }
}
