//! Code builder utility for generating properly indented code.

use super::{CodeFragment, Indent, Renderable};

/// Accumulates indented lines.
///
/// ```
/// use vdmgen_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::typescript();
/// builder
///     .push_line("function main() {")
///     .push_indent()
///     .push_line("return 1;")
///     .push_dedent()
///     .push_line("}");
///
/// assert_eq!(builder.build(), "function main() {\n  return 1;\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    unit: String,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            unit: indent.unit(),
            buffer: String::new(),
        }
    }

    /// 2-space indentation.
    pub fn typescript() -> Self {
        Self::new(Indent::TYPESCRIPT)
    }

    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a block doc comment:
    ///
    /// ```text
    /// /**
    ///  * line
    ///  */
    /// ```
    pub fn push_doc<S: AsRef<str>>(&mut self, lines: &[S]) -> &mut Self {
        if lines.is_empty() {
            return self;
        }
        self.push_line("/**");
        for line in lines {
            let line = line.as_ref().trim_end();
            if line.is_empty() {
                self.push_line(" *");
            } else {
                self.push_line(&format!(" * {}", line));
            }
        }
        self.push_line(" */")
    }

    /// Emit a Renderable node.
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(fragment);
        }
        self
    }

    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(&header);
                self.push_indent();
                for f in body {
                    self.apply_fragment(f);
                }
                self.push_dedent();
                if let Some(c) = close {
                    self.push_line(&c);
                }
            }
            CodeFragment::Indent(fragments) => {
                self.push_indent();
                for f in fragments {
                    self.apply_fragment(f);
                }
                self.push_dedent();
            }
            CodeFragment::Sequence(fragments) => {
                for f in fragments {
                    self.apply_fragment(f);
                }
            }
            CodeFragment::Doc(lines) => {
                self.push_doc(&lines);
            }
        }
    }

    pub fn line(mut self, s: &str) -> Self {
        self.push_line(s);
        self
    }

    pub fn build(self) -> String {
        self.buffer
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(&self.unit);
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::typescript()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_comment() {
        let mut builder = CodeBuilder::typescript();
        builder
            .push_indent()
            .push_doc(&["Key Property Guid.", "", "@nullable"])
            .push_line("keyPropertyGuid!: string;");

        assert_eq!(
            builder.build(),
            "  /**\n   * Key Property Guid.\n   *\n   * @nullable\n   */\n  keyPropertyGuid!: string;\n"
        );
    }

    #[test]
    fn test_empty_doc_is_skipped() {
        let mut builder = CodeBuilder::typescript();
        builder.push_doc::<&str>(&[]).push_line("x;");
        assert_eq!(builder.build(), "x;\n");
    }

    #[test]
    fn test_mutable_api() {
        let mut builder = CodeBuilder::typescript();
        builder
            .push_line("function foo() {")
            .push_indent()
            .push_line("return 1;")
            .push_dedent()
            .push_line("}")
            .push_blank();
        assert_eq!(builder.as_str(), "function foo() {\n  return 1;\n}\n\n");
    }

    #[test]
    fn test_emit_nested_fragments() {
        struct Node;
        impl Renderable for Node {
            fn to_fragments(&self) -> Vec<CodeFragment> {
                vec![
                    CodeFragment::doc("A namespace"),
                    CodeFragment::braced(
                        "export namespace Meal {",
                        vec![CodeFragment::braced(
                            "export function build() {",
                            vec![CodeFragment::line("return 1;")],
                            "}",
                        )],
                        "}",
                    ),
                ]
            }
        }

        let mut builder = CodeBuilder::typescript();
        builder.emit(&Node);
        assert_eq!(
            builder.build(),
            "/**\n * A namespace\n */\nexport namespace Meal {\n  export function build() {\n    return 1;\n  }\n}\n"
        );
    }
}
