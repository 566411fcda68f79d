//! TypeScript AST builders for generating declarations, imports and exports.
//!
//! These provide a high-level API for constructing TypeScript syntax,
//! which can then be rendered via CodeBuilder.

mod class;
mod consts;
mod exports;
mod fns;
mod imports;
mod interface;
mod namespace;

use vdmgen_codegen::builder::{CodeFragment, Renderable};

pub use class::{Class, ClassMember, Method, Property};
pub use consts::Const;
pub use exports::Export;
pub use fns::{Fn, Param};
pub use imports::Import;
pub use interface::{Interface, InterfaceField};
pub use namespace::Namespace;

/// What a top-level statement of a file declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Class,
    Interface,
    Namespace,
    Function,
    Const,
    /// Anything else, e.g. raw code.
    Statement,
}

/// A top-level statement of a TypeScript file.
pub trait Declaration: Renderable {
    fn kind(&self) -> DeclarationKind;
}

/// Render an optional doc text as fragments, nothing when empty.
fn doc_fragments(doc: &Option<String>) -> Vec<CodeFragment> {
    doc.as_deref()
        .filter(|text| !text.trim().is_empty())
        .map(|text| vec![CodeFragment::doc(text)])
        .unwrap_or_default()
}
