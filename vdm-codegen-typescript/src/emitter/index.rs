//! `index.ts` re-exporting every module of a service.

use super::sibling;
use crate::{ast::Export, code_file::CodeFile};

pub(crate) fn index_file(modules: &[String]) -> CodeFile {
    CodeFile::new().exports(modules.iter().map(|module| Export::from(sibling(module))))
}
