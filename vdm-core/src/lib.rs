//! Core utilities and types for vdmgen.
//!
//! This crate provides the casing helpers every naming decision is built on
//! and the primitives used to write generated files to disk.

mod file;
mod utils;

// File operations
pub use file::{File, FileRules, GeneratedFile, Overwrite, WriteResult};
// String utilities
pub use utils::{
    split_words, to_camel_case, to_kebab_case, to_pascal_case, to_upper_snake_case, upper_first,
};
