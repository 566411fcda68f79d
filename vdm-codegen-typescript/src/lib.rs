//! TypeScript code generator for vdmgen.
//!
//! Turns a resolved service model into a TypeScript client package built on
//! the `@sap-cloud-sdk/core` runtime.
//!
//! # Usage
//!
//! This crate is used internally by the `vdmgen` CLI tool. You typically don't
//! need to use it directly.
//!
//! ```ignore
//! use std::{path::Path, sync::Arc};
//!
//! use vdmgen_codegen::{language::LanguageCodegen, pipeline::{Pipeline, ServiceInput}};
//! use vdmgen_codegen_typescript::{EmitOptions, Generator, TS_NAMING, TypeScriptTypeMapper};
//!
//! let pipeline = Pipeline::new(TS_NAMING, Arc::new(TypeScriptTypeMapper));
//! let service = pipeline.run(ServiceInput::new("API_TEST_SRV", "API_TEST_SRV.edmx", text))?
//!     .take_service()?;
//!
//! let generator = Generator::new(&service, &EmitOptions::default())?;
//! let result = generator.generate(Path::new("output"))?;
//! ```
//!
//! # Generated Output
//!
//! Per service, below its directory name:
//!
//! - `<Entity>.ts` - entity class, `<Entity>Type` interface and field descriptors
//! - `<Entity>RequestBuilder.ts` - request builder of the entity
//! - `<ComplexType>.ts` - interface, field class and `build` function
//! - `function-imports.ts` - one request builder function per function import
//! - `index.ts` - re-exports
//! - `tsconfig.json` and optionally `package.json`

mod code_file;
mod emitter;
mod generator;
mod naming;
mod type_mapper;

pub mod ast;
pub mod files;

#[cfg(test)]
mod test_support;

pub use code_file::{CodeFile, EmittedContent, EmittedFile, GENERATED_HEADER, RawCode};
pub use emitter::{DEFAULT_PACKAGE_VERSION, EmitOptions, emit_aggregator, emit_service};
pub use generator::Generator;
pub use naming::TS_NAMING;
pub use type_mapper::{CORE_MODULE, TypeScriptTypeMapper};
pub use vdmgen_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile};
