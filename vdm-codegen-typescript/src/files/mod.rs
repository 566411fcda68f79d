//! Package-level artifacts next to the generated sources.

mod package_json;
mod tsconfig;

pub use package_json::{Dependency, PackageJson};
pub use tsconfig::TsConfig;
