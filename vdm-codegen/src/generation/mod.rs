//! Output management: imports shared by every emitted file.

mod imports;

pub use imports::{ImportCollector, ImportGroup};
