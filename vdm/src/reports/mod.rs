//! Report data structures for commands.
//!
//! Operations build reports, commands render them to an Output target.

mod check;
mod generate;
mod output;

pub use check::{CheckReport, ServiceCheck};
pub use generate::{
    GenerateReport, GenerationResult, PreviewFile, PreviewResult, ServiceFailure, ServiceSummary,
    WrittenResult,
};
pub use output::{Report, TerminalOutput};

/// `1 file`, `2 files`.
fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}
