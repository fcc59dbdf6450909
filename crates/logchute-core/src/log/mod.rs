mod parser;
mod reader;
mod types;

pub use parser::{GrammarMode, LineParser};
pub use reader::{LogReader, ScanSummary};
pub use types::*;
