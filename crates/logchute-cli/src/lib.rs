use clap::ValueEnum;
use std::fmt;

pub mod commands;

/// How the statistics report is written to stdout
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Styled, aligned labels for terminals
    #[default]
    Pretty,
    /// The whole report, including line accounting, as one JSON document
    Json,
    /// `Metric,Value` rows; cells with commas or quotes are quoted
    Table,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Pretty => "pretty",
            OutputFormat::Json => "json",
            OutputFormat::Table => "table",
        };
        f.write_str(name)
    }
}
