use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot convert {field} value '{value}': {reason}")]
    FieldConversion {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0}: no data")]
    EmptyStream(&'static str),

    #[error("{0}: running total overflowed")]
    Overflow(&'static str),
}

impl Error {
    pub(crate) fn conversion(
        field: &'static str,
        value: &str,
        reason: impl std::fmt::Display,
    ) -> Self {
        Error::FieldConversion {
            field,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// True when the error only means no records reached the accumulator.
    pub fn is_empty_stream(&self) -> bool {
        matches!(self, Error::EmptyStream(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
