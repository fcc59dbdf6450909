mod counters;
mod duration;
mod frequency;
mod load_time;
mod pipeline;

pub use counters::{LineCount, NumberOfErrors, TotalDataTransfered};
pub use duration::LogDuration;
pub use frequency::{MostFrequentVisitor, MostRequestedPage};
pub use load_time::{AveragePageLoadTime, MaxPageLoadTime, MinPageLoadTime};
pub use pipeline::{AggregationPipeline, Outcome};

use crate::log::LogRecord;
use crate::{Error, Result};
use chrono::TimeDelta;
use serde::{Serialize, Serializer};
use std::fmt;

/// A stateful consumer of parsed records with a single derived result.
///
/// Implementations own their state outright and never look at each other.
pub trait Accumulator {
    /// Machine-readable identifier, used as the JSON key
    fn key(&self) -> &'static str;

    /// Human-readable label
    fn label(&self) -> &'static str;

    fn process(&mut self, record: &LogRecord) -> Result<()>;

    fn result(&self) -> Result<Statistic>;
}

/// Final value produced by an accumulator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Statistic {
    Count(u64),
    /// Serialized as whole seconds
    Elapsed(#[serde(serialize_with = "serialize_seconds")] TimeDelta),
    Key(String),
    Micros(u64),
    AverageMicros(f64),
    Bytes(u64),
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statistic::Count(n) => write!(f, "{}", n),
            Statistic::Elapsed(delta) => f.write_str(&format_elapsed(*delta)),
            Statistic::Key(key) => f.write_str(key),
            Statistic::Micros(us) => write!(f, "{} µs", us),
            Statistic::AverageMicros(us) => write!(f, "{:.2} µs", us),
            Statistic::Bytes(n) => write!(f, "{} bytes", n),
        }
    }
}

fn serialize_seconds<S>(delta: &TimeDelta, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_i64(delta.num_seconds())
}

/// Render an elapsed span as `H:MM:SS`, prefixed with the day count when
/// the span is a day or longer.
pub fn format_elapsed(delta: TimeDelta) -> String {
    let sign = if delta < TimeDelta::zero() { "-" } else { "" };
    let total = delta.num_seconds().unsigned_abs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    match days {
        0 => format!("{sign}{hours}:{minutes:02}:{seconds:02}"),
        1 => format!("{sign}1 day, {hours}:{minutes:02}:{seconds:02}"),
        n => format!("{sign}{n} days, {hours}:{minutes:02}:{seconds:02}"),
    }
}

/// Parse a digit-only field captured by the grammar
fn parse_unsigned(field: &'static str, value: &str) -> Result<u64> {
    value
        .parse::<u64>()
        .map_err(|e| Error::conversion(field, value, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(TimeDelta::zero()), "0:00:00");
        assert_eq!(format_elapsed(TimeDelta::seconds(3_661)), "1:01:01");
        assert_eq!(format_elapsed(TimeDelta::seconds(86_400 + 60)), "1 day, 0:01:00");
        assert_eq!(format_elapsed(TimeDelta::seconds(3 * 86_400 + 7)), "3 days, 0:00:07");
    }

    #[test]
    fn test_statistic_display() {
        assert_eq!(Statistic::Count(3).to_string(), "3");
        assert_eq!(Statistic::Micros(1500).to_string(), "1500 µs");
        assert_eq!(Statistic::AverageMicros(1500.0).to_string(), "1500.00 µs");
        assert_eq!(Statistic::Bytes(2326).to_string(), "2326 bytes");
        assert_eq!(Statistic::Key("/".into()).to_string(), "/");
    }

    #[test]
    fn test_parse_unsigned_rejects_overflow() {
        assert_eq!(parse_unsigned("size_bytes", "42").unwrap(), 42);

        let err = parse_unsigned("size_bytes", "99999999999999999999999").unwrap_err();
        assert!(matches!(
            err,
            Error::FieldConversion {
                field: "size_bytes",
                ..
            }
        ));
    }
}
