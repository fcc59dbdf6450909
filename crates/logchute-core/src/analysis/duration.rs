use super::{Accumulator, Statistic};
use crate::log::LogRecord;
use crate::{Error, Result};
use chrono::NaiveDateTime;

/// Length of the ` ±HHMM` suffix on every timestamp
const OFFSET_SUFFIX_LEN: usize = 6;
const TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S";

/// Span between the earliest and latest timestamp seen.
///
/// The zone offset is dropped, not applied: each timestamp is read as the
/// wall-clock time of its own offset. Logs that mix offsets get an
/// approximate span.
#[derive(Debug, Default)]
pub struct LogDuration {
    earliest: Option<NaiveDateTime>,
    latest: Option<NaiveDateTime>,
}

impl LogDuration {
    fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
        let local = raw
            .len()
            .checked_sub(OFFSET_SUFFIX_LEN)
            .and_then(|end| raw.get(..end))
            .ok_or_else(|| {
                Error::conversion("timestamp", raw, "too short to carry a zone offset")
            })?;

        NaiveDateTime::parse_from_str(local, TIMESTAMP_FORMAT)
            .map_err(|e| Error::conversion("timestamp", raw, e))
    }
}

impl Accumulator for LogDuration {
    fn key(&self) -> &'static str {
        "log_duration"
    }

    fn label(&self) -> &'static str {
        "Log duration"
    }

    fn process(&mut self, record: &LogRecord) -> Result<()> {
        let at = Self::parse_timestamp(&record.timestamp)?;

        if self.earliest.is_none_or(|earliest| at < earliest) {
            self.earliest = Some(at);
        }
        if self.latest.is_none_or(|latest| at > latest) {
            self.latest = Some(at);
        }
        Ok(())
    }

    fn result(&self) -> Result<Statistic> {
        match (self.earliest, self.latest) {
            (Some(earliest), Some(latest)) => Ok(Statistic::Elapsed(latest - earliest)),
            _ => Err(Error::EmptyStream(self.label())),
        }
    }
}
