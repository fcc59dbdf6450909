use super::{Accumulator, Statistic, parse_unsigned};
use crate::log::LogRecord;
use crate::{Error, Result};

/// Status codes at or above this value count as errors
const ERROR_STATUS_THRESHOLD: u64 = 400;

#[derive(Debug, Default)]
pub struct LineCount {
    count: u64,
}

impl Accumulator for LineCount {
    fn key(&self) -> &'static str {
        "line_count"
    }

    fn label(&self) -> &'static str {
        "Line count"
    }

    fn process(&mut self, _record: &LogRecord) -> Result<()> {
        self.count += 1;
        Ok(())
    }

    fn result(&self) -> Result<Statistic> {
        Ok(Statistic::Count(self.count))
    }
}

#[derive(Debug, Default)]
pub struct NumberOfErrors {
    errors: u64,
}

impl Accumulator for NumberOfErrors {
    fn key(&self) -> &'static str {
        "number_of_errors"
    }

    fn label(&self) -> &'static str {
        "Number of errors"
    }

    fn process(&mut self, record: &LogRecord) -> Result<()> {
        let status = parse_unsigned("status_code", &record.status_code)?;
        if status >= ERROR_STATUS_THRESHOLD {
            self.errors += 1;
        }
        Ok(())
    }

    fn result(&self) -> Result<Statistic> {
        Ok(Statistic::Count(self.errors))
    }
}

#[derive(Debug, Default)]
pub struct TotalDataTransfered {
    total: u64,
}

impl Accumulator for TotalDataTransfered {
    fn key(&self) -> &'static str {
        "total_data_transferred"
    }

    fn label(&self) -> &'static str {
        "Total data transferred"
    }

    fn process(&mut self, record: &LogRecord) -> Result<()> {
        let size = parse_unsigned("size_bytes", &record.size_bytes)?;
        self.total = self
            .total
            .checked_add(size)
            .ok_or(Error::Overflow(self.label()))?;
        Ok(())
    }

    fn result(&self) -> Result<Statistic> {
        Ok(Statistic::Bytes(self.total))
    }
}
