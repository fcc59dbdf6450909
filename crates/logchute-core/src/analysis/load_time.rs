use super::{Accumulator, Statistic, parse_unsigned};
use crate::log::LogRecord;
use crate::{Error, Result};

fn duration_of(record: &LogRecord) -> Result<u64> {
    parse_unsigned("duration_microseconds", &record.duration_microseconds)
}

#[derive(Debug, Default)]
pub struct MinPageLoadTime {
    fastest: Option<u64>,
}

impl Accumulator for MinPageLoadTime {
    fn key(&self) -> &'static str {
        "min_page_load_time"
    }

    fn label(&self) -> &'static str {
        "Min page load time"
    }

    fn process(&mut self, record: &LogRecord) -> Result<()> {
        let duration = duration_of(record)?;
        if self.fastest.is_none_or(|fastest| duration < fastest) {
            self.fastest = Some(duration);
        }
        Ok(())
    }

    fn result(&self) -> Result<Statistic> {
        self.fastest
            .map(Statistic::Micros)
            .ok_or(Error::EmptyStream(self.label()))
    }
}

#[derive(Debug, Default)]
pub struct MaxPageLoadTime {
    slowest: Option<u64>,
}

impl Accumulator for MaxPageLoadTime {
    fn key(&self) -> &'static str {
        "max_page_load_time"
    }

    fn label(&self) -> &'static str {
        "Max page load time"
    }

    fn process(&mut self, record: &LogRecord) -> Result<()> {
        let duration = duration_of(record)?;
        if self.slowest.is_none_or(|slowest| duration > slowest) {
            self.slowest = Some(duration);
        }
        Ok(())
    }

    fn result(&self) -> Result<Statistic> {
        self.slowest
            .map(Statistic::Micros)
            .ok_or(Error::EmptyStream(self.label()))
    }
}

#[derive(Debug, Default)]
pub struct AveragePageLoadTime {
    sum: u64,
    count: u64,
}

impl Accumulator for AveragePageLoadTime {
    fn key(&self) -> &'static str {
        "average_page_load_time"
    }

    fn label(&self) -> &'static str {
        "Average page load time"
    }

    fn process(&mut self, record: &LogRecord) -> Result<()> {
        let duration = duration_of(record)?;
        self.sum = self
            .sum
            .checked_add(duration)
            .ok_or(Error::Overflow(self.label()))?;
        self.count += 1;
        Ok(())
    }

    fn result(&self) -> Result<Statistic> {
        if self.count == 0 {
            return Err(Error::EmptyStream(self.label()));
        }
        Ok(Statistic::AverageMicros(
            self.sum as f64 / self.count as f64,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::counters::tests::record;

    fn took(micros: &str) -> LogRecord {
        LogRecord {
            duration_microseconds: micros.into(),
            ..record("200", "0")
        }
    }

    const DURATIONS: [&str; 5] = ["1500", "20", "999999", "0", "42"];

    #[test]
    fn test_empty_is_no_data() {
        assert!(MinPageLoadTime::default().result().unwrap_err().is_empty_stream());
        assert!(MaxPageLoadTime::default().result().unwrap_err().is_empty_stream());
        assert!(AveragePageLoadTime::default().result().unwrap_err().is_empty_stream());
    }

    #[test]
    fn test_min_and_max() {
        let mut min = MinPageLoadTime::default();
        let mut max = MaxPageLoadTime::default();
        for d in DURATIONS {
            min.process(&took(d)).unwrap();
            max.process(&took(d)).unwrap();
        }

        assert_eq!(min.result().unwrap(), Statistic::Micros(0));
        assert_eq!(max.result().unwrap(), Statistic::Micros(999_999));
    }

    #[test]
    fn test_average_matches_naive_mean() {
        let mut avg = AveragePageLoadTime::default();
        for d in DURATIONS {
            avg.process(&took(d)).unwrap();
        }

        let naive: f64 = DURATIONS
            .iter()
            .map(|d| d.parse::<f64>().unwrap())
            .sum::<f64>()
            / DURATIONS.len() as f64;
        assert_eq!(avg.result().unwrap(), Statistic::AverageMicros(naive));
    }

    #[test]
    fn test_average_of_one() {
        let mut avg = AveragePageLoadTime::default();
        avg.process(&took("1500")).unwrap();
        assert_eq!(avg.result().unwrap(), Statistic::AverageMicros(1500.0));
    }

    #[test]
    fn test_non_numeric_duration() {
        let mut min = MinPageLoadTime::default();
        let err = min.process(&took("fast")).unwrap_err();
        assert!(matches!(
            err,
            Error::FieldConversion {
                field: "duration_microseconds",
                ..
            }
        ));
        assert!(min.result().unwrap_err().is_empty_stream());
    }
}
