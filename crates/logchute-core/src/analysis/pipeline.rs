use super::{
    Accumulator, AveragePageLoadTime, LineCount, LogDuration, MaxPageLoadTime, MinPageLoadTime,
    MostFrequentVisitor, MostRequestedPage, NumberOfErrors, Statistic, TotalDataTransfered,
};
use crate::log::LogRecord;
use crate::{Error, Result};

struct Slot {
    accumulator: Box<dyn Accumulator>,
    failure: Option<Error>,
}

/// Result of one accumulator after the stream ends
#[derive(Debug)]
pub struct Outcome {
    pub key: &'static str,
    pub label: &'static str,
    pub result: Result<Statistic>,
}

impl Outcome {
    /// A conversion or overflow error, as opposed to "no data"
    pub fn is_failure(&self) -> bool {
        self.result.as_ref().is_err_and(|e| !e.is_empty_stream())
    }
}

/// Fans every record out to the registered accumulators in order.
///
/// An accumulator whose `process` fails keeps its first error and receives
/// no further records; the others carry on.
#[derive(Default)]
pub struct AggregationPipeline {
    slots: Vec<Slot>,
}

impl AggregationPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// All nine statistics in report order
    pub fn standard() -> Self {
        let mut pipeline = Self::new();
        pipeline.register(LineCount::default());
        pipeline.register(LogDuration::default());
        pipeline.register(MostRequestedPage::default());
        pipeline.register(MostFrequentVisitor::default());
        pipeline.register(MinPageLoadTime::default());
        pipeline.register(MaxPageLoadTime::default());
        pipeline.register(AveragePageLoadTime::default());
        pipeline.register(NumberOfErrors::default());
        pipeline.register(TotalDataTransfered::default());
        pipeline
    }

    pub fn register<A: Accumulator + 'static>(&mut self, accumulator: A) {
        tracing::debug!("Registering accumulator: {}", accumulator.key());
        self.slots.push(Slot {
            accumulator: Box::new(accumulator),
            failure: None,
        });
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn feed(&mut self, record: &LogRecord) {
        for slot in self.slots.iter_mut().filter(|s| s.failure.is_none()) {
            if let Err(e) = slot.accumulator.process(record) {
                tracing::warn!("{} stopped: {}", slot.accumulator.label(), e);
                slot.failure = Some(e);
            }
        }
    }

    /// Collect every accumulator's result in registration order
    pub fn finalize(self) -> Vec<Outcome> {
        self.slots
            .into_iter()
            .map(|slot| Outcome {
                key: slot.accumulator.key(),
                label: slot.accumulator.label(),
                result: match slot.failure {
                    Some(e) => Err(e),
                    None => slot.accumulator.result(),
                },
            })
            .collect()
    }
}
