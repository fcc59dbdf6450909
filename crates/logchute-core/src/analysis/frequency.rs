use super::{Accumulator, Statistic};
use crate::log::LogRecord;
use crate::{Error, Result};
use std::collections::HashMap;

/// Occurrence counts per key with the current leader cached.
///
/// A key takes the lead when its count after an increment is at least the
/// leader's count, so on ties the most recently incremented key wins.
#[derive(Debug, Default)]
struct KeyFrequency {
    counts: HashMap<String, u64>,
    leader: Option<(String, u64)>,
}

impl KeyFrequency {
    fn increment(&mut self, key: &str) {
        let count = match self.counts.get_mut(key) {
            Some(count) => {
                *count += 1;
                *count
            }
            None => {
                self.counts.insert(key.to_string(), 1);
                1
            }
        };

        let takes_lead = match &mut self.leader {
            Some((leader, best)) if leader.as_str() == key => {
                *best = count;
                false
            }
            Some((_, best)) => count >= *best,
            None => true,
        };
        if takes_lead {
            self.leader = Some((key.to_string(), count));
        }
    }

    fn leader(&self) -> Option<&str> {
        self.leader.as_ref().map(|(key, _)| key.as_str())
    }
}

/// Request line seen most often
#[derive(Debug, Default)]
pub struct MostRequestedPage {
    pages: KeyFrequency,
}

impl Accumulator for MostRequestedPage {
    fn key(&self) -> &'static str {
        "most_requested_page"
    }

    fn label(&self) -> &'static str {
        "Most requested page"
    }

    fn process(&mut self, record: &LogRecord) -> Result<()> {
        self.pages.increment(&record.request_line);
        Ok(())
    }

    fn result(&self) -> Result<Statistic> {
        self.pages
            .leader()
            .map(|page| Statistic::Key(page.to_string()))
            .ok_or(Error::EmptyStream(self.label()))
    }
}

/// Client address seen most often
#[derive(Debug, Default)]
pub struct MostFrequentVisitor {
    visitors: KeyFrequency,
}

impl Accumulator for MostFrequentVisitor {
    fn key(&self) -> &'static str {
        "most_frequent_visitor"
    }

    fn label(&self) -> &'static str {
        "Most frequent visitor"
    }

    fn process(&mut self, record: &LogRecord) -> Result<()> {
        self.visitors.increment(&record.client_ip);
        Ok(())
    }

    fn result(&self) -> Result<Statistic> {
        self.visitors
            .leader()
            .map(|ip| Statistic::Key(ip.to_string()))
            .ok_or(Error::EmptyStream(self.label()))
    }
}
