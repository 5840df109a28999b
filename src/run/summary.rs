use std::collections::HashMap;

use tracing::debug;

use crate::event::{Named, Summary};

/// Last summary reported for each suite.
#[derive(Debug, Default)]
pub struct SummaryCollector {
    summaries: HashMap<String, Summary>,
}

impl SummaryCollector {
    /// Record a summary, replacing any earlier one for the same suite.
    /// The suite doesn't have to be known to the progress tracker.
    pub fn on_log(&mut self, entry: Named<Summary>) {
        debug!("summary recorded for `{}`", entry.name);
        self.summaries.insert(entry.name, entry.value);
    }

    pub fn get(&self, name: &str) -> Option<&Summary> {
        self.summaries.get(name)
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Take every summary out of the collector.
    pub fn drain(&mut self) -> HashMap<String, Summary> {
        std::mem::take(&mut self.summaries)
    }
}
