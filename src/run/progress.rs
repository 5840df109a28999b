use std::{collections::HashMap, convert::TryFrom};

use tracing::{debug, warn};

use crate::{
    event::{Announcement, Named, Progress},
    printer::Renderer,
};

/// Live state of an announced suite.
#[derive(Debug, Clone, PartialEq)]
pub struct Suite {
    /// Number of steps in the suite.
    pub total: u64,
    /// Steps left to run, as last reported.
    pub remaining: u64,
    /// Label of the step about to run.
    pub next_step: String,
    /// Set once a failure has been reported. Never cleared.
    pub failed: bool,
    /// Steps drawn so far. Always `total - remaining` of the last update.
    pub tick: i64,
}

impl Suite {
    fn new(announcement: Announcement) -> Self {
        Suite {
            total: announcement.total,
            remaining: announcement.total,
            next_step: announcement.next_step,
            failed: false,
            tick: 0,
        }
    }
}

/// Clamp a signed step count into the range of a tick.
fn clamp_steps(steps: i128, name: &str) -> i64 {
    i64::try_from(steps).unwrap_or_else(|_| {
        warn!("suite `{}` reported an out of range step count {}", name, steps);
        if steps < 0 {
            i64::MIN
        } else {
            i64::MAX
        }
    })
}

/// Tracks the progress of every suite announced during a run.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    suites: HashMap<String, Suite>,
    /// Suite names in order of first announcement.
    order: Vec<String>,
}

impl ProgressTracker {
    /// Register announced suites and start drawing them.
    /// Announcing a name again starts that suite over.
    pub fn on_status<R: Renderer + ?Sized>(
        &mut self,
        batch: Vec<Named<Announcement>>,
        renderer: &mut R,
    ) {
        for Named { name, value } in batch {
            renderer.create(&name, value.total, &value.next_step);
            let suite = Suite::new(value);
            match self.suites.insert(name.clone(), suite) {
                Some(_) => debug!("suite `{}` announced again, progress reset", name),
                None => {
                    debug!("suite `{}` announced", name);
                    self.order.push(name);
                }
            }
        }
    }

    /// Apply progress reports. Reports for suites that were never announced
    /// are dropped.
    pub fn on_status_update<R: Renderer + ?Sized>(
        &mut self,
        batch: Vec<Named<Progress>>,
        renderer: &mut R,
    ) {
        for Named { name, value } in batch {
            let suite = match self.suites.get_mut(&name) {
                Some(suite) => suite,
                None => {
                    debug!("progress for unknown suite `{}` ignored", name);
                    continue;
                }
            };

            let done = clamp_steps(
                i128::from(value.total) - i128::from(value.remaining),
                &name,
            );
            let delta = clamp_steps(i128::from(done) - i128::from(suite.tick), &name);
            if delta < 0 {
                warn!(
                    "suite `{}` moved backwards by {} step(s)",
                    name,
                    delta.unsigned_abs()
                );
            }

            if value.failed && !suite.failed {
                suite.failed = true;
                renderer.mark_failed(&name);
            }

            suite.tick = done;
            suite.total = value.total;
            suite.remaining = value.remaining;
            suite.next_step = value.next_step;
            renderer.advance(&name, delta, &suite.next_step);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Suite> {
        self.suites.get(name)
    }

    /// Names of all announced suites, in order of first announcement.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
