use std::collections::HashMap;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::{step_label, Renderer};
use crate::{config::Config, errors::WatchError};

/// A suite's bar with the signed sum of the deltas it received. The drawn
/// position is that sum clamped at 0.
struct Bar {
    bar: ProgressBar,
    filled: i64,
}

/// Draws one indicatif progress bar per suite.
pub struct BarRenderer {
    multi: MultiProgress,
    running: ProgressStyle,
    failed: ProgressStyle,
    bars: HashMap<String, Bar>,
}

impl BarRenderer {
    /// Build a renderer drawing on `target`. `{color}` in the template is
    /// substituted with `running_color` and `failed_color` to get the two
    /// styles a bar can have.
    pub fn new(
        target: ProgressDrawTarget,
        template: &str,
        running_color: &str,
        failed_color: &str,
    ) -> Result<Self, WatchError> {
        let style = |color: &str| {
            ProgressStyle::with_template(&template.replace("{color}", color))
        };
        Ok(BarRenderer {
            multi: MultiProgress::with_draw_target(target),
            running: style(running_color)?,
            failed: style(failed_color)?,
            bars: HashMap::new(),
        })
    }

    /// Renderer drawing on stderr, or nowhere when `quiet` is set.
    pub fn from_config(conf: &Config, quiet: bool) -> Result<Self, WatchError> {
        let target = if quiet {
            ProgressDrawTarget::hidden()
        } else {
            ProgressDrawTarget::stderr()
        };
        Self::new(
            target,
            conf.template(),
            conf.running_color(),
            conf.failed_color(),
        )
    }

    /// Current position of a suite's bar.
    pub fn position(&self, name: &str) -> Option<u64> {
        self.bars.get(name).map(|bar| bar.bar.position())
    }
}

impl Renderer for BarRenderer {
    fn create(&mut self, name: &str, total: u64, next_step: &str) {
        let bar = self.multi.add(ProgressBar::new(total));
        bar.set_style(self.running.clone());
        bar.set_prefix(name.to_string());
        bar.set_message(step_label(next_step));
        bar.tick();
        if let Some(old) = self.bars.insert(name.to_string(), Bar { bar, filled: 0 }) {
            old.bar.finish_and_clear();
            self.multi.remove(&old.bar);
        }
    }

    fn advance(&mut self, name: &str, delta: i64, next_step: &str) {
        let bar = match self.bars.get_mut(name) {
            Some(bar) => bar,
            None => return,
        };
        bar.filled = bar.filled.saturating_add(delta);
        bar.bar.set_position(bar.filled.max(0) as u64);
        bar.bar.set_message(step_label(next_step));
    }

    fn mark_failed(&mut self, name: &str) {
        if let Some(bar) = self.bars.get(name) {
            bar.bar.set_style(self.failed.clone());
        }
    }

    fn finish(&mut self) {
        for bar in self.bars.values() {
            bar.bar.abandon();
        }
    }
}
