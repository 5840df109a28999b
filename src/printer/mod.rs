//! Presentation of a run: live progress bars and the final report.
pub mod bar;
pub mod report;

pub use bar::BarRenderer;

/// Turns progress changes of suites into visual output.
///
/// Implementations keep no knowledge of a suite's logical state. The caller
/// guarantees that the sum of all deltas passed to `advance` for a suite is
/// the suite's tick count, and that `mark_failed` is called at most once per
/// announcement.
pub trait Renderer {
    /// Start displaying a suite at 0 of `total`. Replaces any previous
    /// display with the same name.
    fn create(&mut self, name: &str, total: u64, next_step: &str);

    /// Move the suite forward by `delta` steps (backwards when negative) and
    /// show the new step label.
    fn advance(&mut self, name: &str, delta: i64, next_step: &str);

    /// Switch the suite to its failed look for the rest of the run.
    fn mark_failed(&mut self, name: &str);

    /// Called once when the run is over, before the report is printed.
    fn finish(&mut self) {}
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn create(&mut self, name: &str, total: u64, next_step: &str) {
        (**self).create(name, total, next_step)
    }

    fn advance(&mut self, name: &str, delta: i64, next_step: &str) {
        (**self).advance(name, delta, next_step)
    }

    fn mark_failed(&mut self, name: &str) {
        (**self).mark_failed(name)
    }

    fn finish(&mut self) {
        (**self).finish()
    }
}

/// Label shown under a bar for the step about to run.
pub fn step_label(next_step: &str) -> String {
    format!("→ {}", next_step)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Renderer;

    /// One call made on a [Renderer].
    #[derive(Debug, Clone, PartialEq)]
    pub enum Effect {
        Create(String, u64, String),
        Advance(String, i64, String),
        Failed(String),
        Finish,
    }

    /// Renderer that remembers what it was asked to draw.
    #[derive(Debug, Default)]
    pub struct Recorder {
        pub effects: Vec<Effect>,
    }

    impl Recorder {
        /// Sum of all deltas drawn for `name` since its last creation.
        pub fn filled(&self, name: &str) -> i64 {
            let mut filled = 0;
            for effect in &self.effects {
                match effect {
                    Effect::Create(n, ..) if n == name => filled = 0,
                    Effect::Advance(n, delta, _) if n == name => filled += delta,
                    _ => (),
                }
            }
            filled
        }

        pub fn is_failed(&self, name: &str) -> bool {
            let mut failed = false;
            for effect in &self.effects {
                match effect {
                    Effect::Create(n, ..) if n == name => failed = false,
                    Effect::Failed(n) if n == name => failed = true,
                    _ => (),
                }
            }
            failed
        }
    }

    impl Renderer for Recorder {
        fn create(&mut self, name: &str, total: u64, next_step: &str) {
            self.effects
                .push(Effect::Create(name.into(), total, next_step.into()));
        }

        fn advance(&mut self, name: &str, delta: i64, next_step: &str) {
            self.effects
                .push(Effect::Advance(name.into(), delta, next_step.into()));
        }

        fn mark_failed(&mut self, name: &str) {
            self.effects.push(Effect::Failed(name.into()));
        }

        fn finish(&mut self) {
            self.effects.push(Effect::Finish);
        }
    }
}
