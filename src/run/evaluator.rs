use std::io::Write;

use tracing::debug;

use super::{progress::ProgressTracker, summary::SummaryCollector};
use crate::{errors::WatchError, event::ExitSummary, printer::report};

/// Print the final report and compute the verdict of the run.
///
/// Summaries are printed for announced suites only, in announcement order.
/// Suites that never logged a summary are skipped. The aggregate line comes
/// last. The run passed iff the terminal event reports no failures.
pub fn evaluate<W: Write + ?Sized>(
    progress: &ProgressTracker,
    summaries: &mut SummaryCollector,
    exit: &ExitSummary,
    out: &mut W,
) -> Result<bool, WatchError> {
    let mut collected = summaries.drain();

    for name in progress.names() {
        match collected.remove(name) {
            Some(summary) => out.write_all(report::suite_report(name, &summary).as_bytes())?,
            None => debug!("no summary for `{}`", name),
        }
    }
    if !collected.is_empty() {
        debug!("{} summary(ies) for unannounced suites not printed", collected.len());
    }

    out.write_all(report::run_report(exit).as_bytes())?;
    out.flush()?;

    Ok(exit.failed == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        event::{Announcement, Named, Summary},
        printer::testing::Recorder,
    };

    fn tracker(names: &[&str]) -> ProgressTracker {
        let mut tracker = ProgressTracker::default();
        let batch = names
            .iter()
            .map(|n| {
                Named::new(
                    *n,
                    Announcement {
                        total: 1,
                        next_step: "go".to_string(),
                    },
                )
            })
            .collect();
        tracker.on_status(batch, &mut Recorder::default());
        tracker
    }

    fn log(c: &mut SummaryCollector, name: &str, output: &str, failed: u64) {
        c.on_log(Named::new(
            name,
            Summary {
                output: output.to_string(),
                failed,
            },
        ));
    }

    fn exit(failed: u64, output: &str) -> ExitSummary {
        ExitSummary {
            failed,
            output: output.to_string(),
        }
    }

    #[test]
    fn zero_failures_passes() {
        let mut out = Vec::new();
        let ok = evaluate(
            &tracker(&[]),
            &mut SummaryCollector::default(),
            &exit(0, "All suites passed"),
            &mut out,
        )
        .unwrap();
        assert!(ok);
        assert!(String::from_utf8(out).unwrap().contains("All suites passed"));
    }

    #[test]
    fn any_failure_fails() {
        for failed in &[1, 2, 40] {
            let mut out = Vec::new();
            let ok = evaluate(
                &tracker(&[]),
                &mut SummaryCollector::default(),
                &exit(*failed, "nope"),
                &mut out,
            )
            .unwrap();
            assert!(!ok);
        }
    }

    #[test]
    fn summaries_follow_announcement_order() {
        let progress = tracker(&["Zeta", "Alpha", "Mid"]);
        let mut c = SummaryCollector::default();
        log(&mut c, "Mid", "mid output", 0);
        log(&mut c, "Alpha", "alpha output", 1);
        log(&mut c, "Zeta", "zeta output", 0);

        let mut out = Vec::new();
        evaluate(&progress, &mut c, &exit(1, "1 failed"), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        let zeta = out.find("zeta output").unwrap();
        let alpha = out.find("alpha output").unwrap();
        let mid = out.find("mid output").unwrap();
        let total = out.find("1 failed").unwrap();
        assert!(zeta < alpha && alpha < mid && mid < total);
        assert!(c.is_empty());
    }

    #[test]
    fn missing_and_unannounced_summaries_are_skipped() {
        let progress = tracker(&["Known", "Silent"]);
        let mut c = SummaryCollector::default();
        log(&mut c, "Known", "known output", 0);
        log(&mut c, "Stranger", "stranger output", 0);

        let mut out = Vec::new();
        evaluate(&progress, &mut c, &exit(0, "done"), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("known output"));
        assert!(!out.contains("Silent"));
        assert!(!out.contains("stranger output"));
    }
}
