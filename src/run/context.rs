use std::io::Write;

use tracing::{debug, info, trace};

use super::{
    artifacts::ArtifactWriter, evaluator, progress::ProgressTracker,
    summary::SummaryCollector,
};
use crate::{errors::WatchError, event::Event, printer::Renderer, worker::Subscription};

/// State of a single run. Created when the run starts and dropped when it
/// ends. Every event is applied to it in arrival order by [RunContext::dispatch].
pub struct RunContext<R, W> {
    /// Progress of announced suites.
    pub progress: ProgressTracker,
    /// Last summary of each suite.
    pub summaries: SummaryCollector,
    /// Where screenshots go.
    pub artifacts: ArtifactWriter,
    /// Live progress display.
    pub renderer: R,
    /// Sink of the final report.
    pub out: W,
}

impl<R: Renderer, W: Write> RunContext<R, W> {
    pub fn new(renderer: R, artifacts: ArtifactWriter, out: W) -> Self {
        RunContext {
            progress: ProgressTracker::default(),
            summaries: SummaryCollector::default(),
            artifacts,
            renderer,
            out,
        }
    }

    /// Apply one event. Returns the verdict once the terminal event arrives
    /// and `None` before that.
    pub fn dispatch(&mut self, event: Event) -> Result<Option<bool>, WatchError> {
        trace!("dispatching `{}` event", event.tag());
        match event {
            Event::Status(batch) => self.progress.on_status(batch, &mut self.renderer),
            Event::StatusUpdate(batch) => {
                self.progress.on_status_update(batch, &mut self.renderer)
            }
            Event::Log(entry) => self.summaries.on_log(entry),
            Event::Screenshots(batch) => {
                self.artifacts.on_screenshots(&batch)?;
            }
            Event::Exit(exit) => {
                self.renderer.finish();
                let verdict = evaluator::evaluate(
                    &self.progress,
                    &mut self.summaries,
                    &exit,
                    &mut self.out,
                )?;
                info!(
                    "run finished with {} failure(s) across {} suite(s)",
                    exit.failed,
                    self.progress.len()
                );
                return Ok(Some(verdict));
            }
            Event::Unknown(tag) => debug!("ignoring unknown event `{}`", tag),
        }
        Ok(None)
    }

    /// Consume events from the subscription until the terminal event, then
    /// unsubscribe. Fails if the worker goes away before the run is over.
    pub async fn drive(&mut self, mut events: Subscription) -> Result<bool, WatchError> {
        while let Some(event) = events.next().await {
            if let Some(verdict) = self.dispatch(event?)? {
                events.unsubscribe();
                return Ok(verdict);
            }
        }
        Err(WatchError(format!(
            "worker closed port `{}` before the exit event",
            events.channel()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        event::{ExitSummary, Named, Summary},
        printer::testing::{Effect, Recorder},
    };

    fn context(root: &std::path::Path) -> RunContext<Recorder, Vec<u8>> {
        RunContext::new(Recorder::default(), ArtifactWriter::new(root), Vec::new())
    }

    fn ev(src: &str) -> Event {
        Event::from_json(src).unwrap()
    }

    #[test]
    fn routes_events_by_tag() {
        let tmp = tempfile::tempdir().unwrap();
        let mut ctx = context(tmp.path());

        let events = vec![
            ev(r#"{"name":"status","value":[{"name":"Login","value":{"total":5,"nextStep":"open"}}]}"#),
            ev(r#"{"name":"statusUpdate","value":[{"name":"Login","value":{"total":5,"remaining":3,"nextStep":"click","failed":false}}]}"#),
            ev(r#"{"name":"log","value":{"name":"Login","value":{"output":"ok","failed":0}}}"#),
            ev(r#"{"name":"screenshots","value":{"name":"Login","shots":["aGk="]}}"#),
        ];
        for event in events {
            assert_eq!(ctx.dispatch(event).unwrap(), None);
        }

        assert_eq!(ctx.progress.get("Login").unwrap().tick, 2);
        assert_eq!(ctx.summaries.get("Login").unwrap().output, "ok");
        assert_eq!(
            std::fs::read(tmp.path().join("Login").join("0.png")).unwrap(),
            b"hi"
        );
        assert_eq!(ctx.renderer.filled("Login"), 2);
    }

    #[test]
    fn unknown_events_change_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let mut ctx = context(tmp.path());
        assert_eq!(ctx.dispatch(Event::Unknown("ping".into())).unwrap(), None);
        assert!(ctx.progress.is_empty());
        assert!(ctx.summaries.is_empty());
        assert!(ctx.renderer.effects.is_empty());
    }

    #[test]
    fn exit_finishes_bars_then_reports() {
        let tmp = tempfile::tempdir().unwrap();
        let mut ctx = context(tmp.path());
        ctx.dispatch(Event::Log(Named::new(
            "Stray",
            Summary {
                output: "stray".into(),
                failed: 0,
            },
        )))
        .unwrap();
        let verdict = ctx
            .dispatch(Event::Exit(ExitSummary {
                failed: 0,
                output: "All suites passed".into(),
            }))
            .unwrap();

        assert_eq!(verdict, Some(true));
        assert_eq!(ctx.renderer.effects, vec![Effect::Finish]);
        assert!(String::from_utf8_lossy(&ctx.out).contains("All suites passed"));
    }

    #[test]
    fn screenshot_failure_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let mut ctx = context(&blocker);
        let res = ctx.dispatch(ev(
            r#"{"name":"screenshots","value":{"name":"Login","shots":["aGk="]}}"#,
        ));
        assert!(res.is_err());
    }
}
