//! Consumption of a worker's event stream: progress, summaries, screenshots
//! and the final verdict of a run.
pub mod artifacts;
pub mod evaluator;
pub mod progress;
pub mod summary;
mod context;

pub use artifacts::{sanitize, ArtifactWriter};
pub use context::RunContext;
pub use progress::{ProgressTracker, Suite};
pub use summary::SummaryCollector;

use std::io::Write;

use crate::{errors::WatchError, printer::Renderer, worker::{self, Worker}};

/// Attach to `worker` on `port` and process its events until the run ends.
/// Returns whether the run passed.
pub async fn watch<K, R, W>(
    worker: &mut K,
    port: Option<&str>,
    mut ctx: RunContext<R, W>,
) -> Result<bool, WatchError>
where
    K: Worker + ?Sized,
    R: Renderer,
    W: Write,
{
    let events = worker::attach(worker, port)?;
    ctx.drive(events).await
}
