use futures::stream;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::trace;

use super::{Subscription, Worker};
use crate::{errors::WatchError, event::Event};

/// Worker whose output is newline-delimited JSON, one event per line.
///
/// A line may carry a `"port"` field naming the port it was emitted on.
/// Lines for other ports than the subscribed one are skipped; lines without
/// the field belong to every port.
pub struct LineWorker<R> {
    source: String,
    ports: Vec<String>,
    reader: Option<R>,
}

impl<R> LineWorker<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    /// `source` names the single entry point, usually the file the lines
    /// come from.
    pub fn new<S: Into<String>>(source: S, reader: R, ports: Vec<String>) -> Self {
        LineWorker {
            source: source.into(),
            ports,
            reader: Some(reader),
        }
    }
}

/// Decode one line. `None` for lines that carry no event for `channel`.
fn decode_line(line: &str, channel: &str) -> Result<Option<Event>, WatchError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let mut value: Value = serde_json::from_str(line)?;
    if let Some(port) = value.as_object_mut().and_then(|obj| obj.remove("port")) {
        match port.as_str() {
            Some(port) if port == channel => (),
            Some(port) => {
                trace!("skipping event for port `{}`", port);
                return Ok(None);
            }
            None => {
                return Err(WatchError(
                    "malformed worker event: `port` must be a string".to_string(),
                ))
            }
        }
    }
    Event::from_value(value).map(Some)
}

impl<R> Worker for LineWorker<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    fn entry_points(&self) -> Vec<String> {
        vec![self.source.clone()]
    }

    fn channels(&self) -> Vec<String> {
        self.ports.clone()
    }

    fn subscribe(&mut self, channel: &str) -> Result<Subscription, WatchError> {
        if !self.ports.iter().any(|port| port == channel) {
            return Err(WatchError(format!("Unknown port `{}`", channel)));
        }
        let reader = self.reader.take().ok_or_else(|| {
            WatchError(format!("{} is already being read", self.source))
        })?;

        let state = (reader.lines(), channel.to_string());
        let events = stream::unfold(state, |(mut lines, channel)| async move {
            loop {
                let next = match lines.next_line().await {
                    Ok(Some(line)) => match decode_line(&line, &channel) {
                        Ok(Some(event)) => Ok(event),
                        Ok(None) => continue,
                        Err(err) => Err(err),
                    },
                    Ok(None) => return None,
                    Err(err) => Err(WatchError::from(err)),
                };
                return Some((next, (lines, channel)));
            }
        });
        Ok(Subscription::new(channel, events))
    }
}
