//! The worker is the external process running the suites. It exposes entry
//! points and named ports; the reporter listens to exactly one port of a
//! worker with exactly one entry point.
mod channel;
mod lines;

pub use channel::ChannelWorker;
pub use lines::LineWorker;

use futures::{
    stream::{BoxStream, Stream},
    StreamExt,
};
use tracing::{debug, info};

use crate::{errors::WatchError, event::Event};

/// A running worker as seen by the reporter.
pub trait Worker {
    /// Names of the executable entry points.
    fn entry_points(&self) -> Vec<String>;

    /// Names of the ports events can be read from.
    fn channels(&self) -> Vec<String>;

    /// Start listening on `channel`.
    fn subscribe(&mut self, channel: &str) -> Result<Subscription, WatchError>;
}

/// Ordered stream of events read from one port of a worker.
pub struct Subscription {
    channel: String,
    events: BoxStream<'static, Result<Event, WatchError>>,
}

impl Subscription {
    pub fn new<C, S>(channel: C, events: S) -> Self
    where
        C: Into<String>,
        S: Stream<Item = Result<Event, WatchError>> + Send + 'static,
    {
        Subscription {
            channel: channel.into(),
            events: events.boxed(),
        }
    }

    /// Name of the port this subscription reads from.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Wait for the next event. `None` once the worker closed the port.
    pub async fn next(&mut self) -> Option<Result<Event, WatchError>> {
        self.events.next().await
    }

    /// Stop listening. Events still queued on the port are discarded.
    pub fn unsubscribe(self) {
        debug!("unsubscribed from port `{}`", self.channel);
    }
}

/// Pick the port to listen on.
/// A requested port must exist. Without a request the worker must expose
/// exactly one port.
pub fn select_channel(
    available: &[String],
    requested: Option<&str>,
) -> Result<String, WatchError> {
    let name = match (requested, available) {
        (Some(name), _) => name,
        (None, []) => {
            return Err(WatchError(
                "The worker must expose a port to send events on.".to_string(),
            ))
        }
        (None, [only]) => only.as_str(),
        (None, _) => {
            return Err(WatchError(format!(
                "The worker exposes several ports ({}). Use --port to pick one.",
                available.join(", ")
            )))
        }
    };

    if !available.iter().any(|port| port == name) {
        return Err(WatchError(format!(
            "Port `{}` is not among the worker ports: {}",
            name,
            available.join(", ")
        )));
    }
    Ok(name.to_string())
}

/// Validate the shape of `worker` and subscribe to the selected port.
/// Nothing is read from the worker when validation fails.
pub fn attach<W: Worker + ?Sized>(
    worker: &mut W,
    requested: Option<&str>,
) -> Result<Subscription, WatchError> {
    let entries = worker.entry_points();
    if entries.len() != 1 {
        return Err(WatchError(format!(
            "The worker must have exactly one entry point but it has {}: {}",
            entries.len(),
            entries.join(", ")
        )));
    }

    let channel = select_channel(&worker.channels(), requested)?;
    info!("listening to `{}` on port `{}`", entries[0], channel);
    worker.subscribe(&channel)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ports(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn single_port_is_picked_implicitly() {
        assert_eq!(select_channel(&ports(&["events"]), None).unwrap(), "events");
    }

    #[test]
    fn requested_port_must_exist() {
        let available = ports(&["events", "debug"]);
        assert_eq!(select_channel(&available, Some("debug")).unwrap(), "debug");
        let err = select_channel(&available, Some("nope")).unwrap_err();
        assert!(err.to_string().contains("`nope`"));
    }

    #[test]
    fn no_or_ambiguous_ports_fail() {
        assert!(select_channel(&[], None).is_err());
        assert!(select_channel(&[], Some("events")).is_err());
        let err = select_channel(&ports(&["a", "b"]), None).unwrap_err();
        assert!(err.to_string().contains("--port"));
    }

    #[test]
    fn entry_points_must_be_unique() {
        let mut none = ChannelWorker::with_entry_points(Vec::new());
        none.open_port("events");
        assert!(attach(&mut none, None).is_err());

        let mut two = ChannelWorker::with_entry_points(ports(&["Main", "Other"]));
        two.open_port("events");
        let err = attach(&mut two, None).err().unwrap();
        assert!(err.to_string().contains("exactly one entry point"));
    }

    #[test]
    fn attach_subscribes_to_selected_port() {
        let mut worker = ChannelWorker::new("Main");
        worker.open_port("events");
        worker.open_port("debug");
        let sub = attach(&mut worker, Some("debug")).unwrap();
        assert_eq!(sub.channel(), "debug");
    }
}
