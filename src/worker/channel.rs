use futures::{
    channel::mpsc::{self, UnboundedReceiver, UnboundedSender},
    StreamExt,
};

use super::{Subscription, Worker};
use crate::{errors::WatchError, event::Event};

/// In-process worker. Events are pushed through the senders returned by
/// [ChannelWorker::open_port].
pub struct ChannelWorker {
    entry_points: Vec<String>,
    ports: Vec<(String, Option<UnboundedReceiver<Event>>)>,
}

impl ChannelWorker {
    /// Worker with a single entry point.
    pub fn new<S: Into<String>>(entry_point: S) -> Self {
        Self::with_entry_points(vec![entry_point.into()])
    }

    pub fn with_entry_points(entry_points: Vec<String>) -> Self {
        ChannelWorker {
            entry_points,
            ports: Vec::new(),
        }
    }

    /// Expose a new port and return the sending half. Opening an existing
    /// port again replaces it.
    pub fn open_port<S: Into<String>>(&mut self, name: S) -> UnboundedSender<Event> {
        let name = name.into();
        let (tx, rx) = mpsc::unbounded();
        self.ports.retain(|(port, _)| *port != name);
        self.ports.push((name, Some(rx)));
        tx
    }
}

impl Worker for ChannelWorker {
    fn entry_points(&self) -> Vec<String> {
        self.entry_points.clone()
    }

    fn channels(&self) -> Vec<String> {
        self.ports.iter().map(|(name, _)| name.clone()).collect()
    }

    fn subscribe(&mut self, channel: &str) -> Result<Subscription, WatchError> {
        let rx = self
            .ports
            .iter_mut()
            .find(|(name, _)| name == channel)
            .ok_or_else(|| WatchError(format!("Unknown port `{}`", channel)))?
            .1
            .take()
            .ok_or_else(|| {
                WatchError(format!("Port `{}` already has a listener", channel))
            })?;
        Ok(Subscription::new(channel, rx.map(Ok)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_in_order() {
        let mut worker = ChannelWorker::new("Main");
        let tx = worker.open_port("events");
        let mut sub = worker.subscribe("events").unwrap();

        tx.unbounded_send(Event::Unknown("one".into())).unwrap();
        tx.unbounded_send(Event::Unknown("two".into())).unwrap();
        drop(tx);

        assert_eq!(sub.next().await.unwrap().unwrap().tag(), "one");
        assert_eq!(sub.next().await.unwrap().unwrap().tag(), "two");
        assert!(sub.next().await.is_none());
    }

    #[test]
    fn port_has_a_single_listener() {
        let mut worker = ChannelWorker::new("Main");
        let _tx = worker.open_port("events");
        assert!(worker.subscribe("events").is_ok());
        assert!(worker.subscribe("events").is_err());
        assert!(worker.subscribe("missing").is_err());
    }
}
