//! Vocabulary of the messages a worker emits while running suites.
//!
//! On the wire every event is an object `{ "name": <tag>, "value": <payload> }`.
//! Tags this crate doesn't know about decode to [Event::Unknown] so that newer
//! workers keep working against an older reporter.
use serde::Deserialize;
use serde_json::Value;

use crate::errors::WatchError;

/// A payload associated with a suite name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Named<T> {
    /// Name of the suite.
    pub name: String,
    /// Payload for that suite.
    pub value: T,
}

impl<T> Named<T> {
    pub fn new<S: Into<String>>(name: S, value: T) -> Self {
        Named {
            name: name.into(),
            value,
        }
    }
}

/// First sighting of a suite.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    /// Number of steps in the suite.
    pub total: u64,
    /// Label of the step about to run.
    pub next_step: String,
}

/// Progress report for a running suite.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub total: u64,
    /// Steps left to run.
    pub remaining: u64,
    pub next_step: String,
    /// Whether a step of the suite has failed.
    pub failed: bool,
}

/// Result summary of a single suite.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Summary {
    /// Free-form report text.
    pub output: String,
    /// Number of failures in the suite.
    pub failed: u64,
}

/// Screenshots captured by a suite. Each shot is a base64 encoded PNG.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScreenshotBatch {
    pub name: String,
    pub shots: Vec<String>,
}

/// Aggregate result carried by the terminal event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExitSummary {
    /// Number of failures across all suites.
    pub failed: u64,
    pub output: String,
}

/// An event emitted by the worker.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// `status`: suites announced with their step count.
    Status(Vec<Named<Announcement>>),
    /// `statusUpdate`: progress of already announced suites.
    StatusUpdate(Vec<Named<Progress>>),
    /// `log`: summary of a suite.
    Log(Named<Summary>),
    /// `screenshots`: images to persist for a suite.
    Screenshots(ScreenshotBatch),
    /// `exit`: terminal event of the run.
    Exit(ExitSummary),
    /// Any tag not listed above. Carries the tag for logging.
    Unknown(String),
}

#[derive(Deserialize)]
struct RawEvent {
    name: String,
    #[serde(default)]
    value: Value,
}

impl Event {
    /// Decode an event from its JSON representation.
    /// A known tag with a payload of the wrong shape is an error; an unknown
    /// tag is not.
    pub fn from_value(value: Value) -> Result<Self, WatchError> {
        let RawEvent { name, value } = serde_json::from_value(value)?;
        let event = match name.as_str() {
            "status" => Event::Status(serde_json::from_value(value)?),
            "statusUpdate" => Event::StatusUpdate(serde_json::from_value(value)?),
            "log" => Event::Log(serde_json::from_value(value)?),
            "screenshots" => Event::Screenshots(serde_json::from_value(value)?),
            "exit" => Event::Exit(serde_json::from_value(value)?),
            _ => Event::Unknown(name),
        };
        Ok(event)
    }

    /// Decode an event from a JSON string.
    pub fn from_json(src: &str) -> Result<Self, WatchError> {
        Self::from_value(serde_json::from_str(src)?)
    }

    /// Wire tag of this event.
    pub fn tag(&self) -> &str {
        match self {
            Event::Status(_) => "status",
            Event::StatusUpdate(_) => "statusUpdate",
            Event::Log(_) => "log",
            Event::Screenshots(_) => "screenshots",
            Event::Exit(_) => "exit",
            Event::Unknown(tag) => tag,
        }
    }
}
