//! Suitewatch reports the live progress and the final verdict of test suites
//! run by an external worker.
//!
//! The worker runs any number of named suites at once and describes what it
//! is doing through a stream of events. Suitewatch draws a progress bar per
//! suite while the run goes on, saves the screenshots the suites capture and,
//! once the worker announces the end of the run, prints a report and exits
//! with 0 if nothing failed and 1 otherwise.
//!
//! ## Running
//! Suitewatch reads newline-delimited JSON events from a file or from stdin:
//! ```bash
//! my-worker | suitewatch
//! suitewatch run.ndjson --port events
//! ```
//!
//! ## Events
//! Every event is a JSON object with a `name` tag and a `value` payload:
//! ```text
//! {"name":"status","value":[{"name":"Login","value":{"total":5,"nextStep":"open"}}]}
//! {"name":"statusUpdate","value":[{"name":"Login","value":{"total":5,"remaining":3,"nextStep":"click","failed":false}}]}
//! {"name":"log","value":{"name":"Login","value":{"output":"5 passed","failed":0}}}
//! {"name":"screenshots","value":{"name":"Login","shots":["<base64 png>"]}}
//! {"name":"exit","value":{"failed":0,"output":"All suites passed"}}
//! ```
//! - `status` announces suites. Announcing a suite again starts it over.
//! - `statusUpdate` moves the bar of an announced suite to
//!   `total - remaining`. Once a suite reports a failure its bar stays red
//!   for the rest of the run. Updates for unannounced suites are ignored.
//! - `log` stores the summary of a suite; the last one wins.
//! - `screenshots` writes `screenshots/<suite>/<index>.png`. The suite name is
//!   sanitized into a valid directory name.
//! - `exit` ends the run. The summaries of all announced suites are printed
//!   in the order the suites were announced, followed by the aggregate
//!   output.
//!
//! Events with any other tag are ignored.
//!
//! A line may also carry a `"port"` field. When the worker emits on several
//! ports, list them in the configuration and pick one with `--port`.
//!
//! ## Configuration
//! A `suitewatch.toml` in the working directory (or the file given with
//! `--config`) can override defaults:
//! ```toml
//! # (Optional) Version of suitewatch the configuration was written for.
//! ver = "0.1.0"
//! # (Optional) Where screenshots go. Defaults to "screenshots".
//! screenshots_dir = "artifacts/screenshots"
//! # (Optional) indicatif template. {color} is the bar color.
//! template = "{prefix:.magenta} {bar:30.{color}} {pos}/{len} {msg}"
//! running_color = "green"
//! failed_color = "red"
//! # (Optional) Ports the worker emits on. Defaults to ["events"].
//! ports = ["events"]
//! ```
pub mod cli;
pub mod config;
pub mod errors;
pub mod event;
pub mod printer;
pub mod run;
pub mod worker;
