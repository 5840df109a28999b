use std::path::PathBuf;
use structopt::StructOpt;

/// Options for the CLI.
#[derive(StructOpt, Debug)]
#[structopt(
    name = "suitewatch",
    about = "Live progress and verdict for running test suites."
)]
pub struct Opts {
    /// NDJSON file with the worker's events. Reads stdin when omitted.
    #[structopt(name = "EVENTS", parse(from_os_str))]
    pub events: Option<PathBuf>,

    /// Name of the worker port to listen on. Required when the worker
    /// exposes more than one.
    #[structopt(short, long)]
    pub port: Option<String>,

    /// Path to a suitewatch.toml. Defaults to ./suitewatch.toml if present.
    #[structopt(short, long, parse(from_os_str))]
    pub config: Option<PathBuf>,

    /// Directory screenshots are written under.
    #[structopt(long, parse(from_os_str))]
    pub screenshots: Option<PathBuf>,

    /// Hide progress bars. The final report is still printed.
    #[structopt(short, long)]
    pub quiet: bool,

    /// Disable colored output.
    #[structopt(long)]
    pub no_color: bool,

    /// Log verbosity. Repeat for more (-v info, -vv debug, -vvv trace).
    #[structopt(short, long, parse(from_occurrences))]
    pub verbose: u8,
}

impl Opts {
    /// Maximum level for the log subscriber.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
