use suitewatch::{
    cli::Opts,
    config::Config,
    errors::WatchError,
    printer::BarRenderer,
    run::{self, ArtifactWriter, RunContext},
    worker::LineWorker,
};

use structopt::StructOpt;
use tokio::{io::BufReader, runtime};
use tracing_subscriber::FmtSubscriber;

fn init_logging(opts: &Opts) -> Result<(), WatchError> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(opts.log_level())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| WatchError(err.to_string()))
}

fn run() -> Result<i32, WatchError> {
    let opts = Opts::from_args();
    init_logging(&opts)?;
    if opts.no_color {
        colored::control::set_override(false);
    }

    let conf = Config::load(opts.config.as_deref())?;
    let screenshots = opts
        .screenshots
        .clone()
        .unwrap_or_else(|| conf.screenshots_dir());
    let renderer = BarRenderer::from_config(&conf, opts.quiet)?;
    let ctx = RunContext::new(renderer, ArtifactWriter::new(screenshots), std::io::stdout());

    let runtime = runtime::Builder::new_current_thread().enable_all().build()?;

    let passed = runtime.block_on(async {
        match &opts.events {
            Some(path) => {
                let file = tokio::fs::File::open(path)
                    .await
                    .map_err(|err| WatchError::from(err).context(path.display()))?;
                let mut worker = LineWorker::new(
                    path.display().to_string(),
                    BufReader::new(file),
                    conf.ports(),
                );
                run::watch(&mut worker, opts.port.as_deref(), ctx).await
            }
            None => {
                let mut worker = LineWorker::new(
                    "stdin",
                    BufReader::new(tokio::io::stdin()),
                    conf.ports(),
                );
                run::watch(&mut worker, opts.port.as_deref(), ctx).await
            }
        }
    })?;

    Ok(if passed { 0 } else { 1 })
}

fn main() {
    std::process::exit(match run() {
        Err(WatchError(msg)) => {
            eprintln!("error: {}", msg);
            1
        }
        Ok(code) => code,
    })
}
