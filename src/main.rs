use std::sync::Arc;

use appstate::adapters::{JsonFileStore, StaticBuildInfo};
use appstate::app::AppLifecycle;
use appstate::cli::{error_line, parse_args, version_string, CliCommand, DemoSession, Flow, USAGE};
use appstate::config::Config;
use appstate::events::AppNotification;
use appstate::logging::{init_logging, LogConfig};

use color_eyre::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Forward stdin lines to the session loop until EOF or the receiver goes
/// away.
async fn read_lines(tx: mpsc::UnboundedSender<String>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if tx.send(line).is_err() {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stdin");
                break;
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Handle --version and --help before any initialization
    let args = parse_args(std::env::args())?;
    match args.command {
        CliCommand::Version => {
            println!("{}", version_string());
            return Ok(());
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        CliCommand::Reset | CliCommand::Run => {}
    }

    color_eyre::install()?;

    let config = args.apply_to(Config::from_env()?);
    config.validate()?;
    init_logging(&LogConfig::from_config(&config))?;

    let store_path = config.resolved_store_path()?;
    let store = Arc::new(JsonFileStore::open(&store_path)?);
    let build = Arc::new(StaticBuildInfo::from_package(
        config.app_version_override.as_deref(),
    ));
    let lifecycle = Arc::new(AppLifecycle::with_keys(store, build, config.storage_keys()));

    if args.command == CliCommand::Reset {
        lifecycle.reset()?;
        println!("store reset: {}", store_path.display());
        return Ok(());
    }

    tracing::info!(store = %store_path.display(), "session started");
    let session = DemoSession::start(
        Arc::clone(&lifecycle),
        Arc::new(|line: String| println!("{line}")),
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let reader = tokio::spawn(read_lines(tx));

    while let Some(line) = rx.recv().await {
        match session.handle_line(&line) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => eprintln!("{}", error_line(&e)),
        }
    }

    // The demo is the host: leaving the loop ends the process.
    lifecycle.notify(AppNotification::WillTerminate);
    reader.abort();
    Ok(())
}
