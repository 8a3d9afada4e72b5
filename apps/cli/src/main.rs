mod args;
mod config;
mod dirs;

use std::io;
use std::process::ExitCode;

use authlog_app::{AppPaths, AppState};
use ingest::{SyncOutcome, SyncStats};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "authlog=info,ingest=info,authlog_store=info";

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = args::parse_args(std::env::args().skip(1)).map_err(|err| {
        eprintln!("{err}");
        args::print_help();
        io::Error::new(io::ErrorKind::InvalidInput, "invalid arguments")
    })?;
    if args.help {
        args::print_help();
        return Ok(ExitCode::SUCCESS);
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = config::load_or_create(args.config.as_deref()).map_err(io::Error::other)?;
    if config.created {
        info!(path = %config.file.display(), "created default config");
    }

    let data_dir = dirs::resolve_data_dir(args.data_dir.as_deref(), config.config.data_dir.as_deref())
        .map_err(io::Error::other)?;
    info!(path = %data_dir.display(), "using data dir");

    let mut settings = config.config.settings();
    if let Some(base_url) = args.base_url {
        settings.api_base_url = base_url;
    }
    if let Some(window_size) = args.window_size {
        settings.window_size = window_size;
    }
    if args.parallel {
        settings.parallel_windows = true;
    }

    let app_state = AppState::new(AppPaths::new(data_dir), settings);
    app_state.initialize()?;
    if app_state.is_fresh() {
        info!("no progress marker yet; fetching the full log");
    }
    let stats = app_state.refresh_data()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_summary(&stats);
    }

    Ok(match stats.outcome {
        SyncOutcome::UpToDate | SyncOutcome::Synced => ExitCode::SUCCESS,
        SyncOutcome::Partial | SyncOutcome::RemoteUnavailable => ExitCode::from(1),
    })
}

fn print_summary(stats: &SyncStats) {
    match stats.outcome {
        SyncOutcome::UpToDate => {
            println!("Logs are up to date ({} entries).", stats.current_count);
        }
        SyncOutcome::RemoteUnavailable => {
            println!("Remote API unavailable; nothing was changed.");
        }
        SyncOutcome::Synced | SyncOutcome::Partial => {
            println!(
                "Synced {} -> {} entries: fetched {}, rejected {}, removed {} duplicates, {} in log.",
                stats.previous_count,
                stats.current_count,
                stats.records_fetched,
                stats.records_rejected,
                stats.duplicates_removed,
                stats.events_committed
            );
            if stats.windows_failed > 0 {
                println!(
                    "{} of {} windows failed; they will be retried on the next run.",
                    stats.windows_failed, stats.windows_planned
                );
            }
        }
    }
    for issue in &stats.issues {
        match issue.window {
            Some(window) => eprintln!("  window {window}: {}", issue.message),
            None => eprintln!("  {}", issue.message),
        }
    }
}
