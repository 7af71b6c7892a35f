//! Folio bridge: newline-delimited JSON over stdin/stdout.
//!
//! Request:  {"id":1, "method":"page.scroll", "params":{"scroll_y":120,"viewport_height":800}}
//! Response: {"id":1, "result":{"patches":[...],"next_deadline":1150}} or {"id":1, "error":"..."}
//! Timer:    {"event":"patches","patches":[...],"next_deadline":null}
//!
//! Settle timers fire on the server clock (milliseconds since start) unless
//! `--host-clock` is given, in which case the host owns time and sends
//! `timer.tick` itself.

use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{info, warn};

use folio::app::Site;
use folio::bridge::{handle_line, timer_event};
use folio::logging;
use folio::services::preference_store::open_configured_store;
use folio::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use folio::types::settings::SiteSettings;
use folio::types::Millis;

#[derive(Debug, Parser)]
#[command(name = "folio-bridge", version, about = "Drive the Folio page engine over stdin/stdout")]
struct Args {
    /// Settings file (defaults to the platform config directory).
    #[arg(long, env = "FOLIO_CONFIG")]
    config: Option<String>,

    /// SQLite preference database path, or `memory`.
    #[arg(long, env = "FOLIO_STORE")]
    store: Option<String>,

    /// Never fire timers from the server clock; the host sends `timer.tick`.
    #[arg(long)]
    host_clock: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_settings(path: Option<String>) -> SiteSettings {
    let mut engine = SettingsEngine::new(path);
    match engine.load() {
        Ok(settings) => settings,
        Err(e) => {
            warn!(path = engine.get_config_path(), error = %e, "using default settings");
            SiteSettings::default()
        }
    }
}

fn elapsed_ms(epoch: Instant) -> Millis {
    Millis::try_from(epoch.elapsed().as_millis()).unwrap_or(Millis::MAX)
}

async fn write_line(stdout: &mut tokio::io::Stdout, value: &Value) -> std::io::Result<()> {
    let mut line = value.to_string();
    line.push('\n');
    stdout.write_all(line.as_bytes()).await?;
    stdout.flush().await
}

async fn sleep_until_deadline(epoch: Instant, deadline: Option<Millis>) {
    match deadline {
        Some(ms) => tokio::time::sleep_until(epoch + Duration::from_millis(ms)).await,
        None => std::future::pending::<()>().await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    let settings = load_settings(args.config);
    let store = open_configured_store(args.store.as_deref());
    let site = Mutex::new(Site::new(settings, store));
    let epoch = Instant::now();

    let mut stdout = tokio::io::stdout();
    write_line(
        &mut stdout,
        &json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}),
    )
    .await?;
    info!(host_clock = args.host_clock, "bridge ready");

    let (tx, mut rx) = mpsc::channel::<String>(256);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx.send(line).await.is_err() {
                break;
            }
        }
    });

    loop {
        let deadline = if args.host_clock {
            None
        } else {
            site.lock().ok().and_then(|s| s.next_deadline())
        };

        tokio::select! {
            line = rx.recv() => {
                let Some(line) = line else { break };
                if let Some(response) = handle_line(&site, &line, elapsed_ms(epoch)) {
                    write_line(&mut stdout, &response).await?;
                }
            }
            () = sleep_until_deadline(epoch, deadline) => {
                match timer_event(&site, elapsed_ms(epoch)) {
                    Ok(Some(event)) => write_line(&mut stdout, &event).await?,
                    Ok(None) => {}
                    Err(e) => {
                        warn!(error = %e, "timer dispatch failed");
                        break;
                    }
                }
            }
        }
    }

    info!("bridge exiting");
    Ok(())
}
