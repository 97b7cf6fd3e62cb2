// src/main.rs

// Declare modules
pub mod color;
pub mod config;
pub mod display;
pub mod orchestrator;
pub mod os;
pub mod reader;
pub mod signal;

use crate::{
    config::CONFIG,
    display::{drivers::X11Driver, DisplayDriver},
    orchestrator::{AppOrchestrator, OrchestratorStatus},
    os::{pty::PtyLink, serial::SerialStream},
    reader::ReaderContext,
};

use anyhow::Context;
use log::{error, info};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;

/// Main entry point for the `ptylamp` application.
fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting ptylamp...");

    // --- Link ---
    let link = PtyLink::open().context("Failed to open pseudo-terminal link")?;

    // The follower path goes to stdout so an external peer can attach.
    println!("{}", link.follower_path().display());
    info!("Link follower device: {}", link.follower_path().display());

    let mut serial = SerialStream::open(link.follower_path())
        .context("Failed to open follower as serial stream")?;
    serial
        .write_all(CONFIG.link.payload.as_bytes())
        .context("Failed to write startup payload")?;
    info!("Wrote startup payload ({} bytes)", CONFIG.link.payload.len());

    // --- Reader thread ---
    let (link_events_tx, link_events_rx) = mpsc::channel();
    let cancel = Arc::new(AtomicBool::new(false));
    let reader_ctx = ReaderContext {
        link,
        sentinel: CONFIG.link.sentinel,
        read_chunk_bytes: CONFIG.link.read_chunk_bytes,
        startup_delay: Duration::from_millis(CONFIG.link.startup_delay_ms),
        poll_timeout: Duration::from_millis(CONFIG.link.poll_timeout_ms),
        events: link_events_tx,
        cancel: Arc::clone(&cancel),
    };
    let reader_handle = std::thread::Builder::new()
        .name("link-reader".to_string())
        .spawn(move || reader::run(reader_ctx))
        .context("Failed to spawn reader thread")?;

    // --- Display ---
    let driver = X11Driver::new().context("Failed to initialize X11 display")?;
    let mut orchestrator = AppOrchestrator::new(driver, link_events_rx)
        .context("Failed to initialize orchestrator")?;
    info!("Display up, entering main loop");

    // --- Main Event Loop ---
    loop {
        match orchestrator.process_event_cycle() {
            Ok(OrchestratorStatus::Running) => {
                std::thread::sleep(Duration::from_millis(
                    CONFIG.performance.min_draw_latency_ms,
                ));
            }
            Ok(OrchestratorStatus::Shutdown) => {
                info!("Shutdown requested. Exiting main loop.");
                break;
            }
            Err(e) => {
                error!(
                    "Error in orchestrator event cycle: {:#}. Root cause: {:?}. Exiting.",
                    e,
                    e.root_cause()
                );
                break;
            }
        }
    }

    // --- Cleanup ---
    cancel.store(true, Ordering::Relaxed);
    if reader_handle.join().is_err() {
        error!("Reader thread panicked during shutdown");
    }
    // The serial stream and the link live for the whole run; dropping them
    // here closes the pty pair.
    drop(serial);

    info!("ptylamp exited successfully.");
    Ok(())
}
