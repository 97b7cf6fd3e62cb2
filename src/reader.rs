// src/reader.rs

//! Background reader: bridges raw bytes off the pty controller into signal
//! events for the orchestrator.
//!
//! The reader never touches the display. It decodes each chunk into a
//! `Signal` and sends it over a channel; the main thread applies the fill on
//! its own schedule. Cancellation is cooperative: the reader waits for
//! readability in bounded slices and re-checks the cancel flag between them,
//! so window close joins the thread deterministically.

use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, trace};

use crate::os::pty::PtyLink;
use crate::signal::Signal;

/// Events sent from the reader to the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent {
    /// A chunk was received and decoded.
    SignalChanged(Signal),
    /// The link hit EOF or a read error; no further events will arrive.
    LinkClosed,
}

/// Everything the reader thread needs, passed explicitly at spawn.
pub struct ReaderContext {
    /// The link; the reader owns the controller end for its whole life.
    pub link: PtyLink,
    /// The single byte recognized as the "on" signal.
    pub sentinel: u8,
    /// Maximum bytes per chunk.
    pub read_chunk_bytes: usize,
    /// One-time delay before the first read, giving the window time to map.
    pub startup_delay: Duration,
    /// Upper bound on each readability wait.
    pub poll_timeout: Duration,
    /// Channel to the orchestrator.
    pub events: Sender<LinkEvent>,
    /// Cooperative cancellation flag, set by the main thread on shutdown.
    pub cancel: Arc<AtomicBool>,
}

/// Runs the read loop until cancellation, EOF, a read error, or channel
/// disconnect.
pub fn run(mut ctx: ReaderContext) {
    info!(
        "Reader: starting after {}ms delay",
        ctx.startup_delay.as_millis()
    );
    std::thread::sleep(ctx.startup_delay);

    let mut buffer = vec![0u8; ctx.read_chunk_bytes.max(1)];

    loop {
        if ctx.cancel.load(Ordering::Relaxed) {
            info!("Reader: cancelled, exiting");
            return;
        }

        match ctx.link.wait_readable(ctx.poll_timeout) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(e) => {
                error!("Reader: poll failed: {:#}", e);
                let _ = ctx.events.send(LinkEvent::LinkClosed);
                return;
            }
        }

        match ctx.link.read(&mut buffer) {
            Ok(0) => {
                info!("Reader: EOF on controller, exiting");
                let _ = ctx.events.send(LinkEvent::LinkClosed);
                return;
            }
            Ok(n) => {
                let chunk = &buffer[..n];
                trace!("Reader: got {:?}", String::from_utf8_lossy(chunk));
                let signal = Signal::from_chunk(chunk, ctx.sentinel);
                if ctx.events.send(LinkEvent::SignalChanged(signal)).is_err() {
                    debug!("Reader: orchestrator gone, exiting");
                    return;
                }
            }
            Err(e) => {
                error!("Reader: read failed: {}", e);
                let _ = ctx.events.send(LinkEvent::LinkClosed);
                return;
            }
        }
    }
}
