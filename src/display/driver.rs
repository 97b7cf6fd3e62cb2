// src/display/driver.rs
//! DisplayDriver trait - minimal interface for platform-specific display
//! primitives.
//!
//! ## Threading Model
//! Drivers are only ever called from the main thread. Background threads
//! communicate signal changes over a channel; the orchestrator translates
//! them into requests here, preserving single-writer-to-GUI discipline.
//!
//! ## Lifecycle
//! 1. `new()` - connect to the window system, create resources
//! 2. `handle_request(Init)` - create and map the window
//! 3. Request/response loop - all operations via messages
//! 4. `Drop` - cleanup (no explicit shutdown message)

use crate::display::messages::{DriverRequest, DriverResponse};
use anyhow::Result;

/// Minimal platform-specific display driver interface.
pub trait DisplayDriver {
    /// Connect to the window system and allocate resources.
    /// Window mapping happens in `handle_request(Init)`.
    fn new() -> Result<Self>
    where
        Self: Sized;

    /// Handle a request from the orchestrator, returning a response.
    ///
    /// ## Request/Response Pairs
    /// - `Init` → `InitComplete` (map window, report drawable size)
    /// - `PollEvents` → `Events` (fetch pending native events)
    /// - `Fill(color)` → `FillComplete`
    /// - `SetTitle(s)` → `TitleSet`
    fn handle_request(&mut self, request: DriverRequest) -> Result<DriverResponse>;
}
