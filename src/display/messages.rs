// src/display/messages.rs
//! Message types for communication with a DisplayDriver.
//!
//! This module defines the message-based protocol for display operations.
//! The orchestrator owns no window-system state; everything goes through
//! these requests and responses.

use crate::color::Color;

/// Requests sent from the orchestrator to a DisplayDriver.
#[derive(Debug, Clone)]
pub enum DriverRequest {
    /// Create and map the window. Driver responds with InitComplete
    /// containing the actual drawable dimensions.
    Init,

    /// Request pending native events from the platform.
    /// Driver responds with Events containing any queued events.
    PollEvents,

    /// Fill the lamp rectangle with the given color.
    Fill(Color),

    /// Set the window title.
    SetTitle(String),
}

/// Responses sent from a DisplayDriver to the orchestrator.
#[derive(Debug)]
pub enum DriverResponse {
    /// Window created and mapped, with actual drawable dimensions.
    InitComplete { width_px: u32, height_px: u32 },

    /// Native events that occurred.
    Events(Vec<DisplayEvent>),

    /// The fill was applied and flushed.
    FillComplete,

    /// Window title was set.
    TitleSet,
}

/// Platform-agnostic display events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayEvent {
    /// User requested window close.
    CloseRequested,

    /// The drawable was damaged (exposed or resized) and needs a re-fill.
    RedrawNeeded,
}
