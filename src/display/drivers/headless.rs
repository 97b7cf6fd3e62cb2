//! Headless mock display driver implementation.

use crate::color::{to_hex_string, Color};
use crate::display::driver::DisplayDriver;
use crate::display::messages::{DisplayEvent, DriverRequest, DriverResponse};
use anyhow::Result;
use log::{info, trace};

pub struct HeadlessDriver {
    width_px: u32,
    height_px: u32,
    last_fill: Option<Color>,
    last_title: Option<String>,
    queued_events: Vec<DisplayEvent>,
}

impl HeadlessDriver {
    /// The fill most recently applied, if any.
    pub fn last_fill(&self) -> Option<Color> {
        self.last_fill
    }

    /// The title most recently set, if any.
    pub fn last_title(&self) -> Option<&str> {
        self.last_title.as_deref()
    }

    /// Queues an event to be returned by the next PollEvents request.
    pub fn inject_event(&mut self, event: DisplayEvent) {
        self.queued_events.push(event);
    }
}

impl DisplayDriver for HeadlessDriver {
    fn new() -> Result<Self> {
        info!("HeadlessDriver::new()");
        Ok(Self {
            width_px: 0,
            height_px: 0,
            last_fill: None,
            last_title: None,
            queued_events: Vec::new(),
        })
    }

    fn handle_request(&mut self, request: DriverRequest) -> Result<DriverResponse> {
        match request {
            DriverRequest::Init => {
                let dim = crate::config::CONFIG.appearance.canvas_dim;
                self.width_px = dim;
                self.height_px = dim;
                info!("HeadlessDriver: Init - {}x{} px", dim, dim);
                Ok(DriverResponse::InitComplete {
                    width_px: self.width_px,
                    height_px: self.height_px,
                })
            }
            DriverRequest::PollEvents => {
                Ok(DriverResponse::Events(std::mem::take(&mut self.queued_events)))
            }
            DriverRequest::Fill(color) => {
                trace!("HeadlessDriver: Fill {}", to_hex_string(color));
                self.last_fill = Some(color);
                Ok(DriverResponse::FillComplete)
            }
            DriverRequest::SetTitle(title) => {
                info!("HeadlessDriver: SetTitle '{}'", title);
                self.last_title = Some(title);
                Ok(DriverResponse::TitleSet)
            }
        }
    }
}
