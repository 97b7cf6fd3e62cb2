// src/orchestrator.rs

//! Main-thread orchestrator: drains link events and drives the display.
//!
//! The orchestrator is the only writer to the display driver. Each cycle it
//! polls native events (close, expose), drains every pending signal event
//! keeping only the newest, and issues at most one fill request.

use anyhow::{Context, Result};
use log::{info, warn};
use std::sync::mpsc::{Receiver, TryRecvError};

use crate::color::Color;
use crate::config::{AppearanceConfig, CONFIG};
use crate::display::{DisplayDriver, DisplayEvent, DriverRequest, DriverResponse};
use crate::reader::LinkEvent;
use crate::signal::Signal;

/// The configured fill for a signal state: `on_color` for on, `off_color`
/// for off.
pub fn fill_for(signal: Signal, appearance: &AppearanceConfig) -> Color {
    match signal {
        Signal::On => appearance.on_color,
        Signal::Off => appearance.off_color,
    }
}

/// Outcome of one orchestrator cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestratorStatus {
    Running,
    Shutdown,
}

pub struct AppOrchestrator<D: DisplayDriver> {
    driver: D,
    link_events: Receiver<LinkEvent>,
    current_fill: Color,
    link_closed: bool,
}

impl<D: DisplayDriver> AppOrchestrator<D> {
    /// Maps the window and applies the initial fill.
    pub fn new(mut driver: D, link_events: Receiver<LinkEvent>) -> Result<Self> {
        match driver
            .handle_request(DriverRequest::Init)
            .context("display init failed")?
        {
            DriverResponse::InitComplete {
                width_px,
                height_px,
            } => {
                info!("Display initialized: {}x{} px", width_px, height_px);
            }
            other => anyhow::bail!("unexpected response to Init: {:?}", other),
        }

        driver
            .handle_request(DriverRequest::SetTitle(CONFIG.appearance.title.clone()))
            .context("setting window title failed")?;

        let initial = CONFIG.appearance.initial_color;
        driver
            .handle_request(DriverRequest::Fill(initial))
            .context("initial fill failed")?;

        Ok(AppOrchestrator {
            driver,
            link_events,
            current_fill: initial,
            link_closed: false,
        })
    }

    /// Runs one poll/drain/fill cycle.
    pub fn process_event_cycle(&mut self) -> Result<OrchestratorStatus> {
        let mut needs_fill = false;

        // Native events first, so a close request wins over pending fills.
        let events = match self
            .driver
            .handle_request(DriverRequest::PollEvents)
            .context("polling display events failed")?
        {
            DriverResponse::Events(events) => events,
            other => anyhow::bail!("unexpected response to PollEvents: {:?}", other),
        };
        for event in events {
            match event {
                DisplayEvent::CloseRequested => {
                    info!("Close requested by window system");
                    return Ok(OrchestratorStatus::Shutdown);
                }
                DisplayEvent::RedrawNeeded => needs_fill = true,
            }
        }

        // Drain the channel; only the newest signal matters.
        let mut pending: Option<Color> = None;
        loop {
            match self.link_events.try_recv() {
                Ok(LinkEvent::SignalChanged(signal)) => {
                    pending = Some(fill_for(signal, &CONFIG.appearance))
                }
                Ok(LinkEvent::LinkClosed) => {
                    if !self.link_closed {
                        warn!("Link closed; display keeps its last fill");
                        self.link_closed = true;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.link_closed {
                        warn!("Reader channel disconnected; display keeps its last fill");
                        self.link_closed = true;
                    }
                    break;
                }
            }
        }

        if let Some(color) = pending {
            if color != self.current_fill {
                self.current_fill = color;
                needs_fill = true;
            }
        }

        if needs_fill {
            self.driver
                .handle_request(DriverRequest::Fill(self.current_fill))
                .context("fill failed")?;
        }

        Ok(OrchestratorStatus::Running)
    }

    /// The fill currently applied to the display.
    pub fn current_fill(&self) -> Color {
        self.current_fill
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{convert_to_rgb_color, Color};
    use crate::display::drivers::HeadlessDriver;
    use crate::signal::Signal;
    use std::sync::mpsc;

    fn orchestrator_with_channel() -> (
        AppOrchestrator<HeadlessDriver>,
        mpsc::Sender<LinkEvent>,
    ) {
        let (tx, rx) = mpsc::channel();
        let driver = HeadlessDriver::new().unwrap();
        let orchestrator = AppOrchestrator::new(driver, rx).unwrap();
        (orchestrator, tx)
    }

    #[test]
    fn configured_colors_drive_signal_fills() {
        let appearance = AppearanceConfig {
            on_color: Color::Rgb(255, 0, 0),
            off_color: Color::Rgb(0, 0, 64),
            ..AppearanceConfig::default()
        };
        assert_eq!(fill_for(Signal::On, &appearance), Color::Rgb(255, 0, 0));
        assert_eq!(fill_for(Signal::Off, &appearance), Color::Rgb(0, 0, 64));
    }

    #[test]
    fn on_color_from_config_file_is_honored() {
        let appearance: AppearanceConfig =
            serde_json::from_str(r#"{ "on_color": { "Rgb": [255, 0, 0] } }"#).unwrap();
        assert_eq!(appearance.on_color, Color::Rgb(255, 0, 0));
        assert_eq!(fill_for(Signal::On, &appearance), Color::Rgb(255, 0, 0));
        // Fields the file does not name keep their defaults.
        assert_eq!(
            fill_for(Signal::Off, &appearance),
            crate::color::Color::Named(crate::color::NamedColor::Black)
        );
    }

    #[test]
    fn startup_sets_window_title() {
        let (mut orchestrator, _tx) = orchestrator_with_channel();
        assert_eq!(
            orchestrator.driver_mut().last_title(),
            Some(CONFIG.appearance.title.as_str())
        );
    }

    #[test]
    fn initial_fill_is_white() {
        let (mut orchestrator, _tx) = orchestrator_with_channel();
        assert_eq!(
            orchestrator.driver_mut().last_fill().map(convert_to_rgb_color),
            Some(Color::Rgb(255, 255, 255))
        );
    }

    #[test]
    fn on_signal_fills_white_off_signal_fills_black() {
        let (mut orchestrator, tx) = orchestrator_with_channel();

        tx.send(LinkEvent::SignalChanged(Signal::Off)).unwrap();
        assert_eq!(
            orchestrator.process_event_cycle().unwrap(),
            OrchestratorStatus::Running
        );
        assert_eq!(
            orchestrator.driver_mut().last_fill().map(convert_to_rgb_color),
            Some(Color::Rgb(0, 0, 0))
        );

        tx.send(LinkEvent::SignalChanged(Signal::On)).unwrap();
        orchestrator.process_event_cycle().unwrap();
        assert_eq!(
            orchestrator.driver_mut().last_fill().map(convert_to_rgb_color),
            Some(Color::Rgb(255, 255, 255))
        );
    }

    #[test]
    fn newest_pending_signal_wins() {
        let (mut orchestrator, tx) = orchestrator_with_channel();

        tx.send(LinkEvent::SignalChanged(Signal::Off)).unwrap();
        tx.send(LinkEvent::SignalChanged(Signal::On)).unwrap();
        tx.send(LinkEvent::SignalChanged(Signal::Off)).unwrap();
        orchestrator.process_event_cycle().unwrap();
        assert_eq!(
            orchestrator.driver_mut().last_fill().map(convert_to_rgb_color),
            Some(Color::Rgb(0, 0, 0))
        );
    }

    #[test]
    fn no_events_leaves_fill_untouched() {
        let (mut orchestrator, _tx) = orchestrator_with_channel();
        let before = orchestrator.driver_mut().last_fill();
        orchestrator.process_event_cycle().unwrap();
        assert_eq!(orchestrator.driver_mut().last_fill(), before);
        assert_eq!(
            convert_to_rgb_color(orchestrator.current_fill()),
            Color::Rgb(255, 255, 255)
        );
    }

    #[test]
    fn close_request_shuts_down_before_fills() {
        let (mut orchestrator, tx) = orchestrator_with_channel();
        tx.send(LinkEvent::SignalChanged(Signal::Off)).unwrap();
        orchestrator
            .driver_mut()
            .inject_event(DisplayEvent::CloseRequested);
        assert_eq!(
            orchestrator.process_event_cycle().unwrap(),
            OrchestratorStatus::Shutdown
        );
        // The pending Off was never applied.
        assert_eq!(
            orchestrator.driver_mut().last_fill().map(convert_to_rgb_color),
            Some(Color::Rgb(255, 255, 255))
        );
    }

    #[test]
    fn redraw_request_reapplies_current_fill() {
        let (mut orchestrator, tx) = orchestrator_with_channel();
        tx.send(LinkEvent::SignalChanged(Signal::Off)).unwrap();
        orchestrator.process_event_cycle().unwrap();

        orchestrator
            .driver_mut()
            .inject_event(DisplayEvent::RedrawNeeded);
        orchestrator.process_event_cycle().unwrap();
        assert_eq!(
            orchestrator.driver_mut().last_fill().map(convert_to_rgb_color),
            Some(Color::Rgb(0, 0, 0))
        );
    }

    #[test]
    fn link_closed_keeps_last_fill_and_keeps_running() {
        let (mut orchestrator, tx) = orchestrator_with_channel();
        tx.send(LinkEvent::SignalChanged(Signal::Off)).unwrap();
        tx.send(LinkEvent::LinkClosed).unwrap();
        drop(tx);

        assert_eq!(
            orchestrator.process_event_cycle().unwrap(),
            OrchestratorStatus::Running
        );
        assert_eq!(
            orchestrator.driver_mut().last_fill().map(convert_to_rgb_color),
            Some(Color::Rgb(0, 0, 0))
        );
        // Subsequent cycles survive the disconnected channel.
        assert_eq!(
            orchestrator.process_event_cycle().unwrap(),
            OrchestratorStatus::Running
        );
    }
}
