//! X11 DisplayDriver implementation using xlib.
//!
//! One window, one solid rectangle. The window is created at the configured
//! canvas size; window managers may clamp the mapped size, so the fill
//! always covers the actual drawable as tracked via ConfigureNotify.

use crate::color::{to_x11_pixel, Color};
use crate::config::CONFIG;
use crate::display::driver::DisplayDriver;
use crate::display::messages::{DisplayEvent, DriverRequest, DriverResponse};
use anyhow::Result;
use log::{debug, info, trace};
use std::ptr;
use x11::xlib::*;

pub struct X11Driver {
    display: *mut Display,
    window: Window,
    gc: GC,
    wm_delete_window: Atom,
    width_px: u32,
    height_px: u32,
}

impl DisplayDriver for X11Driver {
    fn new() -> Result<Self> {
        info!("X11Driver::new() - Connecting to X server");

        unsafe {
            let display = XOpenDisplay(ptr::null());
            if display.is_null() {
                return Err(anyhow::anyhow!(
                    "Failed to open X11 display. Is DISPLAY set?"
                ));
            }

            let screen = XDefaultScreen(display);
            let root = XRootWindow(display, screen);

            let dim = CONFIG.appearance.canvas_dim;
            let background = to_x11_pixel(CONFIG.appearance.background);

            let window = XCreateSimpleWindow(
                display,
                root,
                0,
                0,
                dim,
                dim,
                0,
                XBlackPixel(display, screen),
                background,
            );

            if window == 0 {
                XCloseDisplay(display);
                return Err(anyhow::anyhow!("Failed to create X11 window"));
            }

            XSelectInput(display, window, ExposureMask | StructureNotifyMask);

            let gc = XCreateGC(display, window, 0, ptr::null_mut());

            // WM_DELETE_WINDOW protocol for clean shutdown
            let wm_delete_window = XInternAtom(
                display,
                b"WM_DELETE_WINDOW\0".as_ptr() as *const std::os::raw::c_char,
                0,
            );
            let mut protocols = [wm_delete_window];
            XSetWMProtocols(display, window, protocols.as_mut_ptr(), 1);

            info!("X11Driver: Created window {}x{}", dim, dim);

            Ok(Self {
                display,
                window,
                gc,
                wm_delete_window,
                width_px: dim,
                height_px: dim,
            })
        }
    }

    fn handle_request(&mut self, request: DriverRequest) -> Result<DriverResponse> {
        match request {
            DriverRequest::Init => self.handle_init(),
            DriverRequest::PollEvents => self.handle_poll_events(),
            DriverRequest::Fill(color) => self.handle_fill(color),
            DriverRequest::SetTitle(title) => self.handle_set_title(&title),
        }
    }
}

impl X11Driver {
    fn handle_init(&mut self) -> Result<DriverResponse> {
        unsafe {
            XMapWindow(self.display, self.window);
            XFlush(self.display);
        }
        info!(
            "X11Driver: Mapped window, drawable {}x{} px",
            self.width_px, self.height_px
        );
        Ok(DriverResponse::InitComplete {
            width_px: self.width_px,
            height_px: self.height_px,
        })
    }

    fn handle_poll_events(&mut self) -> Result<DriverResponse> {
        let mut events = Vec::new();

        unsafe {
            while XPending(self.display) > 0 {
                let mut event: XEvent = std::mem::zeroed();
                XNextEvent(self.display, &mut event);

                if let Some(display_event) = self.convert_event(&event) {
                    events.push(display_event);
                }
            }
        }

        Ok(DriverResponse::Events(events))
    }

    fn convert_event(&mut self, event: &XEvent) -> Option<DisplayEvent> {
        unsafe {
            match event.get_type() {
                Expose => {
                    // Coalescing is the orchestrator's problem; report every
                    // final expose in a series.
                    let expose = XExposeEvent::from(event.expose);
                    if expose.count == 0 {
                        Some(DisplayEvent::RedrawNeeded)
                    } else {
                        None
                    }
                }
                ConfigureNotify => {
                    let configure = XConfigureEvent::from(event.configure);
                    let (w, h) = (configure.width.max(1) as u32, configure.height.max(1) as u32);
                    if (w, h) != (self.width_px, self.height_px) {
                        debug!("X11Driver: drawable resized to {}x{}", w, h);
                        self.width_px = w;
                        self.height_px = h;
                        Some(DisplayEvent::RedrawNeeded)
                    } else {
                        None
                    }
                }
                ClientMessage => {
                    let message = XClientMessageEvent::from(event.client_message);
                    if message.data.get_long(0) as Atom == self.wm_delete_window {
                        Some(DisplayEvent::CloseRequested)
                    } else {
                        None
                    }
                }
                _ => None,
            }
        }
    }

    fn handle_fill(&mut self, color: Color) -> Result<DriverResponse> {
        trace!("X11Driver: Fill {:?}", color);
        unsafe {
            XSetForeground(self.display, self.gc, to_x11_pixel(color));
            XFillRectangle(
                self.display,
                self.window,
                self.gc,
                0,
                0,
                self.width_px,
                self.height_px,
            );
            XFlush(self.display);
        }
        Ok(DriverResponse::FillComplete)
    }

    fn handle_set_title(&mut self, title: &str) -> Result<DriverResponse> {
        unsafe {
            let c_title = std::ffi::CString::new(title)?;
            XStoreName(self.display, self.window, c_title.as_ptr());
            XFlush(self.display);
        }
        Ok(DriverResponse::TitleSet)
    }
}

impl Drop for X11Driver {
    fn drop(&mut self) {
        debug!("X11Driver::drop() - Cleaning up");
        unsafe {
            if !self.gc.is_null() {
                XFreeGC(self.display, self.gc);
            }
            if self.window != 0 {
                XDestroyWindow(self.display, self.window);
            }
            if !self.display.is_null() {
                XCloseDisplay(self.display);
            }
        }
    }
}
