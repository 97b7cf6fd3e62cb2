// src/os/serial.rs

//! Serial-style access to a tty device by filesystem path.
//!
//! Opens the device the way a peer attaching to the pty follower would:
//! read/write, no controlling-terminal side effects, raw termios so bytes
//! pass through without line discipline edits.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{Read, Result as IoResult, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::{AsFd, AsRawFd, RawFd};
use std::path::Path;

use nix::sys::termios::{cfmakeraw, tcgetattr, tcsetattr, SetArg};

#[derive(Debug)]
pub struct SerialStream {
    file: File,
}

impl SerialStream {
    /// Opens `path` as a raw duplex byte stream.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_NOCTTY)
            .open(path)
            .with_context(|| format!("opening serial device {}", path.display()))?;

        let mut termios = tcgetattr(file.as_fd())
            .with_context(|| format!("tcgetattr on {}", path.display()))?;
        cfmakeraw(&mut termios);
        tcsetattr(file.as_fd(), SetArg::TCSANOW, &termios)
            .with_context(|| format!("tcsetattr on {}", path.display()))?;

        log::debug!("SerialStream: opened {} raw", path.display());
        Ok(SerialStream { file })
    }
}

impl Read for SerialStream {
    fn read(&mut self, buf: &mut [u8]) -> IoResult<usize> {
        self.file.read(buf)
    }
}

impl Write for SerialStream {
    fn write(&mut self, buf: &[u8]) -> IoResult<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> IoResult<()> {
        self.file.flush()
    }
}

impl AsRawFd for SerialStream {
    fn as_raw_fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }
}
