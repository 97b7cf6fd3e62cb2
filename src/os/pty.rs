// src/os/pty.rs

//! Pseudo-terminal link allocation and the controller-side read endpoint.
//!
//! `PtyLink` owns both ends of a pty pair for the life of the process. The
//! follower end is exposed by filesystem path so an external peer can attach
//! to it as a serial line; the controller end is the process's read side.
//! Holding the follower fd open keeps controller reads blocking (instead of
//! returning EIO) while no peer is attached.

use anyhow::{Context, Result};
use std::io::{Read, Result as IoResult};
use std::os::unix::io::{AsFd, AsRawFd, BorrowedFd, OwnedFd, RawFd};
use std::path::{Path, PathBuf};
use std::time::Duration;

use nix::poll::{poll, PollFd, PollFlags, PollTimeout};

#[derive(Debug)]
pub struct PtyLink {
    controller: OwnedFd,
    // Kept open for the life of the link; see module docs.
    _follower: OwnedFd,
    follower_path: PathBuf,
}

impl PtyLink {
    /// Allocates a connected pseudo-terminal pair and resolves the follower
    /// device path.
    pub fn open() -> Result<Self> {
        let pair = nix::pty::openpty(None, None).context("openpty failed")?;
        let follower_path = nix::unistd::ttyname(pair.slave.as_fd())
            .context("could not resolve pty follower path")?;
        log::debug!(
            "PtyLink: opened pty pair, controller fd {}, follower {}",
            pair.master.as_raw_fd(),
            follower_path.display()
        );
        Ok(PtyLink {
            controller: pair.master,
            _follower: pair.slave,
            follower_path,
        })
    }

    /// The follower device path an external peer opens as a serial line.
    pub fn follower_path(&self) -> &Path {
        &self.follower_path
    }

    /// Waits until the controller end is readable, up to `timeout`.
    ///
    /// Returns `Ok(true)` when data (or hangup) is pending and `Ok(false)` on
    /// timeout, so callers can re-check their cancellation flag between
    /// bounded waits.
    pub fn wait_readable(&self, timeout: Duration) -> Result<bool> {
        let timeout_ms = u16::try_from(timeout.as_millis()).unwrap_or(u16::MAX);
        let mut fds = [PollFd::new(self.controller.as_fd(), PollFlags::POLLIN)];
        let n = poll(&mut fds, PollTimeout::from(timeout_ms))
            .context("poll on pty controller failed")?;
        Ok(n > 0)
    }

    fn controller_fd(&self) -> BorrowedFd<'_> {
        self.controller.as_fd()
    }
}

impl Read for PtyLink {
    fn read(&mut self, buf: &mut [u8]) -> IoResult<usize> {
        nix::unistd::read(self.controller_fd(), buf).map_err(std::io::Error::from)
    }
}

impl AsRawFd for PtyLink {
    fn as_raw_fd(&self) -> RawFd {
        self.controller.as_raw_fd()
    }
}
