// src/os/mod.rs

//! OS-level plumbing: the pseudo-terminal link and the serial-style stream
//! used to open its follower end by path.

pub mod pty;
pub mod serial;
