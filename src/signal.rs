// src/signal.rs

//! The binary lamp signal and its decoding from raw link chunks.
//!
//! Decoding is pure byte matching; which fill color each state maps to is
//! the orchestrator's business (it reads the configured scheme).

/// Binary display state derived from the most recent chunk read off the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    On,
    Off,
}

impl Signal {
    /// Decodes a chunk into a signal.
    ///
    /// A chunk is `On` iff it is exactly the single sentinel byte; anything
    /// else (empty, longer, or a different byte value) is `Off`. There is no
    /// history and no debouncing: the signal is a total function of the
    /// chunk.
    pub fn from_chunk(chunk: &[u8], sentinel: u8) -> Self {
        if chunk == [sentinel] {
            Signal::On
        } else {
            Signal::Off
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENTINEL: u8 = b'B';

    #[test]
    fn exact_sentinel_chunk_is_on() {
        assert_eq!(Signal::from_chunk(b"B", SENTINEL), Signal::On);
    }

    #[test]
    fn other_single_bytes_are_off() {
        assert_eq!(Signal::from_chunk(b"A", SENTINEL), Signal::Off);
        assert_eq!(Signal::from_chunk(b"b", SENTINEL), Signal::Off);
        assert_eq!(Signal::from_chunk(&[0x00], SENTINEL), Signal::Off);
    }

    #[test]
    fn empty_chunk_is_off() {
        assert_eq!(Signal::from_chunk(b"", SENTINEL), Signal::Off);
    }

    #[test]
    fn longer_chunks_are_off_even_when_they_contain_the_sentinel() {
        assert_eq!(Signal::from_chunk(b"BB", SENTINEL), Signal::Off);
        assert_eq!(Signal::from_chunk(b"AB", SENTINEL), Signal::Off);
        assert_eq!(Signal::from_chunk(b"Your text", SENTINEL), Signal::Off);
    }
}
