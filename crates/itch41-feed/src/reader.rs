//! Streaming frame reassembly.
//!
//! A captured feed is a concatenation of `0x00, length(1), payload(length)`
//! units, delivered by the source in arbitrarily-sized reads. [`FrameReader`]
//! pulls the source in fixed-size chunks and yields complete frames, joining
//! payloads that straddle a chunk boundary.
//!
//! Yielded frames are re-prefixed with the 2-byte big-endian payload length
//! the codec expects, so they feed straight into
//! [`ItchMessage::from_bytes`](itch41_core::ItchMessage::from_bytes).
//!
//! The reader owns its buffer and cursor exclusively; one reader per logical
//! consumer, no internal concurrency.

use std::io::Read;

use itch41_core::config::DEFAULT_CHUNK_SIZE;
use itch41_core::{ItchError, ItchMessage};

/// Marker byte introducing each frame on the stream (the high byte of the
/// conceptual 2-byte length; no message type exceeds 255 payload bytes).
const FRAME_MARKER: u8 = 0x00;

/// Pull-based frame reader over any blocking byte source.
pub struct FrameReader<R> {
    source: R,
    chunk_size: usize,
    buf: Vec<u8>,
    pos: usize,
    terminal: bool,
}

impl<R: Read> FrameReader<R> {
    /// Reader with the default 1024-byte chunk size.
    pub fn new(source: R) -> Self {
        Self::with_chunk_size(source, DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(source: R, chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk size must be positive");
        Self {
            source,
            chunk_size,
            buf: Vec::with_capacity(chunk_size),
            pos: 0,
            terminal: false,
        }
    }

    /// Guarantee `n` unread bytes are buffered, refilling from the source in
    /// `chunk_size` chunks. Returns `false` when the source is exhausted
    /// first; the reader is then terminal.
    fn ensure(&mut self, n: usize) -> Result<bool, ItchError> {
        while self.buf.len() - self.pos < n {
            if self.terminal {
                return Ok(false);
            }
            // Compact the consumed prefix so a frame's payload is always
            // contiguous in one buffer.
            self.buf.drain(..self.pos);
            self.pos = 0;

            let mut chunk = vec![0u8; self.chunk_size];
            let got = self.source.read(&mut chunk)?;
            if got == 0 {
                self.terminal = true;
            } else {
                self.buf.extend_from_slice(&chunk[..got]);
            }
        }
        Ok(true)
    }

    fn take_byte(&mut self) -> u8 {
        let b = self.buf[self.pos];
        self.pos += 1;
        b
    }

    /// Pull the next complete frame.
    ///
    /// Returns `Ok(None)` at end of stream — not an error — and keeps
    /// returning `None` afterwards. A frame cut short by the end of the
    /// source is a [`ItchError::TruncatedFrame`].
    pub fn next_frame(&mut self) -> Result<Option<Vec<u8>>, ItchError> {
        loop {
            if !self.ensure(1)? {
                return Ok(None);
            }
            // Anything before the marker is inter-frame noise; skip it.
            if self.take_byte() != FRAME_MARKER {
                continue;
            }
            if !self.ensure(1)? {
                return Err(ItchError::TruncatedFrame(
                    "stream ended after frame marker, before the length byte".into(),
                ));
            }
            let len = self.take_byte() as usize;
            if !self.ensure(len)? {
                return Err(ItchError::TruncatedFrame(format!(
                    "frame declares {len} payload bytes, stream ended after {}",
                    self.buf.len() - self.pos
                )));
            }

            let mut frame = Vec::with_capacity(2 + len);
            frame.extend_from_slice(&(len as u16).to_be_bytes());
            frame.extend_from_slice(&self.buf[self.pos..self.pos + len]);
            self.pos += len;
            return Ok(Some(frame));
        }
    }

    /// Pull the next frame and bind it to its message type.
    pub fn next_message(&mut self) -> Result<Option<ItchMessage>, ItchError> {
        match self.next_frame()? {
            Some(frame) => Ok(Some(ItchMessage::from_bytes(frame)?)),
            None => Ok(None),
        }
    }
}

impl<R: Read> Iterator for FrameReader<R> {
    type Item = Result<Vec<u8>, ItchError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame().transpose()
    }
}
