//! Feed persistence.
//!
//! Appends frames to a flat file (or any sink) in the stream framing the
//! [`FrameReader`](crate::reader::FrameReader) consumes: the recomputed
//! 2-byte big-endian payload length followed by the payload. Since no
//! message type exceeds 255 payload bytes, the length's high byte is always
//! `0x00` — the frame marker — so written files replay directly.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use itch41_core::{ItchError, ItchMessage};

/// Writes messages to a byte sink in replayable stream framing.
pub struct FeedWriter<W: Write> {
    sink: W,
}

impl FeedWriter<BufWriter<File>> {
    /// Create (truncate) a feed file.
    pub fn create(path: &Path) -> Result<Self, ItchError> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }

    /// Open a feed file for appending.
    pub fn append(path: &Path) -> Result<Self, ItchError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> FeedWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Append one message: recomputed length prefix, then the payload.
    pub fn write(&mut self, msg: &ItchMessage) -> Result<(), ItchError> {
        let payload = &msg.raw_bytes()[2..];
        self.sink.write_all(&(payload.len() as u16).to_be_bytes())?;
        self.sink.write_all(payload)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), ItchError> {
        self.sink.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itch41_core::{Field, FieldMap, FieldValue, MessageType};

    #[test]
    fn written_bytes_match_the_frame() {
        let values = FieldMap::from_iter([(Field::Seconds, FieldValue::Int(1000))]);
        let msg = ItchMessage::from_values(MessageType::TimeStamp, &values).unwrap();

        let mut out = Vec::new();
        let mut writer = FeedWriter::new(&mut out);
        writer.write(&msg).unwrap();
        writer.flush().unwrap();

        assert_eq!(out, msg.raw_bytes());
        // The recomputed prefix doubles as the 0x00 frame marker.
        assert_eq!(out[0], 0x00);
        assert_eq!(out[1], 0x05);
    }
}
