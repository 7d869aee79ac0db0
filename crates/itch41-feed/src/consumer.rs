//! Filtering feed consumer loop.
//!
//! Pulls frames from a [`FrameReader`], binds them to message types, applies
//! an optional type allow-list, and hands retained messages to a caller
//! callback. All consumer state lives in the caller's closure — the loop
//! keeps none beyond counters.
//!
//! Per-frame failures (unknown type byte, truncated frame) are logged and
//! skipped unless `fatal_errors` is set; reader-level failures stop the run.

use std::io::Read;

use anyhow::Result;
use itch41_core::{ItchError, ItchMessage, MessageType};
use tracing::warn;

use crate::reader::FrameReader;

/// Options controlling one consumption run.
#[derive(Debug, Clone, Default)]
pub struct ConsumerOptions {
    /// Retain only these message types. `None` keeps everything.
    pub allow: Option<Vec<MessageType>>,
    /// Propagate the first frame error instead of skipping the frame.
    pub fatal_errors: bool,
    /// Stop after delivering this many messages.
    pub limit: Option<u64>,
}

/// Counters for one consumption run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    /// Frames pulled off the stream.
    pub frames: u64,
    /// Messages delivered to the callback.
    pub delivered: u64,
    /// Messages dropped by the allow-list.
    pub skipped: u64,
    /// Frames that failed to bind or decode.
    pub errors: u64,
}

/// Parse comma-separated or listed type codes (e.g. `["A", "F"]`) into
/// message types.
pub fn parse_type_codes<S: AsRef<str>>(codes: &[S]) -> Result<Vec<MessageType>, ItchError> {
    codes
        .iter()
        .map(|c| {
            let s = c.as_ref().trim();
            match s.as_bytes() {
                [code] => MessageType::from_code(*code),
                _ => Err(ItchError::Encoding(format!(
                    "type code must be a single character, got {s:?}"
                ))),
            }
        })
        .collect()
}

/// Drain the reader, delivering retained messages to `on_message`.
///
/// Callback errors always propagate; halting early is the caller's business
/// (return an error or set `limit`).
pub fn process_feed<R, F>(
    reader: &mut FrameReader<R>,
    opts: &ConsumerOptions,
    mut on_message: F,
) -> Result<FeedStats>
where
    R: Read,
    F: FnMut(&ItchMessage) -> Result<()>,
{
    let mut stats = FeedStats::default();

    loop {
        if opts.limit.is_some_and(|limit| stats.delivered >= limit) {
            break;
        }

        let frame = match reader.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => break,
            Err(e) if opts.fatal_errors => return Err(e.into()),
            Err(e) => {
                // The reader reports a short stream once and goes terminal.
                warn!("stopping on reader error: {e}");
                stats.errors += 1;
                break;
            }
        };
        stats.frames += 1;

        let msg = match ItchMessage::from_bytes(frame) {
            Ok(msg) => msg,
            Err(e) if opts.fatal_errors => return Err(e.into()),
            Err(e) => {
                warn!("skipping frame {}: {e}", stats.frames);
                stats.errors += 1;
                continue;
            }
        };

        if let Some(allow) = &opts.allow {
            if !allow.contains(&msg.message_type()) {
                stats.skipped += 1;
                continue;
            }
        }

        on_message(&msg)?;
        stats.delivered += 1;
    }

    Ok(stats)
}
