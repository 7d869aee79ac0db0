//! # itch41-feed
//!
//! Streaming side of the ITCH 4.1 feed toolkit.
//!
//! - [`reader`] — `FrameReader`: reassembles length-delimited frames from a
//!   byte source read in fixed-size chunks
//! - [`writer`] — `FeedWriter`: appends frames in replayable stream framing
//! - [`consumer`] — filtering pull loop delivering messages to a callback
//! - [`dump`] — hex and pretty presentation of decoded messages
//!
//! Everything is synchronous and single-threaded; a reader is exclusively
//! owned by one consumer.

pub mod consumer;
pub mod dump;
pub mod reader;
pub mod writer;

pub use consumer::{ConsumerOptions, FeedStats, process_feed};
pub use reader::FrameReader;
pub use writer::FeedWriter;
