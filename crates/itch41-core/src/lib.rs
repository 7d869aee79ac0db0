//! # itch41-core
//!
//! Core crate for the ITCH 4.1 feed toolkit, providing:
//!
//! - **Field catalog** (`fields`) — field identifiers, kinds, values
//! - **Schema model** (`schema`) — per-type field descriptor layouts
//! - **Binary codec** (`codec`) — schema-driven encode/decode/read-one-field
//! - **Type registry** (`registry`) — wire code to message type dispatch
//! - **Message** (`message`) — immutable decoded-message value object
//! - **Configuration** (`config`) — JSON config deserialization
//! - **Error types** (`error`) — domain-specific `ItchError` via thiserror
//! - **Logging** (`logging`) — tracing-based structured logging

pub mod codec;
pub mod config;
pub mod error;
pub mod fields;
pub mod logging;
pub mod message;
pub mod registry;
pub mod schema;

// Re-export the working set at crate root for convenience.
pub use error::ItchError;
pub use fields::{Field, FieldKind, FieldMap, FieldValue};
pub use message::ItchMessage;
pub use registry::MessageType;
pub use schema::{FieldSpec, Schema};
