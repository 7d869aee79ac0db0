//! Human-readable message dumps.
//!
//! Read-only presentation over an already-constructed message: a raw hex
//! dump and an aligned per-field pretty dump. Both return strings; callers
//! decide where they go.

use std::fmt::Write;

use itch41_core::{ItchError, ItchMessage};

const BYTES_PER_LINE: usize = 8;

fn hex_cells(bytes: &[u8]) -> Vec<String> {
    bytes.iter().map(|b| format!("{b:#04x}")).collect()
}

/// Raw frame bytes, 8 per line.
pub fn hex_dump(msg: &ItchMessage) -> String {
    let cells = hex_cells(msg.raw_bytes());
    let mut out = format!("--- raw frame: {} bytes ---\n", msg.frame_len());
    for line in cells.chunks(BYTES_PER_LINE) {
        let _ = writeln!(out, "  {}", line.join(" "));
    }
    out
}

/// One aligned line per field: name, decoded value, raw bytes.
pub fn pretty(msg: &ItchMessage) -> Result<String, ItchError> {
    let values = msg.decode()?;
    let mut out = format!(
        "--- {} ({} payload bytes) ---\n",
        msg.message_type(),
        msg.payload_len()
    );
    for spec in msg.schema().specs() {
        let start = 2 + spec.offset as usize;
        let raw = &msg.raw_bytes()[start..start + spec.length as usize];
        let value = &values[&spec.field];
        let _ = writeln!(
            out,
            "  {:<24} : {:<20} [{}]",
            spec.field.to_string(),
            value.to_string(),
            hex_cells(raw).join(" ")
        );
    }
    Ok(out)
}
