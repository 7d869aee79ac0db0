//! Decoded-message value object.
//!
//! An [`ItchMessage`] owns its raw frame bytes — the sole source of truth —
//! and resolves field values lazily through the codec. Instances are
//! immutable after construction and freely shareable.

use crate::codec;
use crate::error::ItchError;
use crate::fields::{Field, FieldMap, FieldValue};
use crate::registry::MessageType;
use crate::schema::Schema;

/// One wire record: 2-byte big-endian length prefix, type code byte, fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItchMessage {
    message_type: MessageType,
    raw: Vec<u8>,
}

impl ItchMessage {
    /// Construct from field values, synthesizing the raw frame (encode path).
    pub fn from_values(message_type: MessageType, values: &FieldMap) -> Result<Self, ItchError> {
        let raw = codec::encode(message_type.schema(), values)?;
        Ok(Self { message_type, raw })
    }

    /// Bind a raw frame to its schema (decode path).
    ///
    /// The type byte sits at offset 2, right after the length prefix. The
    /// frame is validated for length but no field is decoded eagerly.
    pub fn from_bytes(raw: Vec<u8>) -> Result<Self, ItchError> {
        let code = *raw.get(2).ok_or_else(|| {
            ItchError::TruncatedFrame(format!(
                "frame of {} bytes has no type code byte",
                raw.len()
            ))
        })?;
        let message_type = MessageType::from_code(code)?;
        let schema = message_type.schema();
        if raw.len() < schema.frame_len() {
            return Err(ItchError::TruncatedFrame(format!(
                "{message_type} frame needs {} bytes, got {}",
                schema.frame_len(),
                raw.len()
            )));
        }
        Ok(Self { message_type, raw })
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn schema(&self) -> &'static Schema {
        self.message_type.schema()
    }

    /// Random-access read of one field.
    pub fn get(&self, field: Field) -> Result<FieldValue, ItchError> {
        codec::read_field(self.schema(), &self.raw, field)
    }

    /// Decode every field into a mapping.
    pub fn decode(&self) -> Result<FieldMap, ItchError> {
        codec::decode(self.schema(), &self.raw)
    }

    /// The full raw frame, length prefix included.
    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Total frame length in bytes (prefix + payload).
    pub fn frame_len(&self) -> usize {
        self.raw.len()
    }

    /// Payload length as declared by the frame's 2-byte prefix.
    pub fn payload_len(&self) -> u16 {
        u16::from_be_bytes([self.raw[0], self.raw[1]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time_stamp(seconds: i64) -> ItchMessage {
        let values = FieldMap::from_iter([(Field::Seconds, FieldValue::Int(seconds))]);
        ItchMessage::from_values(MessageType::TimeStamp, &values).unwrap()
    }

    #[test]
    fn from_values_fixes_the_frame() {
        let msg = time_stamp(1000);
        assert_eq!(msg.message_type(), MessageType::TimeStamp);
        assert_eq!(msg.frame_len(), 7);
        assert_eq!(msg.payload_len(), 5);
        assert_eq!(msg.raw_bytes(), &[0x00, 0x05, b'T', 0x00, 0x00, 0x03, 0xe8]);
    }

    #[test]
    fn from_bytes_binds_without_decoding() {
        let raw = time_stamp(100).raw_bytes().to_vec();
        let msg = ItchMessage::from_bytes(raw).unwrap();
        assert_eq!(msg.message_type(), MessageType::TimeStamp);
        assert_eq!(msg.get(Field::Seconds).unwrap(), FieldValue::Int(100));
    }

    #[test]
    fn from_bytes_rejects_unknown_type() {
        let err = ItchMessage::from_bytes(vec![0x00, 0x05, b'Z', 0, 0, 0, 1]).unwrap_err();
        assert!(matches!(err, ItchError::UnknownType(b'Z')));
    }

    #[test]
    fn from_bytes_rejects_short_frames() {
        let err = ItchMessage::from_bytes(vec![0x00, 0x05]).unwrap_err();
        assert!(matches!(err, ItchError::TruncatedFrame(_)));
        let err = ItchMessage::from_bytes(vec![0x00, 0x05, b'T', 0x00]).unwrap_err();
        assert!(matches!(err, ItchError::TruncatedFrame(_)));
    }

    #[test]
    fn extension_variant_superset() {
        let base_values = FieldMap::from_iter([
            (Field::NanoSeconds, FieldValue::Int(10)),
            (Field::OrderRefNum, FieldValue::Int(1)),
            (Field::Side, FieldValue::from('B')),
            (Field::Shares, FieldValue::from(200u32)),
            (Field::Stock, FieldValue::from("AAPL")),
            (Field::Price, FieldValue::from(100.53)),
        ]);
        let mut mpid_values = base_values.clone();
        mpid_values.insert(Field::Mpid, FieldValue::from("NITE"));

        let base = ItchMessage::from_values(MessageType::AddOrder, &base_values).unwrap();
        let ext = ItchMessage::from_values(MessageType::AddOrderWithMpid, &mpid_values).unwrap();

        // Every base field decodes identically from the extension frame.
        let base_decoded = base.decode().unwrap();
        let ext_decoded = ext.decode().unwrap();
        for (field, value) in &base_decoded {
            if *field == Field::MessageType {
                continue;
            }
            assert_eq!(ext_decoded.get(field), Some(value), "{field}");
        }
        assert_eq!(ext_decoded[&Field::Mpid], FieldValue::from("NITE"));
        assert_eq!(ext.frame_len(), base.frame_len() + 4);
    }
}
