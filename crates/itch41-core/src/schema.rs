//! Per-message-type wire layout descriptions.
//!
//! A [`Schema`] is an ordered list of [`FieldSpec`] descriptors that fully
//! describes one message type's byte layout. Offsets are relative to the
//! payload start: byte 0 is the one-byte type code, so every schema begins
//! with the implicit `(0, 1, Text, MessageType)` descriptor.
//!
//! Descriptor ranges never overlap and are listed in ascending offset order;
//! the payload span is exactly `offset + length` of the last descriptor.
//! Schemas are built once per message type by the registry, never per
//! message instance.

use crate::fields::{Field, FieldKind};
use crate::registry::MessageType;

/// One field descriptor: where the field lives in the payload and how its
/// bytes are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Byte offset from the payload start (byte 0 = type code).
    pub offset: u16,
    /// Width of the field in bytes.
    pub length: u16,
    /// Integer (big-endian two's-complement) or fixed-width ASCII text.
    pub kind: FieldKind,
    /// Semantic field identifier.
    pub field: Field,
}

impl FieldSpec {
    pub const fn new(offset: u16, length: u16, kind: FieldKind, field: Field) -> Self {
        Self { offset, length, kind, field }
    }
}

/// Ordered field layout for one message type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    message_type: MessageType,
    specs: Vec<FieldSpec>,
}

impl Schema {
    /// Build a schema from its descriptor list.
    ///
    /// Descriptors must start with the type-code descriptor at offset 0 and
    /// be ascending and non-overlapping. Violations are programming errors
    /// in the static registry tables, hence debug assertions only.
    pub fn new(message_type: MessageType, specs: Vec<FieldSpec>) -> Self {
        debug_assert!(!specs.is_empty());
        debug_assert_eq!(specs[0].offset, 0);
        debug_assert_eq!(specs[0].length, 1);
        debug_assert_eq!(specs[0].field, Field::MessageType);
        debug_assert!(
            specs.windows(2).all(|w| w[0].offset + w[0].length <= w[1].offset),
            "overlapping or unordered field specs for {message_type}"
        );
        Self { message_type, specs }
    }

    /// The message type this layout belongs to.
    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    /// All descriptors, in ascending offset order.
    pub fn specs(&self) -> &[FieldSpec] {
        &self.specs
    }

    /// Descriptor for a single field, if this type carries it.
    pub fn spec_for(&self, field: Field) -> Option<&FieldSpec> {
        self.specs.iter().find(|s| s.field == field)
    }

    /// Payload span in bytes: type code byte plus all fields.
    pub fn payload_len(&self) -> u16 {
        let last = self.specs.last().expect("schema is never empty");
        last.offset + last.length
    }

    /// Total frame length: the 2-byte length prefix plus the payload.
    pub fn frame_len(&self) -> usize {
        2 + self.payload_len() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_span_is_end_of_last_spec() {
        let schema = MessageType::AddOrder.schema();
        assert_eq!(schema.payload_len(), 30);
        assert_eq!(schema.frame_len(), 32);
    }

    #[test]
    fn spec_lookup() {
        let schema = MessageType::AddOrder.schema();
        let spec = schema.spec_for(Field::Price).unwrap();
        assert_eq!(spec.offset, 26);
        assert_eq!(spec.length, 4);
        assert_eq!(spec.kind, FieldKind::Integer);
        assert!(schema.spec_for(Field::Mpid).is_none());
    }

    #[test]
    fn all_schemas_ordered_and_non_overlapping() {
        for mt in MessageType::ALL {
            let specs = mt.schema().specs();
            assert_eq!(specs[0].offset, 0, "{mt}: missing type-code descriptor");
            for pair in specs.windows(2) {
                assert!(
                    pair[0].offset + pair[0].length <= pair[1].offset,
                    "{mt}: overlapping specs at offset {}",
                    pair[1].offset
                );
            }
        }
    }
}
