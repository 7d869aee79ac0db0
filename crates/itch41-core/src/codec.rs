//! Schema-driven binary encode/decode.
//!
//! All three operations are generic over the schema: no message type has
//! hand-written parsing code. Integers are big-endian two's-complement in
//! widths of 2, 4 or 8 bytes; text is fixed-width ASCII.
//!
//! # Price scaling
//!
//! Prices travel on the wire as `price * 10_000` in a signed integer slot
//! (4 implied decimal digits). The scaling rules mirror the feed handler
//! this replaces and are intentionally asymmetric:
//!
//! - `encode` scales any integer field handed a `Decimal` value, regardless
//!   of field identity.
//! - `decode` un-scales only the field literally named `Price`.
//! - `read_field` un-scales every price-bearing field ([`Field::is_price`]):
//!   Price, CrossPrice, FarPrice, NearPrice, CurrentReferencePrice.
//!
//! See DESIGN.md for the rationale behind keeping the asymmetry.

use crate::error::ItchError;
use crate::fields::{Field, FieldKind, FieldMap, FieldValue};
use crate::schema::{FieldSpec, Schema};

/// Divisor restoring a wire integer price to its decimal value.
const PRICE_SCALE: f64 = 10_000.0;

/// Encode a full frame from a field-value mapping.
///
/// The output starts with the 2-byte big-endian payload length, then the
/// type-code byte, then each field per the schema. Fails with
/// [`ItchError::Layout`] when a required field is absent and with
/// [`ItchError::Encoding`] when a value does not fit its slot.
pub fn encode(schema: &Schema, values: &FieldMap) -> Result<Vec<u8>, ItchError> {
    let mut frame = Vec::with_capacity(schema.frame_len());
    frame.extend_from_slice(&schema.payload_len().to_be_bytes());
    frame.push(schema.message_type().code());

    for spec in &schema.specs()[1..] {
        let value = values.get(&spec.field).ok_or_else(|| {
            ItchError::Layout(format!(
                "missing field {} for {}",
                spec.field,
                schema.message_type()
            ))
        })?;
        match spec.kind {
            FieldKind::Integer => encode_int(&mut frame, spec, value)?,
            FieldKind::Text => encode_text(&mut frame, spec, value)?,
        }
    }
    Ok(frame)
}

/// Decode every field of a frame into a field-value mapping.
///
/// Fails with [`ItchError::TruncatedFrame`] when the frame is shorter than
/// the schema's span.
pub fn decode(schema: &Schema, raw: &[u8]) -> Result<FieldMap, ItchError> {
    check_span(schema, raw)?;
    let mut values = FieldMap::with_capacity(schema.specs().len());
    for spec in schema.specs() {
        values.insert(spec.field, decode_spec(spec, raw, spec.field == Field::Price));
    }
    Ok(values)
}

/// Random-access read of a single field, without materializing the full map.
///
/// Unlike [`decode`], decimal scaling is applied to every price-bearing
/// field, not just `Price`.
pub fn read_field(schema: &Schema, raw: &[u8], field: Field) -> Result<FieldValue, ItchError> {
    check_span(schema, raw)?;
    let spec = schema.spec_for(field).ok_or_else(|| {
        ItchError::Layout(format!("{} has no field {field}", schema.message_type()))
    })?;
    Ok(decode_spec(spec, raw, field.is_price()))
}

fn check_span(schema: &Schema, raw: &[u8]) -> Result<(), ItchError> {
    if raw.len() < schema.frame_len() {
        return Err(ItchError::TruncatedFrame(format!(
            "{} frame needs {} bytes, got {}",
            schema.message_type(),
            schema.frame_len(),
            raw.len()
        )));
    }
    Ok(())
}

/// Slice and interpret one descriptor. The frame's 2-byte length prefix
/// shifts every payload offset by 2.
fn decode_spec(spec: &FieldSpec, raw: &[u8], scale_price: bool) -> FieldValue {
    let start = 2 + spec.offset as usize;
    let bytes = &raw[start..start + spec.length as usize];
    match spec.kind {
        FieldKind::Integer => {
            let v = read_be_int(bytes);
            if scale_price {
                FieldValue::Decimal(v as f64 / PRICE_SCALE)
            } else {
                FieldValue::Int(v)
            }
        }
        FieldKind::Text => {
            let text = String::from_utf8_lossy(bytes);
            if spec.field == Field::Stock {
                FieldValue::Text(text.trim_end_matches(' ').to_owned())
            } else {
                FieldValue::Text(text.into_owned())
            }
        }
    }
}

/// Big-endian two's-complement read, sign-extended to i64.
fn read_be_int(bytes: &[u8]) -> i64 {
    match bytes.len() {
        2 => i16::from_be_bytes([bytes[0], bytes[1]]) as i64,
        4 => i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as i64,
        8 => i64::from_be_bytes(bytes.try_into().expect("length checked")),
        // Schemas only declare integer widths of 2, 4 and 8.
        other => unreachable!("unsupported integer width {other}"),
    }
}

fn encode_int(frame: &mut Vec<u8>, spec: &FieldSpec, value: &FieldValue) -> Result<(), ItchError> {
    let v = match value {
        FieldValue::Int(v) => *v,
        // A decimal handed to an integer slot is a price: scale and truncate
        // toward zero.
        FieldValue::Decimal(d) => (d * PRICE_SCALE) as i64,
        FieldValue::Text(_) => {
            return Err(ItchError::Encoding(format!(
                "field {} expects an integer value",
                spec.field
            )));
        }
    };
    let fits = match spec.length {
        2 => i64::from(v as i16) == v,
        4 => i64::from(v as i32) == v,
        8 => true,
        other => {
            return Err(ItchError::Encoding(format!(
                "field {} has unsupported integer width {other}",
                spec.field
            )));
        }
    };
    if !fits {
        return Err(ItchError::Encoding(format!(
            "value {v} does not fit the {}-byte slot of field {}",
            spec.length, spec.field
        )));
    }
    let be = v.to_be_bytes();
    frame.extend_from_slice(&be[8 - spec.length as usize..]);
    Ok(())
}

fn encode_text(frame: &mut Vec<u8>, spec: &FieldSpec, value: &FieldValue) -> Result<(), ItchError> {
    let s = value.as_text().ok_or_else(|| {
        ItchError::Encoding(format!("field {} expects a text value", spec.field))
    })?;
    let width = spec.length as usize;
    if !s.is_ascii() {
        return Err(ItchError::Encoding(format!(
            "field {} must be ASCII, got {s:?}",
            spec.field
        )));
    }
    if spec.field.is_space_padded() {
        if s.len() > width {
            return Err(ItchError::Encoding(format!(
                "field {} is {} bytes, exceeds its {width}-byte slot",
                spec.field,
                s.len()
            )));
        }
        frame.extend_from_slice(s.as_bytes());
        frame.extend(std::iter::repeat_n(b' ', width - s.len()));
    } else {
        if s.len() != width {
            return Err(ItchError::Encoding(format!(
                "field {} is {} bytes, slot is {width} and has no padding rule",
                spec.field,
                s.len()
            )));
        }
        frame.extend_from_slice(s.as_bytes());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MessageType;

    fn add_order_values() -> FieldMap {
        FieldMap::from_iter([
            (Field::NanoSeconds, FieldValue::from(10i64)),
            (Field::OrderRefNum, FieldValue::from(1i64)),
            (Field::Side, FieldValue::from('B')),
            (Field::Shares, FieldValue::from(200u32)),
            (Field::Stock, FieldValue::from("AAPL")),
            (Field::Price, FieldValue::from(100.53)),
        ])
    }

    #[test]
    fn encode_layout() {
        let schema = MessageType::AddOrder.schema();
        let frame = encode(schema, &add_order_values()).unwrap();
        assert_eq!(frame.len(), schema.frame_len());
        // Length prefix, type code.
        assert_eq!(&frame[..2], &[0x00, 0x1e]);
        assert_eq!(frame[2], b'A');
        // Stock is space-padded to 8 bytes.
        assert_eq!(&frame[20..28], b"AAPL    ");
        // 100.53 scales to 1_005_300 on the wire.
        assert_eq!(&frame[28..32], &1_005_300i32.to_be_bytes());
    }

    #[test]
    fn round_trip_add_order() {
        let schema = MessageType::AddOrder.schema();
        let values = add_order_values();
        let frame = encode(schema, &values).unwrap();
        let decoded = decode(schema, &frame).unwrap();
        for (field, expected) in &values {
            assert_eq!(decoded.get(field), Some(expected), "{field}");
        }
        assert_eq!(
            decoded.get(&Field::MessageType),
            Some(&FieldValue::from('A'))
        );
    }

    #[test]
    fn round_trip_every_schema() {
        for mt in MessageType::ALL {
            let schema = mt.schema();
            let mut values = FieldMap::default();
            for spec in &schema.specs()[1..] {
                let v = match spec.kind {
                    FieldKind::Integer => FieldValue::Int(42),
                    // Only Stock is trimmed on decode, so only Stock may be
                    // supplied short and still round-trip.
                    FieldKind::Text if spec.field == Field::Stock => FieldValue::from("AB"),
                    FieldKind::Text => {
                        FieldValue::Text("x".repeat(spec.length as usize))
                    }
                };
                values.insert(spec.field, v);
            }
            let frame = encode(schema, &values).unwrap();
            let decoded = decode(schema, &frame).unwrap();
            for (field, expected) in &values {
                if *field == Field::Price {
                    // Full decode un-scales the Price field.
                    assert_eq!(decoded.get(field), Some(&FieldValue::Decimal(0.0042)));
                } else {
                    assert_eq!(decoded.get(field), Some(expected), "{mt} {field}");
                }
            }
        }
    }

    #[test]
    fn stock_padding_is_stripped_on_decode() {
        let schema = MessageType::RetailInterest.schema();
        let values = FieldMap::from_iter([
            (Field::NanoSeconds, FieldValue::from(1i64)),
            (Field::Stock, FieldValue::from("ZVZZT")),
            (Field::InterestFlag, FieldValue::from('A')),
        ]);
        let frame = encode(schema, &values).unwrap();
        assert_eq!(&frame[7..15], b"ZVZZT   ");
        let decoded = decode(schema, &frame).unwrap();
        assert_eq!(decoded[&Field::Stock], FieldValue::from("ZVZZT"));
    }

    #[test]
    fn price_encode_scaling() {
        let schema = MessageType::OrderReplace.schema();
        let values = FieldMap::from_iter([
            (Field::NanoSeconds, FieldValue::from(45i64)),
            (Field::OrderRefNum, FieldValue::from(30i64)),
            (Field::NewOrderRefNum, FieldValue::from(40i64)),
            (Field::Shares, FieldValue::from(200u32)),
            (Field::Price, FieldValue::from(100.99)),
        ]);
        let frame = encode(schema, &values).unwrap();
        assert_eq!(&frame[27..31], &1_009_900i32.to_be_bytes());
    }

    #[test]
    fn price_decode_scaling() {
        let schema = MessageType::AddOrder.schema();
        let mut values = add_order_values();
        values.insert(Field::Price, FieldValue::Int(169_900));
        let frame = encode(schema, &values).unwrap();
        let decoded = decode(schema, &frame).unwrap();
        assert_eq!(decoded[&Field::Price], FieldValue::Decimal(16.99));
    }

    // Pinned behavior for a captured Add Order frame: shares 999999, price
    // bytes 00 00 00 01 decoding to 0.0001, stock "LGL+" space-padded.
    #[test]
    fn captured_add_order_frame() {
        let mut frame = vec![0x00, 0x1e, 0x41];
        frame.extend_from_slice(&111_111_111i32.to_be_bytes()); // NanoSeconds
        frame.extend_from_slice(&4096i64.to_be_bytes()); // OrderRefNum
        frame.push(b'B'); // Side
        frame.extend_from_slice(&[0x00, 0x0f, 0x42, 0x3f]); // Shares = 999999
        frame.extend_from_slice(&[0x4c, 0x47, 0x4c, 0x2b, 0x20, 0x20, 0x20, 0x20]); // "LGL+    "
        frame.extend_from_slice(&[0x00, 0x00, 0x00, 0x01]); // Price

        let schema = MessageType::AddOrder.schema();
        let decoded = decode(schema, &frame).unwrap();
        assert_eq!(decoded[&Field::Shares], FieldValue::Int(999_999));
        assert_eq!(decoded[&Field::Price], FieldValue::Decimal(0.0001));
        assert_eq!(decoded[&Field::Stock], FieldValue::from("LGL+"));
        assert_eq!(decoded[&Field::Side], FieldValue::from('B'));
        assert_eq!(decoded[&Field::OrderRefNum], FieldValue::Int(4096));
    }

    #[test]
    fn read_field_scales_all_price_fields() {
        let schema = MessageType::NetOrderImbalance.schema();
        let values = FieldMap::from_iter([
            (Field::NanoSeconds, FieldValue::from(7i64)),
            (Field::PairedShares, FieldValue::from(100i64)),
            (Field::ImbalanceShares, FieldValue::from(50i64)),
            (Field::ImbalanceDirection, FieldValue::from('B')),
            (Field::Stock, FieldValue::from("AAPL")),
            (Field::FarPrice, FieldValue::Int(169_900)),
            (Field::NearPrice, FieldValue::Int(170_000)),
            (Field::CurrentReferencePrice, FieldValue::Int(169_950)),
            (Field::CrossType, FieldValue::from('O')),
            (Field::PriceVariationIndicator, FieldValue::from('A')),
        ]);
        let frame = encode(schema, &values).unwrap();

        // Full decode leaves non-Price price fields as raw integers...
        let decoded = decode(schema, &frame).unwrap();
        assert_eq!(decoded[&Field::FarPrice], FieldValue::Int(169_900));

        // ...while the single-field accessor scales all of them.
        assert_eq!(
            read_field(schema, &frame, Field::FarPrice).unwrap(),
            FieldValue::Decimal(16.99)
        );
        assert_eq!(
            read_field(schema, &frame, Field::NearPrice).unwrap(),
            FieldValue::Decimal(17.0)
        );
        assert_eq!(
            read_field(schema, &frame, Field::CurrentReferencePrice).unwrap(),
            FieldValue::Decimal(16.995)
        );
        // Non-price fields stay raw either way.
        assert_eq!(
            read_field(schema, &frame, Field::PairedShares).unwrap(),
            FieldValue::Int(100)
        );
    }

    #[test]
    fn missing_field_is_layout_error() {
        let schema = MessageType::TimeStamp.schema();
        let err = encode(schema, &FieldMap::default()).unwrap_err();
        assert!(matches!(err, ItchError::Layout(_)));
    }

    #[test]
    fn unpadded_text_length_mismatch_is_encoding_error() {
        let schema = MessageType::StockTradingAction.schema();
        let values = FieldMap::from_iter([
            (Field::NanoSeconds, FieldValue::from(1i64)),
            (Field::Stock, FieldValue::from("AAPL")),
            (Field::TradingState, FieldValue::from('T')),
            (Field::Reserved, FieldValue::from(' ')),
            // Reason is a 4-byte slot with no padding rule.
            (Field::Reason, FieldValue::from("12")),
        ]);
        let err = encode(schema, &values).unwrap_err();
        assert!(matches!(err, ItchError::Encoding(_)));
    }

    #[test]
    fn oversized_integer_is_encoding_error() {
        let schema = MessageType::AddOrder.schema();
        let mut values = add_order_values();
        values.insert(Field::Shares, FieldValue::Int(i64::MAX));
        let err = encode(schema, &values).unwrap_err();
        assert!(matches!(err, ItchError::Encoding(_)));
    }

    #[test]
    fn truncated_frame_is_rejected() {
        let schema = MessageType::AddOrder.schema();
        let frame = encode(schema, &add_order_values()).unwrap();
        let err = decode(schema, &frame[..frame.len() - 1]).unwrap_err();
        assert!(matches!(err, ItchError::TruncatedFrame(_)));
        let err = read_field(schema, &frame[..10], Field::Price).unwrap_err();
        assert!(matches!(err, ItchError::TruncatedFrame(_)));
    }

    #[test]
    fn read_field_unknown_for_schema_is_layout_error() {
        let schema = MessageType::AddOrder.schema();
        let frame = encode(schema, &add_order_values()).unwrap();
        let err = read_field(schema, &frame, Field::Mpid).unwrap_err();
        assert!(matches!(err, ItchError::Layout(_)));
    }

    #[test]
    fn negative_prices_survive() {
        let schema = MessageType::AddOrder.schema();
        let mut values = add_order_values();
        values.insert(Field::Price, FieldValue::from(-0.5));
        let frame = encode(schema, &values).unwrap();
        assert_eq!(&frame[28..32], &(-5000i32).to_be_bytes());
        let decoded = decode(schema, &frame).unwrap();
        assert_eq!(decoded[&Field::Price], FieldValue::Decimal(-0.5));
    }
}
