//! Field catalog shared across all message types.
//!
//! A [`Field`] is a semantic attribute name (shares, price, stock symbol...).
//! The same field may appear at different offsets and lengths in different
//! message types; the per-type placement lives in the schema, not here.

use std::fmt;

/// Every field identifier used across the 18 ITCH 4.1 message types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    MessageType,
    Seconds,
    NanoSeconds,
    EventCode,
    Stock,
    MarketCategory,
    FinancialStatus,
    RoundLotSize,
    RoundLotsOnly,
    TradingState,
    Reserved,
    Reason,
    RegShoAction,
    Mpid,
    PrimaryMarketMaker,
    MarketMakerMode,
    MarketParticipantState,
    OrderRefNum,
    Side,
    Shares,
    Price,
    NewOrderRefNum,
    MatchNum,
    Printable,
    CrossPrice,
    CrossType,
    PairedShares,
    ImbalanceShares,
    ImbalanceDirection,
    FarPrice,
    NearPrice,
    CurrentReferencePrice,
    PriceVariationIndicator,
    InterestFlag,
}

impl Field {
    /// Whether this field semantically carries a price (4 implied decimals
    /// on the wire). Used by the single-field accessor for decimal scaling.
    pub fn is_price(self) -> bool {
        matches!(
            self,
            Self::Price
                | Self::CrossPrice
                | Self::FarPrice
                | Self::NearPrice
                | Self::CurrentReferencePrice
        )
    }

    /// Whether this text field is right-padded with spaces to its slot width
    /// on encode (and therefore may arrive shorter than the slot).
    pub fn is_space_padded(self) -> bool {
        matches!(self, Self::Stock | Self::Mpid)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Wire representation of a field: big-endian two's-complement integer or
/// fixed-width ASCII text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Text,
}

/// A decoded (or to-be-encoded) field value.
///
/// `Decimal` carries prices restored from (or destined for) the wire's
/// `price * 10_000` integer representation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Decimal(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            Self::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Decimal(v)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<char> for FieldValue {
    fn from(c: char) -> Self {
        Self::Text(c.to_string())
    }
}

/// Field-to-value mapping used by the codec's encode and decode paths.
pub type FieldMap = ahash::AHashMap<Field, FieldValue>;
