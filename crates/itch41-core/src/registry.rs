//! Message type registry: wire code to schema dispatch.
//!
//! Each of the 18 ITCH 4.1 message types is a [`MessageType`] variant tagged
//! by its one-byte ASCII wire code. The registry is a closed static table —
//! extension variants (AddOrderWithMpid extends AddOrder, adding the Mpid
//! field) get their own entries so lookup is exact, never prefix-based.
//!
//! Extension schemas are built by composition: the base variant's descriptor
//! vector plus the extra trailing descriptors.

use std::fmt;
use std::sync::OnceLock;

use crate::error::ItchError;
use crate::fields::Field::*;
// The Field::MessageType variant would shadow the enum below, hence the alias.
use crate::fields::Field::MessageType as MessageType_;
use crate::fields::FieldKind::{Integer, Text};
use crate::schema::{FieldSpec, Schema};

/// The 18 ITCH 4.1 message types, in wire-document order.
///
/// Discriminants index the static schema table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageType {
    TimeStamp = 0,
    SystemEvent = 1,
    StockDirectory = 2,
    StockTradingAction = 3,
    RegShoRestriction = 4,
    MarketParticipantPosition = 5,
    AddOrder = 6,
    AddOrderWithMpid = 7,
    OrderExecuted = 8,
    OrderExecutedWithPrice = 9,
    OrderCancel = 10,
    OrderDelete = 11,
    OrderReplace = 12,
    TradeNonCross = 13,
    CrossTrade = 14,
    BrokenTrade = 15,
    NetOrderImbalance = 16,
    RetailInterest = 17,
}

impl MessageType {
    /// All variants, in wire-document order.
    pub const ALL: [MessageType; 18] = [
        Self::TimeStamp,
        Self::SystemEvent,
        Self::StockDirectory,
        Self::StockTradingAction,
        Self::RegShoRestriction,
        Self::MarketParticipantPosition,
        Self::AddOrder,
        Self::AddOrderWithMpid,
        Self::OrderExecuted,
        Self::OrderExecutedWithPrice,
        Self::OrderCancel,
        Self::OrderDelete,
        Self::OrderReplace,
        Self::TradeNonCross,
        Self::CrossTrade,
        Self::BrokenTrade,
        Self::NetOrderImbalance,
        Self::RetailInterest,
    ];

    /// One-byte ASCII wire code for this type.
    pub fn code(self) -> u8 {
        match self {
            Self::TimeStamp => b'T',
            Self::SystemEvent => b'S',
            Self::StockDirectory => b'R',
            Self::StockTradingAction => b'H',
            Self::RegShoRestriction => b'Y',
            Self::MarketParticipantPosition => b'L',
            Self::AddOrder => b'A',
            Self::AddOrderWithMpid => b'F',
            Self::OrderExecuted => b'E',
            Self::OrderExecutedWithPrice => b'C',
            Self::OrderCancel => b'X',
            Self::OrderDelete => b'D',
            Self::OrderReplace => b'U',
            Self::TradeNonCross => b'P',
            Self::CrossTrade => b'Q',
            Self::BrokenTrade => b'B',
            Self::NetOrderImbalance => b'I',
            Self::RetailInterest => b'N',
        }
    }

    /// Exact lookup of a wire code among the registered types.
    pub fn from_code(code: u8) -> Result<Self, ItchError> {
        match code {
            b'T' => Ok(Self::TimeStamp),
            b'S' => Ok(Self::SystemEvent),
            b'R' => Ok(Self::StockDirectory),
            b'H' => Ok(Self::StockTradingAction),
            b'Y' => Ok(Self::RegShoRestriction),
            b'L' => Ok(Self::MarketParticipantPosition),
            b'A' => Ok(Self::AddOrder),
            b'F' => Ok(Self::AddOrderWithMpid),
            b'E' => Ok(Self::OrderExecuted),
            b'C' => Ok(Self::OrderExecutedWithPrice),
            b'X' => Ok(Self::OrderCancel),
            b'D' => Ok(Self::OrderDelete),
            b'U' => Ok(Self::OrderReplace),
            b'P' => Ok(Self::TradeNonCross),
            b'Q' => Ok(Self::CrossTrade),
            b'B' => Ok(Self::BrokenTrade),
            b'I' => Ok(Self::NetOrderImbalance),
            b'N' => Ok(Self::RetailInterest),
            other => Err(ItchError::UnknownType(other)),
        }
    }

    /// The wire layout for this message type.
    pub fn schema(self) -> &'static Schema {
        &schemas()[self as usize]
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

fn schemas() -> &'static [Schema; 18] {
    static SCHEMAS: OnceLock<[Schema; 18]> = OnceLock::new();
    SCHEMAS.get_or_init(build_schemas)
}

/// Every schema starts with the implicit type-code descriptor.
fn base(extra: &[FieldSpec]) -> Vec<FieldSpec> {
    let mut specs = vec![FieldSpec::new(0, 1, Text, MessageType_)];
    specs.extend_from_slice(extra);
    specs
}

fn build_schemas() -> [Schema; 18] {
    let time_stamp = base(&[FieldSpec::new(1, 4, Integer, Seconds)]);

    let system_event = base(&[
        FieldSpec::new(1, 4, Integer, NanoSeconds),
        FieldSpec::new(5, 1, Text, EventCode),
    ]);

    let stock_directory = base(&[
        FieldSpec::new(1, 4, Integer, NanoSeconds),
        FieldSpec::new(5, 8, Text, Stock),
        FieldSpec::new(13, 1, Text, MarketCategory),
        FieldSpec::new(14, 1, Text, FinancialStatus),
        FieldSpec::new(15, 4, Integer, RoundLotSize),
        FieldSpec::new(19, 1, Text, RoundLotsOnly),
    ]);

    let stock_trading_action = base(&[
        FieldSpec::new(1, 4, Integer, NanoSeconds),
        FieldSpec::new(5, 8, Text, Stock),
        FieldSpec::new(13, 1, Text, TradingState),
        FieldSpec::new(14, 1, Text, Reserved),
        FieldSpec::new(15, 4, Text, Reason),
    ]);

    let reg_sho_restriction = base(&[
        FieldSpec::new(1, 4, Integer, NanoSeconds),
        FieldSpec::new(5, 8, Text, Stock),
        FieldSpec::new(13, 1, Text, RegShoAction),
    ]);

    let market_participant_position = base(&[
        FieldSpec::new(1, 4, Integer, NanoSeconds),
        FieldSpec::new(5, 4, Text, Mpid),
        FieldSpec::new(9, 8, Text, Stock),
        FieldSpec::new(17, 1, Text, PrimaryMarketMaker),
        FieldSpec::new(18, 1, Text, MarketMakerMode),
        FieldSpec::new(19, 1, Text, MarketParticipantState),
    ]);

    let add_order = base(&[
        FieldSpec::new(1, 4, Integer, NanoSeconds),
        FieldSpec::new(5, 8, Integer, OrderRefNum),
        FieldSpec::new(13, 1, Text, Side),
        FieldSpec::new(14, 4, Integer, Shares),
        FieldSpec::new(18, 8, Text, Stock),
        FieldSpec::new(26, 4, Integer, Price),
    ]);

    // Extension variant: AddOrder's layout plus the trailing Mpid field.
    let mut add_order_with_mpid = add_order.clone();
    add_order_with_mpid.push(FieldSpec::new(30, 4, Text, Mpid));

    let order_executed = base(&[
        FieldSpec::new(1, 4, Integer, NanoSeconds),
        FieldSpec::new(5, 8, Integer, OrderRefNum),
        FieldSpec::new(13, 4, Integer, Shares),
        FieldSpec::new(17, 8, Integer, MatchNum),
    ]);

    // Extension variant: OrderExecuted's layout plus printable flag and price.
    let mut order_executed_with_price = order_executed.clone();
    order_executed_with_price.push(FieldSpec::new(25, 1, Text, Printable));
    order_executed_with_price.push(FieldSpec::new(26, 4, Integer, Price));

    let order_cancel = base(&[
        FieldSpec::new(1, 4, Integer, NanoSeconds),
        FieldSpec::new(5, 8, Integer, OrderRefNum),
        FieldSpec::new(13, 4, Integer, Shares),
    ]);

    let order_delete = base(&[
        FieldSpec::new(1, 4, Integer, NanoSeconds),
        FieldSpec::new(5, 8, Integer, OrderRefNum),
    ]);

    let order_replace = base(&[
        FieldSpec::new(1, 4, Integer, NanoSeconds),
        FieldSpec::new(5, 8, Integer, OrderRefNum),
        FieldSpec::new(13, 8, Integer, NewOrderRefNum),
        FieldSpec::new(21, 4, Integer, Shares),
        FieldSpec::new(25, 4, Integer, Price),
    ]);

    let trade_non_cross = base(&[
        FieldSpec::new(1, 4, Integer, NanoSeconds),
        FieldSpec::new(5, 8, Integer, OrderRefNum),
        FieldSpec::new(13, 1, Text, Side),
        FieldSpec::new(14, 4, Integer, Shares),
        FieldSpec::new(18, 8, Text, Stock),
        FieldSpec::new(26, 4, Integer, Price),
        FieldSpec::new(30, 8, Integer, MatchNum),
    ]);

    let cross_trade = base(&[
        FieldSpec::new(1, 4, Integer, NanoSeconds),
        FieldSpec::new(5, 8, Integer, Shares),
        FieldSpec::new(13, 8, Text, Stock),
        FieldSpec::new(21, 4, Integer, CrossPrice),
        FieldSpec::new(25, 8, Integer, MatchNum),
        FieldSpec::new(33, 1, Text, CrossType),
    ]);

    let broken_trade = base(&[
        FieldSpec::new(1, 4, Integer, NanoSeconds),
        FieldSpec::new(5, 8, Integer, MatchNum),
    ]);

    let net_order_imbalance = base(&[
        FieldSpec::new(1, 4, Integer, NanoSeconds),
        FieldSpec::new(5, 8, Integer, PairedShares),
        FieldSpec::new(13, 8, Integer, ImbalanceShares),
        FieldSpec::new(21, 1, Text, ImbalanceDirection),
        FieldSpec::new(22, 8, Text, Stock),
        FieldSpec::new(30, 4, Integer, FarPrice),
        FieldSpec::new(34, 4, Integer, NearPrice),
        FieldSpec::new(38, 4, Integer, CurrentReferencePrice),
        FieldSpec::new(42, 1, Text, CrossType),
        FieldSpec::new(43, 1, Text, PriceVariationIndicator),
    ]);

    let retail_interest = base(&[
        FieldSpec::new(1, 4, Integer, NanoSeconds),
        FieldSpec::new(5, 8, Text, Stock),
        FieldSpec::new(13, 1, Text, InterestFlag),
    ]);

    [
        Schema::new(MessageType::TimeStamp, time_stamp),
        Schema::new(MessageType::SystemEvent, system_event),
        Schema::new(MessageType::StockDirectory, stock_directory),
        Schema::new(MessageType::StockTradingAction, stock_trading_action),
        Schema::new(MessageType::RegShoRestriction, reg_sho_restriction),
        Schema::new(MessageType::MarketParticipantPosition, market_participant_position),
        Schema::new(MessageType::AddOrder, add_order),
        Schema::new(MessageType::AddOrderWithMpid, add_order_with_mpid),
        Schema::new(MessageType::OrderExecuted, order_executed),
        Schema::new(MessageType::OrderExecutedWithPrice, order_executed_with_price),
        Schema::new(MessageType::OrderCancel, order_cancel),
        Schema::new(MessageType::OrderDelete, order_delete),
        Schema::new(MessageType::OrderReplace, order_replace),
        Schema::new(MessageType::TradeNonCross, trade_non_cross),
        Schema::new(MessageType::CrossTrade, cross_trade),
        Schema::new(MessageType::BrokenTrade, broken_trade),
        Schema::new(MessageType::NetOrderImbalance, net_order_imbalance),
        Schema::new(MessageType::RetailInterest, retail_interest),
    ]
}
