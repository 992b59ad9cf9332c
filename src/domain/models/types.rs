//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module defines the identifier and enumeration vocabulary used throughout the matching
// engine. All identifiers are opaque 64-bit unsigned integers wrapped in distinct semantic
// newtypes so that a client id can never be confused with an order id at a call site.
//
// | Section   | Description                                                           |
// |-----------|-----------------------------------------------------------------------|
// | IDS       | ClientId, OrderId, InstrumentId, Price, Size newtypes.                |
// | ENUMS     | Side, OrderAction, OrderType, RequestResult, ValidationResponse.      |
// | TESTS     | Unit tests for the vocabulary types.                                  |
//--------------------------------------------------------------------------------------------------

use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

//--------------------------------------------------------------------------------------------------
//  IDS
//--------------------------------------------------------------------------------------------------

/// Identifies the participant that submitted a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClientId(pub u64);

/// Client-assigned order identifier. Unique per client, not globally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u64);

/// Identifies the instrument a request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstrumentId(pub u64);

/// An order or trade price. The engine is unit-free: no decimal scaling is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price(pub u64);

/// An order or trade quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Size(pub u64);

impl Price {
    /// The lowest representable price. Market sell orders cross at this price.
    pub const MIN: Price = Price(u64::MIN);
    /// The highest representable price. Market buy orders cross at this price.
    pub const MAX: Price = Price(u64::MAX);
}

impl Size {
    /// The empty quantity. A resting order whose remaining size reaches zero is tombstoned.
    pub const ZERO: Size = Size(0);

    /// Returns true if this quantity is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Add for Size {
    type Output = Size;

    fn add(self, rhs: Size) -> Size {
        Size(self.0 + rhs.0)
    }
}

impl AddAssign for Size {
    fn add_assign(&mut self, rhs: Size) {
        self.0 += rhs.0;
    }
}

impl Sub for Size {
    type Output = Size;

    fn sub(self, rhs: Size) -> Size {
        Size(self.0 - rhs.0)
    }
}

impl SubAssign for Size {
    fn sub_assign(&mut self, rhs: Size) {
        self.0 -= rhs.0;
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//--------------------------------------------------------------------------------------------------
//  ENUMS
//--------------------------------------------------------------------------------------------------
// | Name                | Description                                             |
// |---------------------|---------------------------------------------------------|
// | Side                | The side of an order (Buy/Sell).                        |
// | OrderAction         | What a request asks the engine to do (New/Cancel).      |
// | OrderType           | Matching behavior of an order (Limit/Market).           |
// | RequestResult       | Whether a request was accepted (Ack/Nack).              |
// | ValidationResponse  | Outcome of the validator pipeline.                      |
//--------------------------------------------------------------------------------------------------

/// The side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// A buy order. Rests on the bid side of the book.
    Buy,
    /// A sell order. Rests on the ask side of the book.
    Sell,
}

impl Side {
    /// Returns the opposite side. Matching crosses an aggressor against this side.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

/// What a client request asks the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderAction {
    /// Submit a new order.
    New,
    /// Cancel a previously placed order.
    Cancel,
}

/// The type of an order, influencing its matching behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Executes at the request price or better; any residual rests on the book.
    Limit,
    /// Executes immediately at the best available prices; never rests.
    Market,
}

/// Whether a request was accepted or rejected by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestResult {
    /// The request passed validation.
    Ack,
    /// The request was rejected; the paired `ValidationResponse` says why.
    Nack,
}

/// Outcome of running a request or a match candidate through the validator pipeline.
///
/// `NoError` and `ContinueWithoutMatching` are not errors: the former lets processing proceed,
/// the latter skips a single resting order during matching and moves on to the next candidate.
/// Every other variant is a domain rejection reported with [`RequestResult::Nack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationResponse {
    /// Validation passed.
    NoError,
    /// Skip the current resting order and continue matching against the next one.
    ContinueWithoutMatching,
    /// The request names an instrument the engine does not serve.
    NoSuchInstrument,
    /// A cancel request names an order that is not resting on the book.
    NoSuchOrder,
    /// A new order reuses a `(client, order_id)` key that is still resting.
    OrderIdPreexist,
    /// The requested size is at or above the configured maximum.
    OrderSizeExceedLimit,
    /// Matching would cross two orders of the same client.
    SelfMatch,
    /// The request is internally inconsistent (e.g. min-exec quantity above its own size).
    InvalidOrderRequest,
}

impl ValidationResponse {
    /// Returns true for the two non-error outcomes.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::NoError | Self::ContinueWithoutMatching)
    }
}

//--------------------------------------------------------------------------------------------------
//  TESTS
//--------------------------------------------------------------------------------------------------
