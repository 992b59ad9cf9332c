//! A multi-instrument price-time-priority matching engine.
//!
//! Clients submit new-order and cancel requests against a fixed set of instruments through
//! [`MatchingEngine::submit`]; a pool of shard workers matches aggressors against resting
//! liquidity and delivers trades and per-request acknowledgements through an
//! [`EngineEventObserver`]. Matching behavior is composed from validator chains at construction
//! time; [`PriceTimePriorityMatching::with_default_validators`] gives the standard wiring with
//! self-match prevention.

// Expose the modules
pub mod domain;

// Re-export the public surface for flat `matchbook::*` usage.
pub use domain::models::request::{ClientOrderRequest, MinExecQtyFields};
pub use domain::models::types::{
    ClientId, InstrumentId, OrderAction, OrderId, OrderType, Price, RequestResult, Side, Size,
    ValidationResponse,
};
pub use domain::services::engine::{EngineConfig, EngineError, MatchingEngine};
pub use domain::services::events::{
    ClientEventSink, ClientOrderResponse, ClientTradeEvent, EngineEventObserver,
    FanoutEventObserver, RequestResponse, TradeEvent,
};
pub use domain::services::matching::MatchingAlgorithm;
pub use domain::services::matching::price_time::PriceTimePriorityMatching;
pub use domain::services::orderbook::{PassiveOrder, PassiveOrderBook, PriceLevel};
pub use domain::services::validation::validators::{
    MinExecQtyInsertValidator, MinExecQtyMatchValidator, NewOrderRequestSizeValidator,
    NoSelfMatchValidator, NoSuchOrderCancelValidator, NoSuchOrderInsertValidator,
};
pub use domain::services::validation::{OrderRequestValidator, ValidatorChain};
