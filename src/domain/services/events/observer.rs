//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module defines the engine's output boundary: the observer capability the matching workers
// emit events through, the per-client sink interface the default observer fans out to, and the
// immutable record types describing each event kind.
//
// | Name                 | Description                                                       |
// |----------------------|-------------------------------------------------------------------|
// | EngineEventObserver  | Receives trades and request responses from the workers.           |
// | ClientEventSink      | Per-client callback interface fed by the default observer.        |
// | TradeEvent           | Engine-side description of one trade between two counterparties.  |
// | RequestResponse      | Engine-side description of one request acknowledgement.           |
// | ClientTradeEvent     | A trade as seen by one of its counterparties.                     |
// | ClientOrderResponse  | A request acknowledgement as seen by the requesting client.       |
//--------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::domain::models::types::{
    ClientId, InstrumentId, OrderId, Price, RequestResult, Size, ValidationResponse,
};

/// Receives every event the engine produces.
///
/// Implementations are invoked synchronously from the worker thread that processed the request,
/// and concurrently from different workers for different instruments. The engine performs no
/// synchronization around these calls: implementations must be thread-safe (hence the
/// `Send + Sync` bound) and must not fail back into the matching loop.
///
/// For a single request, events arrive in a fixed order: the request response first, then zero
/// or more trades, then (only when a validator aborts matching midway) a second response
/// carrying the failure.
pub trait EngineEventObserver: Send + Sync {
    /// One trade crossed between two counterparties. `client1`/`client1_order_id` identify the
    /// aggressor (the incoming request), `client2`/`client2_order_id` the resting order.
    #[allow(clippy::too_many_arguments)]
    fn on_trade(
        &self,
        client1: ClientId,
        client1_order_id: OrderId,
        client2: ClientId,
        client2_order_id: OrderId,
        instrument: InstrumentId,
        trade_price: Price,
        size: Size,
    );

    /// The acknowledgement (or rejection) of one client request.
    #[allow(clippy::too_many_arguments)]
    fn on_request_response(
        &self,
        client: ClientId,
        client_order_id: OrderId,
        instrument: InstrumentId,
        order_price: Price,
        order_size: Size,
        result: RequestResult,
        validation: ValidationResponse,
    );
}

/// Per-client event callbacks, implemented by external client connections.
///
/// Fed by [`FanoutEventObserver`](crate::FanoutEventObserver); called from worker threads, so
/// implementations must be thread-safe.
pub trait ClientEventSink: Send + Sync {
    /// A trade one of this client's orders participated in.
    fn on_trade_event(
        &self,
        client_order_id: OrderId,
        instrument: InstrumentId,
        trade_price: Price,
        size: Size,
    );

    /// The response to one of this client's requests.
    #[allow(clippy::too_many_arguments)]
    fn on_order_request_response(
        &self,
        client_order_id: OrderId,
        instrument: InstrumentId,
        order_price: Price,
        order_size: Size,
        result: RequestResult,
        validation: ValidationResponse,
    );
}

/// One trade, as emitted by the engine. The aggressor comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeEvent {
    pub client1: ClientId,
    pub client1_order_id: OrderId,
    pub client2: ClientId,
    pub client2_order_id: OrderId,
    pub instrument: InstrumentId,
    pub trade_price: Price,
    pub size: Size,
}

/// One request acknowledgement, as emitted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestResponse {
    pub client: ClientId,
    pub client_order_id: OrderId,
    pub instrument: InstrumentId,
    pub order_price: Price,
    pub order_size: Size,
    pub result: RequestResult,
    pub validation: ValidationResponse,
}

/// A trade from the perspective of one counterparty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientTradeEvent {
    pub client_order_id: OrderId,
    pub instrument: InstrumentId,
    pub trade_price: Price,
    pub size: Size,
}

/// A request acknowledgement from the perspective of the requesting client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientOrderResponse {
    pub client_order_id: OrderId,
    pub instrument: InstrumentId,
    pub order_price: Price,
    pub order_size: Size,
    pub result: RequestResult,
    pub validation: ValidationResponse,
}
