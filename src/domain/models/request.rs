//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module defines the client order request record, the single ingress message type of the
// engine, and the typed custom-field carriers that extend it.
//
// | Name               | Description                                                       |
// |--------------------|-------------------------------------------------------------------|
// | ClientOrderRequest | Immutable description of a new-order or cancel request.           |
// | MinExecQtyFields   | Optional per-order minimum-execution-quantity constraint carrier. |
//--------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::domain::models::types::{
    ClientId, InstrumentId, OrderAction, OrderId, OrderType, Price, Side, Size,
};

/// A client request against a single instrument.
///
/// The request is logically owned by the dispatcher once accepted and is handed by value to the
/// matching algorithm, which may decrement `size` while it fills. The copy the client built is
/// never mutated.
///
/// The `X` parameter carries typed custom fields that ride along with the order into the book
/// (see [`MinExecQtyFields`]); `X = ()` means the order has no extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientOrderRequest<X = ()> {
    /// Side of the order.
    pub side: Side,
    /// New order or cancel.
    pub action: OrderAction,
    /// Limit or market.
    pub order_type: OrderType,
    /// Client-assigned order identifier; `(client, order_id)` is the identity key on the book.
    pub order_id: OrderId,
    /// Requested quantity. Ignored for cancels.
    pub size: Size,
    /// Limit price. Ignored for cancels; not meaningful for market orders.
    pub price: Price,
    /// The submitting client.
    pub client: ClientId,
    /// The instrument this request is routed to.
    pub instrument: InstrumentId,
    /// Typed custom fields carried unchanged onto the resting order.
    pub extension: X,
}

impl<X: Default> ClientOrderRequest<X> {
    /// Builds a request with a defaulted extension.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        side: Side,
        action: OrderAction,
        order_type: OrderType,
        order_id: OrderId,
        size: Size,
        price: Price,
        client: ClientId,
        instrument: InstrumentId,
    ) -> Self {
        Self {
            side,
            action,
            order_type,
            order_id,
            size,
            price,
            client,
            instrument,
            extension: X::default(),
        }
    }
}

impl<X> ClientOrderRequest<X> {
    /// Replaces the extension value, keeping every other field.
    pub fn with_extension(mut self, extension: X) -> Self {
        self.extension = extension;
        self
    }
}

/// Custom fields for orders carrying a minimum-execution-quantity constraint.
///
/// Any single execution against such an order must be at least `min_exec_qty`; smaller candidate
/// fills are skipped during matching rather than rejected. A zero value (the default) leaves the
/// order unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MinExecQtyFields {
    /// Minimum size of any single execution against this order.
    pub min_exec_qty: Size,
}

impl MinExecQtyFields {
    /// Builds the carrier with the given minimum execution quantity.
    pub fn new(min_exec_qty: Size) -> Self {
        Self { min_exec_qty }
    }
}
