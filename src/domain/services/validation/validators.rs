//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Standard validators wired into the default matcher, plus the min-exec-quantity pair that
// demonstrates validation over typed custom order fields.
//
// | Name                         | Phase  | Rejects with                                      |
// |------------------------------|--------|---------------------------------------------------|
// | NoSuchOrderInsertValidator   | new    | OrderIdPreexist if the key is already resting.    |
// | NoSuchOrderCancelValidator   | cancel | NoSuchOrder if the key is not resting.            |
// | NewOrderRequestSizeValidator | new    | OrderSizeExceedLimit at/above the maximum.        |
// | NoSelfMatchValidator         | match  | SelfMatch when both sides belong to one client.   |
// | MinExecQtyInsertValidator    | new    | InvalidOrderRequest if min qty exceeds size.      |
// | MinExecQtyMatchValidator     | match  | ContinueWithoutMatching on too-small executions.  |
//--------------------------------------------------------------------------------------------------

use crate::domain::models::request::{ClientOrderRequest, MinExecQtyFields};
use crate::domain::models::types::{Size, ValidationResponse};
use crate::domain::services::orderbook::book::{PassiveOrder, PassiveOrderBook};
use crate::domain::services::validation::OrderRequestValidator;

/// Rejects a new order whose `(client, order_id)` key is still resting on the book.
pub struct NoSuchOrderInsertValidator;

impl<X> OrderRequestValidator<X> for NoSuchOrderInsertValidator {
    fn validate(
        &self,
        request: &ClientOrderRequest<X>,
        book: &PassiveOrderBook<X>,
        _passive: Option<&PassiveOrder<X>>,
    ) -> ValidationResponse {
        if book.order_exists(request.client, request.order_id) {
            ValidationResponse::OrderIdPreexist
        } else {
            ValidationResponse::NoError
        }
    }
}

/// Accepts a cancel only when the named order is resting on the book.
pub struct NoSuchOrderCancelValidator;

impl<X> OrderRequestValidator<X> for NoSuchOrderCancelValidator {
    fn validate(
        &self,
        request: &ClientOrderRequest<X>,
        book: &PassiveOrderBook<X>,
        _passive: Option<&PassiveOrder<X>>,
    ) -> ValidationResponse {
        if book.order_exists(request.client, request.order_id) {
            ValidationResponse::NoError
        } else {
            ValidationResponse::NoSuchOrder
        }
    }
}

/// Rejects new orders whose size reaches the configured maximum.
pub struct NewOrderRequestSizeValidator {
    max_order_size: Size,
}

impl NewOrderRequestSizeValidator {
    /// Builds the validator; sizes at or above `max_order_size` are rejected.
    pub fn new(max_order_size: Size) -> Self {
        Self { max_order_size }
    }
}

impl<X> OrderRequestValidator<X> for NewOrderRequestSizeValidator {
    fn validate(
        &self,
        request: &ClientOrderRequest<X>,
        _book: &PassiveOrderBook<X>,
        _passive: Option<&PassiveOrder<X>>,
    ) -> ValidationResponse {
        if request.size >= self.max_order_size {
            ValidationResponse::OrderSizeExceedLimit
        } else {
            ValidationResponse::NoError
        }
    }
}

/// Aborts matching when the aggressor would trade against its own resting order.
pub struct NoSelfMatchValidator;

impl<X> OrderRequestValidator<X> for NoSelfMatchValidator {
    fn validate(
        &self,
        request: &ClientOrderRequest<X>,
        _book: &PassiveOrderBook<X>,
        passive: Option<&PassiveOrder<X>>,
    ) -> ValidationResponse {
        match passive {
            Some(passive) if passive.client == request.client => ValidationResponse::SelfMatch,
            _ => ValidationResponse::NoError,
        }
    }
}

/// Rejects a new order whose own minimum execution quantity can never be satisfied.
pub struct MinExecQtyInsertValidator;

impl OrderRequestValidator<MinExecQtyFields> for MinExecQtyInsertValidator {
    fn validate(
        &self,
        request: &ClientOrderRequest<MinExecQtyFields>,
        _book: &PassiveOrderBook<MinExecQtyFields>,
        _passive: Option<&PassiveOrder<MinExecQtyFields>>,
    ) -> ValidationResponse {
        if request.extension.min_exec_qty > request.size {
            ValidationResponse::InvalidOrderRequest
        } else {
            ValidationResponse::NoError
        }
    }
}

/// Skips a candidate resting order when either side's minimum execution quantity would be
/// violated by the trade: the aggressor's remaining size is below the passive order's minimum,
/// or the passive order's remaining size is below the aggressor's minimum.
pub struct MinExecQtyMatchValidator;

impl OrderRequestValidator<MinExecQtyFields> for MinExecQtyMatchValidator {
    fn validate(
        &self,
        request: &ClientOrderRequest<MinExecQtyFields>,
        _book: &PassiveOrderBook<MinExecQtyFields>,
        passive: Option<&PassiveOrder<MinExecQtyFields>>,
    ) -> ValidationResponse {
        let Some(passive) = passive else {
            return ValidationResponse::NoError;
        };
        if request.size < passive.extension.min_exec_qty
            || passive.remaining_size < request.extension.min_exec_qty
        {
            ValidationResponse::ContinueWithoutMatching
        } else {
            ValidationResponse::NoError
        }
    }
}

//--------------------------------------------------------------------------------------------------
//  TESTS
//--------------------------------------------------------------------------------------------------
