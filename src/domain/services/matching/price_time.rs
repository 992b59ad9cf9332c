//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module implements the price-time-priority matching algorithm: the component that turns a
// validated client request into trades, book mutations and response events.
//
// | Step                  | Description                                                          |
// |-----------------------|----------------------------------------------------------------------|
// | Dispatch              | New-order and cancel requests take separate paths.                   |
// | Validation            | The per-phase validator chain runs first; its outcome is the Ack.    |
// | Cross                 | Aggressors walk the opposite side best-first, FIFO within a level.   |
// | Rest                  | A limit residual rests at the request price when matching succeeds.  |
//
// Market orders substitute the most aggressive possible price for the duration of the cross
// (`Price::MAX` for buys, `Price::MIN` for sells), which turns the market/limit distinction into
// a single "is this level still acceptable?" comparison. The substitution is local to the cross;
// the request's own price is never rewritten, and market residuals are discarded rather than
// rested.
//
// | Name                      | Description                                       | Key Methods   |
// |---------------------------|---------------------------------------------------|---------------|
// | PriceTimePriorityMatching | Validator-parameterized matching algorithm        | process       |
//--------------------------------------------------------------------------------------------------

use tracing::trace;

use crate::domain::models::request::ClientOrderRequest;
use crate::domain::models::types::{
    OrderAction, OrderType, Price, RequestResult, Side, ValidationResponse,
};
use crate::domain::services::events::observer::EngineEventObserver;
use crate::domain::services::matching::MatchingAlgorithm;
use crate::domain::services::orderbook::book::{PassiveOrder, PassiveOrderBook};
use crate::domain::services::validation::ValidatorChain;
use crate::domain::services::validation::validators::{
    NoSelfMatchValidator, NoSuchOrderCancelValidator, NoSuchOrderInsertValidator,
};

/// Price-time-priority matcher, parameterized on three validator chains.
///
/// The chains are fixed at construction: `new_validators` gate new-order requests,
/// `cancel_validators` gate cancels, and `match_validators` run once per candidate resting order
/// during the cross. [`PriceTimePriorityMatching::with_default_validators`] reproduces the
/// default engine wiring (duplicate-key check on insert, existence check on cancel, self-match
/// prevention during matching).
pub struct PriceTimePriorityMatching<X = ()> {
    new_validators: ValidatorChain<X>,
    cancel_validators: ValidatorChain<X>,
    match_validators: ValidatorChain<X>,
}

/// Outcome of inspecting one position in a level's FIFO during the cross.
enum LevelStep<X> {
    /// The cursor ran past the end and the level still holds entries (all skipped).
    Exhausted,
    /// The level's FIFO is now physically empty and the level should be removed.
    Emptied,
    /// The next live candidate to validate and potentially trade against.
    Candidate(PassiveOrder<X>),
}

impl<X> PriceTimePriorityMatching<X> {
    /// Builds a matcher from explicitly composed validator chains.
    pub fn new(
        new_validators: ValidatorChain<X>,
        cancel_validators: ValidatorChain<X>,
        match_validators: ValidatorChain<X>,
    ) -> Self {
        Self {
            new_validators,
            cancel_validators,
            match_validators,
        }
    }

    /// Builds the default wiring: reject duplicate resting keys on insert, require existence on
    /// cancel, and prevent self-matching during the cross.
    pub fn with_default_validators() -> Self {
        Self::new(
            ValidatorChain::new().with(NoSuchOrderInsertValidator),
            ValidatorChain::new().with(NoSuchOrderCancelValidator),
            ValidatorChain::new().with(NoSelfMatchValidator),
        )
    }
}

impl<X> Default for PriceTimePriorityMatching<X> {
    fn default() -> Self {
        Self::with_default_validators()
    }
}

/// True when a level at `level_price` is still acceptable to an aggressor capped at `limit`.
fn crosses(aggressor: Side, limit: Price, level_price: Price) -> bool {
    match aggressor {
        Side::Buy => level_price <= limit,
        Side::Sell => level_price >= limit,
    }
}

impl<X: Clone> PriceTimePriorityMatching<X> {
    /// Handles a new-order request: validate, acknowledge, cross, rest the residual.
    ///
    /// The initial response always carries the request's original price and size. When a match
    /// validator aborts the cross midway, a second `Nack` response follows the trades already
    /// emitted, carrying the size still unfilled at the abort.
    fn process_new(
        &self,
        request: &mut ClientOrderRequest<X>,
        book: &mut PassiveOrderBook<X>,
        observer: &dyn EngineEventObserver,
    ) {
        let validation = self.new_validators.validate(request, book);
        let result = if validation == ValidationResponse::NoError {
            RequestResult::Ack
        } else {
            RequestResult::Nack
        };

        observer.on_request_response(
            request.client,
            request.order_id,
            request.instrument,
            request.price,
            request.size,
            result,
            validation,
        );

        if validation != ValidationResponse::NoError {
            return;
        }

        let outcome = self.cross(request, book, observer);

        if outcome == ValidationResponse::NoError {
            // The residual rests at the request's own price. Market orders and fully filled
            // requests fall through the place guard and leave nothing behind.
            book.place(
                request.client,
                request.order_id,
                request.order_type,
                request.side,
                request.price,
                request.size,
                request.extension.clone(),
            );
        } else if outcome != ValidationResponse::ContinueWithoutMatching {
            observer.on_request_response(
                request.client,
                request.order_id,
                request.instrument,
                request.price,
                request.size,
                RequestResult::Nack,
                outcome,
            );
        }
    }

    /// Handles a cancel request: validate, acknowledge, tombstone on success.
    fn process_cancel(
        &self,
        request: &mut ClientOrderRequest<X>,
        book: &mut PassiveOrderBook<X>,
        observer: &dyn EngineEventObserver,
    ) {
        let validation = self.cancel_validators.validate(request, book);
        let result = if validation == ValidationResponse::NoError {
            RequestResult::Ack
        } else {
            RequestResult::Nack
        };

        observer.on_request_response(
            request.client,
            request.order_id,
            request.instrument,
            request.price,
            request.size,
            result,
            validation,
        );

        if validation == ValidationResponse::NoError {
            book.cancel(request.client, request.order_id);
        }
    }

    /// Crosses the request against the opposite side of the book.
    ///
    /// Walks price levels best-first, stopping at the first level priced strictly worse than the
    /// request's effective price or when the request is exhausted. Within a level the FIFO is
    /// consumed head to tail: tombstones are swept out, candidates rejected with
    /// `ContinueWithoutMatching` are left in place and skipped, and any other validation failure
    /// aborts the whole cross and becomes this function's result. Trades execute at the resting
    /// level's price.
    fn cross(
        &self,
        request: &mut ClientOrderRequest<X>,
        book: &mut PassiveOrderBook<X>,
        observer: &dyn EngineEventObserver,
    ) -> ValidationResponse {
        let resting_side = request.side.opposite();
        let effective_price = match (request.order_type, request.side) {
            (OrderType::Market, Side::Buy) => Price::MAX,
            (OrderType::Market, Side::Sell) => Price::MIN,
            _ => request.price,
        };

        let mut outcome = ValidationResponse::NoError;
        // Cursor into the side being consumed: the level under work and the FIFO position
        // within it. `None` restarts from the best level.
        let mut cursor: Option<(Price, usize)> = None;

        loop {
            if request.size.is_zero() {
                break;
            }

            let (level_price, index) = match cursor {
                Some(position) => position,
                None => match book.best_level_price(resting_side) {
                    Some(price) => (price, 0),
                    None => break,
                },
            };

            if !crosses(request.side, effective_price, level_price) {
                break;
            }

            let step = {
                let Some(level) = book.levels_mut(resting_side).get_mut(&level_price) else {
                    break;
                };
                loop {
                    match level.get(index) {
                        None if level.is_empty() => break LevelStep::Emptied,
                        None => break LevelStep::Exhausted,
                        Some(order) if !order.remaining_size.is_zero() => {
                            break LevelStep::Candidate(order.clone());
                        }
                        Some(_) => {}
                    }
                    // Lazily-cancelled order: drop the tombstone and look again at the same
                    // position.
                    level.remove(index);
                }
            };

            match step {
                LevelStep::Emptied => {
                    book.levels_mut(resting_side).remove(&level_price);
                    cursor = None;
                }
                LevelStep::Exhausted => {
                    cursor = book
                        .next_level_price(resting_side, level_price)
                        .map(|price| (price, 0));
                    if cursor.is_none() {
                        break;
                    }
                }
                LevelStep::Candidate(passive) => {
                    match self.match_validators.validate_match(request, book, &passive) {
                        ValidationResponse::ContinueWithoutMatching => {
                            outcome = ValidationResponse::ContinueWithoutMatching;
                            cursor = Some((level_price, index + 1));
                        }
                        ValidationResponse::NoError => {
                            outcome = ValidationResponse::NoError;

                            let trade_size = request.size.min(passive.remaining_size);
                            let filled = request.size >= passive.remaining_size;
                            {
                                let Some(level) =
                                    book.levels_mut(resting_side).get_mut(&level_price)
                                else {
                                    break;
                                };
                                if filled {
                                    level.remove(index);
                                } else if let Some(order) = level.get_mut(index) {
                                    order.remaining_size -= trade_size;
                                }
                            }
                            if filled {
                                book.remove_index_entry(passive.client, passive.order_id);
                                cursor = Some((level_price, index));
                            } else {
                                cursor = Some((level_price, index + 1));
                            }

                            trace!(
                                aggressor = %request.client,
                                passive = %passive.client,
                                price = %level_price,
                                size = %trade_size,
                                "trade"
                            );
                            observer.on_trade(
                                request.client,
                                request.order_id,
                                passive.client,
                                passive.order_id,
                                request.instrument,
                                level_price,
                                trade_size,
                            );

                            request.size -= trade_size;
                        }
                        failure => return failure,
                    }
                }
            }
        }

        outcome
    }
}

impl<X: Clone + Send + Sync> MatchingAlgorithm<X> for PriceTimePriorityMatching<X> {
    fn process(
        &self,
        request: &mut ClientOrderRequest<X>,
        book: &mut PassiveOrderBook<X>,
        observer: &dyn EngineEventObserver,
    ) {
        match request.action {
            OrderAction::New => self.process_new(request, book, observer),
            OrderAction::Cancel => self.process_cancel(request, book, observer),
        }
    }
}

//--------------------------------------------------------------------------------------------------
//  TESTS
//--------------------------------------------------------------------------------------------------
// Scenario coverage mirrors the behaviors the engine guarantees: resting, crossing at the
// passive price, partial fills, tombstone sweeps, self-match prevention, market-order residual
// discard, and min-exec-quantity skips.
//--------------------------------------------------------------------------------------------------
