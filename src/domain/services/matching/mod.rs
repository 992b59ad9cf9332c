//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Matching algorithms. The dispatcher drives any implementation of `MatchingAlgorithm`; the
// production implementation is the price-time-priority matcher in `price_time`.
//--------------------------------------------------------------------------------------------------

pub mod price_time;

use crate::domain::models::request::ClientOrderRequest;
use crate::domain::services::events::observer::EngineEventObserver;
use crate::domain::services::orderbook::book::PassiveOrderBook;

/// A matching algorithm: consumes one client request against one instrument's book and emits
/// the resulting events through the observer.
///
/// Implementations are shared across worker threads (`Send + Sync`) and hold no per-request
/// state: the request is handed in by value (behind `&mut` so the matcher can consume its size)
/// together with the book the owning shard holds exclusively.
pub trait MatchingAlgorithm<X = ()>: Send + Sync {
    /// Processes one request, mutating the book and emitting events synchronously.
    fn process(
        &self,
        request: &mut ClientOrderRequest<X>,
        book: &mut PassiveOrderBook<X>,
        observer: &dyn EngineEventObserver,
    );
}
