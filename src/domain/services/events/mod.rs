//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// The engine's output boundary: the observer capability workers emit through, the per-client
// sink interface, the event record types, and the default fan-out observer.
//
// | Component           | Description                                                 |
// |---------------------|-------------------------------------------------------------|
// | EngineEventObserver | Trait receiving trades and request responses.               |
// | ClientEventSink     | Per-client callback interface.                              |
// | FanoutEventObserver | Default observer forwarding events to registered clients.   |
//--------------------------------------------------------------------------------------------------

pub mod fanout;
pub mod observer;

pub use fanout::FanoutEventObserver;
pub use observer::{
    ClientEventSink, ClientOrderResponse, ClientTradeEvent, EngineEventObserver, RequestResponse,
    TradeEvent,
};
