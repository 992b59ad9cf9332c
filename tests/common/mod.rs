//--------------------------------------------------------------------------------------------------
// Shared helpers for the engine integration tests: a channel-backed observer so tests can await
// events emitted from worker threads, and request builders.
//--------------------------------------------------------------------------------------------------

use std::sync::Once;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, unbounded};
use matchbook::{
    ClientId, ClientOrderRequest, EngineEventObserver, InstrumentId, OrderAction, OrderId,
    OrderType, Price, RequestResponse, RequestResult, Side, Size, TradeEvent, ValidationResponse,
};

/// How long a test waits for an expected event before failing.
pub const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

static TRACING: Once = Once::new();

/// Installs a fmt subscriber once, honoring `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Everything the engine emitted, in per-instrument emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Trade(TradeEvent),
    Response(RequestResponse),
}

/// Observer that forwards every event into a channel the test thread drains.
pub struct ChannelObserver {
    tx: Sender<EngineEvent>,
}

impl ChannelObserver {
    pub fn new() -> (Self, Receiver<EngineEvent>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }
}

impl EngineEventObserver for ChannelObserver {
    fn on_trade(
        &self,
        client1: ClientId,
        client1_order_id: OrderId,
        client2: ClientId,
        client2_order_id: OrderId,
        instrument: InstrumentId,
        trade_price: Price,
        size: Size,
    ) {
        let _ = self.tx.send(EngineEvent::Trade(TradeEvent {
            client1,
            client1_order_id,
            client2,
            client2_order_id,
            instrument,
            trade_price,
            size,
        }));
    }

    fn on_request_response(
        &self,
        client: ClientId,
        client_order_id: OrderId,
        instrument: InstrumentId,
        order_price: Price,
        order_size: Size,
        result: RequestResult,
        validation: ValidationResponse,
    ) {
        let _ = self.tx.send(EngineEvent::Response(RequestResponse {
            client,
            client_order_id,
            instrument,
            order_price,
            order_size,
            result,
            validation,
        }));
    }
}

/// Receives exactly `count` events, failing the test on timeout.
pub fn collect_events(rx: &Receiver<EngineEvent>, count: usize) -> Vec<EngineEvent> {
    let mut events = Vec::with_capacity(count);
    for _ in 0..count {
        match rx.recv_timeout(EVENT_TIMEOUT) {
            Ok(event) => events.push(event),
            Err(_) => panic!(
                "timed out waiting for events: got {} of {count}",
                events.len()
            ),
        }
    }
    events
}

/// The responses among `events`, in order.
pub fn responses(events: &[EngineEvent]) -> Vec<RequestResponse> {
    events
        .iter()
        .filter_map(|event| match event {
            EngineEvent::Response(response) => Some(*response),
            EngineEvent::Trade(_) => None,
        })
        .collect()
}

/// The trades among `events`, in order.
pub fn trades(events: &[EngineEvent]) -> Vec<TradeEvent> {
    events
        .iter()
        .filter_map(|event| match event {
            EngineEvent::Trade(trade) => Some(*trade),
            EngineEvent::Response(_) => None,
        })
        .collect()
}

pub fn limit_order<X: Default>(
    side: Side,
    client: u64,
    order_id: u64,
    instrument: u64,
    price: u64,
    size: u64,
) -> ClientOrderRequest<X> {
    ClientOrderRequest::new(
        side,
        OrderAction::New,
        OrderType::Limit,
        OrderId(order_id),
        Size(size),
        Price(price),
        ClientId(client),
        InstrumentId(instrument),
    )
}

pub fn market_order<X: Default>(
    side: Side,
    client: u64,
    order_id: u64,
    instrument: u64,
    size: u64,
) -> ClientOrderRequest<X> {
    ClientOrderRequest::new(
        side,
        OrderAction::New,
        OrderType::Market,
        OrderId(order_id),
        Size(size),
        Price(0),
        ClientId(client),
        InstrumentId(instrument),
    )
}

pub fn cancel_order<X: Default>(client: u64, order_id: u64, instrument: u64) -> ClientOrderRequest<X> {
    ClientOrderRequest::new(
        Side::Buy,
        OrderAction::Cancel,
        OrderType::Limit,
        OrderId(order_id),
        Size::ZERO,
        Price(0),
        ClientId(client),
        InstrumentId(instrument),
    )
}
