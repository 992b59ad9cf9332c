//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Default engine event observer: fans every event out to the per-client sinks registered with it.
// A trade is delivered to both counterparties, each seeing its own order id; events for clients
// without a registered sink are silently skipped.
//--------------------------------------------------------------------------------------------------

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::domain::models::types::{
    ClientId, InstrumentId, OrderId, Price, RequestResult, Size, ValidationResponse,
};
use crate::domain::services::events::observer::{ClientEventSink, EngineEventObserver};

/// Fans engine events out to per-client sinks.
///
/// The client map is guarded by an `RwLock`: workers only take the read side while dispatching,
/// so concurrent event emission from multiple shards does not contend unless the map is being
/// replaced.
pub struct FanoutEventObserver {
    clients: RwLock<HashMap<ClientId, Arc<dyn ClientEventSink>>>,
}

impl FanoutEventObserver {
    /// Creates the observer with no registered clients.
    pub fn new() -> Self {
        Self {
            clients: RwLock::new(HashMap::new()),
        }
    }

    /// Replaces the whole client map. Events for clients absent from the map are skipped.
    pub fn set_client_map(&self, clients: HashMap<ClientId, Arc<dyn ClientEventSink>>) {
        *self.clients.write() = clients;
    }

    /// Number of registered client sinks.
    pub fn client_count(&self) -> usize {
        self.clients.read().len()
    }
}

impl Default for FanoutEventObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineEventObserver for FanoutEventObserver {
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
        let clients = self.clients.read();
        for (client, client_order_id) in [(client1, client1_order_id), (client2, client2_order_id)] {
            match clients.get(&client) {
                Some(sink) => sink.on_trade_event(client_order_id, instrument, trade_price, size),
                None => trace!(%client, %instrument, "skipping trade event for unregistered client"),
            }
        }
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
        let clients = self.clients.read();
        match clients.get(&client) {
            Some(sink) => sink.on_order_request_response(
                client_order_id,
                instrument,
                order_price,
                order_size,
                result,
                validation,
            ),
            None => trace!(%client, %instrument, "skipping request response for unregistered client"),
        }
    }
}

//--------------------------------------------------------------------------------------------------
//  TESTS
//--------------------------------------------------------------------------------------------------
