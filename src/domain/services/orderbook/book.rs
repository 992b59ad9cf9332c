//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module implements the passive order book for a single instrument: the resting liquidity
// an aggressive order crosses against. It maintains price-time priority (best price first, FIFO
// within a price level) together with an O(1) client-order lookup used by cancels.
//
// | Component        | Description                                                             |
// |------------------|-------------------------------------------------------------------------|
// | PassiveOrder     | A resting order; `(client, order_id)` is its identity key.              |
// | PriceLevel       | FIFO queue of resting orders at one price.                              |
// | PassiveOrderBook | Two price-sorted sides plus the client index.                           |
//
// Cancellation is lazy: the cancelled order is tombstoned in place (`remaining_size = 0`) and its
// index entry removed; the matcher sweeps tombstones out of the FIFO on its next traversal. The
// index therefore never holds a tombstoned order, and a resting order with remaining size is
// always reachable both through its level's FIFO and through the index.
//--------------------------------------------------------------------------------------------------

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::ops::Bound::{Excluded, Unbounded};

use crate::domain::models::types::{ClientId, OrderId, OrderType, Price, Side, Size};

/// A resting order awaiting a counterparty.
///
/// `remaining_size` is the only mutable field. It reaches zero either through fills (the matcher
/// then removes the FIFO entry) or through cancellation (the entry stays behind as a tombstone
/// until the next matching traversal sweeps it).
#[derive(Debug, Clone)]
pub struct PassiveOrder<X = ()> {
    /// Owner of the order.
    pub client: ClientId,
    /// Client-assigned order identifier.
    pub order_id: OrderId,
    /// Quantity still available to trade. Zero marks a tombstone.
    pub remaining_size: Size,
    /// Typed custom fields carried unchanged from the request.
    pub extension: X,
    /// Book-wide placement sequence; strictly increasing within a level's FIFO.
    seq: u64,
}

/// FIFO queue of resting orders at a single price.
#[derive(Debug)]
pub struct PriceLevel<X = ()> {
    orders: VecDeque<PassiveOrder<X>>,
}

impl<X> PriceLevel<X> {
    fn new() -> Self {
        Self {
            orders: VecDeque::new(),
        }
    }

    /// Number of physical entries in the FIFO, tombstones included.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Returns true when the FIFO holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Iterates the FIFO in time priority, tombstones included.
    pub fn iter(&self) -> impl Iterator<Item = &PassiveOrder<X>> {
        self.orders.iter()
    }

    /// The order at the head of the queue, if any.
    pub fn front(&self) -> Option<&PassiveOrder<X>> {
        self.orders.front()
    }

    pub(crate) fn get(&self, index: usize) -> Option<&PassiveOrder<X>> {
        self.orders.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut PassiveOrder<X>> {
        self.orders.get_mut(index)
    }

    pub(crate) fn remove(&mut self, index: usize) -> Option<PassiveOrder<X>> {
        self.orders.remove(index)
    }

    fn push_back(&mut self, order: PassiveOrder<X>) {
        self.orders.push_back(order);
    }

    /// Locates an entry by placement sequence. Entries are pushed in sequence order and only
    /// ever removed, so the FIFO stays sorted by `seq` and a binary search suffices.
    fn position_by_seq(&self, seq: u64) -> Option<usize> {
        let index = self.orders.partition_point(|order| order.seq < seq);
        self.orders
            .get(index)
            .filter(|order| order.seq == seq)
            .map(|_| index)
    }

    fn find_by_seq(&self, seq: u64) -> Option<&PassiveOrder<X>> {
        self.position_by_seq(seq).and_then(|index| self.orders.get(index))
    }

    fn find_by_seq_mut(&mut self, seq: u64) -> Option<&mut PassiveOrder<X>> {
        self.position_by_seq(seq)
            .and_then(|index| self.orders.get_mut(index))
    }
}

/// Non-owning key into a level's FIFO, kept by the client index.
#[derive(Debug, Clone, Copy)]
struct OrderLocation {
    side: Side,
    price: Price,
    seq: u64,
}

/// Per-instrument passive order book.
///
/// Bids are traversed best-first in descending price order, asks in ascending order. The level
/// FIFOs own the resting orders; the client index holds `(side, price, seq)` locations so that
/// cancel resolves an order in O(log) time without scanning a FIFO.
#[derive(Debug)]
pub struct PassiveOrderBook<X = ()> {
    bids: BTreeMap<Price, PriceLevel<X>>,
    asks: BTreeMap<Price, PriceLevel<X>>,
    client_orders: HashMap<ClientId, HashMap<OrderId, OrderLocation>>,
    next_seq: u64,
}

impl<X> PassiveOrderBook<X> {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self {
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            client_orders: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Appends a new resting order at the tail of its price level's FIFO and records it in the
    /// client index.
    ///
    /// Zero-size orders and market orders never rest; such calls are ignored. Duplicate
    /// `(client, order_id)` keys are not checked here; rejecting them is the validator
    /// pipeline's responsibility.
    #[allow(clippy::too_many_arguments)]
    pub fn place(
        &mut self,
        client: ClientId,
        order_id: OrderId,
        order_type: OrderType,
        side: Side,
        price: Price,
        size: Size,
        extension: X,
    ) {
        if size.is_zero() || order_type == OrderType::Market {
            return;
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        self.levels_mut(side)
            .entry(price)
            .or_insert_with(PriceLevel::new)
            .push_back(PassiveOrder {
                client,
                order_id,
                remaining_size: size,
                extension,
                seq,
            });

        self.client_orders
            .entry(client)
            .or_default()
            .insert(order_id, OrderLocation { side, price, seq });
    }

    /// Cancels a resting order: tombstones it in place and removes its index entry.
    ///
    /// The physical FIFO slot is left behind and swept lazily by the next matching traversal
    /// that reaches it. Cancelling an unknown order is a no-op; validators report `NoSuchOrder`
    /// before this is reached in the default wiring.
    pub fn cancel(&mut self, client: ClientId, order_id: OrderId) {
        let Some(orders) = self.client_orders.get_mut(&client) else {
            return;
        };
        let Some(location) = orders.remove(&order_id) else {
            return;
        };
        if orders.is_empty() {
            self.client_orders.remove(&client);
        }

        if let Some(level) = self.levels_mut(location.side).get_mut(&location.price)
            && let Some(order) = level.find_by_seq_mut(location.seq)
        {
            order.remaining_size = Size::ZERO;
        }
    }

    /// Constant-time predicate over the client index. Tombstoned orders are never indexed.
    pub fn order_exists(&self, client: ClientId, order_id: OrderId) -> bool {
        self.client_orders
            .get(&client)
            .is_some_and(|orders| orders.contains_key(&order_id))
    }

    /// Resolves a resting order through the client index.
    pub fn resting_order(&self, client: ClientId, order_id: OrderId) -> Option<&PassiveOrder<X>> {
        let location = self.client_orders.get(&client)?.get(&order_id)?;
        self.levels(location.side)
            .get(&location.price)?
            .find_by_seq(location.seq)
    }

    /// Best (highest) bid price, if the bid side is non-empty.
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.keys().next_back().copied()
    }

    /// Best (lowest) ask price, if the ask side is non-empty.
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.keys().next().copied()
    }

    /// Bid levels in traversal order: best (highest) price first.
    pub fn bid_levels(&self) -> impl Iterator<Item = (Price, &PriceLevel<X>)> {
        self.bids.iter().rev().map(|(price, level)| (*price, level))
    }

    /// Ask levels in traversal order: best (lowest) price first.
    pub fn ask_levels(&self) -> impl Iterator<Item = (Price, &PriceLevel<X>)> {
        self.asks.iter().map(|(price, level)| (*price, level))
    }

    fn levels(&self, side: Side) -> &BTreeMap<Price, PriceLevel<X>> {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    pub(crate) fn levels_mut(&mut self, side: Side) -> &mut BTreeMap<Price, PriceLevel<X>> {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Price of the best level on the given side, from that side's own perspective.
    pub(crate) fn best_level_price(&self, side: Side) -> Option<Price> {
        match side {
            Side::Buy => self.best_bid(),
            Side::Sell => self.best_ask(),
        }
    }

    /// Price of the next level strictly behind `after` in traversal order.
    pub(crate) fn next_level_price(&self, side: Side, after: Price) -> Option<Price> {
        match side {
            Side::Buy => self.bids.range(..after).next_back().map(|(price, _)| *price),
            Side::Sell => self
                .asks
                .range((Excluded(after), Unbounded))
                .next()
                .map(|(price, _)| *price),
        }
    }

    /// Drops the index entry of an order whose FIFO slot the matcher has already removed.
    pub(crate) fn remove_index_entry(&mut self, client: ClientId, order_id: OrderId) {
        if let Some(orders) = self.client_orders.get_mut(&client) {
            orders.remove(&order_id);
            if orders.is_empty() {
                self.client_orders.remove(&client);
            }
        }
    }
}

impl<X> Default for PassiveOrderBook<X> {
    fn default() -> Self {
        Self::new()
    }
}

//--------------------------------------------------------------------------------------------------
//  TESTS
//--------------------------------------------------------------------------------------------------
