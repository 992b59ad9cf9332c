//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Shard worker internals: the mutex-guarded per-instrument request buffer shared with the ingress
// side, and the worker loop that drains those buffers into the matching algorithm.
//
// Each worker owns its instruments' books outright. The buffer is the only hand-off point between
// the ingress threads and a worker, and the drain is a swap: the buffer's contents are exchanged
// with an empty scratch vector under the lock, then processed outside it.
//--------------------------------------------------------------------------------------------------

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::domain::models::request::ClientOrderRequest;
use crate::domain::models::types::InstrumentId;
use crate::domain::services::events::observer::EngineEventObserver;
use crate::domain::services::matching::MatchingAlgorithm;
use crate::domain::services::orderbook::book::PassiveOrderBook;

/// Mutex-guarded ingress buffer for one instrument.
pub(crate) struct RequestBuffer<X> {
    queue: Mutex<Vec<ClientOrderRequest<X>>>,
}

impl<X> RequestBuffer<X> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    /// Appends a request. Called from ingress threads; the lock is held only for the push.
    pub(crate) fn push(&self, request: ClientOrderRequest<X>) {
        self.queue.lock().push(request);
    }

    /// Exchanges the buffer's contents with `scratch` when non-empty. The caller hands in an
    /// empty vector and processes whatever it receives outside the lock.
    fn swap_into(&self, scratch: &mut Vec<ClientOrderRequest<X>>) {
        let mut queue = self.queue.lock();
        if !queue.is_empty() {
            std::mem::swap(&mut *queue, scratch);
        }
    }
}

/// One instrument owned by a shard worker: its book plus the shared ingress buffer.
pub(crate) struct ShardInstrument<X> {
    pub(crate) instrument: InstrumentId,
    pub(crate) book: PassiveOrderBook<X>,
    pub(crate) buffer: Arc<RequestBuffer<X>>,
}

/// A worker loop serving a fixed subset of instruments.
pub(crate) struct ShardWorker<X> {
    instruments: Vec<ShardInstrument<X>>,
    algorithm: Arc<dyn MatchingAlgorithm<X>>,
    observer: Arc<dyn EngineEventObserver>,
    active: Arc<AtomicBool>,
    scratch_capacity: usize,
}

impl<X> ShardWorker<X> {
    pub(crate) fn new(
        instruments: Vec<ShardInstrument<X>>,
        algorithm: Arc<dyn MatchingAlgorithm<X>>,
        observer: Arc<dyn EngineEventObserver>,
        active: Arc<AtomicBool>,
        scratch_capacity: usize,
    ) -> Self {
        Self {
            instruments,
            algorithm,
            observer,
            active,
            scratch_capacity,
        }
    }

    /// Runs until the shutdown flag flips. Requests already swapped into the scratch buffer when
    /// the flag is observed are still completed; requests left in the buffers are dropped.
    pub(crate) fn run(mut self) {
        debug!(instruments = self.instruments.len(), "shard worker started");
        let mut scratch: Vec<ClientOrderRequest<X>> = Vec::with_capacity(self.scratch_capacity);

        while self.active.load(Ordering::Acquire) {
            let mut drained = false;

            for shard in &mut self.instruments {
                shard.buffer.swap_into(&mut scratch);
                if scratch.is_empty() {
                    continue;
                }
                drained = true;
                trace!(instrument = %shard.instrument, requests = scratch.len(), "draining");

                for mut request in scratch.drain(..) {
                    self.algorithm
                        .process(&mut request, &mut shard.book, self.observer.as_ref());
                }
            }

            if !drained {
                // Nothing pending on any instrument this sweep; give the scheduler a chance
                // instead of spinning hot.
                thread::yield_now();
            }
        }

        debug!("shard worker stopped");
    }
}
