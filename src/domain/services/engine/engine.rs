//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module implements the sharded matching engine: a fixed pool of worker threads, each owning
// a subset of instruments, with per-instrument request serialization.
//
// | Component      | Description                                                           |
// |----------------|-----------------------------------------------------------------------|
// | EngineConfig   | Worker count and per-instrument queue capacity.                       |
// | EngineError    | Construction-time failures.                                           |
// | MatchingEngine | Ingress routing, worker lifecycle, termination.                       |
//
// Instruments are assigned to workers round-robin at construction. Each instrument's book is
// owned by exactly one worker and needs no internal synchronization; the mutex-guarded request
// buffer is the only structure shared between the ingress side and a worker.
//--------------------------------------------------------------------------------------------------

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use thiserror::Error;
use tracing::{debug, error, info};

use crate::domain::models::request::ClientOrderRequest;
use crate::domain::models::types::InstrumentId;
use crate::domain::services::engine::worker::{RequestBuffer, ShardInstrument, ShardWorker};
use crate::domain::services::events::observer::EngineEventObserver;
use crate::domain::services::matching::MatchingAlgorithm;
use crate::domain::services::matching::price_time::PriceTimePriorityMatching;
use crate::domain::services::orderbook::book::PassiveOrderBook;

/// Per-instrument request queue capacity reserved up front.
const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Engine sizing parameters.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Number of shard worker threads. Must be at least one.
    pub workers: usize,
    /// Capacity pre-reserved in each instrument's request buffer and scratch vector.
    pub queue_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// Construction-time engine failures.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine cannot run without at least one worker thread.
    #[error("engine requires at least one worker thread")]
    NoWorkers,
    /// The operating system refused to spawn a worker thread.
    #[error("failed to spawn worker thread: {0}")]
    WorkerSpawn(#[from] std::io::Error),
}

/// Multi-instrument matching engine with a fixed shard worker pool.
///
/// `submit` is safe to call from any number of threads; all outcomes are delivered through the
/// observer the engine was constructed with. Requests against the same instrument are processed
/// strictly in submission order; across instruments there is no ordering guarantee, even on the
/// same worker.
pub struct MatchingEngine<X = ()> {
    buffers: HashMap<InstrumentId, Arc<RequestBuffer<X>>>,
    shutdown_flags: Vec<Arc<AtomicBool>>,
    workers: Vec<JoinHandle<()>>,
}

impl<X> MatchingEngine<X>
where
    X: Clone + Send + Sync + 'static,
{
    /// Creates an engine with the default validator wiring and `workers` shard threads.
    pub fn new(
        workers: usize,
        instruments: &BTreeSet<InstrumentId>,
        observer: Arc<dyn EngineEventObserver>,
    ) -> Result<Self, EngineError> {
        let config = EngineConfig {
            workers,
            ..EngineConfig::default()
        };
        Self::with_algorithm(
            config,
            instruments,
            observer,
            Arc::new(PriceTimePriorityMatching::<X>::with_default_validators()),
        )
    }

    /// Creates an engine running a caller-composed matching algorithm.
    pub fn with_algorithm(
        config: EngineConfig,
        instruments: &BTreeSet<InstrumentId>,
        observer: Arc<dyn EngineEventObserver>,
        algorithm: Arc<dyn MatchingAlgorithm<X>>,
    ) -> Result<Self, EngineError> {
        if config.workers == 0 {
            return Err(EngineError::NoWorkers);
        }

        let mut buffers = HashMap::with_capacity(instruments.len());
        let mut shards: Vec<Vec<ShardInstrument<X>>> =
            (0..config.workers).map(|_| Vec::new()).collect();

        for (position, &instrument) in instruments.iter().enumerate() {
            let buffer = Arc::new(RequestBuffer::with_capacity(config.queue_capacity));
            buffers.insert(instrument, buffer.clone());
            shards[position % config.workers].push(ShardInstrument {
                instrument,
                book: PassiveOrderBook::new(),
                buffer,
            });
        }

        let mut shutdown_flags = Vec::with_capacity(config.workers);
        let mut workers = Vec::with_capacity(config.workers);

        for (index, shard_instruments) in shards.into_iter().enumerate() {
            let active = Arc::new(AtomicBool::new(true));
            shutdown_flags.push(active.clone());

            let worker = ShardWorker::new(
                shard_instruments,
                algorithm.clone(),
                observer.clone(),
                active,
                config.queue_capacity,
            );
            let handle = thread::Builder::new()
                .name(format!("matching-worker-{index}"))
                .spawn(move || worker.run())?;
            workers.push(handle);
        }

        info!(
            workers = config.workers,
            instruments = buffers.len(),
            "matching engine started"
        );

        Ok(Self {
            buffers,
            shutdown_flags,
            workers,
        })
    }
}

impl<X> MatchingEngine<X> {
    /// Enqueues a request for its instrument's shard. Fire-and-forget: the call returns after
    /// the enqueue and every outcome arrives through the observer.
    ///
    /// Requests for instruments the engine was not constructed with are dropped; callers that
    /// need a rejection signal should pre-validate against their instrument universe.
    pub fn submit(&self, request: ClientOrderRequest<X>) {
        match self.buffers.get(&request.instrument) {
            Some(buffer) => buffer.push(request),
            None => debug!(
                instrument = %request.instrument,
                client = %request.client,
                "dropping request for unknown instrument"
            ),
        }
    }

    /// Number of shard worker threads.
    pub fn worker_count(&self) -> usize {
        self.shutdown_flags.len()
    }

    /// Number of instruments the engine serves.
    pub fn instrument_count(&self) -> usize {
        self.buffers.len()
    }

    /// Stops all workers and joins their threads.
    ///
    /// Shutdown is not graceful with respect to queued work: requests a worker had already
    /// drained are completed, requests still sitting in buffers when the flag is observed are
    /// dropped.
    pub fn terminate(&mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if self.workers.is_empty() {
            return;
        }

        for flag in &self.shutdown_flags {
            flag.store(false, Ordering::Release);
        }
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                error!("shard worker panicked before shutdown");
            }
        }
        info!("matching engine terminated");
    }
}

impl<X> Drop for MatchingEngine<X> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

//--------------------------------------------------------------------------------------------------
//  TESTS
//--------------------------------------------------------------------------------------------------
