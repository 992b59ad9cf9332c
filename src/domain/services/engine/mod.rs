// Sharded dispatcher: worker pool, per-instrument buffers, engine lifecycle.
pub mod engine;
pub(crate) mod worker;

pub use engine::{EngineConfig, EngineError, MatchingEngine};
