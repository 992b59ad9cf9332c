// Per-instrument passive order book.
pub mod book;

pub use book::{PassiveOrder, PassiveOrderBook, PriceLevel};
