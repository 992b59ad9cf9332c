use criterion::{Criterion, black_box, criterion_group, criterion_main};

use matchbook::{
    ClientId, ClientOrderRequest, EngineEventObserver, InstrumentId, MatchingAlgorithm,
    OrderAction, OrderId, OrderType, PassiveOrderBook, Price, PriceTimePriorityMatching,
    RequestResult, Side, Size, ValidationResponse,
};

/// Observer that swallows everything; benches measure the matching path, not event handling.
struct NullObserver;

impl EngineEventObserver for NullObserver {
    fn on_trade(
        &self,
        _client1: ClientId,
        _client1_order_id: OrderId,
        _client2: ClientId,
        _client2_order_id: OrderId,
        _instrument: InstrumentId,
        _trade_price: Price,
        _size: Size,
    ) {
    }

    fn on_request_response(
        &self,
        _client: ClientId,
        _client_order_id: OrderId,
        _instrument: InstrumentId,
        _order_price: Price,
        _order_size: Size,
        _result: RequestResult,
        _validation: ValidationResponse,
    ) {
    }
}

fn limit(side: Side, client: u64, order_id: u64, price: u64, size: u64) -> ClientOrderRequest {
    ClientOrderRequest::new(
        side,
        OrderAction::New,
        OrderType::Limit,
        OrderId(order_id),
        Size(size),
        Price(price),
        ClientId(client),
        InstrumentId(1),
    )
}

fn cancel(client: u64, order_id: u64) -> ClientOrderRequest {
    ClientOrderRequest::new(
        Side::Buy,
        OrderAction::Cancel,
        OrderType::Limit,
        OrderId(order_id),
        Size::ZERO,
        Price(0),
        ClientId(client),
        InstrumentId(1),
    )
}

/// Seeds a book with `depth` non-crossing levels on each side, one order per level.
fn seeded_book(algorithm: &PriceTimePriorityMatching, depth: u64) -> PassiveOrderBook {
    let mut book = PassiveOrderBook::new();
    let observer = NullObserver;
    for n in 0..depth {
        let mut buy = limit(Side::Buy, 1, n, 1_000 - n, 100);
        algorithm.process(&mut buy, &mut book, &observer);
        let mut sell = limit(Side::Sell, 2, depth + n, 1_001 + n, 100);
        algorithm.process(&mut sell, &mut book, &observer);
    }
    book
}

fn bench_place_and_cancel(c: &mut Criterion) {
    let algorithm = PriceTimePriorityMatching::with_default_validators();
    let observer = NullObserver;
    let mut group = c.benchmark_group("place_cancel");

    group.bench_function("place_then_cancel_same_level", |b| {
        let mut book = PassiveOrderBook::new();
        let mut order_id = 0u64;
        b.iter(|| {
            let mut place = limit(Side::Buy, 1, order_id, 500, 100);
            algorithm.process(&mut place, &mut book, &observer);
            let mut cancel_request = cancel(1, order_id);
            algorithm.process(&mut cancel_request, &mut book, &observer);
            order_id += 1;
            black_box(&book);
        });
    });

    group.finish();
}

fn bench_aggressive_sweep(c: &mut Criterion) {
    let algorithm = PriceTimePriorityMatching::with_default_validators();
    let observer = NullObserver;
    let mut group = c.benchmark_group("aggressive_sweep");

    group.bench_function("market_sweep_ten_levels", |b| {
        let mut order_id = 1_000_000u64;
        b.iter_batched(
            || seeded_book(&algorithm, 10),
            |mut book| {
                order_id += 1;
                let mut request = ClientOrderRequest::new(
                    Side::Buy,
                    OrderAction::New,
                    OrderType::Market,
                    OrderId(order_id),
                    Size(1_000),
                    Price(0),
                    ClientId(3),
                    InstrumentId(1),
                );
                algorithm.process(&mut request, &mut book, &observer);
                black_box(book)
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function("limit_cross_single_level", |b| {
        let mut order_id = 2_000_000u64;
        b.iter_batched(
            || seeded_book(&algorithm, 10),
            |mut book| {
                order_id += 1;
                let mut request = limit(Side::Sell, 3, order_id, 1_000, 100);
                algorithm.process(&mut request, &mut book, &observer);
                black_box(book)
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_place_and_cancel, bench_aggressive_sweep);
criterion_main!(benches);
