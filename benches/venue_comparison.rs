//! Benchmark for the venue comparison hot path.

#![allow(clippy::unwrap_used)]

use criterion::{Criterion, criterion_group, criterion_main};
use spot_router::application::services::comparator::VenueComparator;
use spot_router::domain::entities::quote::RawQuote;
use spot_router::domain::registry::VenueRegistry;
use spot_router::domain::value_objects::{Price, Symbol, Timestamp, VenueId};
use std::hint::black_box;
use std::sync::Arc;

fn quotes() -> Vec<RawQuote> {
    let captured_at = Timestamp::from_millis(1_704_067_200_000).unwrap();
    [
        ("kraken", 64990.5, 65010.5),
        ("okx", 64995.0, 65005.0),
        ("gateio", 64985.0, 65015.0),
    ]
    .into_iter()
    .map(|(venue, bid, ask)| {
        RawQuote::new(
            VenueId::new(venue),
            Price::new(bid).unwrap(),
            Price::new(ask).unwrap(),
            captured_at,
        )
    })
    .collect()
}

fn bench_compare(c: &mut Criterion) {
    let comparator = VenueComparator::new(Arc::new(VenueRegistry::builtin()));
    let symbol = Symbol::new("BTC/USDT").unwrap();
    let quotes = quotes();

    c.bench_function("compare_three_venues", |b| {
        b.iter(|| comparator.compare(black_box(&symbol), black_box(&quotes)))
    });
}

criterion_group!(benches, bench_compare);
criterion_main!(benches);
