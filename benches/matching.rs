//! Performance benchmarks for automaton construction and search
//!
//! Run with: cargo bench

use acmatch::{Automaton, AutomatonBuilder};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded random bytes over `alphabet`
fn generate(len: usize, alphabet: &[u8], seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())])
        .collect()
}

fn word_list(count: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| generate(4 + i % 8, b"abcdefghijklmnopqrstuvwxyz", i as u64 + 1))
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for count in [10, 100, 1000] {
        let patterns = word_list(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &patterns, |b, p| {
            b.iter(|| acmatch::build(black_box(p)))
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let text = generate(1 << 20, b"abcdefghijklmnopqrstuvwxyz ", 0xfeed);
    let mut group = c.benchmark_group("search");
    group.throughput(Throughput::Bytes(text.len() as u64));

    for count in [10, 100, 1000] {
        let ac = acmatch::build(word_list(count)).expect("Failed to build automaton");
        group.bench_with_input(BenchmarkId::new("patterns", count), &ac, |b, ac| {
            b.iter(|| ac.search(black_box(&text)))
        });
    }

    let ac = acmatch::build(word_list(100)).expect("Failed to build automaton");
    group.bench_function("is_match_absent", |b| {
        let absent = generate(1 << 20, b"0123456789", 3);
        b.iter(|| ac.is_match(black_box(&absent)))
    });

    group.finish();
}

fn bench_state_width(c: &mut Criterion) {
    let patterns = word_list(40);
    let text = generate(1 << 18, b"abcdefghijklmnopqrstuvwxyz", 11);
    let narrow: Automaton<u16> = AutomatonBuilder::new()
        .build(&patterns)
        .expect("Failed to build automaton");
    let wide: Automaton<u64> = AutomatonBuilder::new()
        .build(&patterns)
        .expect("Failed to build automaton");

    let mut group = c.benchmark_group("state_width");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("u16", |b| b.iter(|| narrow.search(black_box(&text))));
    group.bench_function("u64", |b| b.iter(|| wide.search(black_box(&text))));
    group.finish();
}

criterion_group!(benches, bench_build, bench_search, bench_state_width);
criterion_main!(benches);
