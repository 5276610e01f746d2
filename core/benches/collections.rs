//! Collection engine benchmarks.
//!
//! Measures: exact order, any order (augmenting paths, including the worst case
//! where every matcher accepts every item), relative order with parallel runs, and
//! intersection misses.

use matchbook::prelude::*;
use matchbook::{contains_in_any_order_values, contains_values, intersects_with_values};

fn main() {
    divan::main();
}

fn items(n: usize) -> Value {
    Value::from((0..n).map(Value::from_len).collect::<Vec<_>>())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Exact order
// ═══════════════════════════════════════════════════════════════════════════════

#[divan::bench(args = [8, 64, 512])]
fn in_order_hit(bencher: divan::Bencher, n: usize) {
    let matcher = contains_values((0..n).map(Value::from_len)).unwrap();
    let actual = items(n);

    bencher.bench_local(|| matcher.matches(&actual));
}

// ═══════════════════════════════════════════════════════════════════════════════
// Any order
// ═══════════════════════════════════════════════════════════════════════════════

#[divan::bench(args = [8, 64, 256])]
fn any_order_reversed(bencher: divan::Bencher, n: usize) {
    let matcher = contains_in_any_order_values((0..n).rev().map(Value::from_len)).unwrap();
    let actual = items(n);

    bencher.bench_local(|| matcher.matches(&actual));
}

#[divan::bench(args = [8, 32, 64])]
fn any_order_all_ambiguous(bencher: divan::Bencher, n: usize) {
    // Every matcher accepts every item.
    let matcher = contains_in_any_order((0..n).map(|_| anything().boxed())).unwrap();
    let actual = items(n);

    bencher.bench_local(|| matcher.matches(&actual));
}

#[divan::bench(args = [8, 32, 64])]
fn any_order_no_assignment(bencher: divan::Bencher, n: usize) {
    // n - 1 wildcards plus one matcher nothing satisfies.
    let mut matchers: Vec<Box<dyn Matcher>> = (1..n).map(|_| anything().boxed()).collect();
    matchers.push(equal_to("absent").boxed());
    let matcher = contains_in_any_order(matchers).unwrap();
    let actual = items(n);

    bencher.bench_local(|| matcher.matches(&actual));
}

// ═══════════════════════════════════════════════════════════════════════════════
// Relative order / parallel runs
// ═══════════════════════════════════════════════════════════════════════════════

#[divan::bench(args = [1, 4, 16])]
fn parallel_runs(bencher: divan::Bencher, runs: usize) {
    let matcher = contains_parallel_runs_of(
        runs,
        vec![equal_to("open").boxed(), equal_to("close").boxed()],
    )
    .unwrap();
    let mut trace: Vec<&str> = Vec::new();
    for _ in 0..runs {
        trace.extend(["open", "noise"]);
    }
    for _ in 0..runs {
        trace.extend(["noise", "close"]);
    }
    let actual = Value::from(trace);

    bencher.bench_local(|| matcher.matches(&actual));
}

// ═══════════════════════════════════════════════════════════════════════════════
// Intersecting
// ═══════════════════════════════════════════════════════════════════════════════

#[divan::bench(args = [8, 64, 512])]
fn intersects_miss(bencher: divan::Bencher, n: usize) {
    let matcher = intersects_with_values(["x", "y", "z"]).unwrap();
    let actual = items(n);

    bencher.bench_local(|| matcher.matches(&actual));
}
