//! Benchmarks for rule matching over the built-in tables.
//!
//! Matching is a linear scan with a substring search per trigger, so the
//! worst case is an input that falls through to the fallback.

use std::time::Duration;

use academy_chat::{match_rule, LabRuleBook, RuleBook};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// A question that matches nothing and scans every trigger.
fn long_unmatched_question(words: usize) -> String {
    (0..words)
        .map(|i| format!("word{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_general(c: &mut Criterion) {
    let book = RuleBook::general();
    let mut group = c.benchmark_group("general_assistant");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("first_rule", |b| {
        b.iter(|| match_rule(black_box("tell me about sql injection"), book.table()))
    });
    group.bench_function("last_rule", |b| {
        b.iter(|| match_rule(black_box("explain privilege escalation"), book.table()))
    });
    let unmatched = long_unmatched_question(200);
    group.bench_function("fallback_200_words", |b| {
        b.iter(|| match_rule(black_box(&unmatched), book.table()))
    });

    group.finish();
}

fn bench_lab(c: &mut Criterion) {
    let book = LabRuleBook::builtin();
    let mut group = c.benchmark_group("lab_assistant");

    group.bench_function("known_context", |b| {
        b.iter(|| book.classify(black_box("sql-injection"), black_box("I'm stuck")))
    });
    group.bench_function("unknown_context", |b| {
        b.iter(|| book.classify(black_box("race-condition"), black_box("I'm stuck")))
    });
    group.bench_function("render_generic", |b| {
        b.iter(|| book.classify("xss", black_box("no keywords here")).render())
    });

    group.finish();
}

criterion_group!(benches, bench_general, bench_lab);
criterion_main!(benches);
