use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Map, Value};

use quizforge_core::fallback::fallback_quiz;
use quizforge_core::model::Difficulty;
use quizforge_core::normalize::normalize_quiz;

fn candidate(n: usize, messy: bool) -> Map<String, Value> {
    let questions: Vec<Value> = (0..n)
        .map(|i| {
            if messy {
                json!({
                    "question": format!("{i}) [hard] Question {i}"),
                    "options": ["x", "x", "", 7, "y"],
                    "answer": format!("missing {i}"),
                })
            } else {
                json!({
                    "question": format!("Question {i}"),
                    "options": ["a", "b", "c", "d"],
                    "answer": "a",
                })
            }
        })
        .collect();

    match json!({ "title": "Bench", "questions": questions }) {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_quiz");

    let clean_10 = candidate(10, false);
    let messy_10 = candidate(10, true);
    let clean_50 = candidate(50, false);

    group.bench_function("clean_10", |b| {
        b.iter(|| normalize_quiz(black_box(&clean_10), "bench", 10, Difficulty::Medium))
    });
    group.bench_function("messy_10", |b| {
        b.iter(|| normalize_quiz(black_box(&messy_10), "bench", 10, Difficulty::Medium))
    });
    group.bench_function("clean_50", |b| {
        b.iter(|| normalize_quiz(black_box(&clean_50), "bench", 50, Difficulty::Medium))
    });

    group.finish();
}

fn bench_fallback(c: &mut Criterion) {
    c.bench_function("fallback_quiz_50", |b| {
        b.iter(|| fallback_quiz(black_box("Oceans"), 50, Difficulty::Hard))
    });
}

criterion_group!(benches, bench_normalize, bench_fallback);
criterion_main!(benches);
