//! Benchmarks for question generation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chronobench_core::generate::{GeneratorOptions, QuestionGenerator};
use chronobench_core::model::{Fact, QuestionKind};
use chronobench_nlp::RuleLemmatizer;

fn facts(n: usize) -> Vec<Fact> {
    (0..n)
        .map(|i| {
            Fact::spanning(
                "Obama",
                "was president of",
                "USA",
                1900 + (i % 100) as i64,
                1904 + (i % 100) as i64,
            )
        })
        .collect()
}

fn bench_single_generators(c: &mut Criterion) {
    let lemmatizer = RuleLemmatizer::new();
    let generator = QuestionGenerator::new(&lemmatizer, GeneratorOptions::new());
    let fact = Fact::spanning("Obama", "was president of", "USA", 2009, 2017);

    c.bench_function("yes_no_single_fact", |b| {
        b.iter(|| generator.yes_no(black_box(&fact)).unwrap())
    });

    c.bench_function("when_to_when_single_fact", |b| {
        b.iter(|| generator.when_to_when(black_box(&fact)).unwrap())
    });
}

fn bench_distractor_generation(c: &mut Criterion) {
    let lemmatizer = RuleLemmatizer::new();
    let mut options = GeneratorOptions::new();
    options.falsy_year_count = Some(5);
    options.all_interval_years = true;
    let generator = QuestionGenerator::new(&lemmatizer, options);
    let fact = Fact::spanning("Obama", "was president of", "USA", 2009, 2017);

    c.bench_function("yes_no_with_distractors", |b| {
        b.iter(|| generator.yes_no(black_box(&fact)).unwrap())
    });
}

fn bench_batch(c: &mut Criterion) {
    let lemmatizer = RuleLemmatizer::new();
    let generator = QuestionGenerator::new(&lemmatizer, GeneratorOptions::new());
    let facts = facts(100);

    c.bench_function("batch_100_facts_all_kinds", |b| {
        b.iter(|| {
            generator
                .generate_batch(black_box(&QuestionKind::IMPLEMENTED), black_box(&facts))
                .unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_single_generators,
    bench_distractor_generation,
    bench_batch
);
criterion_main!(benches);
