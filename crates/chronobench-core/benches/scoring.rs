//! Benchmarks for answer extraction and scoring.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chronobench_core::answer::{extract_two_years, extract_year, words_to_number};
use chronobench_core::model::{Answer, QuestionKind};
use chronobench_core::validate::{score, RawAnswerFormat};

fn bench_extraction(c: &mut Criterion) {
    let prose = "Well, if I remember correctly, he held the office from 2009 until 2017 or so.";

    c.bench_function("extract_year", |b| {
        b.iter(|| extract_year(black_box(prose)))
    });

    c.bench_function("extract_two_years", |b| {
        b.iter(|| extract_two_years(black_box(prose)))
    });

    c.bench_function("words_to_number", |b| {
        b.iter(|| words_to_number(black_box("about twenty five years in total")))
    });
}

fn bench_scoring(c: &mut Criterion) {
    let gold_years = Answer::Years((2009..=2017).collect());
    let gold_duration = Answer::Duration(8);

    c.bench_function("score_when_to_when", |b| {
        b.iter(|| {
            score(
                QuestionKind::WhenToWhen,
                black_box(&gold_years),
                black_box("from 2009 to 2017"),
                RawAnswerFormat::Plain,
            )
            .unwrap()
        })
    });

    c.bench_function("score_duration_words", |b| {
        b.iter(|| {
            score(
                QuestionKind::Duration,
                black_box(&gold_duration),
                black_box("it lasted eight years"),
                RawAnswerFormat::Plain,
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, bench_extraction, bench_scoring);
criterion_main!(benches);
