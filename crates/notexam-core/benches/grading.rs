use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use notexam_core::grading::{is_correct, score};
use notexam_core::model::{Question, QuestionKind, QuestionOption, Response};

fn answered_question(i: usize) -> Question {
    let correct = i % 2 == 0;
    Question {
        id: i.to_string(),
        text: format!("Question {i}"),
        image: None,
        options: "ABCD"
            .chars()
            .map(|letter| QuestionOption {
                letter,
                text: format!("choice {letter}"),
            })
            .collect(),
        correct_answers: vec!["A".into(), "C".into()],
        kind: QuestionKind::Multiple,
        response: Some(Response::Selected(if correct {
            vec!["C".into(), "A".into()]
        } else {
            vec!["B".into()]
        })),
    }
}

fn bench_is_correct(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_correct");

    let choice = answered_question(0);
    let freetext = Question {
        id: "f".into(),
        text: "Open".into(),
        image: None,
        options: vec![],
        correct_answers: vec!["Photosynthesis".into()],
        kind: QuestionKind::FreeText,
        response: Some(Response::Text("  photosynthesis ".into())),
    };

    group.bench_function("multiple_choice", |b| {
        b.iter(|| is_correct(black_box(&choice)))
    });

    group.bench_function("freetext", |b| b.iter(|| is_correct(black_box(&freetext))));

    group.finish();
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");

    let hundred: Vec<Question> = (0..100).map(answered_question).collect();
    let thousand: Vec<Question> = (0..1000).map(answered_question).collect();

    group.bench_function("100_questions", |b| {
        b.iter_batched(
            || hundred.clone(),
            |questions| score(questions, 60),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("1000_questions", |b| {
        b.iter_batched(
            || thousand.clone(),
            |questions| score(questions, 60),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_is_correct, bench_score);
criterion_main!(benches);
