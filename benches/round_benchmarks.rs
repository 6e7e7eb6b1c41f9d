use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::layout::{Rect, Size};

use potyah::game::quiz::build_question_pool;
use potyah::game::round::RoundState;
use potyah::game::scatter::scatter;
use potyah::words::WordBank;

fn pools() -> (Vec<String>, Vec<String>) {
    let bank = WordBank::load();
    let letter = bank.letter_config("б").expect("bundled letter");
    let words = letter
        .category("pochatok")
        .expect("bundled category")
        .words
        .clone();
    (words, letter.distractors("pochatok"))
}

fn bench_prepare(c: &mut Criterion) {
    let (words, distractors) = pools();
    let mut rng = SmallRng::seed_from_u64(1);

    c.bench_function("RoundState::prepare (4 + 4 wagons)", |b| {
        b.iter(|| RoundState::prepare(black_box(&words), black_box(&distractors), &mut rng))
    });
}

fn bench_scatter(c: &mut Criterion) {
    let field = Size::new(120, 26);
    let tile = Size::new(14, 5);
    let placed: Vec<Rect> = (0..7)
        .map(|i| Rect::new((i % 4) * 30, (i / 4) * 12, tile.width, tile.height))
        .collect();
    let mut rng = SmallRng::seed_from_u64(2);

    c.bench_function("scatter (7 placed)", |b| {
        b.iter(|| scatter(field, tile, black_box(&placed), &mut rng))
    });
}

fn bench_question_pool(c: &mut Criterion) {
    let (words, distractors) = pools();
    let mut rng = SmallRng::seed_from_u64(3);
    let round = RoundState::prepare(&words, &distractors, &mut rng).expect("enough words");

    c.bench_function("build_question_pool", |b| {
        b.iter(|| {
            build_question_pool(
                black_box(&round.correct_words),
                black_box(&round.round_extras),
                black_box(&round.distractors),
                &mut rng,
            )
        })
    });
}

criterion_group!(benches, bench_prepare, bench_scatter, bench_question_pool);
criterion_main!(benches);
