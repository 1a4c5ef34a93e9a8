use criterion::{black_box, criterion_group, criterion_main, Criterion};
use taifan::{
    generate_context, score_dealer, seeded_rng, synthesize_hand, GeneratorConfig, Hand, Relative,
    TableContext, Wind, WinType,
};

fn fixed_hand() -> (TableContext, Hand) {
    let hand = Hand {
        concealed: vec![0, 1, 1, 2, 2, 3, 3, 4, 5, 6, 7, 8, 27, 27, 27, 10],
        revealed: vec![],
        winning_tile: 10,
        win_type: WinType::SelfDraw,
        flowers: vec![],
    };
    let ctx = TableContext {
        dealer: Relative::Opp,
        dealer_streak: 2,
        seat: Relative::Prev,
        prevailing_wind: Wind::East,
    };
    (ctx, hand)
}

fn bench_score_fixed(c: &mut Criterion) {
    let (ctx, hand) = fixed_hand();
    c.bench_function("score_dealer_fixed_hand", |b| {
        b.iter(|| score_dealer(black_box(&ctx), black_box(&hand)))
    });
}

fn bench_synthesize(c: &mut Criterion) {
    let config = GeneratorConfig::default();
    c.bench_function("synthesize_hand", |b| {
        let mut rng = seeded_rng(99);
        b.iter(|| synthesize_hand(&mut rng, black_box(&config)))
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    let config = GeneratorConfig::default();
    c.bench_function("synthesize_and_score", |b| {
        let mut rng = seeded_rng(7);
        b.iter(|| {
            let hand = synthesize_hand(&mut rng, &config);
            let ctx = generate_context(&mut rng);
            score_dealer(&ctx, &hand)
        })
    });
}

criterion_group!(
    benches,
    bench_score_fixed,
    bench_synthesize,
    bench_full_pipeline
);
criterion_main!(benches);
