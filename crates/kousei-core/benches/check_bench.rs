use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kousei_core::checker::{rules_only, LexiconData};

fn bench_rules_check(c: &mut Criterion) {
    let checker = rules_only(LexiconData::default()).unwrap();

    let inputs = vec![
        "She went to the sea to meat her friend.",
        "Their going to the store to buy there groceries.",
        "I recieve the package yesterday and it was definately worth it.",
        "The weather is to hot for me to go outside.",
        "Its a beautiful day and the sun is shining bright.",
    ];

    c.bench_function("rules_check_single", |b| {
        b.iter(|| checker.check(black_box(inputs[0])).unwrap());
    });

    c.bench_function("rules_check_batch_5", |b| {
        b.iter(|| {
            for input in &inputs {
                let _ = checker.check(black_box(input)).unwrap();
            }
        });
    });
}

criterion_group!(benches, bench_rules_check);
criterion_main!(benches);
