use criterion::{black_box, criterion_group, criterion_main, Criterion};
use courtside::models::QuarterLine;
use courtside::shot;

fn benchmark_shot_codec(c: &mut Criterion) {
    // A busy scorebook line: one player's full quarter
    let line = "22-1x 13/2-0 02/3-1/2 32/4-2x 03/3-0 12-x 23/5-1/3 42/6-0";
    let entries = shot::decode_sequence(line).expect("Failed to decode fixture line");

    let mut group = c.benchmark_group("shot_codec");

    group.bench_function("decode_single", |b| {
        b.iter(|| shot::decode(black_box("23/5-1/3")))
    });

    group.bench_function("decode_line", |b| {
        b.iter(|| shot::decode_sequence(black_box(line)))
    });

    group.bench_function("encode_line", |b| {
        b.iter(|| shot::encode_sequence(black_box(&entries)))
    });

    group.bench_function("quarter_totals", |b| {
        b.iter(|| {
            QuarterLine::parse("bench", 1, "player", black_box(line))
                .map(|q| q.totals().points())
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_shot_codec);
criterion_main!(benches);
