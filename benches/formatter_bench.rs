use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use poker_typography::{FormatOptions, TitleCaseFormatter};

const SHORT_LABEL: &str = "3bet pot";
const SENTENCE: &str = "hero opens utg+1 with akS, villain 3bets from the bu and hero jams 25 bb";
const GUARDED: &str = "user_id 8bb621b6-16b5-4bd9-bb73-7c78a8d347ad";

fn bench_format(c: &mut Criterion) {
    let formatter = TitleCaseFormatter::new().expect("formatter should build");
    let mut group = c.benchmark_group("format");

    for (name, input) in [("short_label", SHORT_LABEL), ("sentence", SENTENCE), ("guarded", GUARDED)] {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| formatter.format(black_box(input), FormatOptions::default()))
        });
    }
    group.finish();
}

fn bench_format_into(c: &mut Criterion) {
    let formatter = TitleCaseFormatter::new().expect("formatter should build");
    let catalog: Vec<String> = (0..200).map(|i| format!("{SENTENCE} #{i}")).collect();
    let bytes: usize = catalog.iter().map(String::len).sum();

    let mut group = c.benchmark_group("catalog");
    group.throughput(Throughput::Bytes(bytes as u64));
    group.bench_function("format_into_reused_buffer", |b| {
        let mut buffer = String::new();
        b.iter(|| {
            for line in &catalog {
                formatter.format_into(black_box(line), FormatOptions::default(), &mut buffer);
            }
        })
    });
    group.finish();
}

fn bench_instantiation(c: &mut Criterion) {
    c.bench_function("formatter_new", |b| b.iter(|| TitleCaseFormatter::new().expect("formatter should build")));
}

criterion_group!(benches, bench_format, bench_format_into, bench_instantiation);
criterion_main!(benches);
