use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rnsconf_core::{parse, serialize, validate};

/// Builds a config with `count` TCP client interfaces.
fn generate_config(count: usize) -> String {
    let mut text = String::from(
        "[reticulum]\nenable_transport = yes\ndiscover_interfaces = yes\n\n[logging]\nloglevel = 4\n\n[interfaces]\n",
    );
    for i in 0..count {
        text.push_str(&format!(
            "\n  [[Peer {i}]]\n    type = TCPClientInterface\n    enabled = yes\n    target_host = peer{i}.example.org\n    target_port = {}\n",
            4000 + i % 1000
        ));
    }
    text
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("config_pipeline");
    for count in [10, 100, 1000] {
        let text = generate_config(count);
        let state = parse(&text);

        group.bench_with_input(BenchmarkId::new("parse", count), &text, |b, text| {
            b.iter(|| parse(black_box(text)))
        });
        group.bench_with_input(BenchmarkId::new("serialize", count), &state, |b, state| {
            b.iter(|| serialize(black_box(state)))
        });
        group.bench_with_input(BenchmarkId::new("validate", count), &state, |b, state| {
            b.iter(|| validate(black_box(state)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
