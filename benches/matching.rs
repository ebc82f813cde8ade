use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use online_suffix_tree::SuffixTree;

fn generate_text(size: usize) -> Vec<u8> {
    let words = [
        "the ", "quick ", "brown ", "fox ", "jumps ", "over ", "lazy ", "dog ",
        "abra", "cadabra ", "mississippi ", "banana ", "ananas ",
    ];
    let mut text = Vec::with_capacity(size);
    let mut i = 0;
    while text.len() < size {
        text.extend_from_slice(words[(i * 7 + i / 3) % words.len()].as_bytes());
        i += 1;
    }
    text.truncate(size);
    text
}

fn build(text: &[u8]) -> SuffixTree {
    let mut tree = SuffixTree::new();
    tree.insert(text).unwrap();
    tree
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for size in [1_000, 10_000, 100_000] {
        let text = generate_text(size);
        group.bench_with_input(BenchmarkId::new("bytes", size), &text, |b, text| {
            b.iter(|| build(black_box(text)))
        });
    }
    // A single repeated symbol keeps the active point deep for the whole build.
    let run = vec![b'a'; 100_000];
    group.bench_with_input(BenchmarkId::new("run", run.len()), &run, |b, text| {
        b.iter(|| build(black_box(text)))
    });
    group.finish();
}

fn bench_match_against(c: &mut Criterion) {
    let tree = build(&generate_text(100_000));

    let mut group = c.benchmark_group("match_against");

    for size in [1_000, 10_000] {
        let query: Vec<u8> = generate_text(size + 13).into_iter().skip(13).collect();
        group.bench_with_input(BenchmarkId::new("bytes", size), &query, |b, query| {
            b.iter(|| tree.match_against(black_box(query)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_match_against);
criterion_main!(benches);
