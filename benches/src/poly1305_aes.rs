//! Poly1305-AES benchmarks.
use criterion::{BenchmarkId, Throughput, criterion_group, criterion_main};
use poly1305_aes::{Poly1305Aes, compute_tag};
use std::hint::black_box;

mod utils;
use utils::{Benchmarker, CIPHER_KEY, NONCE, R, config};

fn bench(c: &mut Benchmarker) {
    let mut group = c.benchmark_group("poly1305-aes");

    for size in &[10, 100, 1000, 10000] {
        let buf = vec![0u8; *size];

        group.throughput(Throughput::Bytes(*size as u64));

        group.bench_function(BenchmarkId::new("compute_tag", size), |b| {
            b.iter(|| compute_tag(&CIPHER_KEY, &R, &NONCE, black_box(&buf)));
        });

        group.bench_function(BenchmarkId::new("digest", size), |b| {
            let mac = Poly1305Aes::new(&CIPHER_KEY, &R, &NONCE).unwrap().chain(&buf);
            b.iter(|| black_box(&mac).digest());
        });
    }

    group.finish();
}

criterion_group!(
    name = benches;
    config = config();
    targets = bench
);

criterion_main!(benches);
