use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

pub fn table_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_generation");

    group.bench_function("derive_sbox", |b| b.iter(|| tgen_gf256::derive_sbox().unwrap()));

    let (forward, inverse) = tgen_gf256::derive_sbox().unwrap();
    for spec in &tgen_gf256::STANDARD_TABLES {
        group.bench_with_input(BenchmarkId::new("generate_table", spec.name), spec, |b, spec| {
            b.iter(|| spec.generate(&forward, &inverse))
        });
    }

    group.bench_function("multiply_all_pairs", |b| {
        b.iter(|| {
            let mut acc = 0u8;
            for x in 0..=255u8 {
                for y in 0..=255u8 {
                    acc ^= tgen_gf256::multiply(x, y);
                }
            }
            acc
        })
    });
}

criterion_group!(benches, table_generation);
criterion_main!(benches);
