// Ranking benchmarks over generated case bases
use casex_core::{AttributeKind, CaseBase, CaseId, CaseRecord, Catalog, QueryCase};
use casex_similarity::{Ranker, WeightVector};
use casex_storage::RecordCodec;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;

const OUTCOMES: [&str; 3] = ["Espondilite anquilosante", "Lombalgia mecânica", "Artrite reumatoide"];

fn generate_random_query(catalog: &Catalog, rng: &mut impl Rng) -> QueryCase {
    catalog
        .attributes()
        .iter()
        .map(|attr| {
            let value = match &attr.kind {
                AttributeKind::Numeric { min, max } => {
                    format!("{:.2}", rng.random_range(*min..=*max))
                }
                AttributeKind::Ordinal(table) => table
                    .sorted_labels()
                    .choose(rng)
                    .map(|(label, _)| label.to_string())
                    .unwrap_or_default(),
                AttributeKind::Nominal => ["sim", "não", ""].choose(rng).unwrap().to_string(),
            };
            (attr.name.clone(), value)
        })
        .collect()
}

fn generate_random_base(catalog: &Catalog, size: usize) -> CaseBase {
    let mut rng = rand::rng();
    let records = (0..size)
        .map(|i| {
            let query = generate_random_query(catalog, &mut rng);
            let outcome = OUTCOMES.choose(&mut rng).unwrap();
            CaseRecord::from_query(catalog, CaseId(i as u64 + 1), &query, *outcome)
        })
        .collect();
    CaseBase::from_records(records)
}

fn benchmark_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    let catalog = Catalog::spondyloarthritis();
    let weights = WeightVector::uniform(&catalog);
    let query = generate_random_query(&catalog, &mut rand::rng());

    for size in [100, 1000, 10000].iter() {
        let base = generate_random_base(&catalog, *size);
        group.bench_with_input(BenchmarkId::new("casex", size), size, |b, _| {
            let ranker = Ranker::new(&catalog);
            b.iter(|| {
                let ranked = ranker.rank(black_box(&query), &base, &weights);
                black_box(ranked);
            });
        });
    }

    group.finish();
}

fn benchmark_decode(c: &mut Criterion) {
    let catalog = Catalog::spondyloarthritis();
    let codec = RecordCodec::default();
    let base = generate_random_base(&catalog, 10000);
    let lines: Vec<String> = base
        .iter()
        .map(|record| codec.encode(&catalog, record).unwrap())
        .collect();

    c.bench_function("decode_10000", |b| {
        b.iter(|| {
            let decoded = codec.decode_all(&catalog, black_box(lines.as_slice()));
            black_box(decoded);
        });
    });
}

criterion_group!(benches, benchmark_rank, benchmark_decode);
criterion_main!(benches);
