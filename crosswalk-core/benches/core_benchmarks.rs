use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crosswalk_core::evidence::{cognitive_tags, key_terms};
use crosswalk_core::export::export_report;
use crosswalk_core::similarity::{LexicalSimilarity, SimilarityStrategy};
use crosswalk_core::{Comparator, EmbeddingConfig, Taxonomy};

const OUTCOMES: &[&str] = &[
    "Apply the scientific method to design experiments and test hypotheses",
    "Communicate biological concepts clearly in written and oral form",
    "Demonstrate ethical conduct in research and professional practice",
    "Analyze and interpret quantitative data using appropriate statistical tools",
    "Explain the molecular basis of inheritance and gene expression",
    "Work effectively in teams to solve complex biological problems",
];

fn bench_evidence(c: &mut Criterion) {
    let text = "Critically evaluate primary literature and synthesize findings into a coherent argument";

    c.bench_function("key_terms", |b| b.iter(|| key_terms(black_box(text))));

    c.bench_function("cognitive_tags", |b| b.iter(|| cognitive_tags(black_box(text))));
}

fn bench_similarity(c: &mut Criterion) {
    c.bench_function("lexical_pair", |b| {
        b.iter(|| {
            LexicalSimilarity.similarity(
                black_box("Analyze and interpret biological data"),
                black_box("Collect, analyze, and interpret data from experiments"),
            )
        })
    });

    let taxonomy = Taxonomy::builtin();
    let references: Vec<&str> = taxonomy.statements().iter().map(|s| s.text.as_str()).collect();
    c.bench_function("lexical_matrix_6x52", |b| {
        b.iter(|| LexicalSimilarity.similarity_matrix(black_box(OUTCOMES), black_box(&references)))
    });
}

fn bench_compare(c: &mut Criterion) {
    let lexical = Comparator::lexical(Taxonomy::builtin());
    c.bench_function("compare_lexical_6", |b| {
        b.iter(|| lexical.compare(black_box(OUTCOMES)))
    });

    let hashing = Comparator::new(
        Taxonomy::builtin(),
        &EmbeddingConfig {
            provider: "hashing".into(),
            ..Default::default()
        },
    );
    c.bench_function("compare_hashing_6", |b| {
        b.iter(|| hashing.compare(black_box(OUTCOMES)))
    });
}

fn bench_export(c: &mut Criterion) {
    let report = Comparator::lexical(Taxonomy::builtin()).compare(OUTCOMES);

    c.bench_function("export_json", |b| {
        b.iter(|| export_report(black_box(&report), "json"))
    });

    c.bench_function("export_csv", |b| {
        b.iter(|| export_report(black_box(&report), "csv"))
    });
}

criterion_group!(
    benches,
    bench_evidence,
    bench_similarity,
    bench_compare,
    bench_export,
);
criterion_main!(benches);
