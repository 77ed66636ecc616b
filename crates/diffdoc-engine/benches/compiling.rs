use criterion::{Criterion, criterion_group, criterion_main};
use diffdoc_engine::{
    Context, ExecutionError, Executor, UnifiedPatcher, compile, compile_document, load_elements,
};
mod common;

struct NoExecution;

impl Executor for NoExecution {
    fn execute(&self, language: &str, _source: &str) -> Result<String, ExecutionError> {
        Err(ExecutionError::UnknownLanguage(language.to_string()))
    }
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(20);

    let content = common::generate_document(200);
    group.bench_function("load_elements", |b| {
        b.iter(|| {
            let elements = load_elements(std::hint::black_box(&content)).unwrap();
            std::hint::black_box(elements);
        });
    });

    group.finish();
}

fn bench_compiling(c: &mut Criterion) {
    let mut group = c.benchmark_group("compiling");
    group.sample_size(10);

    let content = common::generate_document(200);
    let elements = load_elements(&content).unwrap();
    let context = Context::new(&NoExecution, &UnifiedPatcher);

    group.bench_function("compile", |b| {
        b.iter(|| {
            let rendered = compile(std::hint::black_box(&elements), &context).unwrap();
            std::hint::black_box(rendered);
        });
    });

    group.bench_function("compile_document", |b| {
        b.iter(|| {
            let output = compile_document(std::hint::black_box(&content), &context).unwrap();
            std::hint::black_box(output);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_compiling);
criterion_main!(benches);
