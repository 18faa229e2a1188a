mod fixtures;

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use graphql_engine_parser::GraphQLParser;
use graphql_engine_parser::token_source::StrGraphQLTokenSource;

// ─── Group 1: Executable Document Parsing ─────────────────

fn executable_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("executable_parse");

    group.bench_function("simple_query", |b| {
        b.iter(|| {
            let parser = GraphQLParser::new(fixtures::SIMPLE_QUERY);
            black_box(parser.parse_executable_document())
        })
    });

    group.bench_function("complex_query", |b| {
        b.iter(|| {
            let parser = GraphQLParser::new(fixtures::COMPLEX_QUERY);
            black_box(parser.parse_executable_document())
        })
    });

    let deep = fixtures::deep_query(50);
    group.bench_function("deep_query (synthetic)", |b| {
        b.iter(|| {
            let parser = GraphQLParser::new(&deep);
            black_box(parser.parse_executable_document())
        })
    });

    let wide = fixtures::wide_query(500);
    group.bench_function("wide_query (synthetic)", |b| {
        b.iter(|| {
            let parser = GraphQLParser::new(&wide);
            black_box(parser.parse_executable_document())
        })
    });

    group.finish();
}

// ─── Group 2: Lexer (Tokenization Only) ──────────────────

fn lexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    let wide = fixtures::wide_query(500);
    let inputs: &[(&str, &str)] = &[
        ("complex_query", fixtures::COMPLEX_QUERY),
        ("wide_query (synthetic)", &wide),
    ];
    for &(label, input) in inputs {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_function(label, |b| {
            b.iter(|| {
                for token in StrGraphQLTokenSource::new(input) {
                    black_box(token);
                }
            })
        });
    }

    group.finish();
}

// ─── Group 3: Cross-Parser Comparison ────────────────────

fn compare_executable_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_executable_parse");

    let wide = fixtures::wide_query(500);
    let inputs: &[(&str, &str)] = &[
        ("simple", fixtures::SIMPLE_QUERY),
        ("complex", fixtures::COMPLEX_QUERY),
        ("wide", &wide),
    ];

    for &(label, input) in inputs {
        group.bench_with_input(
            BenchmarkId::new("graphql_engine_parser", label),
            &input,
            |b, input| {
                b.iter(|| {
                    let parser = GraphQLParser::new(input);
                    black_box(parser.parse_executable_document())
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("apollo_parser", label),
            &input,
            |b, input| {
                b.iter(|| {
                    let parser = apollo_parser::Parser::new(input);
                    black_box(parser.parse())
                })
            },
        );
    }

    group.finish();
}

// ─── Criterion Entrypoint ────────────────────────────────

criterion_group!(benches, executable_parse, lexer, compare_executable_parse);
criterion_main!(benches);
