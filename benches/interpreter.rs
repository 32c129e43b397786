//! Interpreter benchmarks for Mython.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mython::interpreter::RunOptions;
use mython::lexer::Scanner;
use mython::parser::Parser;
use std::fs;
use std::io;

/// Run a Mython program from source code, discarding its output.
fn run_program(source: &str) {
    mython::run_with_output(source, io::sink(), RunOptions::default()).expect("program failed");
}

fn load(name: &str) -> String {
    let path = format!("benches/programs/{}.my", name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {}: {}", path, e))
}

fn program_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("programs");

    for name in [
        "fib_recursive",
        "class_ops",
        "inheritance_deep",
        "string_ops",
        "comparison_ops",
    ] {
        let source = load(name);
        group.bench_with_input(BenchmarkId::from_parameter(name), &source, |b, src| {
            b.iter(|| run_program(black_box(src)))
        });
    }

    group.finish();
}

/// Benchmark lexing and parsing only (no execution).
fn parsing_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    let source = load("comparison_ops");

    group.bench_function("scan_comparison_program", |b| {
        b.iter(|| Scanner::new(black_box(&source)).scan_tokens().unwrap())
    });

    group.bench_function("parse_comparison_program", |b| {
        b.iter(|| {
            let tokens = Scanner::new(black_box(&source)).scan_tokens().unwrap();
            Parser::new(tokens).parse().unwrap()
        })
    });

    group.finish();
}

/// Parameterized fibonacci benchmark for different N values.
fn fibonacci_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("fib_scaling");

    for n in [10, 14, 18].iter() {
        let source = format!(
            "\
class Fib:
  def at(n):
    if n <= 1:
      return n
    return self.at(n - 1) + self.at(n - 2)
result = Fib().at({})
",
            n
        );

        group.bench_with_input(BenchmarkId::new("recursive", n), &source, |b, src| {
            b.iter(|| run_program(black_box(src)))
        });
    }

    group.finish();
}

criterion_group!(benches, program_benchmarks, parsing_benchmarks, fibonacci_scaling);

criterion_main!(benches);
