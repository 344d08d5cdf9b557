use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ini_reader::{
    Document, MalformedLinePolicy, ParserConfig, classify_line, convert, from_str,
};
use serde::Deserialize;

/// Generate an INI document with the given number of sections and keys per section
fn generate_ini(sections: usize, keys: usize) -> String {
    let mut content = String::from("; generated\nname = bench\n");
    for s in 0..sections {
        content.push_str(&format!("\n[section_{}]\n", s));
        for k in 0..keys {
            match k % 4 {
                0 => content.push_str(&format!("key_{} = value {} ; comment\n", k, k)),
                1 => content.push_str(&format!("key_{} = 0x{:x}\n", k, k * 4099)),
                2 => content.push_str(&format!("key_{} = {}.{}\n", k, k, s)),
                _ => content.push_str(&format!("key_{} = on\n", k)),
            }
        }
    }
    content
}

#[derive(Deserialize)]
struct ServiceConfig {
    name: String,
    server: ServerConfig,
}

#[derive(Deserialize)]
struct ServerConfig {
    host: String,
    port: u16,
    workers: u32,
    debug: bool,
    timeout: f64,
}

/// Benchmark basic parsing operations
fn bench_parser_basic(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_basic");

    let simple_ini = "name = test-app\n[server]\nhost = localhost\nport = 8080\nworkers = 0x10\ndebug = yes\ntimeout = 2.5\n";

    group.throughput(Throughput::Bytes(simple_ini.len() as u64));

    group.bench_function("parse_document", |b| {
        b.iter(|| black_box(simple_ini).parse::<Document>());
    });

    group.bench_function("classify_line", |b| {
        b.iter(|| classify_line(black_box("Option 1 = value 1 ; trailing comment")));
    });

    group.finish();
}

/// Benchmark documents of increasing size
fn bench_parser_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_scaling");

    for sections in [10, 100, 1000] {
        let content = generate_ini(sections, 8);
        group.throughput(Throughput::Bytes(content.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("sections", sections),
            &content,
            |b, content| {
                b.iter(|| black_box(content.as_str()).parse::<Document>());
            },
        );
    }

    group.finish();
}

/// Benchmark typed value conversion
fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");

    group.bench_function("i64_decimal", |b| {
        b.iter(|| convert::parse::<i64>(black_box("-1285")));
    });
    group.bench_function("i64_hex", |b| {
        b.iter(|| convert::parse::<i64>(black_box("0x12ae")));
    });
    group.bench_function("f64", |b| {
        b.iter(|| convert::parse::<f64>(black_box("-124.45667356")));
    });
    group.bench_function("bool", |b| {
        b.iter(|| convert::parse::<bool>(black_box("Off")));
    });
    group.bench_function("utf16", |b| {
        b.iter(|| convert::parse::<Vec<u16>>(black_box("hello, 世界")));
    });

    group.finish();
}

/// Benchmark stringify of a parsed document
fn bench_stringify(c: &mut Criterion) {
    let mut group = c.benchmark_group("stringify");

    for sections in [10, 100] {
        let document: Document = generate_ini(sections, 8)
            .parse()
            .expect("generated document parses");

        group.bench_with_input(
            BenchmarkId::new("sections", sections),
            &document,
            |b, document| {
                b.iter(|| black_box(document).stringify());
            },
        );
    }

    group.finish();
}

/// Benchmark serde deserialization
fn bench_serde_deserialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serde_deserialization");

    let content = "name = svc\n[server]\nhost = 0.0.0.0\nport = 0x1F90\nworkers = 8\ndebug = off\ntimeout = 30.5\n";

    group.bench_function("typed_struct", |b| {
        b.iter(|| from_str::<ServiceConfig>(black_box(content)));
    });

    group.finish();
}

/// Benchmark the malformed line policies on noisy input
fn bench_malformed_policies(c: &mut Criterion) {
    let mut group = c.benchmark_group("malformed_policies");

    let mut noisy = generate_ini(50, 4);
    for i in 0..200 {
        noisy.push_str(&format!("garbage line {}\nkey_without_value_{} =\n", i, i));
    }

    for (label, policy) in [
        ("skip", MalformedLinePolicy::Skip),
        ("collect", MalformedLinePolicy::CollectDiagnostic),
    ] {
        let config = ParserConfig::default().with_malformed_line_policy(policy);
        group.bench_with_input(BenchmarkId::new("policy", label), &noisy, |b, content| {
            b.iter(|| {
                let mut document = Document::with_config(config.clone());
                document.parse_str(black_box(content))
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parser_basic,
    bench_parser_scaling,
    bench_conversion,
    bench_stringify,
    bench_serde_deserialization,
    bench_malformed_policies
);
criterion_main!(benches);
