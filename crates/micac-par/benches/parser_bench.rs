//! Parser throughput benchmark.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use micac_par::parse;
use micac_util::Handler;

fn sample_source() -> String {
    let mut src = String::new();
    src.push_str("func add(x int, y int) int {\n    return x + y;\n}\n");
    for i in 0..100 {
        src.push_str(&format!("var a{i} int = ({i} + 2) * 3 - {i} / 2;\n"));
        src.push_str(&format!(
            "if a{i} > 10 {{ a{i} = add(a{i}, 1); }} else {{ a{i} -= 1; }}\n"
        ));
    }
    src.push_str("var n int = 0;\nwhile n < 100 { n++; }\n");
    src
}

fn bench_parser(c: &mut Criterion) {
    let source = sample_source();
    c.bench_function("parse_mixed_source", |b| {
        b.iter(|| {
            let handler = Handler::new();
            let program = parse(black_box(&source), &handler);
            black_box(program.len())
        })
    });
}

criterion_group!(benches, bench_parser);
criterion_main!(benches);
