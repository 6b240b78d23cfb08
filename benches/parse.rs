use criterion::{Criterion, black_box, criterion_group, criterion_main};
use zygo_xyz::XyzReader;

const HEADER: &str = r#"Zygo ASCII Data File - Format 2
0 0 0 0 "MetroPro 8.3.5        " "Jun 02 2011"
0 0 0 0 0 0
0 0 256 256
""
""
""
0 0.5 6.328e-07 0.3 1 20 1.1e-06 1306999999
640 480 1 0 4702 0 "20x Mirau"
0 1 0.0 0 0 1 0.1 50 7 0
1 1 7 0 1 0 0 0 0
0 ""
1 0
"  1"
"#;

fn synthetic_scan(size: usize) -> String {
    let mut text = String::from(HEADER);
    for y in 0..size {
        for x in 0..size {
            if (x * 7 + y * 13) % 97 == 0 {
                text.push_str(&format!("{} {} No Data\n", y, x));
            } else {
                text.push_str(&format!("{} {} {:.4}\n", y, x, (x as f64 * 0.01).sin() * 100.0));
            }
        }
    }
    text.push_str("#\n");
    text
}

fn bench_parse(c: &mut Criterion) {
    let text = synthetic_scan(256);
    let reader = XyzReader::new();

    c.bench_function("parse_256x256", |b| {
        b.iter(|| reader.parse_str(black_box(&text)).unwrap())
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
