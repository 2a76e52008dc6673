use core_render::{RenderSettings, Renderer};
use core_state::Document;
use core_syntax::builtin::{c_keywords, c_syntax, default_palette};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;

fn sample_source(lines: usize) -> String {
    let mut text = String::new();
    for i in 0..lines {
        match i % 4 {
            0 => text.push_str("/* block comment\n"),
            1 => text.push_str("   still inside */ int x = 1;\n"),
            2 => text.push_str("\tif (x) { return \"str\"; } // tail\n"),
            _ => text.push_str("while (i < 10) { call(a[i], b); }\n"),
        }
    }
    text
}

fn bench_render(c: &mut Criterion) {
    let colors = default_palette();
    let keywords = c_keywords(&colors);
    let syntax = Arc::new(c_syntax(&colors).expect("builtin syntax compiles"));
    let mut doc = Document::from_text("bench.c", &sample_source(5_000)).expect("document");
    doc.set_syntax(Some(syntax));
    doc.set_cursor(2_500, 12);
    let settings = RenderSettings::new(&colors, 120, 50).with_keywords(&keywords);

    c.bench_function("render_full_frame", |b| {
        let mut renderer = Renderer::new();
        b.iter(|| {
            let out = renderer
                .render(Some(black_box(&doc)), &settings, false)
                .expect("render");
            black_box(out.frame.len());
        })
    });

    c.bench_function("render_optimized_frame", |b| {
        let mut renderer = Renderer::new();
        b.iter(|| {
            let out = renderer
                .render(Some(black_box(&doc)), &settings, true)
                .expect("render");
            black_box(out.frame.changed_count());
        })
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
