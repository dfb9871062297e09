use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lifeline::config::{LayoutConfig, RenderConfig};
use lifeline::layout::compute_layout;
use lifeline::parser::parse_timeline;
use lifeline::render::render_svg;
use lifeline::theme::Theme;
use std::hint::black_box;

const CATEGORIES: [&str; 3] = ["education", "life", "work"];

/// `events` dated events spread over `years` years before 2026, with every
/// fifth event a closed range and pairs a week apart to force stacking.
fn generated_source(events: usize, years: i32) -> String {
    let mut out = String::from("{\n  \"events\": [\n");
    for i in 0..events {
        let year = 2026 - years + (i as i32 * years) / events.max(1) as i32;
        let month = (i % 12) + 1;
        let day = if i % 2 == 0 { 1 } else { 8 };
        let category = CATEGORIES[i % CATEGORIES.len()];
        let date = if i % 5 == 0 {
            format!(
                "\"startDate\": \"{year}-{month:02}-{day:02}\", \"endDate\": \"{}-{month:02}-{day:02}\"",
                year + 1
            )
        } else {
            format!("\"date\": \"{year}-{month:02}-{day:02}\"")
        };
        out.push_str(&format!(
            "    {{\"title\": \"Event {i}\", \"description\": \"Generated event {i}\", \"category\": \"{category}\", {date}}}"
        ));
        out.push_str(if i + 1 == events { "\n" } else { ",\n" });
    }
    out.push_str("  ],\n  \"categories\": {\n");
    out.push_str("    \"education\": {\"color\": \"#ffb347\"},\n");
    out.push_str("    \"life\": {\"color\": \"#7bd88f\"},\n");
    out.push_str("    \"work\": {\"color\": \"#4f8cff\"}\n");
    out.push_str("  }\n}\n");
    out
}

fn datasets() -> Vec<(&'static str, String)> {
    vec![
        ("career_small", generated_source(12, 36)),
        ("career_medium", generated_source(80, 40)),
        ("career_dense", generated_source(400, 10)),
        ("career_long", generated_source(400, 120)),
    ]
}

fn bench_config() -> LayoutConfig {
    LayoutConfig {
        fast_text_metrics: true,
        ..LayoutConfig::default()
    }
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (name, source) in datasets() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &source, |b, data| {
            b.iter(|| {
                let timeline = parse_timeline(black_box(data)).expect("parse failed");
                black_box(timeline.events.len());
            });
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let theme = Theme::modern();
    let config = bench_config();
    for (name, source) in datasets() {
        let timeline = parse_timeline(&source).expect("parse failed");
        group.bench_with_input(BenchmarkId::from_parameter(name), &timeline, |b, timeline| {
            b.iter(|| {
                let layout = compute_layout(black_box(timeline), &theme, &config);
                black_box(layout.groups.len());
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let theme = Theme::modern();
    let config = bench_config();
    let render = RenderConfig::default();
    for (name, source) in datasets() {
        let timeline = parse_timeline(&source).expect("parse failed");
        let layout = compute_layout(&timeline, &theme, &config);
        group.bench_with_input(BenchmarkId::from_parameter(name), &layout, |b, layout| {
            b.iter(|| {
                let svg = render_svg(&timeline, black_box(layout), &theme, &config, &render);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let theme = Theme::modern();
    let config = bench_config();
    let render = RenderConfig::default();
    for (name, source) in datasets() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &source, |b, data| {
            b.iter(|| {
                let timeline = parse_timeline(black_box(data)).expect("parse failed");
                let layout = compute_layout(&timeline, &theme, &config);
                let svg = render_svg(&timeline, &layout, &theme, &config, &render);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_layout,
    bench_render,
    bench_end_to_end
);
criterion_main!(benches);
