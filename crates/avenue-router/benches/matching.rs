//! Matching and link benchmarks.
//!
//! Run with: `cargo bench -p avenue-router`

use avenue_pattern::{ParamValue, ParamValues};
use avenue_router::{Router, UrlOptions};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn build_router(num_routes: usize) -> Router {
    let mut router = Router::new();

    for i in 0..num_routes / 3 {
        router
            .add(&format!("/shop/section{i}"), &format!("section{i}"))
            .unwrap();
    }

    for i in 0..num_routes / 3 {
        router
            .add(&format!("/shop/section{i}/:slug"), &format!("item{i}"))
            .unwrap()
            .named(format!("item{i}"));
    }

    for i in 0..num_routes / 3 {
        router
            .add(&format!("/section{i}/:slug"), &format!("tenant{i}"))
            .unwrap()
            .domain(":tenant.shop.local")
            .unwrap();
    }

    router
}

fn bench_literal_match(c: &mut Criterion) {
    let router = build_router(99);

    c.bench_function("literal_match", |b| {
        b.iter(|| black_box(router.match_route("/shop/section20", "shop.local")));
    });
}

fn bench_param_match(c: &mut Criterion) {
    let router = build_router(99);

    c.bench_function("param_match", |b| {
        b.iter(|| black_box(router.match_route("/shop/section20/blue-shirt?ref=home", "shop.local")));
    });
}

fn bench_subdomain_match(c: &mut Criterion) {
    let router = build_router(99);

    c.bench_function("subdomain_match", |b| {
        b.iter(|| black_box(router.match_route("/section20/blue-shirt", "acme.shop.local")));
    });
}

fn bench_miss(c: &mut Criterion) {
    let router = build_router(99);

    c.bench_function("miss", |b| {
        b.iter(|| black_box(router.match_route("/nonexistent/path", "shop.local")));
    });
}

fn bench_link(c: &mut Criterion) {
    let router = build_router(99);
    let params = ParamValues::from([("slug".to_string(), ParamValue::from("blue-shirt"))]);
    let options = UrlOptions::new();

    c.bench_function("link", |b| {
        b.iter(|| black_box(router.link("item20", &params, &options)));
    });
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for size in [30, 150, 600] {
        let router = build_router(size);
        let last = size / 3 - 1;
        let path = format!("/shop/section{last}/blue-shirt");

        group.bench_with_input(BenchmarkId::new("last_param_route", size), &path, |b, path| {
            b.iter(|| black_box(router.match_route(path, "shop.local")));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_literal_match,
    bench_param_match,
    bench_subdomain_match,
    bench_miss,
    bench_link,
    bench_scaling,
);
criterion_main!(benches);
