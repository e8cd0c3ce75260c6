use criterion::Criterion;
use native_operators::backend::{Backend, CorrectlyRounded, Library};

use bench_util::{bench_inputs, configure_criterion, gen_range};

const IMPLS: [(&str, fn(f64) -> f64); 2] = [
    ("correctly_rounded", CorrectlyRounded::atan),
    ("library", Library::atan),
];

fn bench_atan(c: &mut Criterion) {
    let inputs = [-1e6, -10.0, -1.0, -1e-6, 0.0, 1e-6, 1.0, 10.0, 1e6];
    let mut group = c.benchmark_group("atan/smoke");
    bench_inputs(&mut group, &inputs, &IMPLS, "atan");
    group.finish();

    let inputs = gen_range(4096, -4.0, 4.0, 0x5eed);
    let mut group = c.benchmark_group("atan/uniform");
    bench_inputs(&mut group, &inputs, &IMPLS, "atan");
    group.finish();

    let inputs = gen_range(1024, 1.0e-8, 1.4e-8, 0x7e57);
    let mut group = c.benchmark_group("atan/tiny_threshold");
    bench_inputs(&mut group, &inputs, &IMPLS, "atan");
    group.finish();
}

fn main() {
    let mut c = configure_criterion();
    bench_atan(&mut c);
    c.final_summary();
}
