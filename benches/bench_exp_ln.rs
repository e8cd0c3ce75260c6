use criterion::Criterion;
use native_operators::backend::{Backend, CorrectlyRounded, Library};

use bench_util::{bench_inputs, configure_criterion, gen_range};

fn bench_exp(c: &mut Criterion) {
    let impls: [(&str, fn(f64) -> f64); 2] = [
        ("correctly_rounded", CorrectlyRounded::exp),
        ("library", Library::exp),
    ];
    let inputs = gen_range(4096, -700.0, 700.0, 0xe4b);
    let mut group = c.benchmark_group("exp/uniform");
    bench_inputs(&mut group, &inputs, &impls, "exp");
    group.finish();
}

fn bench_ln(c: &mut Criterion) {
    let impls: [(&str, fn(f64) -> f64); 2] = [
        ("correctly_rounded", CorrectlyRounded::ln),
        ("library", Library::ln),
    ];
    let inputs = gen_range(4096, 1e-3, 1e3, 0x1a);
    let mut group = c.benchmark_group("ln/uniform");
    bench_inputs(&mut group, &inputs, &impls, "log");
    group.finish();

    let inputs = gen_range(1024, 0.999, 1.001, 0x1b);
    let mut group = c.benchmark_group("ln/near_one");
    bench_inputs(&mut group, &inputs, &impls, "log");
    group.finish();
}

fn main() {
    let mut c = configure_criterion();
    bench_exp(&mut c);
    bench_ln(&mut c);
    c.final_summary();
}
