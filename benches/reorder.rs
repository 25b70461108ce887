use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use evalview::browse::{Paginator, reorder};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn bench_reorder(c: &mut Criterion) {
    let mut group = c.benchmark_group("reorder");
    for len in [400usize, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter_batched(
                || (0..len).collect::<Vec<_>>(),
                |items| reorder(items, &mut rng),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_paging(c: &mut Criterion) {
    let order: Vec<usize> = (0..10_000).collect();
    c.bench_function("page_walk_10k", |b| {
        b.iter(|| {
            let mut paginator = Paginator::new(10);
            paginator.reset(order.len());
            let mut seen = 0;
            loop {
                seen += paginator.page_slice(&order).items.len();
                if !paginator.next_page() {
                    break;
                }
            }
            seen
        })
    });
}

criterion_group!(benches, bench_reorder, bench_paging);
criterion_main!(benches);
