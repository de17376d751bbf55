use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use rust_decimal::Decimal;
use yanstore_core::{CategoryId, InstanceId, ProductId};
use yanstore_inventory::{
    InstanceStatus, InventoryInstance, ListViewEngine, Location, ProductSnapshot, SortKey,
};

const NAMES: &[&str] = &["Deckbox", "Playmat", "Sleeves", "Lockbox", "Binder", "Dice tray"];

fn collection(size: usize) -> Vec<InventoryInstance> {
    (0..size)
        .map(|n| InventoryInstance {
            instance_id: InstanceId::new(n as i64),
            product_id: ProductId::new((n / 4) as i64),
            base_cost: Decimal::new((n % 997) as i64 * 25, 2),
            location: if n % 3 == 0 { Location::Colombia } else { Location::Usa },
            status: InstanceStatus::Available,
            product: ProductSnapshot {
                name: format!("{} {}", NAMES[n % NAMES.len()], n),
                sku: format!("SKU-{:06}", size - n),
                condition: "Near Mint".to_string(),
                category_id: CategoryId::new((n % 7) as i64),
                description: (n % 5 != 0).then(|| "sealed".to_string()),
            },
        })
        .collect()
}

fn bench_refresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_view_refresh");

    for size in [100usize, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("set_all_instances", size), size, |b, &size| {
            let items = collection(size);
            let mut engine = ListViewEngine::new();
            b.iter(|| engine.set_all_instances(black_box(items.clone())));
        });
    }

    group.finish();
}

fn bench_filter_sort_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_view_filter_sort_page");

    for size in [1_000usize, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("name_query", size), size, |b, &size| {
            let mut engine = ListViewEngine::new();
            engine.set_all_instances(collection(size));
            engine.set_sort(SortKey::Sku);
            b.iter(|| {
                engine.set_name_query(black_box("box"));
                black_box(engine.page_instances().len());
                engine.set_name_query("");
            });
        });

        group.bench_with_input(BenchmarkId::new("sort_toggle", size), size, |b, &size| {
            let mut engine = ListViewEngine::new();
            engine.set_all_instances(collection(size));
            b.iter(|| {
                engine.set_sort(black_box(SortKey::Description));
                black_box(engine.page_instances().len());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_refresh, bench_filter_sort_page);
criterion_main!(benches);
