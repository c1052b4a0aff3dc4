use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::Utc;
use gearledger_inventory::{ItemFilter, ItemStatus, Ledger, NewItem, RequestForm, to_csv_string};

fn populated_ledger(n: u32) -> Ledger {
    let mut ledger = Ledger::new();
    let now = Utc::now();
    for i in 0..n {
        let form = RequestForm {
            item_name: format!("Item {i}"),
            requested: (i % 7) + 1,
            custodian: format!("Custodian {i}"),
            location: format!("Section {}", i % 5),
            email: format!("user{i}@example.com"),
            ..RequestForm::default()
        };
        let req = ledger.submit_request(form, now).expect("valid form");
        let id = ledger.approve_request(req, now).expect("pending request");
        if i % 3 == 0 {
            ledger.assign(id).expect("received item");
        }
    }
    ledger
}

fn bench_approve(c: &mut Criterion) {
    let mut group = c.benchmark_group("approve_requests");
    for n in [100u32, 1_000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(populated_ledger(n)));
        });
    }
    group.finish();
}

fn bench_reads(c: &mut Criterion) {
    let ledger = populated_ledger(1_000);
    let mut new_items = Ledger::new();
    for i in 0..1_000 {
        new_items
            .add_item(NewItem::new(format!("Item {i}"), 2), Utc::now())
            .expect("valid item");
    }

    c.bench_function("filter_assigned_1000", |b| {
        b.iter(|| black_box(ledger.filter_items(ItemFilter::Status(ItemStatus::Assigned)).len()))
    });
    c.bench_function("status_counts_1000", |b| b.iter(|| black_box(new_items.status_counts())));
    c.bench_function("export_csv_1000", |b| {
        b.iter(|| black_box(to_csv_string(&ledger.export_snapshot()).expect("csv")))
    });
}

criterion_group!(benches, bench_approve, bench_reads);
criterion_main!(benches);
