//! Benchmarks for the reorder decision path.
//!
//! - Pure `evaluate` over rows of growing length
//! - A full `drag_over` cycle against the in-memory host

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sortflow::reorder::{EdgeItem, ReorderQuery, TargetInfo, evaluate};
use sortflow::{ContainerId, DragController, HysteresisState, ItemId, SortableOptions};
use sortflow_core::geometry::{Orientation, Rect, Size};
use sortflow_core::math::vec2;
use sortflow_test_utils::{MockHost, item_ids};

fn row_rects(count: usize) -> (Vec<ItemId>, Vec<Rect>) {
    let items = (0..count as u64).map(ItemId::from_raw).collect();
    let rects = (0..count).map(|i| Rect::new(i as f32 * 100.0, 0.0, 100.0, 40.0)).collect();
    (items, rects)
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("decision/evaluate");
    let options = SortableOptions::new().swap_threshold(0.65);

    for count in [10, 100, 1000] {
        let (items, rects) = row_rects(count);
        let target = count / 2;
        let edge = |i: usize| EdgeItem {
            item: items[i],
            rect: rects[i],
            animating: false,
        };

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            let query = ReorderQuery {
                pointer: vec2(target as f32 * 100.0 + 50.0, 20.0),
                orientation: Orientation::Horizontal,
                options: &options,
                dragged: items[0],
                dragged_rect: rects[0],
                dragged_animating: false,
                dragged_index: Some(0),
                items: &items,
                first: Some(edge(0)),
                last: Some(edge(count - 1)),
                target: Some(TargetInfo {
                    item: items[target],
                    index: target,
                    rect: rects[target],
                    locked: false,
                }),
            };
            let mut state = HysteresisState::new();
            b.iter(|| black_box(evaluate(black_box(&query), &mut state)));
        });
    }

    group.finish();
}

fn bench_drag_over(c: &mut Criterion) {
    let mut group = c.benchmark_group("decision/drag_over");
    let list = ContainerId::new("bench");

    for count in [10u64, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let items = item_ids(count);
            let mut host = MockHost::new().without_animations().with_container(
                list,
                Rect::new(0.0, 0.0, count as f32 * 100.0, 40.0),
                Orientation::Horizontal,
                Size::new(100.0, 40.0),
                &items,
            );
            let mut controller = DragController::new();
            controller.register(list, SortableOptions::new()).unwrap();
            controller.start_drag(&host, list, items[0], vec2(50.0, 20.0)).unwrap();

            // Alternate between the two ends so every iteration reorders.
            let mut forward = true;
            b.iter(|| {
                let (pointer, target) = if forward {
                    (vec2(count as f32 * 100.0 - 50.0, 20.0), items[items.len() - 1])
                } else {
                    (vec2(-20.0, 20.0), items[1])
                };
                forward = !forward;
                let decision = controller.drag_over(&mut host, list, pointer, Some(target)).unwrap();
                host.clear_calls();
                black_box(decision)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_drag_over);
criterion_main!(benches);
