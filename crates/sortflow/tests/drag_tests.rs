//! End-to-end drag scenarios against an in-memory host.

use std::time::Duration;

use sortflow::{
    ContainerId, Decision, DragController, ItemId, MoveEvent, MoveVerdict, Side, SortError, SortableOptions,
};
use sortflow_core::geometry::{Orientation, Rect, Size};
use sortflow_core::math::vec2;
use sortflow_test_utils::{MockHost, item_ids};

const ITEM: Size = Size::new(100.0, 40.0);

fn list() -> ContainerId {
    ContainerId::new("list")
}

fn other() -> ContainerId {
    ContainerId::new("other")
}

/// Three items in a row: 0..100, 100..200, 200..300.
fn row_host() -> MockHost {
    MockHost::new().with_container(
        list(),
        Rect::new(0.0, 0.0, 300.0, 40.0),
        Orientation::Horizontal,
        ITEM,
        &item_ids(3),
    )
}

/// The row above plus a second row at y=100 holding items 4 and 5.
fn two_row_host() -> MockHost {
    row_host().with_container(
        other(),
        Rect::new(0.0, 100.0, 300.0, 40.0),
        Orientation::Horizontal,
        ITEM,
        &[ItemId::from_raw(4), ItemId::from_raw(5)],
    )
}

fn abc() -> (ItemId, ItemId, ItemId) {
    (ItemId::from_raw(1), ItemId::from_raw(2), ItemId::from_raw(3))
}

fn controller(options: SortableOptions) -> DragController {
    let mut controller = DragController::new();
    controller.register(list(), options).unwrap();
    controller
}

#[test]
fn test_drag_first_to_last() {
    let mut host = row_host();
    let (a, b, c) = abc();
    let mut controller = controller(SortableOptions::new());

    controller.start_drag(&host, list(), a, vec2(50.0, 20.0)).unwrap();
    let decision = controller.drag_over(&mut host, list(), vec2(250.0, 20.0), Some(c)).unwrap();

    assert_eq!(decision, Decision::InsertAfter(c));
    assert_eq!(host.order(list()), vec![b, c, a]);

    let dropped = controller.drop(&host).unwrap();
    assert_eq!(dropped.item, a);
    assert_eq!(dropped.from, list());
    assert_eq!(dropped.to, list());
    assert_eq!(dropped.old_index, 0);
    assert_eq!(dropped.new_index, 2);
    assert!(dropped.moved());
    assert!(!controller.is_dragging());
}

#[test]
fn test_swap_animates_displaced_items() {
    let mut host = row_host();
    let (a, b, c) = abc();
    let mut controller = controller(SortableOptions::new().animation_ms(100.0));

    controller.start_drag(&host, list(), a, vec2(50.0, 20.0)).unwrap();
    controller.drag_over(&mut host, list(), vec2(150.0, 20.0), Some(b)).unwrap();

    assert_eq!(host.order(list()), vec![b, a, c]);
    let transitions = host.transitions();
    assert_eq!(transitions.len(), 2);
    assert!(transitions.contains(&(a, vec2(-100.0, 0.0), Duration::from_millis(100))));
    assert!(transitions.contains(&(b, vec2(100.0, 0.0), Duration::from_millis(100))));
}

#[test]
fn test_swap_target_locked_until_animation_completes() {
    let mut host = row_host();
    let (a, b, _) = abc();
    let mut controller = controller(SortableOptions::new().animation_ms(100.0));

    controller.start_drag(&host, list(), a, vec2(50.0, 20.0)).unwrap();
    controller.drag_over(&mut host, list(), vec2(150.0, 20.0), Some(b)).unwrap();
    assert_eq!(controller.list(list()).unwrap().ignore_while_animating(), Some(b));

    // B now sits at 0..100; hovering it again does nothing while it slides.
    let decision = controller.drag_over(&mut host, list(), vec2(50.0, 20.0), Some(b)).unwrap();
    assert_eq!(decision, Decision::None);

    host.tick(Duration::from_millis(100));
    let dispatched = controller.tick(Duration::from_millis(100));
    // Two expiries and the completion.
    assert_eq!(dispatched, 3);
    assert_eq!(controller.list(list()).unwrap().ignore_while_animating(), None);

    let decision = controller.drag_over(&mut host, list(), vec2(50.0, 20.0), Some(b)).unwrap();
    assert_eq!(decision, Decision::InsertBefore(b));
    assert_eq!(host.order(list())[0], a);
}

#[test]
fn test_superseding_cycle_releases_swap_lock() {
    let mut host = row_host();
    let (a, b, _) = abc();
    let mut controller = controller(SortableOptions::new().animation_ms(100.0));

    controller.start_drag(&host, list(), a, vec2(50.0, 20.0)).unwrap();
    controller.drag_over(&mut host, list(), vec2(150.0, 20.0), Some(b)).unwrap();
    assert_eq!(controller.list(list()).unwrap().ignore_while_animating(), Some(b));

    // Nothing moved, so this cycle completes at once and replaces the pending one.
    controller.capture_animation_state(&host, list()).unwrap();
    let summary = controller.animate_all(&mut host, list(), None).unwrap();
    assert_eq!(summary.scheduled, 0);
    assert!(summary.completed);
    assert_eq!(controller.list(list()).unwrap().ignore_while_animating(), None);

    host.tick(Duration::from_secs(5));
    controller.tick(Duration::from_secs(5));
    assert_eq!(controller.list(list()).unwrap().ignore_while_animating(), None);

    let decision = controller.drag_over(&mut host, list(), vec2(50.0, 20.0), Some(b)).unwrap();
    assert_eq!(decision, Decision::InsertBefore(b));
}

#[test]
fn test_wide_target_shadow_holds_until_first_invert() {
    let (a, b, c) = abc();
    // A: 0..50, B: 50..200, C: 200..300.
    let mut host = row_host()
        .with_item_size(a, Size::new(50.0, 40.0))
        .with_item_size(b, Size::new(150.0, 40.0));
    let mut controller = controller(SortableOptions::new().inverted_swap_threshold(0.2));

    controller.start_drag(&host, list(), a, vec2(25.0, 20.0)).unwrap();
    let decision = controller.drag_over(&mut host, list(), vec2(125.0, 20.0), Some(b)).unwrap();
    assert_eq!(decision, Decision::InsertAfter(b));
    assert_eq!(host.order(list()), vec![b, a, c]);

    // B slid from 50 to 0, a third of its span.
    let hysteresis = controller.session().unwrap().hysteresis();
    assert_eq!(hysteresis.last_target, Some(b));
    assert_eq!(hysteresis.last_direction, Some(Side::After));
    assert_eq!(hysteresis.target_move_distance, 50.0);

    host.tick(Duration::from_secs(1));
    controller.tick(Duration::from_secs(1));
    assert_eq!(controller.list(list()).unwrap().ignore_while_animating(), None);

    // B now spans 0..150. Its leading edge would commit a swap back, but it
    // lies in the shadow of the last swap.
    let decision = controller.drag_over(&mut host, list(), vec2(10.0, 20.0), Some(b)).unwrap();
    assert_eq!(decision, Decision::None);
    assert!(!controller.session().unwrap().hysteresis().past_first_invert_threshold);

    // Past the first invert threshold, but between the edge zones.
    let decision = controller.drag_over(&mut host, list(), vec2(60.0, 20.0), Some(b)).unwrap();
    assert_eq!(decision, Decision::None);
    assert!(controller.session().unwrap().hysteresis().past_first_invert_threshold);

    // Edge zones are live from here on.
    let decision = controller.drag_over(&mut host, list(), vec2(10.0, 20.0), Some(b)).unwrap();
    assert_eq!(decision, Decision::InsertBefore(b));
    assert_eq!(host.order(list()), vec![a, b, c]);
}

#[test]
fn test_invert_swap_edge_zone() {
    let host = row_host();
    let (a, b, _) = abc();
    // B spans 100..200; x=195 is inside its rightmost 10%.
    let pointer = vec2(195.0, 20.0);

    let mut inverted = controller(SortableOptions::new().invert_swap(true).inverted_swap_threshold(0.2));
    inverted.start_drag(&host, list(), a, vec2(50.0, 20.0)).unwrap();
    assert_eq!(
        inverted.evaluate(&host, list(), pointer, Some(b)).unwrap(),
        Decision::InsertAfter(b)
    );

    let mut regular = controller(SortableOptions::new().swap_threshold(0.5));
    regular.start_drag(&host, list(), a, vec2(50.0, 20.0)).unwrap();
    assert_eq!(regular.evaluate(&host, list(), pointer, Some(b)).unwrap(), Decision::None);
}

#[test]
fn test_evaluate_is_idempotent() {
    let host = row_host();
    let (a, _, c) = abc();
    let mut controller = controller(SortableOptions::new().swap_threshold(0.5));
    controller.start_drag(&host, list(), a, vec2(50.0, 20.0)).unwrap();

    let pointer = vec2(240.0, 20.0);
    let first = controller.evaluate(&host, list(), pointer, Some(c)).unwrap();
    let second = controller.evaluate(&host, list(), pointer, Some(c)).unwrap();

    assert_eq!(first, Decision::InsertAfter(c));
    assert_eq!(first, second);
    assert_eq!(host.count_inserts(), 0);
}

#[test]
fn test_pointer_past_last_inserts_at_end() {
    let mut host = row_host();
    let (a, b, c) = abc();
    let mut controller = controller(SortableOptions::new());

    controller.start_drag(&host, list(), b, vec2(150.0, 20.0)).unwrap();
    let decision = controller.drag_over(&mut host, list(), vec2(320.0, 20.0), None).unwrap();

    assert_eq!(decision, Decision::InsertAtEnd);
    assert_eq!(host.order(list()), vec![a, c, b]);

    let events = host.move_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].related, Some(c));
    assert!(events[0].will_insert_after);
}

#[test]
fn test_pointer_within_threshold_of_last_does_not_insert() {
    let mut host = row_host();
    let (_, b, _) = abc();
    let mut controller = controller(SortableOptions::new());

    controller.start_drag(&host, list(), b, vec2(150.0, 20.0)).unwrap();
    let decision = controller.drag_over(&mut host, list(), vec2(303.0, 20.0), None).unwrap();

    assert_eq!(decision, Decision::None);
    assert_eq!(host.count_inserts(), 0);
}

#[test]
fn test_pointer_before_first_inserts_at_start() {
    let mut host = row_host();
    let (a, b, c) = abc();
    let mut controller = controller(SortableOptions::new());

    controller.start_drag(&host, list(), c, vec2(250.0, 20.0)).unwrap();
    let decision = controller.drag_over(&mut host, list(), vec2(-20.0, 20.0), None).unwrap();

    assert_eq!(decision, Decision::InsertAtStart);
    assert_eq!(host.order(list()), vec![c, a, b]);
}

#[test]
fn test_move_hook_veto() {
    let mut host = row_host().with_move_hook(|_: &MoveEvent| MoveVerdict::Veto);
    let (a, b, c) = abc();
    let mut controller = controller(SortableOptions::new());

    controller.start_drag(&host, list(), a, vec2(50.0, 20.0)).unwrap();
    let decision = controller.drag_over(&mut host, list(), vec2(250.0, 20.0), Some(c)).unwrap();

    assert_eq!(decision, Decision::None);
    assert_eq!(host.order(list()), vec![a, b, c]);
    assert_eq!(host.count_inserts(), 0);
    assert_eq!(host.count_transitions(), 0);

    let events = host.move_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].dragged, a);
    assert_eq!(events[0].related, Some(c));
    assert_eq!(events[0].related_rect, Some(Rect::new(200.0, 0.0, 100.0, 40.0)));
}

#[test]
fn test_move_hook_forces_side() {
    let mut host = row_host().with_move_hook(|_: &MoveEvent| MoveVerdict::ForceBefore);
    let (a, b, c) = abc();
    let mut controller = controller(SortableOptions::new());

    controller.start_drag(&host, list(), a, vec2(50.0, 20.0)).unwrap();
    let decision = controller.drag_over(&mut host, list(), vec2(250.0, 20.0), Some(c)).unwrap();

    assert_eq!(decision, Decision::InsertBefore(c));
    assert_eq!(host.order(list()), vec![b, a, c]);
}

#[test]
fn test_target_outside_container_is_ignored() {
    let mut host = row_host();
    let (a, _, _) = abc();
    let mut controller = controller(SortableOptions::new());

    controller.start_drag(&host, list(), a, vec2(50.0, 20.0)).unwrap();
    let decision = controller
        .drag_over(&mut host, list(), vec2(250.0, 20.0), Some(ItemId::from_raw(99)))
        .unwrap();

    assert_eq!(decision, Decision::None);
    assert_eq!(host.count_inserts(), 0);
}

#[test]
fn test_cross_container_move() {
    let mut host = two_row_host();
    let (a, b, c) = abc();
    let mut controller = controller(SortableOptions::new());
    controller.register(other(), SortableOptions::new()).unwrap();

    controller.start_drag(&host, list(), a, vec2(50.0, 20.0)).unwrap();
    // Right half of item 5 (100..200 on the second row).
    let decision = controller
        .drag_over(&mut host, other(), vec2(160.0, 120.0), Some(ItemId::from_raw(5)))
        .unwrap();

    assert_eq!(decision, Decision::InsertAfter(ItemId::from_raw(5)));
    assert_eq!(host.order(list()), vec![b, c]);
    assert_eq!(host.order(other()), vec![ItemId::from_raw(4), ItemId::from_raw(5), a]);
    assert_eq!(controller.session().unwrap().current(), other());

    // The source row closes the gap; the moved item slides in from its old slot.
    let transitions = host.transitions();
    assert_eq!(transitions.len(), 3);
    assert!(transitions.iter().any(|&(item, delta, _)| item == a && delta == vec2(-200.0, -100.0)));
    assert!(
        controller
            .list(list())
            .unwrap()
            .animation()
            .is_animating_both_axes(a)
    );

    let dropped = controller.drop(&host).unwrap();
    assert_eq!((dropped.from, dropped.to), (list(), other()));
    assert_eq!((dropped.old_index, dropped.new_index), (0, 2));
}

#[test]
fn test_drop_into_empty_container() {
    let empty = ContainerId::new("empty");
    let mut host = row_host().with_container(
        empty,
        Rect::new(0.0, 200.0, 300.0, 40.0),
        Orientation::Horizontal,
        ITEM,
        &[],
    );
    let (a, _, _) = abc();
    let mut controller = controller(SortableOptions::new());
    controller.register(empty, SortableOptions::new()).unwrap();
    controller.start_drag(&host, list(), a, vec2(50.0, 20.0)).unwrap();

    assert_eq!(controller.nearest_empty_container(&host, vec2(10.0, 203.0)), Some(empty));
    assert_eq!(controller.nearest_empty_container(&host, vec2(10.0, 400.0)), None);

    let decision = controller.drag_over(&mut host, empty, vec2(10.0, 210.0), None).unwrap();
    assert_eq!(decision, Decision::InsertAtEnd);
    assert_eq!(host.order(empty), vec![a]);
    assert_eq!(controller.nearest_empty_container(&host, vec2(10.0, 210.0)), None);
}

#[test]
fn test_unsortable_list_reverts_on_return() {
    let mut host = two_row_host();
    let (a, b, c) = abc();
    let mut controller = controller(SortableOptions::new().sort(false));
    controller.register(other(), SortableOptions::new()).unwrap();

    controller.start_drag(&host, list(), a, vec2(50.0, 20.0)).unwrap();

    // No reordering within the origin list.
    let decision = controller.drag_over(&mut host, list(), vec2(250.0, 20.0), Some(c)).unwrap();
    assert_eq!(decision, Decision::None);

    controller
        .drag_over(&mut host, other(), vec2(160.0, 120.0), Some(ItemId::from_raw(5)))
        .unwrap();
    assert_eq!(host.order(list()), vec![b, c]);

    // Hovering the origin anywhere puts the item back where it started.
    let decision = controller.drag_over(&mut host, list(), vec2(250.0, 20.0), Some(c)).unwrap();
    assert_eq!(decision, Decision::InsertBefore(b));
    assert_eq!(host.order(list()), vec![a, b, c]);

    let dropped = controller.drop(&host).unwrap();
    assert!(!dropped.moved());
}

#[test]
fn test_cancel_keeps_order_and_animations() {
    let mut host = row_host();
    let (a, b, c) = abc();
    let mut controller = controller(SortableOptions::new().animation_ms(100.0));

    controller.start_drag(&host, list(), a, vec2(50.0, 20.0)).unwrap();
    controller.drag_over(&mut host, list(), vec2(150.0, 20.0), Some(b)).unwrap();

    let session = controller.cancel().unwrap();
    assert_eq!(session.dragged(), a);
    assert!(!controller.is_dragging());
    assert_eq!(host.order(list()), vec![b, a, c]);

    // Transitions outlive the session.
    assert!(controller.list(list()).unwrap().animation().is_animating(a));
    assert_eq!(controller.tick(Duration::from_millis(100)), 3);
    assert!(!controller.list(list()).unwrap().animation().is_animating(a));
}

#[test]
fn test_without_applier_completes_immediately() {
    let mut host = row_host().without_animations();
    let (a, b, _) = abc();
    let mut controller = controller(SortableOptions::new());

    controller.start_drag(&host, list(), a, vec2(50.0, 20.0)).unwrap();
    controller.drag_over(&mut host, list(), vec2(150.0, 20.0), Some(b)).unwrap();

    assert_eq!(host.count_transitions(), 0);
    assert_eq!(controller.list(list()).unwrap().ignore_while_animating(), None);
    assert_eq!(controller.tick(Duration::from_secs(1)), 0);
}

#[test]
fn test_session_errors() {
    let host = row_host();
    let (a, _, _) = abc();
    let mut controller = controller(SortableOptions::new());

    assert!(matches!(
        controller.start_drag(&host, other(), a, vec2(0.0, 0.0)),
        Err(SortError::UnknownContainer(_))
    ));
    assert!(matches!(
        controller.start_drag(&host, list(), ItemId::from_raw(42), vec2(0.0, 0.0)),
        Err(SortError::ItemNotInContainer { .. })
    ));
    assert!(matches!(controller.drop(&host), Err(SortError::NoActiveSession)));

    controller.start_drag(&host, list(), a, vec2(0.0, 0.0)).unwrap();
    assert!(matches!(
        controller.start_drag(&host, list(), a, vec2(0.0, 0.0)),
        Err(SortError::SessionActive(item)) if item == a
    ));
}

#[test]
fn test_disabled_container() {
    let host = row_host();
    let (a, _, _) = abc();
    let mut controller = controller(SortableOptions::new().disabled(true));

    assert!(matches!(
        controller.start_drag(&host, list(), a, vec2(0.0, 0.0)),
        Err(SortError::Disabled(_))
    ));
}

#[test]
fn test_register_rejects_invalid_thresholds() {
    let mut controller = DragController::new();
    let result = controller.register(list(), SortableOptions::new().swap_threshold(0.0));
    assert!(matches!(result, Err(SortError::Config(_))));
    assert!(controller.list(list()).is_none());
}
