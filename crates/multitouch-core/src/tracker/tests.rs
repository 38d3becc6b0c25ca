use super::*;
use crate::dispatch::gesture_callback;
use crate::geometry::Point;
use crate::input::Contact;
use crate::target::fixtures::El;
use std::cell::RefCell;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<GestureEvent<El>>>>;

fn recorder() -> (Log, GestureCallback<El>) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    (log, gesture_callback(move |event| sink.borrow_mut().push(event.clone())))
}

fn map() -> El {
    El::new(&["#map", "body"])
}

fn button() -> El {
    El::new(&[".btn", "body"])
}

fn touch(phase: PointerPhase, target: &El, id: i64, x: f32, y: f32) -> PointerInput<El> {
    PointerInput::touch(
        phase,
        Some(target.clone()),
        [Contact::new(PointerId(id), Point::new(x, y))],
    )
}

fn mouse(phase: PointerPhase, target: &El, x: f32, y: f32) -> PointerInput<El> {
    PointerInput::mouse(phase, Some(target.clone()), Point::new(x, y))
}

fn tracker() -> GestureTracker<El> {
    GestureTracker::new(GestureConfig::default()).expect("default config is valid")
}

fn feed(tracker: &mut GestureTracker<El>, input: PointerInput<El>) {
    let mut out = GestureDispatcher::new();
    tracker.handle(&input, &mut out);
    out.deliver();
}

#[test]
fn tap_fires_once_for_a_still_pointer() {
    let mut tracker = tracker();
    let (log, callback) = recorder();
    tracker.add_tap(".btn", callback);

    feed(&mut tracker, touch(PointerPhase::Start, &button(), 1, 10.0, 10.0));
    feed(&mut tracker, touch(PointerPhase::Move, &button(), 1, 15.0, 12.0));
    feed(&mut tracker, touch(PointerPhase::End, &button(), 1, 15.0, 12.0));
    feed(&mut tracker, touch(PointerPhase::End, &button(), 1, 15.0, 12.0));

    let log = log.borrow();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].kind, GestureEventKind::Tap);
    assert_eq!(log[0].target, button());
    assert_eq!(log[0].delta, None);
    assert!(tracker.is_idle());
}

#[test]
fn tap_is_cancelled_by_movement_even_after_returning() {
    let mut tracker = tracker();
    let (log, callback) = recorder();
    tracker.add_tap(".btn", callback);

    feed(&mut tracker, touch(PointerPhase::Start, &button(), 1, 10.0, 10.0));
    feed(&mut tracker, touch(PointerPhase::Move, &button(), 1, 10.0, 31.0));
    assert!(!tracker.records(PointerId(1))[0].is_valid());
    feed(&mut tracker, touch(PointerPhase::End, &button(), 1, 10.0, 10.0));

    assert!(log.borrow().is_empty());
}

#[test]
fn tap_requires_ending_over_the_same_target() {
    let mut tracker = tracker();
    let (log, callback) = recorder();
    tracker.add_tap(".btn", callback);

    feed(&mut tracker, touch(PointerPhase::Start, &button(), 1, 10.0, 10.0));
    feed(&mut tracker, mouse(PointerPhase::End, &map(), 10.0, 10.0));
    feed(&mut tracker, touch(PointerPhase::End, &map(), 1, 10.0, 10.0));

    assert!(log.borrow().is_empty());
    assert!(tracker.is_idle());
}

#[test]
fn scroll_activation_has_hysteresis() {
    let mut tracker = tracker();
    let (log, callback) = recorder();
    tracker.add_scroll("#map", callback);

    feed(&mut tracker, touch(PointerPhase::Start, &map(), 3, 100.0, 100.0));
    feed(&mut tracker, touch(PointerPhase::Move, &map(), 3, 119.0, 100.0));
    assert!(!tracker.records(PointerId(3))[0].is_valid());

    feed(&mut tracker, touch(PointerPhase::Move, &map(), 3, 120.0, 100.0));
    assert!(!tracker.records(PointerId(3))[0].is_valid());

    feed(&mut tracker, touch(PointerPhase::Move, &map(), 3, 121.0, 104.0));
    assert!(tracker.records(PointerId(3))[0].is_valid());
    assert!(log.borrow().is_empty());

    feed(&mut tracker, touch(PointerPhase::Move, &map(), 3, 126.0, 101.0));
    let log = log.borrow();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].kind, GestureEventKind::Scroll);
    assert_eq!(log[0].delta, Some(Point::new(5.0, -3.0)));
}

#[test]
fn concrete_scroll_then_cancel_scenario() {
    let mut tracker = tracker();
    let (log, callback) = recorder();
    tracker.add_scroll("#map", callback);

    feed(&mut tracker, touch(PointerPhase::Start, &map(), 7, 100.0, 100.0));
    feed(&mut tracker, touch(PointerPhase::Move, &map(), 7, 135.0, 100.0));
    assert!(log.borrow().is_empty());
    feed(&mut tracker, touch(PointerPhase::Move, &map(), 7, 150.0, 100.0));
    feed(&mut tracker, touch(PointerPhase::Cancel, &map(), 7, 150.0, 100.0));

    let log = log.borrow();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].kind, GestureEventKind::Scroll);
    assert_eq!(log[0].delta, Some(Point::new(15.0, 0.0)));
    assert_eq!(log[1].kind, GestureEventKind::ScrollCancel);
    assert_eq!(log[1].delta, Some(Point::new(50.0, 0.0)));
    assert_eq!(log[1].position, Point::new(100.0, 100.0));
    assert!(!tracker.is_tracking(PointerId(7)));
}

#[test]
fn scroll_end_is_silent() {
    let mut tracker = tracker();
    let (log, callback) = recorder();
    tracker.add_scroll("#map", callback);

    feed(&mut tracker, touch(PointerPhase::Start, &map(), 1, 0.0, 0.0));
    feed(&mut tracker, touch(PointerPhase::Move, &map(), 1, 30.0, 0.0));
    feed(&mut tracker, touch(PointerPhase::Move, &map(), 1, 40.0, 0.0));
    feed(&mut tracker, touch(PointerPhase::End, &map(), 1, 40.0, 0.0));

    assert_eq!(log.borrow().len(), 1);
    assert!(tracker.is_idle());
}

#[test]
fn touch_ceiling_rebaselines_without_emitting() {
    let config = GestureConfig::new(20.0, 30.0, false);
    let mut tracker = GestureTracker::new(config).expect("valid config");
    let (log, callback) = recorder();
    tracker.add_scroll("#map", callback);

    feed(&mut tracker, touch(PointerPhase::Start, &map(), 1, 0.0, 0.0));
    feed(&mut tracker, touch(PointerPhase::Move, &map(), 1, 25.0, 0.0));
    feed(&mut tracker, touch(PointerPhase::Move, &map(), 1, 29.0, 0.0));
    feed(&mut tracker, touch(PointerPhase::Move, &map(), 1, 60.0, 0.0));
    assert_eq!(tracker.records(PointerId(1))[0].last_emitted(), Point::new(60.0, 0.0));
    feed(&mut tracker, touch(PointerPhase::Move, &map(), 1, 20.0, 0.0));

    let deltas: Vec<_> = log.borrow().iter().map(|event| event.delta).collect();
    assert_eq!(
        deltas,
        vec![Some(Point::new(4.0, 0.0)), Some(Point::new(-40.0, 0.0))]
    );
}

#[test]
fn mouse_scroll_ignores_the_ceiling_and_target_changes() {
    let config = GestureConfig::new(20.0, 30.0, false);
    let mut tracker = GestureTracker::new(config).expect("valid config");
    let (log, callback) = recorder();
    tracker.add_scroll("#map", callback);

    feed(&mut tracker, mouse(PointerPhase::Start, &map(), 0.0, 0.0));
    feed(&mut tracker, mouse(PointerPhase::Move, &button(), 25.0, 0.0));
    feed(&mut tracker, mouse(PointerPhase::Move, &button(), 100.0, 0.0));

    let log = log.borrow();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].pointer, PointerId::MOUSE);
    assert_eq!(log[0].source, PointerSource::Mouse);
    assert_eq!(log[0].delta, Some(Point::new(75.0, 0.0)));
}

#[test]
fn touch_move_is_gated_by_target_revalidation() {
    let mut tracker = tracker();
    let (log, callback) = recorder();
    tracker.add_scroll("#map", callback);

    feed(&mut tracker, touch(PointerPhase::Start, &map(), 1, 0.0, 0.0));
    feed(&mut tracker, touch(PointerPhase::Move, &button(), 1, 50.0, 0.0));
    assert!(!tracker.records(PointerId(1))[0].is_valid());
    feed(&mut tracker, touch(PointerPhase::Move, &map(), 1, 50.0, 0.0));
    feed(&mut tracker, touch(PointerPhase::Move, &button(), 1, 70.0, 0.0));

    assert!(log.borrow().is_empty());
    assert!(tracker.records(PointerId(1))[0].is_valid());
}

#[test]
fn concurrent_pointers_are_independent() {
    let mut tracker = tracker();
    let (map_log, map_callback) = recorder();
    let (tap_log, tap_callback) = recorder();
    tracker.add_scroll("#map", map_callback);
    tracker.add_tap(".btn", tap_callback);

    feed(&mut tracker, touch(PointerPhase::Start, &map(), 0, 0.0, 0.0));
    feed(&mut tracker, touch(PointerPhase::Start, &button(), 1, 500.0, 500.0));
    feed(&mut tracker, touch(PointerPhase::Move, &map(), 0, 30.0, 0.0));
    feed(&mut tracker, touch(PointerPhase::Move, &button(), 1, 502.0, 500.0));
    feed(&mut tracker, touch(PointerPhase::Move, &map(), 0, 40.0, 0.0));
    feed(&mut tracker, touch(PointerPhase::End, &button(), 1, 502.0, 500.0));
    feed(&mut tracker, touch(PointerPhase::Move, &map(), 0, 45.0, 0.0));

    assert_eq!(tap_log.borrow().len(), 1);
    assert_eq!(tap_log.borrow()[0].pointer, PointerId(1));
    let map_log = map_log.borrow();
    assert_eq!(map_log.len(), 2);
    assert!(map_log.iter().all(|event| event.pointer == PointerId(0)));
    assert_eq!(tracker.tracked_pointer_count(), 1);
}

#[test]
fn one_event_can_carry_several_contacts() {
    let mut tracker = tracker();
    let (log, callback) = recorder();
    tracker.add_tap(".btn", callback);

    let contacts = [
        Contact::new(PointerId(4), Point::new(1.0, 1.0)),
        Contact::new(PointerId(5), Point::new(2.0, 2.0)),
    ];
    feed(
        &mut tracker,
        PointerInput::touch(PointerPhase::Start, Some(button()), contacts),
    );
    assert_eq!(tracker.tracked_pointer_count(), 2);
    feed(
        &mut tracker,
        PointerInput::touch(PointerPhase::End, Some(button()), contacts),
    );

    let pointers: Vec<_> = log.borrow().iter().map(|event| event.pointer).collect();
    assert_eq!(pointers, vec![PointerId(4), PointerId(5)]);
}

#[test]
fn cancel_is_terminal_and_silent_for_taps() {
    let mut tracker = tracker();
    let (log, callback) = recorder();
    tracker.add_tap(".btn", callback);

    feed(&mut tracker, touch(PointerPhase::Start, &button(), 2, 0.0, 0.0));
    feed(&mut tracker, touch(PointerPhase::Cancel, &button(), 2, 0.0, 0.0));
    feed(&mut tracker, touch(PointerPhase::Move, &button(), 2, 1.0, 0.0));
    feed(&mut tracker, touch(PointerPhase::End, &button(), 2, 1.0, 0.0));

    assert!(log.borrow().is_empty());
    assert!(tracker.is_idle());
}

#[test]
fn repeated_start_rearms_existing_record() {
    let mut tracker = tracker();
    let (log, callback) = recorder();
    tracker.add_scroll("#map", callback.clone());
    tracker.add_tap("#map", callback);

    feed(&mut tracker, touch(PointerPhase::Start, &map(), 1, 0.0, 0.0));
    feed(&mut tracker, touch(PointerPhase::Move, &map(), 1, 30.0, 0.0));
    let records = tracker.records(PointerId(1));
    assert!(records.iter().all(|record| record.kind() == GestureKind::Scroll || !record.is_valid()));

    feed(&mut tracker, touch(PointerPhase::Start, &map(), 1, 30.0, 0.0));
    let records = tracker.records(PointerId(1));
    assert_eq!(records.len(), 2);
    for record in records {
        match record.kind() {
            GestureKind::Scroll => assert!(!record.is_valid()),
            GestureKind::Tap => assert!(record.is_valid()),
        }
        assert_eq!(record.origin().position, Point::ZERO);
    }
    assert!(log.borrow().is_empty());
}

#[test]
fn one_record_per_pointer_kind_and_target() {
    let mut tracker = tracker();
    let (first_log, first) = recorder();
    let (second_log, second) = recorder();
    tracker.add_tap(".btn", first);
    tracker.add_tap(".btn", second);

    feed(&mut tracker, touch(PointerPhase::Start, &button(), 1, 0.0, 0.0));
    assert_eq!(tracker.record_count(), 1);
    feed(&mut tracker, touch(PointerPhase::End, &button(), 1, 0.0, 0.0));

    assert_eq!(first_log.borrow().len(), 1);
    assert!(second_log.borrow().is_empty());
}

#[test]
fn nested_bindings_each_get_a_record() {
    let mut tracker = tracker();
    let (log, callback) = recorder();
    tracker.add_tap(".btn", callback.clone());
    tracker.add_tap("body", callback);

    feed(&mut tracker, touch(PointerPhase::Start, &button(), 1, 0.0, 0.0));
    feed(&mut tracker, touch(PointerPhase::End, &button(), 1, 0.0, 0.0));

    let targets: Vec<_> = log.borrow().iter().map(|event| event.target.clone()).collect();
    assert_eq!(targets, vec![button(), El::new(&["body"])]);
}

#[test]
fn unknown_pointers_and_missing_targets_are_ignored() {
    let mut tracker = tracker();
    let (log, callback) = recorder();
    tracker.add_scroll("#map", callback);

    feed(&mut tracker, touch(PointerPhase::Move, &map(), 9, 50.0, 0.0));
    feed(&mut tracker, touch(PointerPhase::End, &map(), 9, 50.0, 0.0));
    feed(&mut tracker, touch(PointerPhase::Cancel, &map(), 9, 50.0, 0.0));
    feed(
        &mut tracker,
        PointerInput::touch(
            PointerPhase::Start,
            None,
            [Contact::new(PointerId(9), Point::ZERO)],
        ),
    );
    feed(&mut tracker, touch(PointerPhase::Start, &El::new(&["p", "body"]), 9, 0.0, 0.0));

    assert!(log.borrow().is_empty());
    assert!(tracker.is_idle());
}

#[test]
fn touch_only_drops_mouse_input() {
    let config = GestureConfig::default().with_touch_only(true);
    let mut tracker = GestureTracker::new(config).expect("valid config");
    let (log, callback) = recorder();
    tracker.add_tap(".btn", callback);

    feed(&mut tracker, mouse(PointerPhase::Start, &button(), 0.0, 0.0));
    assert!(tracker.is_idle());
    feed(&mut tracker, mouse(PointerPhase::End, &button(), 0.0, 0.0));

    assert!(log.borrow().is_empty());
}

#[test]
fn cancelling_an_unarmed_scroll_still_reports_it() {
    let mut tracker = tracker();
    let (log, callback) = recorder();
    tracker.add_scroll("#map", callback);

    feed(&mut tracker, touch(PointerPhase::Start, &map(), 4, 10.0, 10.0));
    feed(&mut tracker, touch(PointerPhase::Move, &map(), 4, 13.0, 10.0));
    assert!(!tracker.records(PointerId(4))[0].is_valid());
    feed(&mut tracker, touch(PointerPhase::Cancel, &map(), 4, 13.0, 10.0));

    let log = log.borrow();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].kind, GestureEventKind::ScrollCancel);
    assert_eq!(log[0].delta, Some(Point::new(3.0, 0.0)));
    assert!(tracker.is_idle());
}

#[test]
fn press_held_past_the_stale_timeout_is_evicted() {
    let config = GestureConfig::default().with_stale_after(Duration::from_millis(500));
    let mut tracker = GestureTracker::new(config).expect("valid config");
    let (log, callback) = recorder();
    tracker.add_tap(".btn", callback);

    feed(&mut tracker, touch(PointerPhase::Start, &button(), 1, 0.0, 0.0));
    feed(
        &mut tracker,
        touch(PointerPhase::End, &button(), 1, 0.0, 0.0).at(Duration::from_millis(800)),
    );
    assert!(log.borrow().is_empty());

    feed(
        &mut tracker,
        touch(PointerPhase::Start, &button(), 2, 0.0, 0.0).at(Duration::from_millis(900)),
    );
    feed(
        &mut tracker,
        touch(PointerPhase::End, &button(), 2, 0.0, 0.0).at(Duration::from_millis(1300)),
    );
    assert_eq!(log.borrow().len(), 1);
    assert_eq!(log.borrow()[0].pointer, PointerId(2));
}

#[test]
fn stale_records_are_evicted_on_the_next_event() {
    let config = GestureConfig::default().with_stale_after(Duration::from_secs(5));
    let mut tracker = GestureTracker::new(config).expect("valid config");
    let (log, callback) = recorder();
    tracker.add_tap(".btn", callback);

    feed(
        &mut tracker,
        touch(PointerPhase::Start, &button(), 1, 0.0, 0.0).at(Duration::from_secs(1)),
    );
    feed(
        &mut tracker,
        touch(PointerPhase::Start, &button(), 2, 0.0, 0.0).at(Duration::from_secs(4)),
    );
    feed(
        &mut tracker,
        touch(PointerPhase::Move, &button(), 2, 1.0, 0.0).at(Duration::from_secs(7)),
    );

    assert!(!tracker.is_tracking(PointerId(1)));
    assert!(tracker.is_tracking(PointerId(2)));
    feed(
        &mut tracker,
        touch(PointerPhase::End, &button(), 1, 0.0, 0.0).at(Duration::from_secs(8)),
    );
    assert!(log.borrow().is_empty());
    assert_eq!(tracker.evict_stale(Duration::from_secs(20)), 1);
    assert!(tracker.is_idle());
}

#[test]
fn evict_stale_is_a_no_op_without_a_timeout() {
    let mut tracker = tracker();
    tracker.add_tap(".btn", gesture_callback(|_| {}));
    feed(&mut tracker, touch(PointerPhase::Start, &button(), 1, 0.0, 0.0));

    assert_eq!(tracker.evict_stale(Duration::from_secs(3600)), 0);
    assert!(tracker.is_tracking(PointerId(1)));
}

#[test]
fn wheel_scrolls_bound_regions_when_enabled() {
    let config = GestureConfig::default().with_wheel_scroll(true);
    let mut tracker = GestureTracker::new(config).expect("valid config");
    let (log, callback) = recorder();
    let (other_log, other) = recorder();
    tracker.add_scroll("#map", callback.clone());
    tracker.add_scroll("#map", other);
    tracker.add_scroll("body", callback.clone());
    tracker.add_tap("#map", callback);

    let mut out = GestureDispatcher::new();
    let wheel = WheelInput::new(Some(map()), Point::new(5.0, 5.0), Point::new(0.0, -120.0));
    tracker.handle_wheel(&wheel, &mut out);
    out.deliver();

    let log = log.borrow();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].kind, GestureEventKind::Scroll);
    assert_eq!(log[0].target, map());
    assert_eq!(log[0].delta, Some(Point::new(0.0, -120.0)));
    assert_eq!(log[1].target, El::new(&["body"]));
    assert_eq!(other_log.borrow().len(), 1);
    assert!(tracker.is_idle());
}

#[test]
fn wheel_is_ignored_by_default() {
    let mut tracker = tracker();
    let (log, callback) = recorder();
    tracker.add_scroll("#map", callback);

    let mut out = GestureDispatcher::new();
    tracker.handle_wheel(
        &WheelInput::new(Some(map()), Point::ZERO, Point::new(0.0, 10.0)),
        &mut out,
    );

    assert!(out.is_empty());
    assert!(log.borrow().is_empty());
}

#[test]
fn invalid_config_is_rejected() {
    let result = GestureTracker::<El>::new(GestureConfig::new(30.0, 10.0, false));
    assert!(result.is_err());
}
