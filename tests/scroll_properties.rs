//! Property-based tests for the message buffer and scroll state.
//!
//! Drives a session with random sequences of arrivals and wheel events under random
//! (small) capacity limits, and checks the invariants after every step:
//!
//! 1. Length stays below `capacity + evict_batch`, and never exceeds capacity unless the
//!    reader is scrolled past the guard
//! 2. Length only ever shrinks by exactly one eviction batch, and only on arrival
//! 3. No eviction while the offset is at or above the guard, until the hard limit
//! 4. Offset stays within `[0, length]`
//! 5. An anchored arrival without eviction keeps the same record at the bottom
//! 6. A tracking arrival puts the new record at the bottom

use proptest::prelude::*;
use tailchat::model::{AuthorColor, Record};
use tailchat::state::{BufferLimits, Session};

#[derive(Debug, Clone, Copy)]
enum Op {
    Arrive,
    WheelUp,
    WheelDown,
    Resize,
}

// ===== Arbitrary Strategies =====

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        5 => Just(Op::Arrive),
        3 => Just(Op::WheelUp),
        2 => Just(Op::WheelDown),
        1 => Just(Op::Resize),
    ]
}

/// Capacity, batch and guard with the batch inside `1..=capacity`.
fn arb_limits() -> impl Strategy<Value = BufferLimits> {
    (1usize..40)
        .prop_flat_map(|capacity| (Just(capacity), 1..=capacity, 0usize..50))
        .prop_map(|(capacity, batch, guard)| BufferLimits::new(capacity, batch, guard))
}

fn numbered(n: usize) -> Record {
    Record::new("user", AuthorColor::Default, n.to_string())
}

fn anchor_body(session: &Session) -> Option<String> {
    session.view().anchor().map(|r| r.body().to_string())
}

proptest! {
    #[test]
    fn buffer_and_scroll_invariants_hold(
        limits in arb_limits(),
        ops in prop::collection::vec(arb_op(), 1..400)
    ) {
        let session = Session::new(limits);
        let mut next = 0usize;

        for op in ops {
            let len_before = session.buffer().len();
            let offset_before = session.scroll().offset();
            let anchor_before = anchor_body(&session);

            match op {
                Op::Arrive => {
                    session.on_record(numbered(next));
                    next += 1;
                }
                Op::WheelUp => session.wheel_up(),
                Op::WheelDown => session.wheel_down(),
                Op::Resize => session.on_resize(),
            }

            let len = session.buffer().len();
            let offset = session.scroll().offset();

            prop_assert!(len < limits.hard_limit(), "len {} >= hard limit {}", len, limits.hard_limit());
            if len > limits.capacity() {
                prop_assert!(
                    offset_before >= limits.evict_guard() || len <= len_before,
                    "len {} > capacity {} while not guarded",
                    len,
                    limits.capacity()
                );
            }
            prop_assert!(offset <= len, "offset {} > len {}", offset, len);

            match op {
                Op::Arrive => {
                    let evicted = len != len_before + 1;
                    if evicted {
                        prop_assert_eq!(len, len_before + 1 - limits.evict_batch());
                        prop_assert!(
                            offset_before < limits.evict_guard()
                                || len_before + 1 >= limits.hard_limit(),
                            "evicted at offset {} with guard {}",
                            offset_before,
                            limits.evict_guard()
                        );
                    }
                    if offset_before >= limits.evict_guard() && len_before + 1 < limits.hard_limit() {
                        prop_assert_eq!(len, len_before + 1, "guard must defer eviction");
                    }

                    if offset_before == 0 {
                        prop_assert_eq!(offset, 0);
                        // A batch as large as the capacity can empty the buffer.
                        if len > 0 {
                            prop_assert_eq!(anchor_body(&session), Some((next - 1).to_string()));
                        }
                    } else if !evicted {
                        prop_assert_eq!(offset, offset_before + 1);
                        prop_assert_eq!(anchor_body(&session), anchor_before);
                    }
                }
                Op::WheelUp => {
                    prop_assert_eq!(len, len_before);
                    prop_assert_eq!(offset, (offset_before + 1).min(len));
                }
                Op::WheelDown => {
                    prop_assert_eq!(len, len_before);
                    prop_assert_eq!(offset, offset_before.saturating_sub(1));
                }
                Op::Resize => {
                    prop_assert_eq!(len, len_before);
                    prop_assert_eq!(offset, offset_before);
                }
            }
        }
    }
}

proptest! {
    #[test]
    fn tracking_arrivals_never_exceed_capacity(
        limits in arb_limits(),
        arrivals in 0usize..500
    ) {
        let session = Session::new(limits);
        let mut max_len = 0;
        for n in 0..arrivals {
            session.on_record(numbered(n));
            max_len = max_len.max(session.buffer().len());
        }

        // A zero guard defers eviction even at offset 0.
        if limits.evict_guard() > 0 {
            prop_assert!(max_len <= limits.capacity());
        }
        prop_assert!(max_len < limits.hard_limit());
        prop_assert_eq!(session.scroll().offset(), 0);
        if session.buffer().len() > 0 {
            prop_assert_eq!(anchor_body(&session), Some((arrivals - 1).to_string()));
        }
    }
}

proptest! {
    #[test]
    fn retained_records_are_the_newest_in_order(
        limits in arb_limits(),
        arrivals in 1usize..300
    ) {
        let session = Session::new(limits);
        for n in 0..arrivals {
            session.on_record(numbered(n));
        }

        let view = session.view();
        let snapshot = view.snapshot();
        let bodies: Vec<usize> = (0..snapshot.len())
            .map(|i| snapshot.get(i).unwrap().body().parse().unwrap())
            .collect();

        // Contiguous run ending at the newest arrival.
        let first = arrivals - bodies.len();
        prop_assert_eq!(bodies, (first..arrivals).collect::<Vec<_>>());
    }
}

// ===== Concrete scenarios =====

#[test]
fn default_limits_evict_to_4950_on_the_5000th_arrival() {
    let session = Session::new(BufferLimits::default());
    let mut max_len = 0;

    for n in 0..5000 {
        session.on_record(numbered(n));
        max_len = max_len.max(session.buffer().len());
    }

    assert_eq!(session.buffer().len(), 4950);
    assert!(max_len <= 5000);
}

#[test]
fn anchored_at_ten_moves_to_eleven_and_keeps_the_record() {
    let session = Session::new(BufferLimits::default());
    for n in 0..100 {
        session.on_record(numbered(n));
    }
    for _ in 0..10 {
        session.wheel_up();
    }
    assert_eq!(anchor_body(&session).as_deref(), Some("89"));

    session.on_record(numbered(100));

    assert_eq!(session.scroll().offset(), 11);
    assert_eq!(anchor_body(&session).as_deref(), Some("89"));
}

#[test]
fn scrolled_past_guard_grows_to_hard_limit_then_evicts() {
    let limits = BufferLimits::new(5, 1, 2);
    let session = Session::new(limits);
    for n in 0..4 {
        session.on_record(numbered(n));
    }
    session.wheel_up();
    session.wheel_up();

    // At capacity but guarded: no eviction yet.
    session.on_record(numbered(4));
    assert_eq!(session.buffer().len(), 5);

    for n in 5..40 {
        session.on_record(numbered(n));
        assert!(session.buffer().len() < limits.hard_limit());
        assert!(session.scroll().offset() <= session.buffer().len());
    }

    assert_eq!(session.buffer().len(), 5);
    assert!(session.scroll().offset() >= limits.evict_guard(), "reader stays scrolled back");
}

#[test]
fn wheel_bounds() {
    let session = Session::new(BufferLimits::default());
    for n in 0..3 {
        session.on_record(numbered(n));
    }

    session.wheel_down();
    assert_eq!(session.scroll().offset(), 0);

    for _ in 0..5 {
        session.wheel_up();
    }
    assert_eq!(session.scroll().offset(), 3);
}
