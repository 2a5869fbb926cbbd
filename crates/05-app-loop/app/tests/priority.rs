//! Integration tests covering P0 ≻ P1 ≻ P2 priority queue semantics.

use app::priority::PQueues;
use hub::IntentPriority;

/// Ensures higher priorities always pop before lower ones.
#[test]
fn priority_ordering_respected() {
    let mut queues = PQueues::new();

    queues.enqueue(IntentPriority::P1, "round-lookup");
    queues.enqueue(IntentPriority::P2, "friends-page");
    queues.enqueue(IntentPriority::P0, "appear");
    queues.enqueue(IntentPriority::P0, "refresh");
    queues.enqueue(IntentPriority::P1, "friends");

    assert_eq!(queues.current_priority(), Some(IntentPriority::P0));
    assert_eq!(queues.pop_next(), Some("appear"));
    assert_eq!(queues.pop_next(), Some("refresh"));
    assert_eq!(queues.pop_next(), Some("round-lookup"));
    assert_eq!(queues.pop_next(), Some("friends"));
    assert_eq!(queues.pop_next(), Some("friends-page"));
    assert_eq!(queues.pop_next(), None);
    assert_eq!(queues.current_priority(), None);
}

/// Requeued work jumps ahead of everything else.
#[test]
fn front_of_p0_preempts_fifo_order() {
    let mut queues = PQueues::new();

    queues.enqueue(IntentPriority::P0, 1);
    queues.enqueue(IntentPriority::P0, 2);
    queues.enqueue_front_p0(0);

    assert_eq!(queues.pop_next(), Some(0));
    assert_eq!(queues.pop_next(), Some(1));
    assert_eq!(queues.pop_next(), Some(2));
}

/// Confirms empty checks and length accounting behave as expected.
#[test]
fn empty_behavior_and_len_tracking() {
    let mut queues = PQueues::with_capacity(2);
    assert!(queues.is_empty());
    assert_eq!(queues.len_per_priority(), [0, 0, 0]);

    queues.enqueue(IntentPriority::P2, 'a');
    queues.enqueue(IntentPriority::P0, 'b');

    assert_eq!(queues.len_per_priority(), [1, 0, 1]);
    queues.clear();
    assert!(queues.is_empty());
    assert_eq!(queues.pop_next(), None);
}
