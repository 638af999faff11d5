//! Randomized behavior tests for the indexed priority queue.

use std::cell::RefCell;
use std::rc::Rc;

use marga_plan::IndexedPriorityQueue;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const NUM_ELEMENTS: usize = 1000;

fn shuffled(rng: &mut StdRng) -> Vec<usize> {
    let mut numbers: Vec<usize> = (0..NUM_ELEMENTS).collect();
    numbers.shuffle(rng);
    numbers
}

#[test]
fn test_random_insert_polls_sorted() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut queue = IndexedPriorityQueue::new();
    for x in shuffled(&mut rng) {
        queue.add(x);
    }
    assert_eq!(queue.len(), NUM_ELEMENTS);

    for expected in 0..NUM_ELEMENTS {
        assert_eq!(queue.poll(), Some(expected));
    }
    assert!(queue.is_empty());
}

#[test]
fn test_peek_does_not_consume() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut queue = IndexedPriorityQueue::new();
    for x in shuffled(&mut rng) {
        queue.add(x);
    }

    for expected in 0..NUM_ELEMENTS {
        assert_eq!(queue.peek(), Some(&expected));
        assert_eq!(queue.peek(), Some(&expected));
        assert_eq!(queue.poll(), Some(expected));
    }
}

#[test]
fn test_remove_interleaving() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut queue = IndexedPriorityQueue::new();
    for x in shuffled(&mut rng) {
        queue.add(x);
    }

    // Remove the odd numbers below the midpoint.
    for x in (1..NUM_ELEMENTS / 2).step_by(2) {
        assert!(queue.remove(&x));
    }

    // The lower half now drains evens only.
    for x in 0..NUM_ELEMENTS / 4 {
        assert_eq!(queue.poll(), Some(x * 2));
    }
    assert_eq!(queue.len(), NUM_ELEMENTS / 2);

    // Removing numbers that are not there changes nothing.
    for x in 0..NUM_ELEMENTS / 4 {
        assert!(!queue.remove(&(x + NUM_ELEMENTS)));
    }
    assert_eq!(queue.len(), NUM_ELEMENTS / 2);
    assert_eq!(queue.peek(), Some(&(NUM_ELEMENTS / 2)));

    // Remove the even numbers of the upper half, drain the odds.
    for x in (NUM_ELEMENTS / 2..NUM_ELEMENTS).step_by(2) {
        assert!(queue.remove(&x));
    }
    assert_eq!(queue.len(), NUM_ELEMENTS / 4);
    for x in 0..NUM_ELEMENTS / 4 {
        assert_eq!(queue.poll(), Some(NUM_ELEMENTS / 2 + x * 2 + 1));
    }
}

#[test]
fn test_size_under_random_add_poll() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut queue = IndexedPriorityQueue::new();
    for x in shuffled(&mut rng) {
        queue.add(x);
    }

    let mut size = queue.len();
    for i in 0..NUM_ELEMENTS {
        if rng.gen_bool(0.5) {
            size += 1;
            queue.add(NUM_ELEMENTS + i);
        } else {
            size -= 1;
            queue.poll();
        }
        assert_eq!(queue.len(), size);
    }
}

#[test]
fn test_contains_tracks_membership() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut queue = IndexedPriorityQueue::new();
    for x in shuffled(&mut rng) {
        queue.add(x);
    }

    let mut remaining: Vec<usize> = (0..NUM_ELEMENTS).collect();
    for _ in 0..50 {
        // Remove a random element by value.
        let idx = rng.gen_range(0..remaining.len());
        let x = remaining.swap_remove(idx);

        assert!(queue.contains(&x));
        queue.remove(&x);
        assert!(!queue.contains(&x));

        // Pop the top and forget it too.
        let y = queue.poll().unwrap();
        remaining.retain(|&v| v != y);
        assert!(!queue.contains(&y));
    }
}

/// Shared priority table read by the queue's comparator. Elements are
/// indices into the table, so priorities can change behind the
/// queue's back.
fn priority_queue_over(
    priorities: &Rc<RefCell<Vec<usize>>>,
) -> IndexedPriorityQueue<usize, impl Fn(&usize, &usize) -> std::cmp::Ordering> {
    let table = Rc::clone(priorities);
    IndexedPriorityQueue::with_order(move |a: &usize, b: &usize| {
        let table = table.borrow();
        table[*a].cmp(&table[*b])
    })
}

#[test]
fn test_update_after_priority_swaps() {
    let mut rng = StdRng::seed_from_u64(6);
    let priorities = Rc::new(RefCell::new((0..NUM_ELEMENTS).collect::<Vec<_>>()));
    let mut queue = priority_queue_over(&priorities);

    for i in 0..NUM_ELEMENTS {
        queue.add(i);
    }

    // Swap 200 random pairs of priorities, updating each element
    // after its priority changed.
    for _ in 0..200 {
        let a = rng.gen_range(0..NUM_ELEMENTS);
        let b = rng.gen_range(0..NUM_ELEMENTS);
        priorities.borrow_mut().swap(a, b);
        queue.update(a).unwrap();
        queue.update(b).unwrap();
    }

    // The queue drains in priority order regardless of the swaps.
    for expected in 0..NUM_ELEMENTS {
        let polled = queue.poll().unwrap();
        assert_eq!(priorities.borrow()[polled], expected);
    }
    assert!(queue.is_empty());
}

#[test]
fn test_heapify_after_bulk_swaps() {
    let mut rng = StdRng::seed_from_u64(7);
    let priorities = Rc::new(RefCell::new((0..NUM_ELEMENTS).collect::<Vec<_>>()));
    let mut queue = priority_queue_over(&priorities);

    for i in 0..NUM_ELEMENTS {
        queue.add(i);
    }

    // Same swaps, but no per-element updates; one heapify call
    // restores the ordering afterwards.
    for _ in 0..200 {
        let a = rng.gen_range(0..NUM_ELEMENTS);
        let b = rng.gen_range(0..NUM_ELEMENTS);
        priorities.borrow_mut().swap(a, b);
    }
    queue.heapify();

    for expected in 0..NUM_ELEMENTS {
        let polled = queue.poll().unwrap();
        assert_eq!(priorities.borrow()[polled], expected);
    }
    assert!(queue.is_empty());
}
