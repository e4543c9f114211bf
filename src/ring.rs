//! A circular, sentinel-based, doubly-linked list.
//!
//! See the [`Ring`] type for details.
use alloc::boxed::Box;
use core::{cmp::Ordering, fmt, iter::FusedIterator, mem, ptr::NonNull};

/// A circular doubly-linked list headed by a sentinel node.
///
/// Every node in a `Ring` is part of a single circular chain: following
/// `next` from any node visits every other node exactly once before
/// returning to the starting point. The chain always contains one
/// *sentinel* node, which carries no value and marks the boundary between
/// the back and the front of the ring. An empty ring is a sentinel linked
/// to itself.
///
/// Because the sentinel is always present, none of the structural
/// operations have to special-case an empty or one-element list when
/// rewiring links: the head is always `sentinel.next`, the tail is always
/// `sentinel.prev`, and both are the sentinel itself when the ring is
/// empty.
///
/// Each node owns its value. Popping an element unlinks its node and
/// returns the value by move; dropping a `Ring` releases every remaining
/// node and then the sentinel.
///
/// In addition to the deque surface ([`push_front`], [`push_back`],
/// [`pop_front`], [`pop_back`]), a `Ring` provides a set of whole-list
/// transformations that operate purely by relinking nodes:
///
/// - [`delete_middle`]: removes the lower-middle element,
/// - [`dedup_runs`]: removes every run of two or more equal elements,
/// - [`swap_pairs`]: swaps each adjacent pair of elements,
/// - [`reverse`]: reverses the ring in place,
/// - [`sort`]: a stable, in-place merge sort.
///
/// # Examples
///
/// Using a `Ring` as a first-in, first-out queue:
///
/// ```
/// use ringq::Ring;
///
/// let mut ring = Ring::new();
/// ring.push_back("a");
/// ring.push_back("b");
/// ring.push_back("c");
///
/// assert_eq!(ring.pop_front(), Some("a"));
/// assert_eq!(ring.pop_front(), Some("b"));
/// assert_eq!(ring.pop_front(), Some("c"));
/// assert_eq!(ring.pop_front(), None);
/// ```
///
/// Sorting and removing duplicate runs:
///
/// ```
/// use ringq::Ring;
///
/// let mut ring: Ring<&str> = ["b", "a", "c", "a"].into_iter().collect();
/// ring.sort();
/// assert_eq!(ring.iter().copied().collect::<Vec<_>>(), ["a", "a", "b", "c"]);
///
/// // `dedup_runs` removes *every* element of a duplicated run, keeping
/// // only the values that were unique.
/// assert_eq!(ring.dedup_runs(), 2);
/// assert_eq!(ring.iter().copied().collect::<Vec<_>>(), ["b", "c"]);
/// ```
///
/// [`push_front`]: Ring::push_front
/// [`push_back`]: Ring::push_back
/// [`pop_front`]: Ring::pop_front
/// [`pop_back`]: Ring::pop_back
/// [`delete_middle`]: Ring::delete_middle
/// [`dedup_runs`]: Ring::dedup_runs
/// [`swap_pairs`]: Ring::swap_pairs
/// [`reverse`]: Ring::reverse
/// [`sort`]: Ring::sort
pub struct Ring<T> {
    /// The sentinel is heap-allocated so that the nodes linked to it remain
    /// valid when the `Ring` value itself is moved.
    sentinel: NonNull<Node<T>>,
    len: usize,
}

/// A node in a [`Ring`].
///
/// `value` is `Some` for every payload node and `None` only for sentinels.
/// A node pointer always refers to the whole node; the sentinel is
/// recognized by pointer identity, never by inspecting or casting the
/// pointee.
pub(crate) struct Node<T> {
    next: NonNull<Node<T>>,
    prev: NonNull<Node<T>>,
    value: Option<T>,
}

/// Iterates over the elements of a [`Ring`] by reference.
pub struct Iter<'ring, T> {
    _ring: &'ring Ring<T>,
    /// The next node to yield from the front.
    front: NonNull<Node<T>>,
    /// The next node to yield from the back.
    back: NonNull<Node<T>>,
    /// Nodes not yet yielded from either end. Counting down to zero (rather
    /// than comparing against the sentinel) lets the two ends meet without
    /// yielding a node twice.
    remaining: usize,
}

/// An owning iterator over the elements of a [`Ring`].
pub struct IntoIter<T> {
    ring: Ring<T>,
}

// ==== raw link primitives ====
//
// These operate on bare node pointers so that the structural algorithms can
// thread transient sub-rings through sentinels headed on the stack, without
// allocating. Every function requires the usual aliasing discipline: the
// pointers must refer to live nodes, and no references to those nodes may be
// outstanding.

/// Initializes `node` as a single-node circular list.
unsafe fn init_self<T>(mut node: NonNull<Node<T>>) {
    node.as_mut().next = node;
    node.as_mut().prev = node;
}

/// Splices `node` so that it sits immediately after `prev` and before
/// `next`.
///
/// `prev.next` must be `next` (and `next.prev` must be `prev`) on entry.
unsafe fn link_between<T>(
    mut node: NonNull<Node<T>>,
    mut prev: NonNull<Node<T>>,
    mut next: NonNull<Node<T>>,
) {
    debug_assert_eq!(prev.as_ref().next, next);
    debug_assert_eq!(next.as_ref().prev, prev);
    node.as_mut().prev = prev;
    node.as_mut().next = next;
    prev.as_mut().next = node;
    next.as_mut().prev = node;
}

/// Reconnects `node`'s neighbors to each other, bypassing `node`.
///
/// The detached node's own links are stale afterwards; they must not be
/// followed until the node is relinked.
unsafe fn unlink<T>(node: NonNull<Node<T>>) {
    let mut prev = node.as_ref().prev;
    let mut next = node.as_ref().next;
    prev.as_mut().next = next;
    next.as_mut().prev = prev;
}

/// Detaches the contiguous run `[first, last]` from its current ring and
/// makes it the sole content of the empty ring headed by `dest`, preserving
/// the run's internal order.
///
/// `first` and `last` must be payload nodes of the same ring, with `last`
/// reachable from `first` by following `next` without passing that ring's
/// sentinel. `dest` must be an empty sentinel.
unsafe fn cut_range<T>(
    mut dest: NonNull<Node<T>>,
    mut first: NonNull<Node<T>>,
    mut last: NonNull<Node<T>>,
) {
    debug_assert_eq!(dest.as_ref().next, dest);
    let mut before = first.as_ref().prev;
    let mut after = last.as_ref().next;
    before.as_mut().next = after;
    after.as_mut().prev = before;

    first.as_mut().prev = dest;
    last.as_mut().next = dest;
    dest.as_mut().next = first;
    dest.as_mut().prev = last;
}

/// Moves every node of the ring headed by `src` into the ring headed by
/// `dest`, immediately after `dest`, preserving relative order. Leaves
/// `src` empty.
unsafe fn splice_all<T>(src: NonNull<Node<T>>, mut dest: NonNull<Node<T>>) {
    if src.as_ref().next == src {
        return;
    }
    let mut first = src.as_ref().next;
    let mut last = src.as_ref().prev;
    init_self(src);

    let mut after = dest.as_ref().next;
    first.as_mut().prev = dest;
    last.as_mut().next = after;
    dest.as_mut().next = first;
    after.as_mut().prev = last;
}

// ==== impl Node ====

impl<T> Node<T> {
    /// Allocates a detached node owning `value`.
    fn alloc(value: Option<T>) -> NonNull<Node<T>> {
        NonNull::from(Box::leak(Box::new(Node {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
            value,
        })))
    }

    /// A sentinel for a transient ring headed on the caller's stack, in the
    /// style of an on-stack list head.
    ///
    /// The caller must initialize it as a self-loop before linking nodes to
    /// it, and must not move it while any node is linked.
    const fn stack_head() -> Self {
        Node {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
            value: None,
        }
    }
}

// ==== impl Ring ====

impl<T> Ring<T> {
    /// Returns a new empty ring.
    #[must_use]
    pub fn new() -> Ring<T> {
        let sentinel = Node::alloc(None);
        unsafe { init_self(sentinel) };
        Ring { sentinel, len: 0 }
    }

    /// Returns the number of elements in the ring.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if this ring contains no elements.
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.len == 0, unsafe {
            self.sentinel.as_ref().next == self.sentinel
        });
        self.len == 0
    }

    /// Returns `true` if this ring contains exactly one element.
    pub fn is_singular(&self) -> bool {
        let singular = !self.is_empty()
            && unsafe { self.sentinel.as_ref().next == self.sentinel.as_ref().prev };
        debug_assert_eq!(singular, self.len == 1);
        singular
    }

    /// The first payload node, or `None` if the ring is empty.
    fn head(&self) -> Option<NonNull<Node<T>>> {
        let head = unsafe { self.sentinel.as_ref().next };
        if head == self.sentinel {
            None
        } else {
            Some(head)
        }
    }

    /// The last payload node, or `None` if the ring is empty.
    fn tail(&self) -> Option<NonNull<Node<T>>> {
        let tail = unsafe { self.sentinel.as_ref().prev };
        if tail == self.sentinel {
            None
        } else {
            Some(tail)
        }
    }

    /// Appends an element to the front of the ring.
    pub fn push_front(&mut self, value: T) {
        let node = Node::alloc(Some(value));
        unsafe { link_between(node, self.sentinel, self.sentinel.as_ref().next) };
        self.len += 1;
    }

    /// Appends an element to the back of the ring.
    pub fn push_back(&mut self, value: T) {
        let node = Node::alloc(Some(value));
        unsafe { link_between(node, self.sentinel.as_ref().prev, self.sentinel) };
        self.len += 1;
    }

    /// Removes the element at the front of the ring, returning its value.
    ///
    /// Returns `None` if the ring is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        let node = self.head()?;
        unsafe {
            unlink(node);
            self.len -= 1;
            Box::from_raw(node.as_ptr()).value
        }
    }

    /// Removes the element at the back of the ring, returning its value.
    ///
    /// Returns `None` if the ring is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        let node = self.tail()?;
        unsafe {
            unlink(node);
            self.len -= 1;
            Box::from_raw(node.as_ptr()).value
        }
    }

    /// Borrows the element at the front of the ring, without removing it.
    pub fn front(&self) -> Option<&T> {
        let head = self.head()?;
        unsafe { head.as_ref() }.value.as_ref()
    }

    /// Borrows the element at the back of the ring, without removing it.
    pub fn back(&self) -> Option<&T> {
        let tail = self.tail()?;
        unsafe { tail.as_ref() }.value.as_ref()
    }

    /// Removes and returns the lower-middle element: the element at
    /// zero-based index `(len - 1) / 2`.
    ///
    /// For a ring of six elements this is the third (index 2); for a ring
    /// of five it is also the third, the exact middle. Returns `None` if
    /// the ring is empty.
    pub fn delete_middle(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let mut node = unsafe { self.sentinel.as_ref().next };
        for _ in 0..(self.len - 1) / 2 {
            node = unsafe { node.as_ref().next };
        }
        unsafe {
            unlink(node);
            self.len -= 1;
            Box::from_raw(node.as_ptr()).value
        }
    }

    /// Removes every run of two or more consecutive equal elements in its
    /// entirety, keeping only elements whose value does not repeat in any
    /// run. Returns the number of elements removed.
    ///
    /// On a ring sorted in ascending order this leaves exactly the values
    /// that were unique in the original sequence, in their original
    /// relative order; run [`sort`](Ring::sort) first for that behavior.
    pub fn dedup_runs(&mut self) -> usize
    where
        T: PartialEq,
    {
        self.dedup_runs_by(|a, b| a == b)
    }

    /// Removes every run of two or more consecutive elements considered
    /// equal by `same`, in its entirety. Returns the number of elements
    /// removed.
    ///
    /// Each run is detached with a single contiguous cut rather than
    /// node-by-node, so a call is a single O(n) pass regardless of run
    /// lengths.
    pub fn dedup_runs_by(&mut self, same: fn(&T, &T) -> bool) -> usize {
        let mut removed = 0;
        unsafe {
            let sentinel = self.sentinel;
            // Duplicated runs are parked on a dump ring headed on this stack
            // frame, then released in one sweep at the end.
            let mut dump_head = Node::stack_head();
            let dump = NonNull::new_unchecked(&mut dump_head as *mut Node<T>);
            init_self(dump);
            let mut scrap_head = Node::stack_head();
            let scrap = NonNull::new_unchecked(&mut scrap_head as *mut Node<T>);
            init_self(scrap);

            let mut run_first = sentinel.as_ref().next;
            while run_first != sentinel {
                // extend the run as far as consecutive elements stay equal
                let mut run_last = run_first;
                let mut count = 1;
                loop {
                    let next = run_last.as_ref().next;
                    if next == sentinel {
                        break;
                    }
                    let extend = match (run_last.as_ref().value.as_ref(), next.as_ref().value.as_ref())
                    {
                        (Some(a), Some(b)) => same(a, b),
                        _ => false,
                    };
                    if !extend {
                        break;
                    }
                    run_last = next;
                    count += 1;
                }
                // capture the continuation before the run is cut out
                let after = run_last.as_ref().next;
                if count > 1 {
                    cut_range(scrap, run_first, run_last);
                    splice_all(scrap, dump);
                    removed += count;
                    test_trace!(run.len = count, "dedup_runs_by: cut run");
                }
                run_first = after;
            }
            self.len -= removed;

            // empty the dump ring, capturing each successor before its node
            // is freed
            let mut pos = dump.as_ref().next;
            while pos != dump {
                let next = pos.as_ref().next;
                drop(Box::from_raw(pos.as_ptr()));
                pos = next;
            }
        }
        removed
    }

    /// Swaps each adjacent pair of elements by position: the first with the
    /// second, the third with the fourth, and so on. A trailing unpaired
    /// element stays in place.
    ///
    /// No-op on an empty or single-element ring. Applying `swap_pairs`
    /// twice restores the original order.
    pub fn swap_pairs(&mut self) {
        if self.is_empty() || self.is_singular() {
            return;
        }
        unsafe {
            let sentinel = self.sentinel;
            let mut cur = sentinel.as_ref().next;
            while cur != sentinel && cur.as_ref().next != sentinel {
                let second = cur.as_ref().next;
                // move the second element of the pair in front of the first
                unlink(second);
                link_between(second, cur.as_ref().prev, cur);
                cur = cur.as_ref().next;
            }
        }
    }

    /// Reverses the order of the elements, in place.
    ///
    /// Only links are rewired; no element is moved, allocated, or freed.
    /// Applying `reverse` twice restores the original order.
    pub fn reverse(&mut self) {
        if self.is_empty() {
            return;
        }
        unsafe {
            // swap `next` and `prev` on every node, the sentinel included
            let mut cur = self.sentinel;
            loop {
                let next = cur.as_ref().next;
                {
                    let node = cur.as_mut();
                    mem::swap(&mut node.next, &mut node.prev);
                }
                cur = next;
                if cur == self.sentinel {
                    break;
                }
            }
        }
    }

    /// Sorts the ring in ascending order.
    ///
    /// The sort is stable and operates entirely by relinking the existing
    /// nodes; see [`sort_by`](Ring::sort_by).
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_by(T::cmp);
    }

    /// Sorts the ring with the given comparison function.
    ///
    /// This is a merge sort over the linked structure itself: the ring is
    /// recursively split in half (the split point found by a slow/fast
    /// pointer scan), each half is sorted, and the halves are merged by
    /// splicing nodes. Elements that compare equal keep their original
    /// relative order. No nodes are allocated and no values are moved or
    /// copied.
    ///
    /// No-op on an empty or single-element ring.
    pub fn sort_by(&mut self, cmp: fn(&T, &T) -> Ordering) {
        if self.len < 2 {
            return;
        }
        unsafe { sort_ring(self.sentinel, cmp) };
    }

    /// Returns an iterator over the elements of the ring, front to back.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        let sentinel = unsafe { self.sentinel.as_ref() };
        Iter {
            _ring: self,
            front: sentinel.next,
            back: sentinel.prev,
            remaining: self.len,
        }
    }

    /// Asserts as many of the ring's invariants as possible.
    ///
    /// # Panics
    ///
    /// If any invariant is violated: the sentinel holding a value, a payload
    /// node missing one, `prev`/`next` links that are not mutual inverses,
    /// or a length counter that disagrees with an actual traversal.
    pub fn assert_valid(&self) {
        unsafe {
            let sentinel = self.sentinel;
            assert!(
                sentinel.as_ref().value.is_none(),
                "the sentinel must never hold a value"
            );
            if self.len == 0 {
                assert_eq!(
                    sentinel.as_ref().next,
                    sentinel,
                    "an empty ring's sentinel must be its own successor"
                );
                assert_eq!(
                    sentinel.as_ref().prev,
                    sentinel,
                    "an empty ring's sentinel must be its own predecessor"
                );
                return;
            }

            let mut count = 0;
            let mut cur = sentinel.as_ref().next;
            while cur != sentinel {
                assert!(
                    cur.as_ref().value.is_some(),
                    "every payload node must hold a value"
                );
                let next = cur.as_ref().next;
                assert_eq!(
                    next.as_ref().prev,
                    cur,
                    "a node's successor must link back to it"
                );
                assert_eq!(
                    cur.as_ref().prev.as_ref().next,
                    cur,
                    "a node's predecessor must link forward to it"
                );
                count += 1;
                assert!(
                    count <= self.len,
                    "traversal visited more nodes than `len` ({}); the ring may \
                     not be circular through the sentinel",
                    self.len
                );
                cur = next;
            }
            assert_eq!(
                count, self.len,
                "`len` must equal the number of nodes reachable from the sentinel"
            );
        }
    }
}

/// Recursively sorts the ring headed by `sentinel`.
unsafe fn sort_ring<T>(sentinel: NonNull<Node<T>>, cmp: fn(&T, &T) -> Ordering) {
    let first = sentinel.as_ref().next;
    if first == sentinel || first.as_ref().next == sentinel {
        return;
    }

    // Find the split point with a slow/fast scan: `mid` advances one node
    // for every two the scout takes, so when the scout reaches the sentinel
    // `mid` is the last node of the first half. This handles both even and
    // odd counts without knowing the length.
    let mut mid = first;
    let mut fast = first;
    loop {
        let one = fast.as_ref().next;
        if one == sentinel {
            break;
        }
        let two = one.as_ref().next;
        if two == sentinel {
            break;
        }
        mid = mid.as_ref().next;
        fast = two;
    }

    // Move the first half onto a ring headed on this stack frame, sort both
    // halves, then merge the left half back into place.
    let mut left_head = Node::stack_head();
    let left = NonNull::new_unchecked(&mut left_head as *mut Node<T>);
    init_self(left);
    cut_range(left, first, mid);

    sort_ring(left, cmp);
    sort_ring(sentinel, cmp);
    merge_rings(left, sentinel, cmp);
    debug_assert_eq!(left.as_ref().next, left, "merge must drain the left half");
}

/// Merges the sorted ring headed by `left` into the sorted ring headed by
/// `sentinel`.
///
/// Elements that compare equal are ordered with the `left` element first,
/// which makes the overall sort stable: the left ring always holds the
/// earlier half of the original sequence.
unsafe fn merge_rings<T>(
    left: NonNull<Node<T>>,
    sentinel: NonNull<Node<T>>,
    cmp: fn(&T, &T) -> Ordering,
) {
    let mut pos = sentinel.as_ref().next;
    loop {
        let node = left.as_ref().next;
        if node == left {
            break;
        }
        unlink(node);
        // advance `pos` past every element that sorts strictly before
        // `node`; stopping on Equal keeps left-half elements first
        while pos != sentinel {
            let precedes = match (pos.as_ref().value.as_ref(), node.as_ref().value.as_ref()) {
                (Some(r), Some(l)) => cmp(r, l) == Ordering::Less,
                _ => false,
            };
            if !precedes {
                break;
            }
            pos = pos.as_ref().next;
        }
        link_between(node, pos.as_ref().prev, pos);
    }
}

impl<T> Drop for Ring<T> {
    fn drop(&mut self) {
        while self.pop_front().is_some() {}
        unsafe {
            drop(Box::from_raw(self.sentinel.as_ptr()));
        }
    }
}

impl<T> Default for Ring<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// # Safety
///
/// The node pointers inside a `Ring` are reachable only through the `Ring`
/// itself, which owns every node it links; sending the ring to another
/// thread sends the nodes with it.
unsafe impl<T: Send> Send for Ring<T> {}

/// # Safety
///
/// A `&Ring` only permits traversal and reads of the values; the links are
/// never mutated through a shared reference.
unsafe impl<T: Sync> Sync for Ring<T> {}

impl<T: fmt::Debug> fmt::Debug for Ring<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Ring<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Ring<T> {}

impl<T> Extend<T> for Ring<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for Ring<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut ring = Ring::new();
        ring.extend(iter);
        ring
    }
}

impl<'ring, T> IntoIterator for &'ring Ring<T> {
    type Item = &'ring T;
    type IntoIter = Iter<'ring, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Ring<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { ring: self }
    }
}

// ==== impl Iter ====

impl<'ring, T> Iterator for Iter<'ring, T> {
    type Item = &'ring T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = unsafe { self.front.as_ref() };
        self.front = node.next;
        self.remaining -= 1;
        node.value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'ring, T> DoubleEndedIterator for Iter<'ring, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = unsafe { self.back.as_ref() };
        self.back = node.prev;
        self.remaining -= 1;
        node.value.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

// ==== impl IntoIter ====

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.ring.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.ring.len, Some(self.ring.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ring.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    fn ring_of(vals: &[i32]) -> Ring<i32> {
        vals.iter().copied().collect()
    }

    fn collect(ring: &Ring<i32>) -> Vec<i32> {
        ring.iter().copied().collect()
    }

    #[test]
    fn new_is_empty() {
        let ring = Ring::<i32>::new();
        assert!(ring.is_empty());
        assert!(!ring.is_singular());
        assert_eq!(ring.len(), 0);
        ring.assert_valid();
    }

    #[test]
    fn push_pop_front() {
        let mut ring = Ring::new();
        ring.push_front(1);
        ring.assert_valid();
        ring.push_front(2);
        ring.assert_valid();
        ring.push_front(3);
        ring.assert_valid();

        assert_eq!(ring.pop_front(), Some(3));
        assert_eq!(ring.pop_front(), Some(2));
        assert_eq!(ring.pop_front(), Some(1));
        assert_eq!(ring.pop_front(), None);
        ring.assert_valid();
    }

    #[test]
    fn fifo_and_lifo() {
        let mut ring = ring_of(&[1, 2, 3]);
        assert_eq!(ring.pop_front(), Some(1));
        assert_eq!(ring.pop_back(), Some(3));
        assert_eq!(ring.pop_back(), Some(2));
        assert!(ring.is_empty());
        ring.assert_valid();
    }

    #[test]
    fn singular() {
        let mut ring = Ring::new();
        ring.push_back(7);
        assert!(ring.is_singular());
        ring.push_back(8);
        assert!(!ring.is_singular());
        ring.pop_front();
        assert!(ring.is_singular());
        ring.assert_valid();
    }

    #[test]
    fn front_and_back() {
        let mut ring = ring_of(&[1, 2, 3]);
        assert_eq!(ring.front(), Some(&1));
        assert_eq!(ring.back(), Some(&3));
        ring.pop_front();
        assert_eq!(ring.front(), Some(&2));

        let empty = Ring::<i32>::new();
        assert_eq!(empty.front(), None);
        assert_eq!(empty.back(), None);
    }

    #[test]
    fn iter_both_ends() {
        let ring = ring_of(&[1, 2, 3, 4]);
        assert_eq!(collect(&ring), [1, 2, 3, 4]);
        assert_eq!(ring.iter().rev().copied().collect::<Vec<_>>(), [4, 3, 2, 1]);

        let mut iter = ring.iter();
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn into_iter_drains() {
        let ring = ring_of(&[1, 2, 3]);
        assert_eq!(ring.into_iter().collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    fn delete_middle_lower_candidate() {
        // even length: the lower of the two middle candidates
        let mut ring = ring_of(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(ring.delete_middle(), Some(3));
        assert_eq!(collect(&ring), [1, 2, 4, 5, 6]);
        ring.assert_valid();

        // odd length: the exact middle
        assert_eq!(ring.delete_middle(), Some(4));
        assert_eq!(collect(&ring), [1, 2, 5, 6]);
        ring.assert_valid();
    }

    #[test]
    fn delete_middle_small() {
        let mut ring = Ring::new();
        assert_eq!(ring.delete_middle(), None);

        ring.push_back(1);
        assert_eq!(ring.delete_middle(), Some(1));
        assert!(ring.is_empty());

        let mut ring = ring_of(&[1, 2]);
        assert_eq!(ring.delete_middle(), Some(1));
        assert_eq!(collect(&ring), [2]);
        ring.assert_valid();
    }

    #[test]
    fn dedup_runs_keeps_unique_values() {
        let mut ring = ring_of(&[1, 1, 2, 3, 3, 3]);
        assert_eq!(ring.dedup_runs(), 5);
        assert_eq!(collect(&ring), [2]);
        ring.assert_valid();
    }

    #[test]
    fn dedup_runs_no_duplicates() {
        let mut ring = ring_of(&[1, 2, 3]);
        assert_eq!(ring.dedup_runs(), 0);
        assert_eq!(collect(&ring), [1, 2, 3]);
        ring.assert_valid();

        let mut empty = Ring::<i32>::new();
        assert_eq!(empty.dedup_runs(), 0);
        empty.assert_valid();
    }

    #[test]
    fn dedup_runs_at_ends() {
        let mut ring = ring_of(&[1, 1, 2, 3, 3]);
        assert_eq!(ring.dedup_runs(), 4);
        assert_eq!(collect(&ring), [2]);
        ring.assert_valid();

        let mut ring = ring_of(&[5, 5, 5, 5]);
        assert_eq!(ring.dedup_runs(), 4);
        assert!(ring.is_empty());
        ring.assert_valid();
    }

    #[test]
    fn swap_pairs_even_and_odd() {
        let mut ring = ring_of(&[1, 2, 3, 4]);
        ring.swap_pairs();
        assert_eq!(collect(&ring), [2, 1, 4, 3]);
        ring.assert_valid();

        let mut ring = ring_of(&[1, 2, 3, 4, 5]);
        ring.swap_pairs();
        assert_eq!(collect(&ring), [2, 1, 4, 3, 5]);
        ring.assert_valid();
    }

    #[test]
    fn swap_pairs_is_involutive() {
        let mut ring = ring_of(&[1, 2, 3, 4, 5, 6, 7]);
        ring.swap_pairs();
        ring.swap_pairs();
        assert_eq!(collect(&ring), [1, 2, 3, 4, 5, 6, 7]);
        ring.assert_valid();
    }

    #[test]
    fn swap_pairs_trivial() {
        let mut empty = Ring::<i32>::new();
        empty.swap_pairs();
        empty.assert_valid();

        let mut one = ring_of(&[1]);
        one.swap_pairs();
        assert_eq!(collect(&one), [1]);
        one.assert_valid();
    }

    #[test]
    fn reverse_reverses() {
        let mut ring = ring_of(&[1, 2, 3, 4, 5]);
        ring.reverse();
        assert_eq!(collect(&ring), [5, 4, 3, 2, 1]);
        ring.assert_valid();

        ring.reverse();
        assert_eq!(collect(&ring), [1, 2, 3, 4, 5]);
        ring.assert_valid();
    }

    #[test]
    fn reverse_trivial() {
        let mut empty = Ring::<i32>::new();
        empty.reverse();
        empty.assert_valid();

        let mut one = ring_of(&[1]);
        one.reverse();
        assert_eq!(collect(&one), [1]);
        one.assert_valid();
    }

    #[test]
    fn sort_sorts() {
        let mut ring = ring_of(&[5, 1, 4, 2, 3]);
        ring.sort();
        assert_eq!(collect(&ring), [1, 2, 3, 4, 5]);
        ring.assert_valid();
    }

    #[test]
    fn sort_is_idempotent() {
        let mut ring = ring_of(&[2, 1, 3]);
        ring.sort();
        ring.sort();
        assert_eq!(collect(&ring), [1, 2, 3]);
        ring.assert_valid();
    }

    #[test]
    fn sort_trivial() {
        let mut empty = Ring::<i32>::new();
        empty.sort();
        empty.assert_valid();

        let mut one = ring_of(&[1]);
        one.sort();
        assert_eq!(collect(&one), [1]);
        one.assert_valid();
    }

    #[test]
    fn sort_is_stable() {
        // sort by key only; the payload records insertion order
        let mut ring: Ring<(i32, usize)> =
            [(2, 0), (1, 1), (2, 2), (1, 3), (2, 4)].into_iter().collect();
        ring.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            ring.iter().copied().collect::<Vec<_>>(),
            [(1, 1), (1, 3), (2, 0), (2, 2), (2, 4)]
        );
        ring.assert_valid();
    }

    #[test]
    fn sort_long_random() {
        let vals: Vec<i32> = (0..257).map(|i| (i * 131) % 97).collect();
        let mut sorted = vals.clone();
        sorted.sort();

        let mut ring: Ring<i32> = vals.into_iter().collect();
        ring.sort();
        assert_eq!(collect(&ring), sorted);
        ring.assert_valid();
    }

    #[test]
    fn ring_eq() {
        let a = ring_of(&[1, 2, 3]);
        let b = ring_of(&[1, 2, 3]);
        let c = ring_of(&[1, 2]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn debug_lists_elements() {
        let ring = ring_of(&[1, 2]);
        assert_eq!(std::format!("{ring:?}"), "[1, 2]");
    }

    #[test]
    fn drop_releases_all_nodes() {
        // dropping must walk the ring without double-freeing; exercised
        // under miri and (more weakly) by the leak-free assertion below
        let counted = std::rc::Rc::new(());
        let mut ring = Ring::new();
        for _ in 0..10 {
            ring.push_back(counted.clone());
        }
        assert_eq!(std::rc::Rc::strong_count(&counted), 11);
        drop(ring);
        assert_eq!(std::rc::Rc::strong_count(&counted), 1);
    }
}
