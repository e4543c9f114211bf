//! A queue of owned strings built on a [`Ring`].
//!
//! See the [`StrQueue`] type for details.
use crate::{ring, util::FmtOption, Ring};
use alloc::string::String;
use core::fmt;

/// A double-ended queue of owned strings.
///
/// `StrQueue` stores each element as an owned, heap-allocated [`String`] in
/// a node of a circular, sentinel-based [`Ring`]. Inserting copies the
/// caller's string into fresh storage; removing detaches the node and hands
/// the owned value back, so an element's storage is released exactly once,
/// when the caller drops the returned `String` (or when the queue itself is
/// dropped while still containing it).
///
/// Besides insertion and removal at both ends, the queue supports the
/// whole-list transformations of the underlying ring: deleting the middle
/// element, deleting duplicate runs from a sorted queue, swapping adjacent
/// pairs, reversing, and a stable sort — all of which rewire the existing
/// nodes rather than reallocating or copying the strings.
///
/// All operations run to completion synchronously; the queue performs no
/// internal synchronization, so a queue shared across threads requires
/// external serialization, as for any `&mut`-based structure.
///
/// # Examples
///
/// ```
/// use ringq::StrQueue;
///
/// let mut q = StrQueue::new();
/// q.push_back("alpha");
/// q.push_back("beta");
/// q.push_front("gamma");
///
/// assert_eq!(q.len(), 3);
/// assert_eq!(q.pop_front(), Some("gamma".to_string()));
/// assert_eq!(q.pop_back(), Some("beta".to_string()));
/// assert_eq!(q.pop_back(), Some("alpha".to_string()));
/// assert_eq!(q.pop_back(), None);
/// ```
pub struct StrQueue {
    ring: Ring<String>,
}

/// Iterates over the elements of a [`StrQueue`] by reference.
pub struct Iter<'q> {
    inner: ring::Iter<'q, String>,
}

// === impl StrQueue ===

impl StrQueue {
    /// Returns a new empty queue.
    #[must_use]
    pub fn new() -> StrQueue {
        StrQueue { ring: Ring::new() }
    }

    /// Returns the number of elements in the queue.
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Returns `true` if this queue contains no elements.
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Copies `s` into a new element at the head of the queue.
    pub fn push_front(&mut self, s: &str) {
        self.ring.push_front(String::from(s));
    }

    /// Copies `s` into a new element at the tail of the queue.
    pub fn push_back(&mut self, s: &str) {
        self.ring.push_back(String::from(s));
    }

    /// Removes the element at the head of the queue, transferring ownership
    /// of its string to the caller.
    ///
    /// Returns `None` if the queue is empty.
    pub fn pop_front(&mut self) -> Option<String> {
        self.ring.pop_front()
    }

    /// Removes the element at the tail of the queue, transferring ownership
    /// of its string to the caller.
    ///
    /// Returns `None` if the queue is empty.
    pub fn pop_back(&mut self) -> Option<String> {
        self.ring.pop_back()
    }

    /// Like [`pop_front`](StrQueue::pop_front), but additionally copies the
    /// removed string into `buf`, truncated to fit.
    ///
    /// At most `buf.len() - 1` bytes are copied, and a NUL terminator is
    /// written after them; a string longer than the buffer is silently
    /// truncated (possibly mid-character, since the copy is byte-wise). A
    /// zero-length buffer receives nothing. The full string is still
    /// returned.
    pub fn pop_front_into(&mut self, buf: &mut [u8]) -> Option<String> {
        let value = self.ring.pop_front()?;
        copy_truncated(&value, buf);
        Some(value)
    }

    /// Like [`pop_back`](StrQueue::pop_back), but additionally copies the
    /// removed string into `buf`, truncated to fit, with a NUL terminator.
    pub fn pop_back_into(&mut self, buf: &mut [u8]) -> Option<String> {
        let value = self.ring.pop_back()?;
        copy_truncated(&value, buf);
        Some(value)
    }

    /// Borrows the string at the head of the queue, without removing it.
    pub fn front(&self) -> Option<&str> {
        self.ring.front().map(String::as_str)
    }

    /// Borrows the string at the tail of the queue, without removing it.
    pub fn back(&self) -> Option<&str> {
        self.ring.back().map(String::as_str)
    }

    /// Deletes the element at zero-based index `(len - 1) / 2`: the lower
    /// of the two middle candidates when the length is even, the exact
    /// middle when it is odd.
    ///
    /// Returns `false`, without changing the queue, if it is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringq::StrQueue;
    ///
    /// let mut q: StrQueue = ["a", "b", "c", "d", "e", "f"].into_iter().collect();
    /// assert!(q.delete_middle());
    /// assert_eq!(q.iter().collect::<Vec<_>>(), ["a", "b", "d", "e", "f"]);
    /// ```
    pub fn delete_middle(&mut self) -> bool {
        self.ring.delete_middle().is_some()
    }

    /// Deletes every element whose value is duplicated, assuming the queue
    /// is sorted in ascending order. Returns the number of elements
    /// removed.
    ///
    /// Runs of two or more equal strings are removed in their entirety,
    /// leaving only the values that occurred exactly once, in their
    /// original relative order. The caller is responsible for sorting the
    /// queue first (see [`sort`](StrQueue::sort)); on an unsorted queue
    /// this removes *consecutive* duplicates only. The empty string is an
    /// ordinary value and participates in runs like any other.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringq::StrQueue;
    ///
    /// let mut q: StrQueue = ["a", "a", "b", "c", "c", "c"].into_iter().collect();
    /// assert_eq!(q.delete_duplicates(), 5);
    /// assert_eq!(q.iter().collect::<Vec<_>>(), ["b"]);
    /// ```
    pub fn delete_duplicates(&mut self) -> usize {
        self.ring.dedup_runs()
    }

    /// Swaps each adjacent pair of elements by position, leaving a trailing
    /// unpaired element in place. No-op on an empty or single-element
    /// queue. Self-inverse.
    pub fn swap_pairs(&mut self) {
        self.ring.swap_pairs();
    }

    /// Reverses the order of the elements in place, rewiring links only.
    /// No-op on an empty queue. Self-inverse.
    pub fn reverse(&mut self) {
        self.ring.reverse();
    }

    /// Sorts the queue into ascending order by byte-wise lexicographic
    /// comparison of the strings.
    ///
    /// The sort is a stable merge sort over the linked nodes; no node is
    /// allocated and no string is copied or moved. No-op on an empty or
    /// single-element queue.
    pub fn sort(&mut self) {
        self.ring.sort_by(String::cmp);
    }

    /// Returns an iterator over the strings in the queue, head to tail.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.ring.iter(),
        }
    }

    /// Asserts the invariants of the underlying ring.
    pub fn assert_valid(&self) {
        self.ring.assert_valid();
    }
}

/// Copies up to `buf.len() - 1` bytes of `value` into `buf` and writes a
/// NUL terminator after them. A zero-length buffer receives nothing.
fn copy_truncated(value: &str, buf: &mut [u8]) {
    if buf.is_empty() {
        return;
    }
    let n = value.len().min(buf.len() - 1);
    buf[..n].copy_from_slice(&value.as_bytes()[..n]);
    buf[n] = 0;
}

impl Default for StrQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StrQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrQueue")
            .field("len", &self.len())
            .field("front", &FmtOption::new(&self.front()))
            .field("back", &FmtOption::new(&self.back()))
            .finish()
    }
}

impl PartialEq for StrQueue {
    fn eq(&self, other: &Self) -> bool {
        self.ring == other.ring
    }
}

impl Eq for StrQueue {}

impl<'a> Extend<&'a str> for StrQueue {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for s in iter {
            self.push_back(s);
        }
    }
}

impl<'a> FromIterator<&'a str> for StrQueue {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut q = StrQueue::new();
        q.extend(iter);
        q
    }
}

impl<'q> IntoIterator for &'q StrQueue {
    type Item = &'q str;
    type IntoIter = Iter<'q>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// === impl Iter ===

impl<'q> Iterator for Iter<'q> {
    type Item = &'q str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'q> DoubleEndedIterator for Iter<'q> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(String::as_str)
    }
}

impl ExactSizeIterator for Iter<'_> {}
impl core::iter::FusedIterator for Iter<'_> {}
