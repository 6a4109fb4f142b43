//! Arena-backed doubly linked list.
//!
//! Nodes live in a `Vec` and link to each other by slot index, so the list
//! never holds a raw pointer and never forms an ownership cycle. Callers keep
//! the [`Handle`] returned by [`List::alloc`] and use it to splice the node in
//! and out in O(1). Freed slots are recycled through an intrusive free list.
//!
//! A node is either *detached* (allocated but not linked) or *linked*. The
//! insertion primitives require a detached node, `remove` requires a linked
//! one, and only detached nodes can be released. Violating these is a bug in
//! the caller and panics rather than silently corrupting the links.
//!
//! ```text
//!  head                                  tail
//!   │                                     │
//!   ▼                                     ▼
//! ┌────┐ next ┌────┐ next ┌────┐ next ┌────┐
//! │ s2 │─────▶│ s0 │─────▶│ s3 │─────▶│ s1 │──▶ NIL
//! │    │◀─────│    │◀─────│    │◀─────│    │
//! └────┘ prev └────┘ prev └────┘ prev └────┘
//! ```

use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;
use core::mem;

/// Link value meaning "no node".
const NIL: usize = usize::MAX;

/// Opaque, stable reference to a node in a [`List`].
///
/// A handle stays valid until its node is released. Using it afterwards
/// panics, or, if the slot has since been reused, refers to the new node.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.0)
    }
}

struct Node<T> {
    val: T,
    prev: usize,
    next: usize,
    linked: bool,
}

enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: usize },
}

/// A doubly linked list whose nodes are addressed by [`Handle`].
///
/// # Examples
///
/// ```
/// use recency_cache::list::List;
///
/// let mut list = List::new();
/// let a = list.push_tail("a");
/// let b = list.push_tail("b");
/// let c = list.alloc("c");
/// list.insert_before(b, c);
///
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), ["a", "c", "b"]);
///
/// list.move_to_tail(a);
/// assert_eq!(list.first(), Some(c));
/// assert_eq!(list.last(), Some(a));
/// ```
pub struct List<T> {
    slots: Vec<Slot<T>>,
    free: usize,
    head: usize,
    tail: usize,
    len: usize,
}

impl<T> List<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `cap` nodes before reallocating.
    pub fn with_capacity(cap: usize) -> Self {
        List {
            slots: Vec::with_capacity(cap),
            free: NIL,
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    /// Returns the number of linked nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no node is linked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the first (head) node, or `None` if the list is empty.
    #[inline]
    pub fn first(&self) -> Option<Handle> {
        to_handle(self.head)
    }

    /// Returns the last (tail) node, or `None` if the list is empty.
    #[inline]
    pub fn last(&self) -> Option<Handle> {
        to_handle(self.tail)
    }

    /// Returns the node after `node`.
    pub fn next(&self, node: Handle) -> Option<Handle> {
        to_handle(self.linked(node).next)
    }

    /// Returns the node before `node`.
    pub fn prev(&self, node: Handle) -> Option<Handle> {
        to_handle(self.linked(node).prev)
    }

    /// Returns true if `node` is currently part of the list.
    pub fn is_linked(&self, node: Handle) -> bool {
        self.node(node).linked
    }

    /// Returns the value stored in `node`.
    pub fn get(&self, node: Handle) -> &T {
        &self.node(node).val
    }

    /// Returns the value stored in `node` mutably.
    pub fn get_mut(&mut self, node: Handle) -> &mut T {
        &mut self.node_mut(node).val
    }

    /// Allocates a detached node holding `val`.
    pub fn alloc(&mut self, val: T) -> Handle {
        let node = Node {
            val,
            prev: NIL,
            next: NIL,
            linked: false,
        };
        if self.free == NIL {
            self.slots.push(Slot::Occupied(node));
            return Handle(self.slots.len() - 1);
        }
        let idx = self.free;
        match mem::replace(&mut self.slots[idx], Slot::Occupied(node)) {
            Slot::Vacant { next_free } => self.free = next_free,
            Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
        }
        Handle(idx)
    }

    /// Frees a detached node and returns its value.
    ///
    /// # Panics
    ///
    /// Panics if `node` is still linked or has already been released.
    pub fn release(&mut self, node: Handle) -> T {
        assert!(!self.node(node).linked, "cannot release linked {:?}", node);
        let vacant = Slot::Vacant {
            next_free: self.free,
        };
        self.free = node.0;
        match mem::replace(&mut self.slots[node.0], vacant) {
            Slot::Occupied(n) => n.val,
            Slot::Vacant { .. } => unreachable!("checked occupied above"),
        }
    }

    /// Makes the detached `node` the first element.
    pub fn insert_at_head(&mut self, node: Handle) {
        match self.first() {
            Some(first) => self.insert_before(first, node),
            None => self.link_sole(node),
        }
    }

    /// Makes the detached `node` the last element.
    pub fn insert_at_tail(&mut self, node: Handle) {
        match self.last() {
            Some(last) => self.insert_after(last, node),
            None => self.link_sole(node),
        }
    }

    /// Splices the detached `node` in directly after the linked `anchor`.
    pub fn insert_after(&mut self, anchor: Handle, node: Handle) {
        let next = self.linked(anchor).next;
        let n = self.detached_mut(node);
        n.prev = anchor.0;
        n.next = next;
        n.linked = true;

        self.node_mut(anchor).next = node.0;
        if next == NIL {
            self.tail = node.0;
        } else {
            self.node_mut(Handle(next)).prev = node.0;
        }
        self.len += 1;
    }

    /// Splices the detached `node` in directly before the linked `anchor`.
    pub fn insert_before(&mut self, anchor: Handle, node: Handle) {
        let prev = self.linked(anchor).prev;
        let n = self.detached_mut(node);
        n.prev = prev;
        n.next = anchor.0;
        n.linked = true;

        self.node_mut(anchor).prev = node.0;
        if prev == NIL {
            self.head = node.0;
        } else {
            self.node_mut(Handle(prev)).next = node.0;
        }
        self.len += 1;
    }

    /// Unlinks `node`, joining its neighbours. The node stays allocated and
    /// detached, with both of its links cleared.
    pub fn remove(&mut self, node: Handle) {
        let (prev, next) = {
            let n = self.linked(node);
            (n.prev, n.next)
        };

        if prev == NIL {
            self.head = next;
        } else {
            self.node_mut(Handle(prev)).next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.node_mut(Handle(next)).prev = prev;
        }

        let n = self.node_mut(node);
        n.prev = NIL;
        n.next = NIL;
        n.linked = false;
        self.len -= 1;
    }

    /// Moves the linked `node` to the tail.
    pub fn move_to_tail(&mut self, node: Handle) {
        if self.tail == node.0 {
            return;
        }
        self.remove(node);
        self.insert_at_tail(node);
    }

    /// Allocates a node for `val` and links it at the tail.
    pub fn push_tail(&mut self, val: T) -> Handle {
        let node = self.alloc(val);
        self.insert_at_tail(node);
        node
    }

    /// Unlinks and frees the head node, returning its value.
    pub fn pop_head(&mut self) -> Option<T> {
        let first = self.first()?;
        self.remove(first);
        Some(self.release(first))
    }

    /// Drops every node, linked or detached. All handles become invalid.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free = NIL;
        self.head = NIL;
        self.tail = NIL;
        self.len = 0;
    }

    /// Iterates over linked values from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    fn link_sole(&mut self, node: Handle) {
        debug_assert!(self.is_empty());
        let n = self.detached_mut(node);
        n.prev = NIL;
        n.next = NIL;
        n.linked = true;
        self.head = node.0;
        self.tail = node.0;
        self.len += 1;
    }

    fn node(&self, node: Handle) -> &Node<T> {
        match self.slots.get(node.0) {
            Some(Slot::Occupied(n)) => n,
            _ => panic!("stale list handle {:?}", node),
        }
    }

    fn node_mut(&mut self, node: Handle) -> &mut Node<T> {
        match self.slots.get_mut(node.0) {
            Some(Slot::Occupied(n)) => n,
            _ => panic!("stale list handle {:?}", node),
        }
    }

    fn linked(&self, node: Handle) -> &Node<T> {
        let n = self.node(node);
        assert!(n.linked, "{:?} is not linked", node);
        n
    }

    fn detached_mut(&mut self, node: Handle) -> &mut Node<T> {
        let n = self.node_mut(node);
        assert!(!n.linked, "{:?} is already linked", node);
        n
    }
}

#[inline]
fn to_handle(idx: usize) -> Option<Handle> {
    (idx != NIL).then_some(Handle(idx))
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("length", &self.len)
            .field("slots", &self.slots.len())
            .finish()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the values of a [`List`], head to tail.
pub struct Iter<'a, T> {
    list: &'a List<T>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let n = self.list.node(Handle(self.front));
        self.front = n.next;
        self.remaining -= 1;
        Some(&n.val)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let n = self.list.node(Handle(self.back));
        self.back = n.prev;
        self.remaining -= 1;
        Some(&n.val)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;

    fn values(list: &List<u32>) -> Vec<u32> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_new_list_is_empty() {
        let list = List::<u32>::new();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_eq!(list.first(), None);
        assert_eq!(list.last(), None);
        assert_eq!(list.iter().next(), None);
    }

    #[test]
    fn test_insert_at_tail_keeps_order() {
        let mut list = List::new();
        let n1 = list.push_tail(10);
        let _n2 = list.push_tail(20);
        let n3 = list.push_tail(30);
        assert_eq!(list.len(), 3);
        assert_eq!(values(&list), vec![10, 20, 30]);
        assert_eq!(list.first(), Some(n1));
        assert_eq!(list.last(), Some(n3));
    }

    #[test]
    fn test_insert_at_head_on_empty_sets_both_ends() {
        let mut list = List::new();
        let node = list.alloc(7);
        list.insert_at_head(node);
        assert_eq!(list.first(), Some(node));
        assert_eq!(list.last(), Some(node));

        let front = list.alloc(3);
        list.insert_at_head(front);
        assert_eq!(values(&list), vec![3, 7]);
        assert_eq!(list.first(), Some(front));
        assert_eq!(list.last(), Some(node));
    }

    #[test]
    fn test_insert_before_and_after() {
        let mut list = List::new();
        let a = list.push_tail(1);
        let c = list.push_tail(3);

        let b = list.alloc(2);
        list.insert_after(a, b);
        assert_eq!(values(&list), vec![1, 2, 3]);

        let d = list.alloc(4);
        list.insert_after(c, d);
        assert_eq!(list.last(), Some(d));

        let z = list.alloc(0);
        list.insert_before(a, z);
        assert_eq!(list.first(), Some(z));
        assert_eq!(values(&list), vec![0, 1, 2, 3, 4]);

        assert_eq!(list.next(a), Some(b));
        assert_eq!(list.prev(a), Some(z));
        assert_eq!(list.prev(z), None);
        assert_eq!(list.next(d), None);
    }

    #[test]
    fn test_remove_middle_and_ends() {
        let mut list = List::new();
        let n1 = list.push_tail(10);
        let n2 = list.push_tail(20);
        let n3 = list.push_tail(30);

        list.remove(n2);
        assert_eq!(values(&list), vec![10, 30]);
        assert!(!list.is_linked(n2));
        assert_eq!(list.next(n1), Some(n3));

        list.remove(n1);
        assert_eq!(list.first(), Some(n3));
        list.remove(n3);
        assert!(list.is_empty());
        assert_eq!(list.first(), None);
        assert_eq!(list.last(), None);

        // Detached nodes keep their values until released.
        assert_eq!(list.release(n2), 20);
        assert_eq!(list.release(n1), 10);
        assert_eq!(list.release(n3), 30);
    }

    #[test]
    fn test_removed_node_can_be_reinserted() {
        let mut list = List::new();
        let n1 = list.push_tail(10);
        let n2 = list.push_tail(20);
        list.remove(n1);
        list.insert_after(n2, n1);
        assert_eq!(values(&list), vec![20, 10]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_move_to_tail() {
        let mut list = List::new();
        let n1 = list.push_tail(10);
        let n2 = list.push_tail(20);
        let n3 = list.push_tail(30);

        list.move_to_tail(n1);
        assert_eq!(values(&list), vec![20, 30, 10]);

        // Already the tail: no change.
        list.move_to_tail(n1);
        assert_eq!(values(&list), vec![20, 30, 10]);

        list.move_to_tail(n3);
        list.move_to_tail(n2);
        assert_eq!(values(&list), vec![10, 30, 20]);
        assert_eq!(list.len(), 3, "moving must not change length");
    }

    #[test]
    fn test_pop_head() {
        let mut list = List::new();
        assert_eq!(list.pop_head(), None);
        list.push_tail(10);
        list.push_tail(20);
        assert_eq!(list.pop_head(), Some(10));
        assert_eq!(list.pop_head(), Some(20));
        assert_eq!(list.pop_head(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_released_slots_are_reused() {
        let mut list = List::new();
        let n1 = list.push_tail(10);
        list.push_tail(20);
        list.remove(n1);
        list.release(n1);

        let n3 = list.push_tail(30);
        assert_eq!(n3, n1, "freed slot should be recycled");
        assert_eq!(list.slots.len(), 2);
        assert_eq!(values(&list), vec![20, 30]);
    }

    #[test]
    fn test_get_and_get_mut() {
        let mut list = List::new();
        let node = list.push_tail(String::from("test"));
        assert_eq!(list.get(node), "test");
        list.get_mut(node).push_str("_modified");
        assert_eq!(list.get(node), "test_modified");
    }

    #[test]
    fn test_iter_both_directions() {
        let mut list = List::new();
        for v in [1, 2, 3, 4] {
            list.push_tail(v);
        }
        let rev: Vec<u32> = list.iter().rev().copied().collect();
        assert_eq!(rev, vec![4, 3, 2, 1]);

        let mut it = list.iter();
        assert_eq!(it.len(), 4);
        assert_eq!(it.next(), Some(&1));
        assert_eq!(it.next_back(), Some(&4));
        assert_eq!(it.next(), Some(&2));
        assert_eq!(it.next_back(), Some(&3));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }

    #[test]
    fn test_clear() {
        let mut list = List::new();
        list.push_tail(10);
        list.push_tail(20);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.first(), None);
        list.push_tail(40);
        assert_eq!(values(&list), vec![40]);
    }

    #[test]
    fn test_links_are_consistent_after_many_moves() {
        let mut list = List::new();
        let handles: Vec<Handle> = (0..8).map(|v| list.push_tail(v)).collect();
        for (i, &h) in handles.iter().enumerate() {
            if i % 3 == 0 {
                list.move_to_tail(h);
            }
        }

        // Walking next from head must reach tail in exactly len steps.
        let mut steps = 0;
        let mut cursor = list.first();
        let mut last = None;
        while let Some(h) = cursor {
            steps += 1;
            last = Some(h);
            cursor = list.next(h);
        }
        assert_eq!(steps, list.len());
        assert_eq!(last, list.last());
    }

    #[test]
    #[should_panic(expected = "already linked")]
    fn test_inserting_linked_node_panics() {
        let mut list = List::new();
        let a = list.push_tail(1);
        let b = list.push_tail(2);
        list.insert_after(a, b);
    }

    #[test]
    #[should_panic(expected = "not linked")]
    fn test_removing_detached_node_panics() {
        let mut list = List::new();
        let a = list.alloc(1);
        list.remove(a);
    }

    #[test]
    #[should_panic(expected = "cannot release linked")]
    fn test_releasing_linked_node_panics() {
        let mut list = List::new();
        let a = list.push_tail(1);
        list.release(a);
    }

    #[test]
    #[should_panic(expected = "stale list handle")]
    fn test_released_handle_is_stale() {
        let mut list = List::new();
        let a = list.alloc(1);
        list.release(a);
        list.get(a);
    }
}
