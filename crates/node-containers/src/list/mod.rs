//! Doubly linked list.

pub mod node;

use std::fmt;

use log::{debug, trace};

use crate::arena::Arena;
use crate::cursor::{Cursor, Iter, ListCursor, OwnerId};
use crate::error::ContainerError;
use crate::types::{Container, Iterable, Visitable, Visitor};

pub use node::ListNode;

/// Doubly linked sequence with O(1) push and pop at both ends.
///
/// `front` and `back` are either both set or both `None`, and the latter
/// holds exactly when the list is empty.
pub struct DList<T> {
    arena: Arena<ListNode<T>>,
    front: Option<u32>,
    back: Option<u32>,
    owner: OwnerId,
}

#[cold]
#[track_caller]
fn empty_list(op: &str) -> ! {
    panic!("`{op}` called on an empty list")
}

impl<T> DList<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            front: None,
            back: None,
            owner: OwnerId::fresh(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            front: None,
            back: None,
            owner: OwnerId::fresh(),
        }
    }

    pub fn reserve(&mut self, additional: usize) {
        self.arena.reserve(additional);
    }

    pub fn try_reserve(&mut self, additional: usize) -> Result<(), ContainerError> {
        self.arena.try_reserve(additional)
    }

    pub fn try_push_back(&mut self, value: T) -> Result<(), ContainerError> {
        let idx = self.arena.alloc(ListNode::new(value, None, self.back))?;
        match self.back {
            Some(back) => self.arena[back].next = Some(idx),
            None => self.front = Some(idx),
        }
        self.back = Some(idx);
        Ok(())
    }

    pub fn try_push_front(&mut self, value: T) -> Result<(), ContainerError> {
        let idx = self.arena.alloc(ListNode::new(value, self.front, None))?;
        match self.front {
            Some(front) => self.arena[front].prev = Some(idx),
            None => self.back = Some(idx),
        }
        self.front = Some(idx);
        Ok(())
    }

    /// Appends `value`. Panics if the node cannot be allocated.
    pub fn push_back(&mut self, value: T) {
        if let Err(err) = self.try_push_back(value) {
            panic!("{err}");
        }
    }

    /// Prepends `value`. Panics if the node cannot be allocated.
    pub fn push_front(&mut self, value: T) {
        if let Err(err) = self.try_push_front(value) {
            panic!("{err}");
        }
    }

    #[track_caller]
    pub fn pop_back(&mut self) -> T {
        let Some(back) = self.back else {
            empty_list("pop_back");
        };
        let node = self.arena.release(back);
        self.back = node.prev;
        match self.back {
            Some(prev) => self.arena[prev].next = None,
            None => self.front = None,
        }
        node.value
    }

    #[track_caller]
    pub fn pop_front(&mut self) -> T {
        let Some(front) = self.front else {
            empty_list("pop_front");
        };
        let node = self.arena.release(front);
        self.front = node.next;
        match self.front {
            Some(next) => self.arena[next].prev = None,
            None => self.back = None,
        }
        node.value
    }

    #[track_caller]
    pub fn front(&self) -> &T {
        match self.front {
            Some(idx) => &self.arena[idx].value,
            None => empty_list("front"),
        }
    }

    #[track_caller]
    pub fn front_mut(&mut self) -> &mut T {
        match self.front {
            Some(idx) => &mut self.arena[idx].value,
            None => empty_list("front_mut"),
        }
    }

    #[track_caller]
    pub fn back(&self) -> &T {
        match self.back {
            Some(idx) => &self.arena[idx].value,
            None => empty_list("back"),
        }
    }

    #[track_caller]
    pub fn back_mut(&mut self) -> &mut T {
        match self.back {
            Some(idx) => &mut self.arena[idx].value,
            None => empty_list("back_mut"),
        }
    }

    fn cursor_at(&self, node: Option<u32>) -> Cursor {
        Cursor::List(ListCursor::new(self.owner, &self.arena, node))
    }

    /// Checks that `next` and `prev` mirror each other and that the chain
    /// covers every allocated node.
    pub fn assert_valid(&self) -> Result<(), String> {
        if self.front.is_none() != self.back.is_none() {
            return Err("exactly one of front/back is set".to_string());
        }
        let mut seen = 0;
        let mut prev = None;
        let mut curr = self.front;
        while let Some(idx) = curr {
            seen += 1;
            if seen > self.arena.len() {
                return Err("next links form a cycle".to_string());
            }
            let node = &self.arena[idx];
            if node.prev != prev {
                return Err(format!("node {idx} has a prev link that does not mirror next"));
            }
            prev = Some(idx);
            curr = node.next;
        }
        if prev != self.back {
            return Err("walking next links does not end at back".to_string());
        }
        if seen != self.arena.len() {
            return Err(format!(
                "{seen} nodes reachable but {} allocated",
                self.arena.len()
            ));
        }
        Ok(())
    }
}

impl<T: Clone> DList<T> {
    /// Deep copy that reports allocation failure instead of panicking.
    pub fn try_clone(&self) -> Result<Self, ContainerError> {
        let mut list = Self::new();
        list.copy_from(self)?;
        Ok(list)
    }

    /// Back-pushes every source element, front to back.
    fn copy_from(&mut self, source: &Self) -> Result<(), ContainerError> {
        debug!("copying list of {} nodes", source.size());
        self.arena.try_reserve(source.size())?;
        for value in source.iter() {
            self.try_push_back(value.clone())?;
        }
        Ok(())
    }
}

impl<T> Default for DList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DList<T> {
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(list) => list,
            Err(err) => panic!("{err}"),
        }
    }

    /// Assignment: drop every node, then copy `source`.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        if let Err(err) = self.copy_from(source) {
            panic!("{err}");
        }
    }
}

impl<T> Container for DList<T> {
    fn size(&self) -> usize {
        self.arena.len()
    }

    fn clear(&mut self) {
        if !self.arena.is_empty() {
            debug!("clearing list of {} nodes", self.arena.len());
        }
        self.arena.clear();
        self.front = None;
        self.back = None;
        self.owner = OwnerId::fresh();
    }
}

impl<T> Iterable<T> for DList<T> {
    fn begin(&self) -> Cursor {
        self.cursor_at(self.front)
    }

    fn end(&self) -> Cursor {
        self.cursor_at(None)
    }

    #[track_caller]
    fn get(&self, cursor: &Cursor) -> &T {
        let idx = cursor.list(self.owner).node(&self.arena);
        &self.arena[idx].value
    }

    #[track_caller]
    fn get_mut(&mut self, cursor: &Cursor) -> &mut T {
        let idx = cursor.list(self.owner).node(&self.arena);
        &mut self.arena[idx].value
    }

    #[track_caller]
    fn advance<'c>(&self, cursor: &'c mut Cursor) -> &'c mut Cursor {
        cursor.list_mut(self.owner).advance(&self.arena);
        cursor
    }
}

impl<T> Visitable<T> for DList<T> {
    /// Front-to-back walk that stops for good the first time
    /// [`Visitor::finished`] answers `true`.
    fn accept<V>(&mut self, visitor: &mut V)
    where
        V: Visitor<T> + ?Sized,
    {
        let mut curr = self.front;
        while let Some(idx) = curr {
            if visitor.finished() {
                trace!("visitor finished before node {idx}");
                return;
            }
            let node = &mut self.arena[idx];
            visitor.visit(&mut node.value);
            curr = node.next;
        }
    }
}

impl<'a, T> IntoIterator for &'a DList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, DList<T>>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self)
    }
}

impl<T> FromIterator<T> for DList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for DList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T: PartialEq> PartialEq for DList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for DList<T> {}

impl<T: fmt::Debug> fmt::Debug for DList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_both_ends_links_nodes() {
        let mut list = DList::new();
        list.push_back(2);
        list.push_front(1);
        list.push_back(3);
        assert_eq!(list.assert_valid(), Ok(()));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!((*list.front(), *list.back()), (1, 3));
    }

    #[test]
    fn pop_to_empty_resets_both_ends() {
        let mut list: DList<i32> = (0..3).collect();
        assert_eq!(list.pop_back(), 2);
        assert_eq!(list.pop_front(), 0);
        assert_eq!(list.front, list.back);
        assert_eq!(list.pop_back(), 1);
        assert_eq!((list.front, list.back), (None, None));
        assert!(list.empty());
        assert_eq!(list.assert_valid(), Ok(()));
    }

    #[test]
    fn popped_slots_are_reused() {
        let mut list: DList<i32> = (0..4).collect();
        list.pop_front();
        list.pop_front();
        list.push_back(10);
        list.push_front(-1);
        assert_eq!(list.arena.len(), 4);
        assert_eq!(list.assert_valid(), Ok(()));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![-1, 2, 3, 10]);
    }

    #[test]
    fn assert_valid_detects_broken_prev_link() {
        let mut list: DList<i32> = (0..3).collect();
        let back = list.back.unwrap();
        list.arena[back].prev = None;
        assert!(list.assert_valid().is_err());
    }

    #[test]
    #[should_panic(expected = "`pop_front` called on an empty list")]
    fn pop_front_on_empty_panics() {
        DList::<i32>::new().pop_front();
    }

    #[test]
    #[should_panic(expected = "`back` called on an empty list")]
    fn back_on_empty_panics() {
        let list = DList::<i32>::new();
        let _ = list.back();
    }
}
