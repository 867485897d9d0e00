//! Unbalanced binary search tree.

pub mod node;
pub mod util;

use std::cmp::Ordering;
use std::fmt;

use log::{debug, trace};

use crate::arena::Arena;
use crate::cursor::{Cursor, Iter, OwnerId, TreeCursor};
use crate::error::ContainerError;
use crate::types::{Container, Iterable, Visitable, Visitor};

pub use node::{Node, TreeNode};
pub use util::{first, height, last, next, prev};

/// Binary search tree without rebalancing.
///
/// Values are unique: inserting a value that compares equal to a stored one
/// leaves the tree untouched. Each node keeps a parent link, which is what
/// lets cursors step to the in-order successor on their own.
///
/// Values reached through [`Iterable::get_mut`] or a [`Visitor`] may be
/// changed in place. Such changes must keep the relative order of all
/// values, otherwise later lookups and inserts search the wrong subtree.
pub struct BsTree<T> {
    arena: Arena<TreeNode<T>>,
    root: Option<u32>,
    owner: OwnerId,
}

impl<T> BsTree<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            owner: OwnerId::fresh(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            root: None,
            owner: OwnerId::fresh(),
        }
    }

    pub fn reserve(&mut self, additional: usize) {
        self.arena.reserve(additional);
    }

    pub fn try_reserve(&mut self, additional: usize) -> Result<(), ContainerError> {
        self.arena.try_reserve(additional)
    }

    /// Smallest value.
    pub fn min(&self) -> Option<&T> {
        first(&self.arena, self.root).map(|idx| &self.arena[idx].value)
    }

    /// Largest value.
    pub fn max(&self) -> Option<&T> {
        last(&self.arena, self.root).map(|idx| &self.arena[idx].value)
    }

    pub fn height(&self) -> usize {
        height(&self.arena, self.root)
    }

    fn cursor_at(&self, node: Option<u32>) -> Cursor {
        Cursor::Tree(TreeCursor::new(self.owner, &self.arena, node))
    }
}

impl<T: Ord> BsTree<T> {
    /// Inserts `value`, returning whether a node was added.
    ///
    /// Panics if the node cannot be allocated; see [`try_insert`](Self::try_insert).
    pub fn insert(&mut self, value: T) -> bool {
        match self.try_insert(value) {
            Ok(inserted) => inserted,
            Err(err) => panic!("{err}"),
        }
    }

    /// Inserts `value`, returning `Ok(false)` if an equal value is already
    /// stored.
    pub fn try_insert(&mut self, value: T) -> Result<bool, ContainerError> {
        let Some(mut curr) = self.root else {
            let idx = self.arena.alloc(TreeNode::new(value, None))?;
            self.root = Some(idx);
            return Ok(true);
        };
        loop {
            let node = &self.arena[curr];
            let (child, left) = match value.cmp(&node.value) {
                Ordering::Less => (node.l, true),
                Ordering::Greater => (node.r, false),
                Ordering::Equal => return Ok(false),
            };
            match child {
                Some(child) => curr = child,
                None => {
                    let idx = self.arena.alloc(TreeNode::new(value, None))?;
                    util::link_child(&mut self.arena, curr, idx, left);
                    return Ok(true);
                }
            }
        }
    }

    fn find_node(&self, value: &T) -> Option<u32> {
        let mut curr = self.root;
        while let Some(idx) = curr {
            let node = &self.arena[idx];
            curr = match value.cmp(&node.value) {
                Ordering::Less => node.l,
                Ordering::Greater => node.r,
                Ordering::Equal => return Some(idx),
            };
        }
        None
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find_node(value).is_some()
    }

    /// Cursor at the node holding `value`, or [`end`](Iterable::end) when
    /// the value is not stored.
    pub fn find(&self, value: &T) -> Cursor {
        self.cursor_at(self.find_node(value))
    }

    /// Checks ordering, parent links and the node count.
    pub fn assert_valid(&self) -> Result<(), String> {
        let mut seen = 0;
        let mut stack: Vec<u32> = self.root.into_iter().collect();
        if let Some(root) = self.root {
            if self.arena[root].p.is_some() {
                return Err(format!("root {root} has a parent link"));
            }
        }
        while let Some(idx) = stack.pop() {
            seen += 1;
            let node = &self.arena[idx];
            if let Some(l) = node.l {
                if self.arena[l].p != Some(idx) {
                    return Err(format!("left child {l} of {idx} does not point back"));
                }
                if self.arena[l].value >= node.value {
                    return Err(format!("left child {l} of {idx} is not smaller"));
                }
                stack.push(l);
            }
            if let Some(r) = node.r {
                if self.arena[r].p != Some(idx) {
                    return Err(format!("right child {r} of {idx} does not point back"));
                }
                if self.arena[r].value <= node.value {
                    return Err(format!("right child {r} of {idx} is not greater"));
                }
                stack.push(r);
            }
        }
        if seen != self.arena.len() {
            return Err(format!(
                "{seen} nodes reachable but {} allocated",
                self.arena.len()
            ));
        }
        let mut prev: Option<&T> = None;
        for value in self.iter() {
            if prev.is_some_and(|p| p >= value) {
                return Err("in-order walk is not strictly increasing".to_string());
            }
            prev = Some(value);
        }
        Ok(())
    }
}

impl<T: Ord + Clone> BsTree<T> {
    /// Deep copy that reports allocation failure instead of panicking.
    pub fn try_clone(&self) -> Result<Self, ContainerError> {
        let mut tree = Self::new();
        tree.copy_from(self)?;
        Ok(tree)
    }

    /// Re-inserts the source values in pre-order (node, left, right), which
    /// rebuilds the same shape.
    fn copy_from(&mut self, source: &Self) -> Result<(), ContainerError> {
        debug!("copying tree of {} nodes", source.size());
        self.arena.try_reserve(source.size())?;
        let mut stack: Vec<u32> = source.root.into_iter().collect();
        while let Some(idx) = stack.pop() {
            let node = &source.arena[idx];
            self.try_insert(node.value.clone())?;
            stack.extend(node.r);
            stack.extend(node.l);
        }
        Ok(())
    }
}

impl<T> Default for BsTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> Clone for BsTree<T> {
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(tree) => tree,
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

impl<T> Container for BsTree<T> {
    fn size(&self) -> usize {
        self.arena.len()
    }

    fn clear(&mut self) {
        if !self.arena.is_empty() {
            debug!("clearing tree of {} nodes", self.arena.len());
        }
        self.arena.clear();
        self.root = None;
        self.owner = OwnerId::fresh();
    }
}

impl<T> Iterable<T> for BsTree<T> {
    /// Leftmost node, i.e. the smallest value.
    fn begin(&self) -> Cursor {
        self.cursor_at(first(&self.arena, self.root))
    }

    fn end(&self) -> Cursor {
        self.cursor_at(None)
    }

    #[track_caller]
    fn get(&self, cursor: &Cursor) -> &T {
        let idx = cursor.tree(self.owner).node(&self.arena);
        &self.arena[idx].value
    }

    #[track_caller]
    fn get_mut(&mut self, cursor: &Cursor) -> &mut T {
        let idx = cursor.tree(self.owner).node(&self.arena);
        &mut self.arena[idx].value
    }

    #[track_caller]
    fn advance<'c>(&self, cursor: &'c mut Cursor) -> &'c mut Cursor {
        cursor.tree_mut(self.owner).advance(&self.arena);
        cursor
    }
}

impl<T> Visitable<T> for BsTree<T> {
    /// In-order walk that asks [`Visitor::finished`] before each node.
    ///
    /// This behaves like the recursion "walk left; if finished, return;
    /// visit; walk right". A `true` answer therefore skips the current node
    /// and its right subtree only: every pending ancestor still resumes and
    /// asks again before it gives up, and a subtree entered after the
    /// visitor finished is still descended along its left spine. Unlike
    /// [`DList`](crate::DList), the walk does not halt outright.
    ///
    /// An explicit stack stands in for the call stack, so list-shaped trees
    /// cannot overflow it.
    fn accept<V>(&mut self, visitor: &mut V)
    where
        V: Visitor<T> + ?Sized,
    {
        // Frames whose left subtree is being walked.
        let mut pending: Vec<u32> = Vec::new();
        let mut curr = self.root;
        loop {
            while let Some(idx) = curr {
                pending.push(idx);
                curr = self.arena[idx].l;
            }
            let Some(idx) = pending.pop() else {
                break;
            };
            if visitor.finished() {
                trace!("visitor finished before node {idx}");
                curr = None;
                continue;
            }
            visitor.visit(&mut self.arena[idx].value);
            curr = self.arena[idx].r;
        }
    }
}

impl<'a, T> IntoIterator for &'a BsTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, BsTree<T>>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self)
    }
}

impl<T: Ord> FromIterator<T> for BsTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for BsTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: PartialEq> PartialEq for BsTree<T> {
    /// Trees are equal when their in-order sequences are.
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for BsTree<T> {}

impl<T: fmt::Debug> fmt::Debug for BsTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BsTree<i32> {
        [5, 2, 8, 4, 1, 7, 6, 0, 9, 3].into_iter().collect()
    }

    #[test]
    fn insert_links_parents() {
        let tree = sample();
        assert_eq!(tree.size(), 10);
        assert_eq!(tree.assert_valid(), Ok(()));
        let root = tree.root.unwrap();
        assert_eq!(tree.arena[root].value, 5);
        assert_eq!(tree.arena[root].p, None);
    }

    #[test]
    fn successor_of_one_is_two() {
        let tree = sample();
        let one = tree.find_node(&1).unwrap();
        let two = next(&tree.arena, one).unwrap();
        assert_eq!(tree.arena[two].value, 2);
    }

    #[test]
    fn successor_of_four_climbs_to_five() {
        // 4 is the right child of 2, which is the left child of 5.
        let tree = sample();
        let four = tree.find_node(&4).unwrap();
        assert_eq!(tree.arena[four].r, None);
        let five = next(&tree.arena, four).unwrap();
        assert_eq!(Some(five), tree.root);
    }

    #[test]
    fn successor_of_max_is_none() {
        let tree = sample();
        let nine = tree.find_node(&9).unwrap();
        assert_eq!(next(&tree.arena, nine), None);
    }

    #[test]
    fn duplicate_insert_keeps_structure() {
        let mut tree = sample();
        let height = tree.height();
        assert!(!tree.insert(4));
        assert_eq!(tree.size(), 10);
        assert_eq!(tree.height(), height);
        assert_eq!(tree.try_insert(5), Ok(false));
    }

    #[test]
    fn copy_reproduces_shape() {
        let tree = sample();
        let copy = tree.clone();
        let mut a = vec![tree.root];
        let mut b = vec![copy.root];
        while let (Some(x), Some(y)) = (a.pop(), b.pop()) {
            match (x, y) {
                (None, None) => {}
                (Some(x), Some(y)) => {
                    let (nx, ny) = (&tree.arena[x], &copy.arena[y]);
                    assert_eq!(nx.value, ny.value);
                    a.extend([nx.l, nx.r]);
                    b.extend([ny.l, ny.r]);
                }
                _ => panic!("shapes differ"),
            }
        }
        assert!(a.is_empty() && b.is_empty());
    }

    #[test]
    fn clear_resets_root_and_is_idempotent() {
        let mut tree = sample();
        tree.clear();
        assert!(tree.empty());
        assert_eq!(tree.root, None);
        tree.clear();
        assert!(tree.empty());
        assert_eq!(tree.begin(), tree.end());
    }

    #[test]
    fn assert_valid_detects_broken_parent_link() {
        let mut tree = sample();
        let two = tree.find_node(&2).unwrap();
        tree.arena[two].p = None;
        assert!(tree.assert_valid().is_err());
    }
}
