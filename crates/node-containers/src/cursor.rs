//! Iterator core.
//!
//! A [`Cursor`] is one of the traversal strategies below, tagged by the
//! container shape that produced it:
//!
//! - [`ListCursor`] — list-forward: follow `next` links from the front node.
//! - [`TreeCursor`] — tree-in-order-successor: start at the leftmost node and
//!   step with [`tree::next`](crate::tree::next), which only needs parent
//!   links.
//!
//! Strategies hold the node index (`None` is the end sentinel) but never a
//! borrow of the nodes, so they are moved by handing them the arena.

use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::arena::Arena;
use crate::list::ListNode;
use crate::tree::{self, TreeNode};
use crate::types::Iterable;

/// Identity of one container instance.
///
/// Containers take a fresh id when created, cloned or cleared, so positions
/// recorded before a `clear` never match positions handed out after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OwnerId(u64);

impl OwnerId {
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Arena slot plus the generation it had when the position was taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Position {
    idx: u32,
    generation: u32,
}

impl Position {
    fn at<N>(arena: &Arena<N>, idx: u32) -> Self {
        Self {
            idx,
            generation: arena.generation(idx).unwrap_or_default(),
        }
    }

    #[track_caller]
    fn resolve<N>(self, arena: &Arena<N>) -> u32 {
        if !arena.is_live(self.idx, self.generation) {
            stale_cursor(self.idx);
        }
        self.idx
    }
}

/// End sentinels of one kind are interchangeable. Live positions only match
/// within the container that handed them out.
fn same_position(a: (OwnerId, Option<Position>), b: (OwnerId, Option<Position>)) -> bool {
    match (a.1, b.1) {
        (None, None) => true,
        (Some(x), Some(y)) => a.0 == b.0 && x == y,
        _ => false,
    }
}

#[cold]
#[track_caller]
fn stale_cursor(idx: u32) -> ! {
    panic!("cursor refers to node {idx}, which has been removed from the container")
}

#[cold]
#[track_caller]
fn end_access() -> ! {
    panic!("cannot dereference the end cursor")
}

#[cold]
#[track_caller]
fn foreign_cursor() -> ! {
    panic!("cursor was not produced by this container")
}

/// List-forward traversal state.
#[derive(Clone, Debug)]
pub struct ListCursor {
    owner: OwnerId,
    node: Option<Position>,
}

impl ListCursor {
    pub(crate) fn new<T>(owner: OwnerId, arena: &Arena<ListNode<T>>, node: Option<u32>) -> Self {
        Self {
            owner,
            node: node.map(|idx| Position::at(arena, idx)),
        }
    }

    /// Arena index of the current node; panics at end or on a removed node.
    #[track_caller]
    pub(crate) fn node<T>(&self, arena: &Arena<ListNode<T>>) -> u32 {
        match self.node {
            Some(pos) => pos.resolve(arena),
            None => end_access(),
        }
    }

    #[track_caller]
    pub(crate) fn advance<T>(&mut self, arena: &Arena<ListNode<T>>) {
        if let Some(pos) = self.node {
            let next = arena[pos.resolve(arena)].next;
            self.node = next.map(|idx| Position::at(arena, idx));
        }
    }

    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }
}

impl PartialEq for ListCursor {
    fn eq(&self, other: &Self) -> bool {
        same_position((self.owner, self.node), (other.owner, other.node))
    }
}

impl Eq for ListCursor {}

/// Tree-in-order-successor traversal state.
#[derive(Clone, Debug)]
pub struct TreeCursor {
    owner: OwnerId,
    node: Option<Position>,
}

impl TreeCursor {
    pub(crate) fn new<T>(owner: OwnerId, arena: &Arena<TreeNode<T>>, node: Option<u32>) -> Self {
        Self {
            owner,
            node: node.map(|idx| Position::at(arena, idx)),
        }
    }

    #[track_caller]
    pub(crate) fn node<T>(&self, arena: &Arena<TreeNode<T>>) -> u32 {
        match self.node {
            Some(pos) => pos.resolve(arena),
            None => end_access(),
        }
    }

    #[track_caller]
    pub(crate) fn advance<T>(&mut self, arena: &Arena<TreeNode<T>>) {
        if let Some(pos) = self.node {
            let next = tree::next(arena, pos.resolve(arena));
            self.node = next.map(|idx| Position::at(arena, idx));
        }
    }

    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }
}

impl PartialEq for TreeCursor {
    fn eq(&self, other: &Self) -> bool {
        same_position((self.owner, self.node), (other.owner, other.node))
    }
}

impl Eq for TreeCursor {}

/// A position in some container's traversal order.
///
/// Two cursors are equal when they come from the same strategy and are both
/// the end sentinel, or point at the same node of the same container. Any
/// list end equals any other list end. Comparing a list cursor with a tree
/// cursor is simply `false`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cursor {
    List(ListCursor),
    Tree(TreeCursor),
}

impl Cursor {
    pub fn is_end(&self) -> bool {
        match self {
            Cursor::List(c) => c.is_end(),
            Cursor::Tree(c) => c.is_end(),
        }
    }

    #[track_caller]
    pub(crate) fn list(&self, owner: OwnerId) -> &ListCursor {
        match self {
            Cursor::List(c) if c.owner == owner => c,
            _ => foreign_cursor(),
        }
    }

    #[track_caller]
    pub(crate) fn list_mut(&mut self, owner: OwnerId) -> &mut ListCursor {
        match self {
            Cursor::List(c) if c.owner == owner => c,
            _ => foreign_cursor(),
        }
    }

    #[track_caller]
    pub(crate) fn tree(&self, owner: OwnerId) -> &TreeCursor {
        match self {
            Cursor::Tree(c) if c.owner == owner => c,
            _ => foreign_cursor(),
        }
    }

    #[track_caller]
    pub(crate) fn tree_mut(&mut self, owner: OwnerId) -> &mut TreeCursor {
        match self {
            Cursor::Tree(c) if c.owner == owner => c,
            _ => foreign_cursor(),
        }
    }
}

/// Walks a half-open `[curr, end)` cursor range of a container.
pub struct Iter<'a, T, C: ?Sized> {
    container: &'a C,
    curr: Cursor,
    end: Cursor,
    _marker: PhantomData<&'a T>,
}

impl<'a, T, C> Iter<'a, T, C>
where
    C: Iterable<T> + ?Sized,
{
    pub fn new(container: &'a C) -> Self {
        Self::between(container, container.begin(), container.end())
    }

    /// Iterates from `from` up to, but excluding, `to`. If `to` is never
    /// reached the walk stops at the container's end.
    pub fn between(container: &'a C, from: Cursor, to: Cursor) -> Self {
        Self {
            container,
            curr: from,
            end: to,
            _marker: PhantomData,
        }
    }
}

impl<'a, T, C> Iterator for Iter<'a, T, C>
where
    T: 'a,
    C: Iterable<T> + ?Sized,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.curr == self.end || self.curr.is_end() {
            return None;
        }
        let container: &'a C = self.container;
        let item = container.get(&self.curr);
        container.advance(&mut self.curr);
        Some(item)
    }
}

impl<'a, T, C> FusedIterator for Iter<'a, T, C>
where
    T: 'a,
    C: Iterable<T> + ?Sized,
{
}

impl<T, C: ?Sized> Clone for Iter<'_, T, C> {
    fn clone(&self) -> Self {
        Self {
            container: self.container,
            curr: self.curr.clone(),
            end: self.end.clone(),
            _marker: PhantomData,
        }
    }
}
