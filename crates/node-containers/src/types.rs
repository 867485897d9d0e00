//! Capability traits shared by [`DList`](crate::DList) and
//! [`BsTree`](crate::BsTree).

use crate::cursor::{Cursor, Iter};

/// Size and clear contract.
pub trait Container {
    /// Exact number of live elements.
    fn size(&self) -> usize;

    fn empty(&self) -> bool {
        self.size() == 0
    }

    /// Drops every element. Calling it on an empty container is a no-op.
    fn clear(&mut self);
}

/// Begin/end cursor traversal.
///
/// Cursors are detached positions: they are dereferenced and moved through
/// the container that produced them. Handing a container a cursor taken from
/// another container, or dereferencing [`end`](Iterable::end), panics.
pub trait Iterable<T> {
    /// Position of the first element in traversal order; equals `end()` when
    /// the container is empty.
    fn begin(&self) -> Cursor;

    /// The one-past-last sentinel.
    fn end(&self) -> Cursor;

    fn get(&self, cursor: &Cursor) -> &T;

    fn get_mut(&mut self, cursor: &Cursor) -> &mut T;

    /// Moves `cursor` to the next element (prefix advance). An end cursor
    /// stays at end.
    fn advance<'c>(&self, cursor: &'c mut Cursor) -> &'c mut Cursor;

    /// Moves `cursor` forward and returns its previous position (postfix
    /// advance).
    fn advance_post(&self, cursor: &mut Cursor) -> Cursor {
        let previous = cursor.clone();
        self.advance(cursor);
        previous
    }

    fn iter(&self) -> Iter<'_, T, Self>
    where
        Self: Sized,
    {
        Iter::new(self)
    }

    /// Applies `f` to every element in traversal order.
    fn for_each_mut<F>(&mut self, mut f: F)
    where
        Self: Sized,
        F: FnMut(&mut T),
    {
        let end = self.end();
        let mut curr = self.begin();
        while curr != end {
            f(self.get_mut(&curr));
            self.advance(&mut curr);
        }
    }
}

/// External visitor pushed through a container by [`Visitable::accept`].
pub trait Visitor<T> {
    fn visit(&mut self, element: &mut T);

    /// Queried by the traversal before every candidate visit; never cached.
    fn finished(&self) -> bool {
        false
    }
}

impl<T, F> Visitor<T> for F
where
    F: FnMut(&mut T),
{
    fn visit(&mut self, element: &mut T) {
        self(element)
    }
}

pub trait Visitable<T> {
    fn accept<V>(&mut self, visitor: &mut V)
    where
        V: Visitor<T> + ?Sized;
}
