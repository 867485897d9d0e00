//! Arena utilities over [`Node`] links.
//!
//! All functions work on indices and take the arena by reference. Successor
//! and predecessor only follow child and parent links, so no auxiliary stack
//! is needed to step through the tree in order.

use super::node::Node;
use crate::arena::Arena;

#[inline]
pub(crate) fn get_p<N: Node>(arena: &Arena<N>, idx: u32) -> Option<u32> {
    arena[idx].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &Arena<N>, idx: u32) -> Option<u32> {
    arena[idx].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &Arena<N>, idx: u32) -> Option<u32> {
    arena[idx].r()
}

/// Leftmost node under `root`.
pub fn first<N: Node>(arena: &Arena<N>, root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_l(arena, idx) {
            Some(l) => curr = Some(l),
            None => return Some(idx),
        }
    }
    curr
}

/// Rightmost node under `root`.
pub fn last<N: Node>(arena: &Arena<N>, root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_r(arena, idx) {
            Some(r) => curr = Some(r),
            None => return Some(idx),
        }
    }
    curr
}

/// In-order successor.
///
/// With a right child, the successor is the leftmost node of the right
/// subtree. Otherwise climb until we come up out of a left child; that parent
/// is the successor. Reaching the root without doing so means `curr` was the
/// last node.
pub fn next<N: Node>(arena: &Arena<N>, curr: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, curr) {
        return first(arena, Some(r));
    }
    left_up(arena, curr)
}

fn left_up<N: Node>(arena: &Arena<N>, mut curr: u32) -> Option<u32> {
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            return Some(pi);
        }
        curr = pi;
        p = get_p(arena, pi);
    }
    None
}

/// In-order predecessor.
pub fn prev<N: Node>(arena: &Arena<N>, mut curr: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, curr) {
        return last(arena, Some(l));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            return Some(pi);
        }
        curr = pi;
        p = get_p(arena, pi);
    }
    None
}

/// Number of edges on the longest root-to-leaf path, plus one; `0` for an
/// empty tree.
pub fn height<N: Node>(arena: &Arena<N>, root: Option<u32>) -> usize {
    let mut max = 0;
    let mut stack: Vec<(u32, usize)> = root.map(|r| (r, 1)).into_iter().collect();
    while let Some((idx, depth)) = stack.pop() {
        max = max.max(depth);
        stack.extend(get_l(arena, idx).map(|l| (l, depth + 1)));
        stack.extend(get_r(arena, idx).map(|r| (r, depth + 1)));
    }
    max
}

/// Attaches the fresh node `child` under `parent` on the given side.
pub(crate) fn link_child<N: Node>(arena: &mut Arena<N>, parent: u32, child: u32, left: bool) {
    if left {
        arena[parent].set_l(Some(child));
    } else {
        arena[parent].set_r(Some(child));
    }
    arena[child].set_p(Some(parent));
}
