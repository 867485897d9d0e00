//! Node-based generic containers behind shared capability traits.
//!
//! Two container shapes are provided:
//!
//! - [`DList`] — a doubly linked sequence with push/pop at both ends.
//! - [`BsTree`] — an unbalanced binary search tree with parent back-links,
//!   so in-order successors are found without an auxiliary stack.
//!
//! Both keep their nodes in an [`Arena`]; every "pointer" is an
//! `Option<u32>` slot index. Positions are handed out as detached
//! | [`Cursor`]s, which borrow nothing and are dereferenced and advanced |
//! through the container that produced them.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`arena`] | [`Arena`] slot storage with generations and a free list |
//! | [`cursor`] | [`Cursor`] (list-forward / tree-in-order strategies), [`Iter`] |
//! | [`types`] | [`Container`], [`Iterable`], [`Visitor`], [`Visitable`] |
//! | [`list`] | [`DList`] and its node type |
//! | [`tree`] | [`BsTree`], its node type and the `first` / `next` utilities |
//! | [`error`] | [`ContainerError`] |
//!
//! # Example
//!
//! ```
//! use node_containers::{BsTree, DList, Iterable, Visitable};
//!
//! let mut list: DList<i32> = (0..10).collect();
//! let mut it = list.begin();
//! list.advance(&mut it);
//! list.advance(&mut it);
//! *list.get_mut(&it) *= 10;
//! assert_eq!(list.iter().copied().take(3).collect::<Vec<_>>(), vec![0, 1, 20]);
//!
//! let mut tree: BsTree<i32> = [5, 2, 8].into_iter().collect();
//! let mut sum = 0;
//! tree.accept(&mut |x: &mut i32| sum += *x);
//! assert_eq!(sum, 15);
//! ```

pub mod arena;
pub mod cursor;
pub mod error;
pub mod list;
pub mod tree;
pub mod types;

pub use arena::Arena;
pub use cursor::{Cursor, Iter, ListCursor, TreeCursor};
pub use error::ContainerError;
pub use list::DList;
pub use tree::BsTree;
pub use types::{Container, Iterable, Visitable, Visitor};
