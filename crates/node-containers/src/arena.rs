//! Slot arena backing both containers.
//!
//! Nodes never hold references to each other; they hold `Option<u32>`
//! indices into an [`Arena`]. A released slot goes onto a free list and its
//! generation is bumped, so a position recorded before the release can be
//! told apart from a node that later reuses the slot.

use std::ops::{Index, IndexMut};

use log::warn;

use crate::error::ContainerError;

/// Number of addressable slots (indices are `u32`).
pub const MAX_NODES: usize = u32::MAX as usize;

#[derive(Clone, Debug)]
struct Slot<N> {
    generation: u32,
    node: Option<N>,
}

#[derive(Clone, Debug)]
pub struct Arena<N> {
    slots: Vec<Slot<N>>,
    vacant: Vec<u32>,
    len: usize,
}

#[cold]
#[track_caller]
fn vacant_slot(idx: u32) -> ! {
    panic!("arena slot {idx} does not hold a live node")
}

impl<N> Arena<N> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            vacant: Vec::new(),
            len: 0,
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Makes room for `additional` more nodes, counting vacant slots first.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), ContainerError> {
        let needed = additional.saturating_sub(self.vacant.len());
        if self.slots.len().saturating_add(needed) > MAX_NODES {
            return Err(ContainerError::CapacityExceeded { max: MAX_NODES });
        }
        self.slots.try_reserve(needed)?;
        Ok(())
    }

    pub fn reserve(&mut self, additional: usize) {
        if let Err(err) = self.try_reserve(additional) {
            panic!("{err}");
        }
    }

    /// Stores `node` and returns its slot index.
    pub fn alloc(&mut self, node: N) -> Result<u32, ContainerError> {
        if let Some(idx) = self.vacant.pop() {
            let slot = &mut self.slots[idx as usize];
            debug_assert!(slot.node.is_none());
            slot.node = Some(node);
            self.len += 1;
            return Ok(idx);
        }
        if self.slots.len() >= MAX_NODES {
            warn!("arena is full at {MAX_NODES} nodes");
            return Err(ContainerError::CapacityExceeded { max: MAX_NODES });
        }
        if let Err(err) = self.slots.try_reserve(1) {
            warn!("arena growth failed at {} nodes: {err}", self.len);
            return Err(err.into());
        }
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        self.len += 1;
        Ok((self.slots.len() - 1) as u32)
    }

    /// Removes the node at `idx` and hands it back. Panics if the slot is vacant.
    #[track_caller]
    pub fn release(&mut self, idx: u32) -> N {
        let Some(node) = self
            .slots
            .get_mut(idx as usize)
            .and_then(|slot| slot.node.take())
        else {
            vacant_slot(idx);
        };
        let slot = &mut self.slots[idx as usize];
        slot.generation = slot.generation.wrapping_add(1);
        self.vacant.push(idx);
        self.len -= 1;
        node
    }

    pub fn get(&self, idx: u32) -> Option<&N> {
        self.slots.get(idx as usize)?.node.as_ref()
    }

    pub fn get_mut(&mut self, idx: u32) -> Option<&mut N> {
        self.slots.get_mut(idx as usize)?.node.as_mut()
    }

    /// Generation of the slot at `idx`, or `None` past the end of the arena.
    pub fn generation(&self, idx: u32) -> Option<u32> {
        self.slots.get(idx as usize).map(|slot| slot.generation)
    }

    /// Whether `idx` holds a live node that was stored under `generation`.
    pub fn is_live(&self, idx: u32, generation: u32) -> bool {
        self.slots
            .get(idx as usize)
            .is_some_and(|slot| slot.generation == generation && slot.node.is_some())
    }

    /// Drops every live node and forgets all slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.vacant.clear();
        self.len = 0;
    }
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Index<u32> for Arena<N> {
    type Output = N;

    #[track_caller]
    fn index(&self, idx: u32) -> &N {
        match self.get(idx) {
            Some(node) => node,
            None => vacant_slot(idx),
        }
    }
}

impl<N> IndexMut<u32> for Arena<N> {
    #[track_caller]
    fn index_mut(&mut self, idx: u32) -> &mut N {
        match self.get_mut(idx) {
            Some(node) => node,
            None => vacant_slot(idx),
        }
    }
}
