//! Capped, ordered entity collection for probabilistically spawned entities.
//!
//! Insertion order is draw order. When full, the pool either drops the
//! oldest entity to make room or rejects the newcomer.

use std::collections::VecDeque;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    #[default]
    EvictOldest,
    Reject,
}

#[derive(Debug, Clone)]
pub struct EntityPool<T> {
    items: VecDeque<T>,
    capacity: usize,
    policy: OverflowPolicy,
    evicted: u64,
    rejected: u64,
}

impl<T> EntityPool<T> {
    pub fn new(capacity: usize, policy: OverflowPolicy) -> Self {
        Self {
            items: VecDeque::new(),
            capacity: capacity.max(1),
            policy,
            evicted: 0,
            rejected: 0,
        }
    }

    /// Adds an entity. Returns false if the pool was full and rejected it.
    pub fn spawn(&mut self, item: T) -> bool {
        if self.items.len() >= self.capacity {
            match self.policy {
                OverflowPolicy::EvictOldest => {
                    self.items.pop_front();
                    self.evicted += 1;
                    if self.evicted.is_power_of_two() {
                        log::debug!(
                            "Entity pool at capacity {}, {} evictions so far",
                            self.capacity,
                            self.evicted
                        );
                    }
                }
                OverflowPolicy::Reject => {
                    self.rejected += 1;
                    return false;
                }
            }
        }
        self.items.push_back(item);
        true
    }

    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.items.retain(keep);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn usage(&self) -> PoolUsage {
        PoolUsage {
            len: self.items.len(),
            capacity: self.capacity,
            evicted: self.evicted,
            rejected: self.rejected,
        }
    }
}

/// Fill level and overflow counters of one pool, for the debug overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolUsage {
    pub len: usize,
    pub capacity: usize,
    /// Entities dropped to make room under `EvictOldest`.
    pub evicted: u64,
    /// Spawns refused under `Reject`.
    pub rejected: u64,
}
