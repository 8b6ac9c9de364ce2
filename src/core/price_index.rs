//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Ordered price -> LevelQueue index, backed by a hand-rolled skip list. One
// `PriceIndex` covers one side of one book; it is always kept sorted
// ascending by price. Which end counts as "best" depends on the side the
// caller is using it for (asks: ascending min is best, bids: ascending max
// is best) — `min`/`max` are both exposed and both O(1).
//--------------------------------------------------------------------------------------------------

use rand::Rng;
use slab::Slab;

use super::level_queue::LevelQueue;

const MAX_LEVEL: usize = 32;
const P: f64 = 0.5;

struct SkipListNode {
    price: i64,
    queue: LevelQueue,
    forward: Vec<Option<usize>>,
}

/// Skip-list-backed ordered map from price to the FIFO queue resting at that
/// price. Nodes own their `LevelQueue`; the order arena they point into is
/// owned by the `OrderBook`, not by this structure.
pub struct PriceIndex {
    nodes: Slab<SkipListNode>,
    head_forward: Vec<Option<usize>>,
    level: usize,
    tail: Option<usize>,
    len: usize,
}

impl Default for PriceIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceIndex {
    pub fn new() -> Self {
        Self {
            nodes: Slab::new(),
            head_forward: vec![None; MAX_LEVEL],
            level: 0,
            tail: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn forward_of(&self, pred: Option<usize>, level: usize) -> Option<usize> {
        match pred {
            None => self.head_forward[level],
            Some(k) => self.nodes[k].forward[level],
        }
    }

    fn set_forward(&mut self, pred: Option<usize>, level: usize, value: Option<usize>) {
        match pred {
            None => self.head_forward[level] = value,
            Some(k) => self.nodes[k].forward[level] = value,
        }
    }

    fn random_level(&self) -> usize {
        let mut level = 1;
        let mut rng = rand::thread_rng();
        while level < MAX_LEVEL && rng.r#gen::<f64>() < P {
            level += 1;
        }
        level
    }

    /// Finds the predecessor chain for `price`: for each level, the last node
    /// whose price is strictly less than `price`.
    fn find_predecessors(&self, price: i64) -> [Option<usize>; MAX_LEVEL] {
        let mut update = [None; MAX_LEVEL];
        let mut cur = None;
        for level in (0..=self.level.max(1) - 1).rev() {
            loop {
                match self.forward_of(cur, level) {
                    Some(next_key) if self.nodes[next_key].price < price => {
                        cur = Some(next_key);
                    }
                    _ => break,
                }
            }
            update[level] = cur;
        }
        update
    }

    /// Returns the arena key for `price`, creating an empty level if absent.
    pub fn get_or_create(&mut self, price: i64) -> usize {
        let update = self.find_predecessors(price);
        if let Some(candidate) = self.forward_of(update[0], 0) {
            if self.nodes[candidate].price == price {
                return candidate;
            }
        }

        let new_level = self.random_level();
        let mut update = update;
        if new_level > self.level {
            for level in self.level..new_level {
                update[level] = None;
            }
            self.level = new_level;
        }

        let mut forward = vec![None; new_level];
        for (level, slot) in forward.iter_mut().enumerate() {
            *slot = self.forward_of(update[level], level);
        }
        let key = self.nodes.insert(SkipListNode {
            price,
            queue: LevelQueue::new(),
            forward,
        });
        for level in 0..new_level {
            self.set_forward(update[level], level, Some(key));
        }
        if self.nodes[key].forward[0].is_none() {
            self.tail = Some(key);
        }
        self.len += 1;
        key
    }

    pub fn find(&self, price: i64) -> Option<usize> {
        let update = self.find_predecessors(price);
        match self.forward_of(update[0], 0) {
            Some(candidate) if self.nodes[candidate].price == price => Some(candidate),
            _ => None,
        }
    }

    pub fn queue(&self, key: usize) -> &LevelQueue {
        &self.nodes[key].queue
    }

    pub fn queue_mut(&mut self, key: usize) -> &mut LevelQueue {
        &mut self.nodes[key].queue
    }

    pub fn price_of(&self, key: usize) -> i64 {
        self.nodes[key].price
    }

    /// Removes an empty price level. No-op if the level does not exist or is
    /// not empty.
    pub fn remove(&mut self, price: i64) {
        let update = self.find_predecessors(price);
        let Some(candidate) = self.forward_of(update[0], 0) else {
            return;
        };
        if self.nodes[candidate].price != price || !self.nodes[candidate].queue.is_empty() {
            return;
        }

        let node_level = self.nodes[candidate].forward.len();
        for level in 0..node_level {
            let next = self.nodes[candidate].forward[level];
            self.set_forward(update[level], level, next);
        }
        if self.tail == Some(candidate) {
            self.tail = update[0];
        }
        self.nodes.remove(candidate);
        while self.level > 0 && self.head_forward[self.level - 1].is_none() {
            self.level -= 1;
        }
        self.len -= 1;
    }

    /// Lowest price currently present. O(1).
    pub fn min(&self) -> Option<usize> {
        self.head_forward[0]
    }

    /// Highest price currently present. O(1).
    pub fn max(&self) -> Option<usize> {
        self.tail
    }

    /// Ascending (price, queue) pairs, for snapshots.
    pub fn iter_ascending(&self) -> impl Iterator<Item = (i64, &LevelQueue)> {
        let mut cursor = self.head_forward[0];
        std::iter::from_fn(move || {
            let key = cursor?;
            let node = &self.nodes[key];
            cursor = node.forward[0];
            Some((node.price, &node.queue))
        })
    }
}
