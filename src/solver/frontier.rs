//! Frontier disciplines. Entries only point into the search arena; the arena owns the nodes.
use num_traits::Zero;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrontierEntry<C> {
    /// Arena index of the node this entry refers to.
    pub index: usize,
    /// Cost-so-far when the entry was pushed.
    pub cost: C,
    /// Heuristic estimate of the remaining cost.
    pub estimate: C,
    /// Push counter, unique within a run.
    pub seq: usize,
}

impl<C: Zero> FrontierEntry<C> {
    pub fn root(index: usize, estimate: C) -> FrontierEntry<C> {
        FrontierEntry {
            index,
            cost: C::zero(),
            estimate,
            seq: 0,
        }
    }
}

pub trait Frontier<C> {
    fn push(&mut self, entry: FrontierEntry<C>);
    fn pop(&mut self) -> Option<FrontierEntry<C>>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First in, first out.
#[derive(Clone, Debug)]
pub struct FifoFrontier<C> {
    queue: VecDeque<FrontierEntry<C>>,
}

impl<C> Default for FifoFrontier<C> {
    fn default() -> Self {
        FifoFrontier {
            queue: VecDeque::new(),
        }
    }
}

impl<C> Frontier<C> for FifoFrontier<C> {
    fn push(&mut self, entry: FrontierEntry<C>) {
        self.queue.push_back(entry);
    }
    fn pop(&mut self) -> Option<FrontierEntry<C>> {
        self.queue.pop_front()
    }
    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Last in, first out.
#[derive(Clone, Debug)]
pub struct LifoFrontier<C> {
    stack: Vec<FrontierEntry<C>>,
}

impl<C> Default for LifoFrontier<C> {
    fn default() -> Self {
        LifoFrontier { stack: Vec::new() }
    }
}

impl<C> Frontier<C> for LifoFrontier<C> {
    fn push(&mut self, entry: FrontierEntry<C>) {
        self.stack.push(entry);
    }
    fn pop(&mut self) -> Option<FrontierEntry<C>> {
        self.stack.pop()
    }
    fn len(&self) -> usize {
        self.stack.len()
    }
}

struct SmallestCostHolder<C> {
    estimated_cost: C,
    entry: FrontierEntry<C>,
}

impl<C: Ord> Eq for SmallestCostHolder<C> {}

impl<C: Ord> PartialEq for SmallestCostHolder<C> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<C: Ord> PartialOrd for SmallestCostHolder<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for SmallestCostHolder<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for the max-heap: smallest estimated total first, then the smallest
        // remaining estimate, then the earliest push.
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| other.entry.estimate.cmp(&self.entry.estimate))
            .then_with(|| other.entry.seq.cmp(&self.entry.seq))
    }
}

/// Min-priority on `cost + estimate`. Entries are never updated in place: a cheaper rediscovery
/// is pushed as a new entry and the stale one is skipped by the caller when it surfaces.
pub struct PriorityFrontier<C> {
    heap: BinaryHeap<SmallestCostHolder<C>>,
}

impl<C: Ord> Default for PriorityFrontier<C> {
    fn default() -> Self {
        PriorityFrontier {
            heap: BinaryHeap::new(),
        }
    }
}

impl<C: Ord + Copy + std::ops::Add<Output = C>> Frontier<C> for PriorityFrontier<C> {
    fn push(&mut self, entry: FrontierEntry<C>) {
        self.heap.push(SmallestCostHolder {
            estimated_cost: entry.cost + entry.estimate,
            entry,
        });
    }
    fn pop(&mut self) -> Option<FrontierEntry<C>> {
        self.heap.pop().map(|holder| holder.entry)
    }
    fn len(&self) -> usize {
        self.heap.len()
    }
}
