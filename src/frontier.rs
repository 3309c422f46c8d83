//! The search frontier: a min-priority queue that is stable among equal costs.
//!
//! Popping always yields the entry with the smallest cost and, among equal costs, the one that
//! was pushed first. This is exactly what re-sorting a list by cost with a stable sort and
//! taking its head would do on every iteration, without paying for the sort.
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use num_traits::Zero;

struct SmallestCostHolder<N, C> {
    cost: C,
    sequence: u64,
    node: N,
}

impl<N, C: PartialEq> Eq for SmallestCostHolder<N, C> {}

impl<N, C: PartialEq> PartialEq for SmallestCostHolder<N, C> {
    fn eq(&self, other: &Self) -> bool {
        self.cost.eq(&other.cost) && self.sequence == other.sequence
    }
}

impl<N, C: Ord> PartialOrd for SmallestCostHolder<N, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N, C: Ord> Ord for SmallestCostHolder<N, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys since BinaryHeap is a max-heap: lowest cost first, then
        // earliest insertion.
        match other.cost.cmp(&self.cost) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

/// Multiset of `(node, cost)` entries. The same node may be queued several times; callers skip
/// superseded entries when they pop them.
pub struct Frontier<N, C> {
    heap: BinaryHeap<SmallestCostHolder<N, C>>,
    next_sequence: u64,
}

impl<N, C: Ord> Default for Frontier<N, C> {
    fn default() -> Self {
        Frontier {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }
}

impl<N, C: Ord + Zero> Frontier<N, C> {
    /// A frontier holding only `start` at zero cost.
    pub fn seeded(start: N) -> Self {
        let mut frontier = Self::default();
        frontier.push(start, C::zero());
        frontier
    }
}

impl<N, C: Ord> Frontier<N, C> {
    pub fn push(&mut self, node: N, cost: C) {
        self.heap.push(SmallestCostHolder {
            cost,
            sequence: self.next_sequence,
            node,
        });
        self.next_sequence += 1;
    }

    pub fn pop(&mut self) -> Option<(N, C)> {
        self.heap.pop().map(|h| (h.node, h.cost))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_lowest_cost_first() {
        let mut frontier = Frontier::default();
        frontier.push('a', 3);
        frontier.push('b', 1);
        frontier.push('c', 2);
        assert_eq!(frontier.pop(), Some(('b', 1)));
        assert_eq!(frontier.pop(), Some(('c', 2)));
        assert_eq!(frontier.pop(), Some(('a', 3)));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn equal_costs_pop_in_insertion_order() {
        let mut frontier = Frontier::seeded('s');
        for (node, cost) in [('d', 2), ('a', 1), ('e', 2), ('b', 1), ('c', 1)] {
            frontier.push(node, cost);
        }
        assert_eq!(frontier.len(), 6);
        let order: String = std::iter::from_fn(|| frontier.pop().map(|(n, _)| n)).collect();
        assert_eq!(order, "sabcde");
        assert!(frontier.is_empty());
    }

    /// Interleaved pushes and pops must match a stable sort by cost followed by taking the head.
    #[test]
    fn matches_stable_resort() {
        let pushes: [&[(u32, u32)]; 4] = [
            &[(0, 2), (1, 1), (2, 2)],
            &[(3, 1), (4, 3)],
            &[(5, 2), (6, 1)],
            &[(7, 2)],
        ];
        let mut frontier = Frontier::default();
        let mut list: Vec<(u32, u32)> = Vec::new();
        for batch in pushes {
            for &(node, cost) in batch {
                frontier.push(node, cost);
                list.push((node, cost));
            }
            list.sort_by_key(|&(_, cost)| cost);
            let expected = list.remove(0);
            assert_eq!(frontier.pop(), Some(expected));
        }
        while !list.is_empty() {
            list.sort_by_key(|&(_, cost)| cost);
            assert_eq!(frontier.pop(), Some(list.remove(0)));
        }
        assert_eq!(frontier.pop(), None);
    }
}
