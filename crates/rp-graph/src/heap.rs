//! `FrontierQueue` — indexed binary min-heap over `(NodeId, distance)`.
//!
//! # Why this exists
//!
//! Dijkstra improves a frontier node's tentative distance many times on
//! dense graphs.  A plain `BinaryHeap` forces either re-insertion (stale
//! duplicate entries, extra pops) or an O(n) `retain`.  Keeping a
//! node → heap-slot map alongside the heap array gives a true O(log n)
//! `decrease`, and guarantees every node occupies at most one heap entry —
//! `pop` can never return a stale distance.
//!
//! Ordering is by distance only; ties come out in unspecified order.
//! The slot map is sized once to the graph's node count, so membership
//! checks are O(1) array reads.

use rp_core::NodeId;

/// Sentinel in the slot map: node is not currently queued.
const NO_SLOT: u32 = u32::MAX;

/// Min-priority queue over `(distance, node)` with decrease-key support.
///
/// Dijkstra-engine-private: it knows nothing about edges or paths.
pub(crate) struct FrontierQueue {
    /// Binary heap array, min distance at index 0.
    heap: Vec<(u32, NodeId)>,
    /// `slot[node] = heap index of that node`, or `NO_SLOT`.
    slot: Vec<u32>,
}

impl FrontierQueue {
    pub(crate) fn new(node_count: usize) -> Self {
        Self {
            heap: Vec::new(),
            slot: vec![NO_SLOT; node_count],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// `true` iff `node` currently has a queued entry.
    pub(crate) fn contains(&self, node: NodeId) -> bool {
        self.slot[node.index()] != NO_SLOT
    }

    /// Enqueue `node` with tentative distance `dist`.
    ///
    /// The node must not already be queued (use [`decrease`](Self::decrease)
    /// to improve a queued entry).
    pub(crate) fn push(&mut self, node: NodeId, dist: u32) {
        debug_assert!(!self.contains(node), "push of already-queued {node}");
        let at = self.heap.len();
        self.heap.push((dist, node));
        self.slot[node.index()] = at as u32;
        self.sift_up(at);
    }

    /// Lower the queued distance of `node` to `dist`.
    ///
    /// The node must be queued and `dist` must not exceed its current key.
    pub(crate) fn decrease(&mut self, node: NodeId, dist: u32) {
        let at = self.slot[node.index()];
        debug_assert_ne!(at, NO_SLOT, "decrease of unqueued {node}");
        let at = at as usize;
        debug_assert!(dist <= self.heap[at].0);
        self.heap[at].0 = dist;
        self.sift_up(at);
    }

    /// Remove and return the queued entry with the minimum distance.
    pub(crate) fn pop(&mut self) -> Option<(NodeId, u32)> {
        let &(dist, node) = self.heap.first()?;
        self.slot[node.index()] = NO_SLOT;

        // Non-empty: first() returned Some.
        let last = self.heap.pop()?;
        if !self.heap.is_empty() {
            self.heap[0] = last;
            self.slot[last.1.index()] = 0;
            self.sift_down(0);
        }
        Some((node, dist))
    }

    // ── Sift helpers (slot map maintained under every swap) ───────────────

    fn sift_up(&mut self, mut at: usize) {
        while at > 0 {
            let parent = (at - 1) / 2;
            if self.heap[parent].0 <= self.heap[at].0 {
                break;
            }
            self.swap_entries(at, parent);
            at = parent;
        }
    }

    fn sift_down(&mut self, mut at: usize) {
        loop {
            let left = 2 * at + 1;
            if left >= self.heap.len() {
                break;
            }
            let right = left + 1;
            let mut smallest = left;
            if right < self.heap.len() && self.heap[right].0 < self.heap[left].0 {
                smallest = right;
            }
            if self.heap[at].0 <= self.heap[smallest].0 {
                break;
            }
            self.swap_entries(at, smallest);
            at = smallest;
        }
    }

    #[inline]
    fn swap_entries(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.slot[self.heap[a].1.index()] = a as u32;
        self.slot[self.heap[b].1.index()] = b as u32;
    }
}
