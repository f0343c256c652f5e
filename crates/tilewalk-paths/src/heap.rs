//! Node-linked binary min-heap keyed by `f = g + h`.
//!
//! Unlike `std::collections::BinaryHeap`, the tree is stored as explicitly
//! linked nodes (parent / left / right) inside an arena. A node's
//! [`NodeId`] never changes: swaps relink tree positions rather than moving
//! values, so a search can keep a per-cell `NodeId` and lower that node's
//! cost in place with [`NodeHeap::decrease_key`].
//!
//! The tree is always *complete*: every level is full except possibly the
//! last, which fills left to right. Level-order slot `k` (1-based) is
//! reached from the root by reading the bits of `k` below its leading one,
//! most significant first, `0` meaning left and `1` meaning right.
//!
//! Extracted nodes stay in the arena, detached, so their final `g`/`h`/`f`
//! remain readable through [`NodeHeap::get`].

use tilewalk_core::Point;

/// Stable handle to a node in a [`NodeHeap`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index of this node.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One open cell's candidate path cost.
#[derive(Debug, Clone)]
pub struct HeapNode {
    /// The cell this node stands for.
    pub pos: Point,
    /// Movement cost from the start along the best known path.
    pub g: i32,
    /// Heuristic estimate to the goal. Fixed at insertion.
    pub h: i32,
    /// Sort key, `g + h`.
    pub f: i32,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl HeapNode {
    /// Current parent in the tree, `None` for the root or a detached node.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Current left child.
    #[inline]
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Current right child.
    #[inline]
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }
}

/// A complete binary min-heap of linked [`HeapNode`]s.
#[derive(Debug, Clone)]
pub struct NodeHeap {
    nodes: Vec<HeapNode>,
    root: Option<NodeId>,
    len: usize,
    depth: i32,
}

impl Default for NodeHeap {
    fn default() -> Self {
        Self::new()
    }
}

/// `floor(log2(n)) + 1`, or `-1` for an empty tree.
#[inline]
fn depth_for(n: usize) -> i32 {
    if n == 0 {
        -1
    } else {
        (usize::BITS - n.leading_zeros()) as i32
    }
}

impl NodeHeap {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty heap whose arena can hold `capacity` nodes without
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: None,
            len: 0,
            depth: -1,
        }
    }

    /// Number of nodes currently in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of levels in the tree: `floor(log2(len)) + 1`, or `-1` when
    /// empty.
    #[inline]
    pub fn depth(&self) -> i32 {
        self.depth
    }

    /// The minimum node, without removing it.
    #[inline]
    pub fn peek(&self) -> Option<NodeId> {
        self.root
    }

    /// Access a node, whether it is still in the tree or was extracted.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this heap.
    #[inline]
    pub fn get(&self, id: NodeId) -> &HeapNode {
        &self.nodes[id.0]
    }

    /// Whether `id` is currently linked into the tree.
    pub fn in_tree(&self, id: NodeId) -> bool {
        self.root == Some(id) || self.nodes.get(id.0).is_some_and(|n| n.parent.is_some())
    }

    /// Insert a new node for `pos` and return its stable handle.
    pub fn insert(&mut self, pos: Point, g: i32, h: i32) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(HeapNode {
            pos,
            g,
            h,
            f: g.saturating_add(h),
            parent: None,
            left: None,
            right: None,
        });

        // Slot `len + 1` is the first open position; its parent sits at
        // slot `(len + 1) / 2`, one level above the first unfilled level.
        let slot = self.len + 1;
        match self.node_at(slot / 2) {
            None => self.root = Some(id),
            Some(parent) => {
                self.nodes[id.0].parent = Some(parent);
                let p = &mut self.nodes[parent.0];
                if p.left.is_none() {
                    p.left = Some(id);
                } else {
                    p.right = Some(id);
                }
            }
        }
        self.len = slot;
        self.depth = depth_for(self.len);

        self.rebalance_up(id);
        id
    }

    /// Remove and return the minimum node, or `None` if the heap is empty.
    ///
    /// The last node in level order replaces the root and is sifted down.
    pub fn extract_min(&mut self) -> Option<NodeId> {
        let top = self.root?;
        let last = self.node_at(self.len)?;
        self.len -= 1;
        self.depth = depth_for(self.len);

        if last == top {
            self.root = None;
            return Some(top);
        }

        if let Some(p) = self.nodes[last.0].parent.take() {
            let pn = &mut self.nodes[p.0];
            if pn.right == Some(last) {
                pn.right = None;
            } else {
                pn.left = None;
            }
        }

        let (left, right) = {
            let t = &mut self.nodes[top.0];
            (t.left.take(), t.right.take())
        };
        {
            let n = &mut self.nodes[last.0];
            n.left = left;
            n.right = right;
        }
        for child in [left, right].into_iter().flatten() {
            self.nodes[child.0].parent = Some(last);
        }
        self.root = Some(last);

        self.rebalance_down(last);
        Some(top)
    }

    /// Lower a node's `g` (and therefore `f`) and restore heap order.
    ///
    /// `id` must be in the tree and `g` must not exceed the node's current
    /// `g`.
    pub fn decrease_key(&mut self, id: NodeId, g: i32) {
        debug_assert!(g <= self.nodes[id.0].g, "decrease_key raised g");
        self.set_g(id, g);
        self.rebalance_up(id);
    }

    /// Raise a node's `g` (and therefore `f`) and restore heap order.
    ///
    /// `id` must be in the tree and `g` must not be below the node's current
    /// `g`.
    pub fn increase_key(&mut self, id: NodeId, g: i32) {
        debug_assert!(g >= self.nodes[id.0].g, "increase_key lowered g");
        self.set_g(id, g);
        self.rebalance_down(id);
    }

    #[inline]
    fn set_g(&mut self, id: NodeId, g: i32) {
        let n = &mut self.nodes[id.0];
        n.g = g;
        n.f = g.saturating_add(n.h);
    }

    /// Move `id` towards the root while its `f` is strictly smaller than its
    /// parent's.
    pub fn rebalance_up(&mut self, id: NodeId) {
        debug_assert!(self.in_tree(id), "rebalance_up on a detached node");
        while let Some(parent) = self.nodes[id.0].parent {
            if self.nodes[id.0].f < self.nodes[parent.0].f {
                self.swap(id, parent);
            } else {
                break;
            }
        }
    }

    /// Move `id` away from the root while some child has a strictly smaller
    /// `f`. The smaller child is chosen; on a tie the left child wins.
    pub fn rebalance_down(&mut self, id: NodeId) {
        debug_assert!(self.in_tree(id), "rebalance_down on a detached node");
        loop {
            let n = &self.nodes[id.0];
            let child = match (n.left, n.right) {
                (Some(l), Some(r)) => {
                    if self.nodes[r.0].f < self.nodes[l.0].f {
                        r
                    } else {
                        l
                    }
                }
                (Some(c), None) | (None, Some(c)) => c,
                (None, None) => break,
            };
            if self.nodes[id.0].f > self.nodes[child.0].f {
                self.swap(child, id);
            } else {
                break;
            }
        }
    }

    /// The node at level-order slot `k` (1-based), if any.
    fn node_at(&self, k: usize) -> Option<NodeId> {
        if k == 0 || k > self.len {
            return None;
        }
        let mut cur = self.root?;
        let bits = usize::BITS - k.leading_zeros();
        for shift in (0..bits - 1).rev() {
            let n = &self.nodes[cur.0];
            cur = if (k >> shift) & 1 == 0 { n.left? } else { n.right? };
        }
        Some(cur)
    }

    /// Exchange the tree positions of `parent` and its direct child `child`.
    ///
    /// Only links change; both nodes keep their ids and payloads.
    fn swap(&mut self, child: NodeId, parent: NodeId) {
        let (grand, p_left, p_right) = {
            let p = &self.nodes[parent.0];
            (p.parent, p.left, p.right)
        };
        debug_assert_eq!(self.nodes[child.0].parent, Some(parent));
        let child_is_left = p_left == Some(child);
        let sibling = if child_is_left { p_right } else { p_left };
        let (c_left, c_right) = {
            let c = &self.nodes[child.0];
            (c.left, c.right)
        };

        // `child` moves up into `parent`'s slot.
        {
            let c = &mut self.nodes[child.0];
            c.parent = grand;
            if child_is_left {
                c.left = Some(parent);
                c.right = sibling;
            } else {
                c.left = sibling;
                c.right = Some(parent);
            }
        }
        if let Some(s) = sibling {
            self.nodes[s.0].parent = Some(child);
        }

        // `parent` moves down and adopts `child`'s former children.
        {
            let p = &mut self.nodes[parent.0];
            p.parent = Some(child);
            p.left = c_left;
            p.right = c_right;
        }
        for gc in [c_left, c_right].into_iter().flatten() {
            self.nodes[gc.0].parent = Some(parent);
        }

        match grand {
            None => self.root = Some(child),
            Some(g) => {
                let gn = &mut self.nodes[g.0];
                if gn.left == Some(parent) {
                    gn.left = Some(child);
                } else {
                    gn.right = Some(child);
                }
            }
        }
    }

    /// Walk the tree and verify links, heap order, completeness, the node
    /// count and the cached depth.
    #[cfg(test)]
    pub(crate) fn check(&self) -> Result<(), String> {
        if self.depth != depth_for(self.len) {
            return Err(format!("depth {} for {} nodes", self.depth, self.len));
        }
        let Some(root) = self.root else {
            return if self.len == 0 {
                Ok(())
            } else {
                Err(format!("no root but len {}", self.len))
            };
        };
        if self.nodes[root.0].parent.is_some() {
            return Err("root has a parent".into());
        }

        let mut seen = 0usize;
        let mut stack = vec![(root, 1usize)];
        while let Some((id, slot)) = stack.pop() {
            seen += 1;
            if slot > self.len {
                return Err(format!("node {id:?} at slot {slot} beyond len {}", self.len));
            }
            let n = &self.nodes[id.0];
            for (child, child_slot) in [(n.left, 2 * slot), (n.right, 2 * slot + 1)] {
                let Some(c) = child else { continue };
                let cn = &self.nodes[c.0];
                if cn.parent != Some(id) {
                    return Err(format!("{c:?} does not link back to {id:?}"));
                }
                if cn.f < n.f {
                    return Err(format!("{c:?} (f={}) below parent (f={})", cn.f, n.f));
                }
                stack.push((c, child_slot));
            }
        }
        // Distinct slots, all within 1..=len, and exactly len of them: the
        // tree fills slots 1..=len with no gaps.
        if seen != self.len {
            return Err(format!("reached {seen} nodes, len {}", self.len));
        }
        Ok(())
    }
}
