//! Fixed-resolution quadtree over a square planar domain.
//!
//! Nodes live in an arena owned by [`QuadTree`] and refer to their children
//! by [`NodeId`]. The arena is stored in depth-first order, so iterating it
//! visits leaves in the same order a descent from the root would.

mod build;
pub mod node;

pub use build::{AcceptAll, SpansFeature};
pub use crate::compute::validation::MAX_DEPTH;
pub use node::{GridNode, NodeId, NodeKind, Quadrant};

use geo::Rect;

/// Shape of a freshly built tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub node_count: usize,
    pub leaf_count: usize,
    /// Deepest leaf depth; 0 when the root is the only cell
    pub max_depth: u32,
}

/// Result of placing one point into the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placement {
    /// Cells occupied by this point, in descent order
    pub accepted: Vec<NodeId>,
    /// Cells reached that were already occupied
    pub occupied_hits: usize,
}

impl Placement {
    /// True when the point reached no cell at all.
    pub fn is_outside(&self) -> bool {
        self.accepted.is_empty() && self.occupied_hits == 0
    }
}

#[derive(Debug, Clone)]
pub struct QuadTree {
    nodes: Vec<GridNode>,
    min_cell_size: f64,
    stats: BuildStats,
}

impl QuadTree {
    pub fn root(&self) -> &GridNode {
        &self.nodes[NodeId::ROOT.0]
    }

    pub fn node(&self, id: NodeId) -> Option<&GridNode> {
        self.nodes.get(id.0)
    }

    pub fn bounds(&self) -> &Rect<f64> {
        self.root().rect()
    }

    pub fn min_cell_size(&self) -> f64 {
        self.min_cell_size
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in depth-first order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &GridNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Cells in depth-first order.
    pub fn leaves(&self) -> impl Iterator<Item = (NodeId, &GridNode)> {
        self.iter().filter(|(_, n)| n.is_cell())
    }

    pub fn occupied_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_occupied()).count()
    }

    /// First cell containing `(x, y)` in descent order.
    ///
    /// On a shared edge the earliest child slot wins.
    pub fn leaf_containing(&self, x: f64, y: f64) -> Option<NodeId> {
        if !self.root().contains(x, y) {
            return None;
        }

        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            if node.is_cell() {
                return Some(id);
            }
            for child in node.children.iter().rev().flatten() {
                if self.nodes[child.0].contains(x, y) {
                    stack.push(*child);
                }
            }
        }
        None
    }

    /// Place `(x, y)` into every cell that contains it.
    ///
    /// Descends into each containing child, so a point on a shared edge can
    /// reach several cells. The first point to reach a cell occupies it;
    /// later points reaching the same cell are counted as hits and change
    /// nothing.
    pub fn place(&mut self, x: f64, y: f64) -> Placement {
        let mut placement = Placement::default();
        if !self.root().contains(x, y) {
            return placement;
        }

        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let node = &mut self.nodes[id.0];
            if node.is_cell() {
                if node.occupied {
                    log::trace!("Cell {:?} already occupied, discarding ({}, {})", id, x, y);
                    placement.occupied_hits += 1;
                } else {
                    node.occupied = true;
                    placement.accepted.push(id);
                }
                continue;
            }

            let children = node.children;
            for child in children.iter().rev().flatten() {
                if self.nodes[child.0].contains(x, y) {
                    stack.push(*child);
                }
            }
        }
        placement
    }
}
