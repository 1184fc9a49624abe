//! Recursive subdivision and pruning.

use super::node::{GridNode, NodeId, Quadrant};
use super::{BuildStats, QuadTree};
use crate::compute::validation::{subdivision_depth, validate_bounds, validate_min_cell_size};
use crate::config::Bounds;
use crate::error::Result;
use geo::Rect;

/// Decides whether a quadrant is worth creating and subdividing.
///
/// Closures of the form `Fn(&Rect<f64>) -> bool` implement this trait.
pub trait SpansFeature {
    fn spans_feature(&self, quadrant: &Rect<f64>) -> bool;
}

/// Subdivides every quadrant down to the minimum cell size.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl SpansFeature for AcceptAll {
    fn spans_feature(&self, _quadrant: &Rect<f64>) -> bool {
        true
    }
}

impl<F> SpansFeature for F
where
    F: Fn(&Rect<f64>) -> bool,
{
    fn spans_feature(&self, quadrant: &Rect<f64>) -> bool {
        self(quadrant)
    }
}

/// Side length of the leaves after `depth` halvings of `side`.
fn leaf_side(side: f64, depth: u32) -> f64 {
    (0..depth).fold(side, |side, _| side / 2.0)
}

impl QuadTree {
    /// Build a fully subdivided tree over `bounds`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hotspot::config::Bounds;
    /// use hotspot::quadtree::QuadTree;
    ///
    /// let tree = QuadTree::build(&Bounds::centered(48.0), 3.0)?;
    /// assert_eq!(tree.stats().leaf_count, 1024);
    /// assert_eq!(tree.stats().max_depth, 5);
    /// # Ok::<(), hotspot::HotspotError>(())
    /// ```
    pub fn build(bounds: &Bounds, min_cell_size: f64) -> Result<Self> {
        Self::build_with(bounds, min_cell_size, &AcceptAll)
    }

    /// Build a tree, creating only quadrants accepted by `filter`.
    ///
    /// Subtrees left without any leaf are pruned before the tree is
    /// returned.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when the bounds are not square, the cell size is
    /// not positive, or the grid would be deeper than
    /// [`MAX_DEPTH`](crate::compute::validation::MAX_DEPTH).
    pub fn build_with<F>(bounds: &Bounds, min_cell_size: f64, filter: &F) -> Result<Self>
    where
        F: SpansFeature + ?Sized,
    {
        validate_bounds(bounds)?;
        validate_min_cell_size(min_cell_size)?;
        let expected_depth = subdivision_depth(bounds.width(), min_cell_size)?;
        let side = leaf_side(bounds.width(), expected_depth);
        if expected_depth > 0 && (side - min_cell_size).abs() > 1e-9 * min_cell_size {
            log::warn!(
                "Minimum cell size {} does not evenly partition the root; leaves will have side {}",
                min_cell_size,
                side
            );
        }

        let root = GridNode::new(None, bounds.to_rect(), min_cell_size);
        let mut tree = QuadTree {
            nodes: vec![root],
            min_cell_size,
            stats: BuildStats::default(),
        };

        tree.subdivide(NodeId::ROOT, filter);
        tree.prune(NodeId::ROOT);
        tree.compact();
        tree.stats = tree.traverse();

        log::debug!(
            "Built quadtree: {} nodes, {} leaves, max depth {} (expected {})",
            tree.stats.node_count,
            tree.stats.leaf_count,
            tree.stats.max_depth,
            expected_depth
        );

        Ok(tree)
    }

    fn subdivide<F>(&mut self, id: NodeId, filter: &F)
    where
        F: SpansFeature + ?Sized,
    {
        if self.nodes[id.0].is_cell() {
            return;
        }

        let rect = *self.nodes[id.0].rect();
        for quadrant in Quadrant::ALL {
            let child_rect = quadrant.of(&rect);
            if !filter.spans_feature(&child_rect) {
                continue;
            }

            let child = GridNode::new(Some(&self.nodes[id.0]), child_rect, self.min_cell_size);
            let child_id = NodeId(self.nodes.len());
            self.nodes.push(child);
            self.nodes[id.0].children[quadrant.index()] = Some(child_id);

            self.subdivide(child_id, filter);
        }
    }

    /// Detach every child subtree that holds no leaf. Returns the number of
    /// leaves reachable from `id`.
    fn prune(&mut self, id: NodeId) -> usize {
        if self.nodes[id.0].is_cell() {
            return 1;
        }

        let mut total = 0;
        for slot in 0..4 {
            let Some(child) = self.nodes[id.0].children[slot] else {
                continue;
            };

            let leaves = self.prune(child);
            if leaves == 0 {
                self.nodes[id.0].children[slot] = None;
            }
            total += leaves;
        }
        total
    }

    /// Drop unreachable nodes and renumber the rest in depth-first order.
    fn compact(&mut self) {
        let mut remap: Vec<Option<NodeId>> = vec![None; self.nodes.len()];
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![NodeId::ROOT];

        while let Some(id) = stack.pop() {
            remap[id.0] = Some(NodeId(order.len()));
            order.push(id);
            for child in self.nodes[id.0].children.iter().rev().flatten() {
                stack.push(*child);
            }
        }

        if order.len() == self.nodes.len() && order.iter().enumerate().all(|(i, id)| id.0 == i) {
            return;
        }

        let mut old: Vec<Option<GridNode>> = std::mem::take(&mut self.nodes)
            .into_iter()
            .map(Some)
            .collect();

        self.nodes = order
            .into_iter()
            .filter_map(|id| old[id.0].take())
            .map(|mut node| {
                node.children = node.children.map(|c| c.and_then(|c| remap[c.0]));
                node
            })
            .collect();
    }

    fn traverse(&self) -> BuildStats {
        let mut stats = BuildStats {
            node_count: self.nodes.len(),
            ..BuildStats::default()
        };

        for node in self.nodes.iter().filter(|n| n.is_cell()) {
            stats.leaf_count += 1;
            stats.max_depth = stats.max_depth.max(node.depth());
        }
        stats
    }
}
