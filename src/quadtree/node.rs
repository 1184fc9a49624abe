//! Grid cells of the quadtree.

use geo::{Rect, coord};

/// Handle to a node in a [`QuadTree`](super::QuadTree) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root always occupies the first arena slot.
    pub const ROOT: NodeId = NodeId(0);

    pub const fn index(self) -> usize {
        self.0
    }
}

/// Role of a node in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The node with no parent
    Root,
    /// Interior node wider than the minimum cell size
    Branch,
    /// Cell at or below the minimum cell size
    Leaf,
}

/// Child slot of a node.
///
/// Slots follow the fixed subdivision order. With x to the right and y
/// upwards: lower-left, upper-left, upper-right, lower-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    /// low x, low y
    LowerLeft = 0,
    /// low x, high y
    UpperLeft = 1,
    /// high x, high y
    UpperRight = 2,
    /// high x, low y
    LowerRight = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::LowerLeft,
        Quadrant::UpperLeft,
        Quadrant::UpperRight,
        Quadrant::LowerRight,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// The part of the square `rect` covered by this quadrant.
    pub fn of(self, rect: &Rect<f64>) -> Rect<f64> {
        let (x0, y0) = (rect.min().x, rect.min().y);
        let (x1, y1) = (rect.max().x, rect.max().y);
        let h = rect.width() / 2.0;

        let (min, max) = match self {
            Quadrant::LowerLeft => ((x0, y0), (x0 + h, y0 + h)),
            Quadrant::UpperLeft => ((x0, y0 + h), (x0 + h, y1)),
            Quadrant::UpperRight => ((x0 + h, y0 + h), (x1, y1)),
            Quadrant::LowerRight => ((x0 + h, y0), (x1, y0 + h)),
        };
        Rect::new(coord! { x: min.0, y: min.1 }, coord! { x: max.0, y: max.1 })
    }
}

/// One square cell of the partition.
#[derive(Debug, Clone)]
pub struct GridNode {
    rect: Rect<f64>,
    depth: u32,
    kind: NodeKind,
    at_resolution: bool,
    pub(crate) children: [Option<NodeId>; 4],
    pub(crate) occupied: bool,
}

impl GridNode {
    /// Create a node for `rect` below `parent` (or as a root).
    ///
    /// Depth is the parent's plus one. The node is a leaf when its side is
    /// no larger than `min_cell_size`; a root keeps [`NodeKind::Root`]
    /// regardless of its size.
    pub fn new(parent: Option<&GridNode>, rect: Rect<f64>, min_cell_size: f64) -> Self {
        let at_resolution = rect.width() <= min_cell_size;
        let (depth, kind) = match parent {
            None => (0, NodeKind::Root),
            Some(p) if at_resolution => (p.depth + 1, NodeKind::Leaf),
            Some(p) => (p.depth + 1, NodeKind::Branch),
        };

        Self {
            rect,
            depth,
            kind,
            at_resolution,
            children: [None; 4],
            occupied: false,
        }
    }

    pub fn rect(&self) -> &Rect<f64> {
        &self.rect
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn side(&self) -> f64 {
        self.rect.width()
    }

    pub fn children(&self) -> &[Option<NodeId>; 4] {
        &self.children
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<NodeId> {
        self.children[quadrant.index()]
    }

    pub fn has_children(&self) -> bool {
        self.children.iter().any(Option::is_some)
    }

    pub fn is_leaf(&self) -> bool {
        self.kind == NodeKind::Leaf
    }

    /// True for nodes that hold points: leaves, and a root already at the
    /// minimum cell size.
    pub fn is_cell(&self) -> bool {
        self.at_resolution
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    /// Inclusive containment test on all four edges.
    ///
    /// Points on an edge shared by siblings are contained by each of them.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (min, max) = (self.rect.min(), self.rect.max());
        x >= min.x && x <= max.x && y >= min.y && y <= max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, side: f64) -> Rect<f64> {
        Rect::new(coord! { x: x0, y: y0 }, coord! { x: x0 + side, y: y0 + side })
    }

    #[test]
    fn test_kind_and_depth() {
        let root = GridNode::new(None, square(-48.0, -48.0, 96.0), 3.0);
        assert_eq!(root.kind(), NodeKind::Root);
        assert_eq!(root.depth(), 0);
        assert!(!root.is_cell());

        let branch = GridNode::new(Some(&root), square(-48.0, -48.0, 48.0), 3.0);
        assert_eq!(branch.kind(), NodeKind::Branch);
        assert_eq!(branch.depth(), 1);

        let leaf = GridNode::new(Some(&branch), square(-48.0, -48.0, 3.0), 3.0);
        assert_eq!(leaf.kind(), NodeKind::Leaf);
        assert_eq!(leaf.depth(), 2);
        assert!(leaf.is_leaf());
        assert!(leaf.is_cell());
        assert!(!leaf.is_occupied());
    }

    #[test]
    fn test_small_root_stays_root() {
        let root = GridNode::new(None, square(0.0, 0.0, 2.0), 3.0);
        assert_eq!(root.kind(), NodeKind::Root);
        assert!(root.is_cell());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let node = GridNode::new(None, square(0.0, 0.0, 3.0), 3.0);
        assert!(node.contains(0.0, 0.0));
        assert!(node.contains(3.0, 3.0));
        assert!(node.contains(1.5, 3.0));
        assert!(!node.contains(3.000001, 1.0));
        assert!(!node.contains(-0.1, 1.0));
        assert!(!node.contains(f64::NAN, 1.0));
    }

    #[test]
    fn test_quadrants_partition_parent() {
        let parent = square(-4.0, -4.0, 8.0);

        let ll = Quadrant::LowerLeft.of(&parent);
        let ul = Quadrant::UpperLeft.of(&parent);
        let ur = Quadrant::UpperRight.of(&parent);
        let lr = Quadrant::LowerRight.of(&parent);

        assert_eq!(ll, square(-4.0, -4.0, 4.0));
        assert_eq!(ul, square(-4.0, 0.0, 4.0));
        assert_eq!(ur, square(0.0, 0.0, 4.0));
        assert_eq!(lr, square(0.0, -4.0, 4.0));

        let area: f64 = Quadrant::ALL
            .iter()
            .map(|q| {
                let r = q.of(&parent);
                r.width() * r.height()
            })
            .sum();
        assert_eq!(area, 64.0);
    }

    #[test]
    fn test_quadrant_indices() {
        let indices: Vec<usize> = Quadrant::ALL.iter().map(|q| q.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }
}
