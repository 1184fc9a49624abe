//! Validation and selection helpers used around the quadtree.

pub mod selection;
pub mod validation;

pub use selection::{UnderflowPolicy, top_k_by_value};
