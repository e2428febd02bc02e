//! Regression trees for ensemble inference
//!
//! Trees are flat node arrays with node 0 as root. Split comparisons are
//! made in 32-bit float precision on the feature side, because the trees
//! were grown on `float32` inputs and their thresholds sit between
//! representable `f32` values.

use serde::{Deserialize, Serialize};

/// A decision tree node (internal or leaf)
///
/// For internal nodes `feature_idx >= 0` and `left`/`right` index into the
/// owning tree's node array. Leaves have `feature_idx == -1` and carry
/// `leaf`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    /// Left child index (-1 for leaf nodes)
    pub left: i32,

    /// Right child index (-1 for leaf nodes)
    pub right: i32,

    #[serde(rename = "feature_idx", alias = "feature")]
    pub feature_idx: i32,

    #[serde(default)]
    pub threshold: f64,

    /// Regression output of a leaf
    #[serde(default)]
    pub leaf: Option<f64>,
}

impl Node {
    pub fn internal(feature_idx: i32, threshold: f64, left: i32, right: i32) -> Self {
        Self {
            left,
            right,
            feature_idx,
            threshold,
            leaf: None,
        }
    }

    pub fn leaf(value: f64) -> Self {
        Self {
            left: -1,
            right: -1,
            feature_idx: -1,
            threshold: 0.0,
            leaf: Some(value),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.feature_idx == -1 || self.leaf.is_some()
    }
}

/// One regression tree of the ensemble
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Leaf value reached by `features`.
    ///
    /// Assumes a tree that passed [`Tree::validate`]; malformed structure
    /// or a short feature slice yields 0.
    pub fn evaluate(&self, features: &[f64]) -> f64 {
        let mut idx = 0usize;

        loop {
            let node = match self.nodes.get(idx) {
                Some(node) => node,
                None => return 0.0,
            };

            if node.is_leaf() {
                return node.leaf.unwrap_or(0.0);
            }

            let value = match features.get(node.feature_idx as usize) {
                Some(value) => *value as f32 as f64,
                None => return 0.0,
            };

            let next = if value <= node.threshold {
                node.left
            } else {
                node.right
            };
            if next < 0 {
                return 0.0;
            }
            idx = next as usize;
        }
    }

    /// Check child links, split features and leaf values.
    ///
    /// Children must point forward so that traversal always terminates.
    pub fn validate(&self, feature_count: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("Tree has no nodes".to_string());
        }

        let len = self.nodes.len();
        for (i, node) in self.nodes.iter().enumerate() {
            if node.is_leaf() {
                match node.leaf {
                    Some(value) if value.is_finite() => {}
                    Some(value) => return Err(format!("Leaf node {i} has non-finite value {value}")),
                    None => return Err(format!("Leaf node {i} has no leaf value")),
                }
                continue;
            }

            for (side, child) in [("left", node.left), ("right", node.right)] {
                if child <= i as i32 || child as usize >= len {
                    return Err(format!("Node {i} has invalid {side} child: {child}"));
                }
            }

            if node.feature_idx < 0 || node.feature_idx as usize >= feature_count {
                return Err(format!(
                    "Internal node {} has invalid feature index: {}",
                    i, node.feature_idx
                ));
            }

            if !node.threshold.is_finite() {
                return Err(format!("Internal node {i} has non-finite threshold"));
            }
        }

        Ok(())
    }
}
