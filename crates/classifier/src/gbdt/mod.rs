//! Gradient Boosted Decision Tree inference
//!
//! Evaluates ensembles exported from a binary log-loss gradient boosting
//! trainer. The exported JSON looks like:
//!
//! ```json
//! {
//!   "version": 1,
//!   "n_features": 33,
//!   "learning_rate": 0.1,
//!   "init_score": -0.42,
//!   "trees": [
//!     {
//!       "nodes": [
//!         {"left":1,"right":2,"feature_idx":10,"threshold":0.731,"leaf":null},
//!         {"left":-1,"right":-1,"feature_idx":-1,"threshold":0.0,"leaf":-0.18},
//!         {"left":-1,"right":-1,"feature_idx":-1,"threshold":0.0,"leaf":0.27}
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Traversal goes left when `f32(x[feature]) <= threshold`.

pub mod model;
pub mod tree;

pub use model::{sigmoid, Model, FORMAT_VERSION};
pub use tree::{Node, Tree};
