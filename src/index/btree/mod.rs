//! In-memory B-tree index.
//!
//! A classical B-tree of configurable minimum degree `t`. Values of any type
//! are indexed by a key derived from each value with a selector, and ordered
//! by a caller-supplied comparator, so one tree type serves any record and
//! any derived key.
//!
//! # Components
//! - [`BTree`] - Root bookkeeping and the public API
//! - [`Node`] - Per-node storage and the recursive algorithms
//! - [`Operator`] - Comparison operators for range search
//! - [`Collector`] - Output containers for search results
//! - [`Iter`] - Lazy in-order iteration
//! - [`TreeStats`] - Operation counters
//!
//! # Insertion
//! Insertion is a single downward pass: any full node on the path is split
//! before the descent enters it, so no split ever has to propagate upward.
//! Only a full root makes the tree taller.

mod collector;
mod iter;
mod node;
mod operator;
mod stats;
mod tree;

pub use collector::Collector;
pub use iter::Iter;
pub use node::Node;
pub use operator::Operator;
pub use stats::{TreeStats, TreeStatsSnapshot};
pub use tree::BTree;
