//! interchange-index - A generic in-memory B-tree index.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       interchange-index                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                BTree (index/btree/tree)                  │   │
//! │  │   root + minimum degree + comparator/selector pair       │   │
//! │  │   insert (root growth) · search · iter · traverse        │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                Node (index/btree/node)                   │   │
//! │  │   binary search · insert_non_full · split_child          │   │
//! │  │   operator-driven range search · in-order traversal      │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (Error, config)
//! - [`index`] - Index structures (B-tree)
//!
//! # Quick Start
//! ```
//! use interchange_index::{BTree, Operator};
//!
//! struct Person { name: &'static str, age: u8 }
//!
//! // Index people by age.
//! let mut by_age = BTree::keyed(2, |p: &Person| p.age).unwrap();
//! by_age.extend([
//!     Person { name: "ada", age: 36 },
//!     Person { name: "bob", age: 25 },
//!     Person { name: "cy", age: 41 },
//!     Person { name: "dee", age: 30 },
//! ]);
//!
//! let young: Vec<&str> = by_age
//!     .search(&31, Operator::LessThan)
//!     .into_iter()
//!     .map(|p| p.name)
//!     .collect();
//! assert_eq!(young, vec!["bob", "dee"]);
//! ```

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_MINIMUM_DEGREE, MIN_MINIMUM_DEGREE};
pub use common::{Error, Result};

pub use index::btree::{BTree, Collector, Iter, Node, Operator, TreeStats, TreeStatsSnapshot};
