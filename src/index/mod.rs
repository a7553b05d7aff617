//! Index structures.
//!
//! - [`btree`] - In-memory B-tree keyed by a selector over stored values

pub mod btree;
