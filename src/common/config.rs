//! Configuration constants for the B-tree index.

/// Smallest minimum degree (t) a tree accepts.
///
/// With t = 2 every node holds 1 to 3 keys (a 2-3-4 tree). Anything lower
/// would permit empty non-root nodes.
pub const MIN_MINIMUM_DEGREE: usize = 2;

/// Minimum degree used by [`BTree::keyed_default`](crate::BTree::keyed_default).
///
/// # Node Size
/// With t = 16:
/// - Max keys per node: 31
/// - Max children per node: 32
///
/// Small enough that the per-node shift on insert stays cheap, large enough
/// that a million values fit in a tree of height 5.
pub const DEFAULT_MINIMUM_DEGREE: usize = 16;

/// Maximum number of keys a node of degree `t` may hold (`2t - 1`).
#[inline]
pub const fn max_keys(t: usize) -> usize {
    2 * t - 1
}

/// Minimum number of keys a non-root node of degree `t` must hold (`t - 1`).
#[inline]
pub const fn min_keys(t: usize) -> usize {
    t - 1
}

/// Maximum number of children an internal node of degree `t` may hold (`2t`).
#[inline]
pub const fn max_children(t: usize) -> usize {
    2 * t
}
