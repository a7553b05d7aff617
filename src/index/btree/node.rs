//! B-tree node and the recursive algorithms that run on it.
//!
//! # Layout
//! ```text
//!            values:   [ v0 | v1 | v2 ]            n keys
//!            children: [ c0 | c1 | c2 | c3 ]       n + 1 children (internal only)
//!
//!   c0 < v0 < c1 < v1 < c2 < v2 < c3               (by derived key)
//! ```
//!
//! Every node of a tree shares the same minimum degree `t` and holds at most
//! `2t - 1` values. Non-root nodes hold at least `t - 1`. Children are owned
//! directly by their parent; there are no parent or sibling links.

use std::cmp::Ordering;

use tracing::trace;

use super::collector::Collector;
use super::operator::Operator;
use crate::common::config::{max_children, max_keys, min_keys};
use crate::common::{Error, Result};

/// Comparator and selector pair shared by every node of a tree.
pub(crate) struct KeyOrder<C, S> {
    pub(crate) compare: C,
    pub(crate) select: S,
}

impl<C, S> KeyOrder<C, S> {
    /// Derive the ordering key of a stored value.
    #[inline]
    pub(crate) fn key_of<V, K>(&self, value: &V) -> K
    where
        S: Fn(&V) -> K,
    {
        (self.select)(value)
    }

    /// Compare a stored value's derived key against `key`.
    #[inline]
    pub(crate) fn compare_value<V, K>(&self, value: &V, key: &K) -> Ordering
    where
        C: Fn(&K, &K) -> Ordering,
        S: Fn(&V) -> K,
    {
        (self.compare)(&(self.select)(value), key)
    }
}

/// A node of a [`BTree`](crate::BTree), either a leaf or an internal node.
#[derive(Debug, Clone)]
pub struct Node<V> {
    minimum_degree: usize,
    leaf: bool,
    values: Vec<V>,
    /// Empty for leaves, `values.len() + 1` entries otherwise.
    children: Vec<Node<V>>,
}

impl<V> Node<V> {
    /// Create a leaf holding a single value. Used for the first root.
    pub(crate) fn new_leaf(minimum_degree: usize, value: V) -> Self {
        let mut values = Vec::with_capacity(max_keys(minimum_degree));
        values.push(value);
        Self {
            minimum_degree,
            leaf: true,
            values,
            children: Vec::new(),
        }
    }

    /// Create an internal node with no keys whose only child is `child`.
    ///
    /// The result is not a valid node until `split_child(0)` runs on it.
    pub(crate) fn new_internal(minimum_degree: usize, child: Node<V>) -> Self {
        let mut children = Vec::with_capacity(max_children(minimum_degree));
        children.push(child);
        Self {
            minimum_degree,
            leaf: false,
            values: Vec::with_capacity(max_keys(minimum_degree)),
            children,
        }
    }

    /// Whether this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.leaf
    }

    /// Number of populated key slots.
    #[inline]
    pub fn key_count(&self) -> usize {
        self.values.len()
    }

    /// Stored values, ascending by derived key.
    #[inline]
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Child nodes (empty for a leaf).
    #[inline]
    pub fn children(&self) -> &[Node<V>] {
        &self.children
    }

    /// Minimum degree shared with the rest of the tree.
    #[inline]
    pub fn minimum_degree(&self) -> usize {
        self.minimum_degree
    }

    /// Whether the node holds `2t - 1` keys and must split before accepting more.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.values.len() == max_keys(self.minimum_degree)
    }

    /// Number of levels from this node down to its leaves, this node included.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut node = self;
        while let Some(child) = node.children.first() {
            height += 1;
            node = child;
        }
        height
    }

    pub(crate) fn child_mut(&mut self, i: usize) -> &mut Node<V> {
        &mut self.children[i]
    }

    /// Lowest slot whose key is `>= key`, or `key_count()` if every key is smaller.
    pub(crate) fn find_index_of_key<K, C, S>(&self, key: &K, order: &KeyOrder<C, S>) -> usize
    where
        C: Fn(&K, &K) -> Ordering,
        S: Fn(&V) -> K,
    {
        self.values
            .partition_point(|v| order.compare_value(v, key) == Ordering::Less)
    }

    /// Insert into the subtree rooted here. Returns the number of splits performed.
    ///
    /// Precondition: this node is not full. Any full child on the way down is
    /// split before descending, so the insert is a single downward pass.
    pub(crate) fn insert_non_full<K, C, S>(
        &mut self,
        value: V,
        key: &K,
        order: &KeyOrder<C, S>,
    ) -> u64
    where
        C: Fn(&K, &K) -> Ordering,
        S: Fn(&V) -> K,
    {
        debug_assert!(!self.is_full(), "insert_non_full on a full node");

        // Equal keys stay in insertion order: the new value lands after them.
        let mut i = self
            .values
            .partition_point(|v| order.compare_value(v, key) != Ordering::Greater);

        if self.leaf {
            self.values.insert(i, value);
            return 0;
        }

        let mut splits = 0;
        if self.children[i].is_full() {
            self.split_child(i);
            splits += 1;
            // The promoted median now sits at slot i.
            if order.compare_value(&self.values[i], key) == Ordering::Less {
                i += 1;
            }
        }
        splits + self.children[i].insert_non_full(value, key, order)
    }

    /// Split the full child at `i` into two `t - 1` key siblings, promoting its
    /// median into this node at slot `i`.
    ///
    /// Precondition: this node is not full and `children[i]` is.
    pub(crate) fn split_child(&mut self, i: usize) {
        let t = self.minimum_degree;
        let child = &mut self.children[i];
        debug_assert_eq!(child.values.len(), max_keys(t), "split of a non-full child");

        let upper_values = child.values.split_off(t);
        let upper_children = if child.leaf {
            Vec::new()
        } else {
            child.children.split_off(t)
        };
        let median = child.values.remove(t - 1);

        let sibling = Node {
            minimum_degree: t,
            leaf: child.leaf,
            values: upper_values,
            children: upper_children,
        };
        trace!(slot = i, leaf = sibling.leaf, "split child");

        self.values.insert(i, median);
        self.children.insert(i + 1, sibling);
    }

    /// Collect every value in this subtree matching `key` under `operator`.
    ///
    /// Values are added in ascending key order: a child is always visited
    /// before the key bounding it on the right.
    pub(crate) fn search<'a, K, C, S, Col>(
        &'a self,
        key: &K,
        operator: Operator,
        order: &KeyOrder<C, S>,
        out: &mut Col,
    ) where
        C: Fn(&K, &K) -> Ordering,
        S: Fn(&V) -> K,
        Col: Collector<&'a V>,
    {
        let index = self.find_index_of_key(key, order);
        let n = self.values.len();

        match operator {
            Operator::Equal => {
                self.search_child(index, key, operator, order, out);
                for i in index..n {
                    if order.compare_value(&self.values[i], key) != Ordering::Equal {
                        break;
                    }
                    out.add(&self.values[i]);
                    self.search_child(i + 1, key, operator, order, out);
                }
            }
            Operator::LessThan | Operator::LessThanOrEqual => {
                for i in 0..index {
                    self.search_child(i, key, operator, order, out);
                    out.add(&self.values[i]);
                }
                self.search_child(index, key, operator, order, out);
            }
            Operator::GreaterThan | Operator::GreaterThanOrEqual => {
                self.search_child(index, key, operator, order, out);
                for i in index..n {
                    out.add(&self.values[i]);
                    self.search_child(i + 1, key, operator, order, out);
                }
            }
            Operator::NotEqual => {
                for i in 0..n {
                    self.search_child(i, key, operator, order, out);
                    if order.compare_value(&self.values[i], key) != Ordering::Equal {
                        out.add(&self.values[i]);
                    }
                }
                self.search_child(n, key, operator, order, out);
            }
        }
    }

    #[inline]
    fn search_child<'a, K, C, S, Col>(
        &'a self,
        i: usize,
        key: &K,
        operator: Operator,
        order: &KeyOrder<C, S>,
        out: &mut Col,
    ) where
        C: Fn(&K, &K) -> Ordering,
        S: Fn(&V) -> K,
        Col: Collector<&'a V>,
    {
        if !self.leaf {
            self.children[i].search(key, operator, order, out);
        }
    }

    /// Visit every value of this subtree in ascending key order.
    pub fn traverse<F: FnMut(&V)>(&self, visitor: &mut F) {
        for (i, value) in self.values.iter().enumerate() {
            if let Some(child) = self.children.get(i) {
                child.traverse(visitor);
            }
            visitor(value);
        }
        if let Some(last) = self.children.get(self.values.len()) {
            last.traverse(visitor);
        }
    }

    /// Check the shape of this subtree: key counts, child counts, leaf depth
    /// and degree. Returns the number of values in the subtree.
    ///
    /// Key ordering is checked by the caller over the in-order sequence.
    pub(crate) fn check_shape(
        &self,
        minimum_degree: usize,
        is_root: bool,
        depth: usize,
        leaf_depth: &mut Option<usize>,
    ) -> Result<usize> {
        let n = self.values.len();
        if self.minimum_degree != minimum_degree {
            return Err(Error::InvariantViolation(format!(
                "node at depth {} has degree {}, tree has {}",
                depth, self.minimum_degree, minimum_degree
            )));
        }
        if n > max_keys(minimum_degree) {
            return Err(Error::InvariantViolation(format!(
                "node at depth {} holds {} keys (max: {})",
                depth,
                n,
                max_keys(minimum_degree)
            )));
        }
        let min = if is_root { 1 } else { min_keys(minimum_degree) };
        if n < min {
            return Err(Error::InvariantViolation(format!(
                "node at depth {} holds {} keys (min: {})",
                depth, n, min
            )));
        }

        if self.leaf {
            if !self.children.is_empty() {
                return Err(Error::InvariantViolation(format!(
                    "leaf at depth {} has {} children",
                    depth,
                    self.children.len()
                )));
            }
            match *leaf_depth {
                None => *leaf_depth = Some(depth),
                Some(expected) if expected != depth => {
                    return Err(Error::InvariantViolation(format!(
                        "leaf at depth {} but other leaves at depth {}",
                        depth, expected
                    )));
                }
                Some(_) => {}
            }
            return Ok(n);
        }

        if self.children.len() != n + 1 {
            return Err(Error::InvariantViolation(format!(
                "internal node at depth {} has {} keys and {} children",
                depth,
                n,
                self.children.len()
            )));
        }
        let mut count = n;
        for child in &self.children {
            count += child.check_shape(minimum_degree, false, depth + 1, leaf_depth)?;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_order() -> KeyOrder<fn(&i32, &i32) -> Ordering, fn(&i32) -> i32> {
        KeyOrder {
            compare: |a: &i32, b: &i32| a.cmp(b),
            select: |v: &i32| *v,
        }
    }

    fn leaf(t: usize, values: &[i32]) -> Node<i32> {
        Node {
            minimum_degree: t,
            leaf: true,
            values: values.to_vec(),
            children: Vec::new(),
        }
    }

    fn collect(node: &Node<i32>, key: i32, op: Operator) -> Vec<i32> {
        let mut out = Vec::new();
        node.search(&key, op, &int_order(), &mut out);
        out.into_iter().copied().collect()
    }

    /// Root [20] over leaves [5, 10] and [30, 40].
    fn two_level() -> Node<i32> {
        Node {
            minimum_degree: 2,
            leaf: false,
            values: vec![20],
            children: vec![leaf(2, &[5, 10]), leaf(2, &[30, 40])],
        }
    }

    #[test]
    fn test_new_leaf() {
        let node = Node::new_leaf(3, 7);
        assert!(node.is_leaf());
        assert_eq!(node.key_count(), 1);
        assert_eq!(node.minimum_degree(), 3);
        assert!(node.children().is_empty());
        assert_eq!(node.height(), 1);
    }

    #[test]
    fn test_find_index_of_key() {
        let node = leaf(3, &[10, 20, 30, 40]);
        let order = int_order();

        assert_eq!(node.find_index_of_key(&5, &order), 0);
        assert_eq!(node.find_index_of_key(&10, &order), 0);
        assert_eq!(node.find_index_of_key(&25, &order), 2);
        assert_eq!(node.find_index_of_key(&40, &order), 3);
        assert_eq!(node.find_index_of_key(&99, &order), 4);
    }

    #[test]
    fn test_find_index_of_key_duplicates_is_lower_bound() {
        let node = leaf(3, &[10, 20, 20, 20, 30]);
        assert_eq!(node.find_index_of_key(&20, &int_order()), 1);
    }

    #[test]
    fn test_insert_non_full_leaf_keeps_order() {
        let mut node = leaf(3, &[10, 30]);
        let order = int_order();

        assert_eq!(node.insert_non_full(20, &20, &order), 0);
        assert_eq!(node.insert_non_full(5, &5, &order), 0);
        assert_eq!(node.insert_non_full(40, &40, &order), 0);

        assert_eq!(node.values(), &[5, 10, 20, 30, 40]);
        assert!(node.is_full());
    }

    #[test]
    fn test_split_child_leaf() {
        let mut root = Node::new_internal(2, leaf(2, &[1, 2, 3]));
        root.split_child(0);

        assert_eq!(root.values(), &[2]);
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children()[0].values(), &[1]);
        assert_eq!(root.children()[1].values(), &[3]);
        assert!(root.children()[1].is_leaf());
    }

    #[test]
    fn test_split_child_internal_moves_upper_children() {
        let t = 2;
        let full = Node {
            minimum_degree: t,
            leaf: false,
            values: vec![10, 20, 30],
            children: vec![leaf(t, &[5]), leaf(t, &[15]), leaf(t, &[25]), leaf(t, &[35])],
        };
        let mut parent = Node::new_internal(t, full);
        parent.split_child(0);

        assert_eq!(parent.values(), &[20]);
        let left = &parent.children()[0];
        let right = &parent.children()[1];
        assert_eq!(left.values(), &[10]);
        assert_eq!(right.values(), &[30]);
        assert_eq!(left.children().len(), 2);
        assert_eq!(right.children().len(), 2);
        assert_eq!(right.children()[0].values(), &[25]);
        assert!(!right.is_leaf());
    }

    #[test]
    fn test_split_child_in_the_middle_shifts_parent() {
        let t = 2;
        let mut parent = Node {
            minimum_degree: t,
            leaf: false,
            values: vec![10, 50],
            children: vec![leaf(t, &[5]), leaf(t, &[20, 30, 40]), leaf(t, &[60])],
        };
        parent.split_child(1);

        assert_eq!(parent.values(), &[10, 30, 50]);
        let shapes: Vec<&[i32]> = parent.children().iter().map(|c| c.values()).collect();
        assert_eq!(shapes, vec![&[5][..], &[20], &[40], &[60]]);
    }

    #[test]
    fn test_insert_non_full_splits_full_child() {
        let t = 2;
        let mut parent = Node {
            minimum_degree: t,
            leaf: false,
            values: vec![50],
            children: vec![leaf(t, &[10, 20, 30]), leaf(t, &[60])],
        };

        let splits = parent.insert_non_full(25, &25, &int_order());

        assert_eq!(splits, 1);
        assert_eq!(parent.values(), &[20, 50]);
        assert_eq!(parent.children()[1].values(), &[25, 30]);
    }

    #[test]
    fn test_search_operators_on_two_levels() {
        let root = two_level();

        assert_eq!(collect(&root, 10, Operator::Equal), vec![10]);
        assert_eq!(collect(&root, 20, Operator::Equal), vec![20]);
        assert!(collect(&root, 11, Operator::Equal).is_empty());

        assert_eq!(collect(&root, 20, Operator::LessThan), vec![5, 10]);
        assert_eq!(collect(&root, 20, Operator::LessThanOrEqual), vec![5, 10]);
        assert_eq!(collect(&root, 7, Operator::LessThan), vec![5]);

        assert_eq!(collect(&root, 20, Operator::GreaterThan), vec![20, 30, 40]);
        assert_eq!(collect(&root, 7, Operator::GreaterThanOrEqual), vec![10, 20, 30, 40]);

        assert_eq!(collect(&root, 30, Operator::NotEqual), vec![5, 10, 20, 40]);
    }

    #[test]
    fn test_traverse_in_order() {
        let root = two_level();
        let mut seen = Vec::new();
        root.traverse(&mut |v: &i32| seen.push(*v));
        assert_eq!(seen, vec![5, 10, 20, 30, 40]);
    }

    #[test]
    fn test_check_shape_detects_underfull_child() {
        let t = 3;
        let root = Node {
            minimum_degree: t,
            leaf: false,
            values: vec![10],
            children: vec![leaf(t, &[1, 2]), leaf(t, &[11])],
        };
        let mut depth = None;
        let err = root.check_shape(t, true, 0, &mut depth).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
    }

    #[test]
    fn test_check_shape_counts_values() {
        let mut depth = None;
        assert_eq!(two_level().check_shape(2, true, 0, &mut depth), Ok(5));
        assert_eq!(depth, Some(1));
    }
}
