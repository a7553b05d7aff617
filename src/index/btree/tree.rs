//! The B-tree front-end: root bookkeeping and the public API.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use super::collector::Collector;
use super::iter::Iter;
use super::node::{KeyOrder, Node};
use super::operator::Operator;
use super::stats::TreeStats;
use crate::common::config::{DEFAULT_MINIMUM_DEGREE, MIN_MINIMUM_DEGREE};
use crate::common::{Error, Result};

/// An in-memory B-tree of minimum degree `t` indexing values of type `V`
/// by a key `K` derived from each value.
///
/// The comparator `C` must be a total order over `K`, and the selector `S`
/// must return the same key for a given value for the lifetime of the tree.
/// Neither is checked at runtime; [`check_invariants`](Self::check_invariants)
/// will report the damage if they are not.
///
/// Duplicate keys are allowed. Inserting never merges values.
///
/// # Concurrency
/// The tree has no internal synchronization. Mutation goes through
/// `&mut self`, so it cannot overlap with a search or an iteration.
///
/// # Example
/// ```
/// use interchange_index::{BTree, Operator};
///
/// struct User { id: u32, name: &'static str }
///
/// let mut by_id = BTree::keyed(2, |u: &User| u.id).unwrap();
/// by_id.insert(User { id: 7, name: "ada" });
/// by_id.insert(User { id: 3, name: "bob" });
/// by_id.insert(User { id: 9, name: "cy" });
///
/// let below: Vec<&str> = by_id.search(&7, Operator::LessThan).iter().map(|u| u.name).collect();
/// assert_eq!(below, vec!["bob"]);
///
/// let names: Vec<&str> = by_id.iter().map(|u| u.name).collect();
/// assert_eq!(names, vec!["bob", "ada", "cy"]);
/// ```
pub struct BTree<V, K, C = fn(&K, &K) -> Ordering, S = fn(&V) -> K> {
    root: Option<Node<V>>,
    minimum_degree: usize,
    order: KeyOrder<C, S>,
    len: usize,
    stats: TreeStats,
    _key: PhantomData<fn() -> K>,
}

impl<V, K, C, S> BTree<V, K, C, S>
where
    C: Fn(&K, &K) -> Ordering,
    S: Fn(&V) -> K,
{
    /// Create an empty tree.
    ///
    /// Fails with [`Error::InvalidMinimumDegree`] if `minimum_degree < 2`.
    pub fn new(minimum_degree: usize, compare: C, select: S) -> Result<Self> {
        if minimum_degree < MIN_MINIMUM_DEGREE {
            return Err(Error::InvalidMinimumDegree {
                degree: minimum_degree,
                min: MIN_MINIMUM_DEGREE,
            });
        }
        Ok(Self::with_order(minimum_degree, KeyOrder { compare, select }))
    }

    fn with_order(minimum_degree: usize, order: KeyOrder<C, S>) -> Self {
        Self {
            root: None,
            minimum_degree,
            order,
            len: 0,
            stats: TreeStats::new(),
            _key: PhantomData,
        }
    }

    /// Insert a value.
    ///
    /// If the root is full it is split first and the tree grows one level;
    /// this is the only place the height changes.
    pub fn insert(&mut self, value: V) {
        let key = self.order.key_of(&value);
        let t = self.minimum_degree;

        let mut splits = 0;
        let mut grew = false;
        match self.root.as_ref().map(Node::is_full) {
            None => self.root = Some(Node::new_leaf(t, value)),
            Some(false) => {
                if let Some(root) = self.root.as_mut() {
                    splits = root.insert_non_full(value, &key, &self.order);
                }
            }
            Some(true) => {
                if let Some(old) = self.root.take() {
                    let mut root = Node::new_internal(t, old);
                    root.split_child(0);
                    // The median went up; pick the half the new value belongs to.
                    let i = usize::from(
                        self.order.compare_value(&root.values()[0], &key) == Ordering::Less,
                    );
                    splits = 1 + root.child_mut(i).insert_non_full(value, &key, &self.order);
                    grew = true;
                    debug!(height = root.height(), len = self.len + 1, "root split, tree grew");
                    self.root = Some(root);
                }
            }
        }

        self.len += 1;
        self.stats.record_insert(splits, grew);
    }

    /// Values matching `key` under `operator`, in ascending key order.
    ///
    /// See [`Operator`] for how the range operators treat an exact match.
    pub fn search(&self, key: &K, operator: Operator) -> Vec<&V> {
        self.search_into(key, operator, Vec::new())
    }

    /// Add the values matching `key` under `operator` to `collector` and
    /// hand it back.
    ///
    /// Pass `&mut collector` to accumulate across several searches. On an
    /// empty tree the collector is returned untouched.
    pub fn search_into<'a, Col>(&'a self, key: &K, operator: Operator, mut collector: Col) -> Col
    where
        Col: Collector<&'a V>,
    {
        self.stats.record_search();
        if let Some(root) = &self.root {
            root.search(key, operator, &self.order, &mut collector);
        }
        collector
    }

    /// Like [`search`](Self::search) with the operator given as a symbol
    /// (`<`, `<=`, `=`, `>=`, `>`, `!=`).
    ///
    /// Fails with [`Error::InvalidOperator`] for any other string.
    pub fn search_by(&self, key: &K, operator: &str) -> Result<Vec<&V>> {
        let operator: Operator = operator.parse()?;
        Ok(self.search(key, operator))
    }

    /// Whether any value has a key equal to `key`.
    pub fn contains(&self, key: &K) -> bool {
        !self.search(key, Operator::Equal).is_empty()
    }

    /// Verify the structural invariants:
    /// - every leaf at the same depth,
    /// - key counts within `[t-1, 2t-1]` (root: at least 1),
    /// - `n + 1` children on internal nodes,
    /// - in-order sequence non-descending by key,
    /// - `len()` matching the number of stored values.
    pub fn check_invariants(&self) -> Result<()> {
        let Some(root) = &self.root else {
            if self.len != 0 {
                return Err(Error::InvariantViolation(format!(
                    "empty tree reports {} values",
                    self.len
                )));
            }
            return Ok(());
        };

        let mut leaf_depth = None;
        let count = root.check_shape(self.minimum_degree, true, 0, &mut leaf_depth)?;
        if count != self.len {
            return Err(Error::InvariantViolation(format!(
                "tree holds {} values but reports {}",
                count, self.len
            )));
        }

        let mut previous: Option<K> = None;
        for (position, value) in self.iter().enumerate() {
            let key = self.order.key_of(value);
            if let Some(prev) = &previous {
                if (self.order.compare)(prev, &key) == Ordering::Greater {
                    return Err(Error::InvariantViolation(format!(
                        "value at in-order position {} is out of order",
                        position
                    )));
                }
            }
            previous = Some(key);
        }
        Ok(())
    }
}

impl<V, K: Ord, S> BTree<V, K, fn(&K, &K) -> Ordering, S>
where
    S: Fn(&V) -> K,
{
    /// Create an empty tree ordered by `K`'s own `Ord`.
    pub fn keyed(minimum_degree: usize, select: S) -> Result<Self> {
        Self::new(minimum_degree, <K as Ord>::cmp as fn(&K, &K) -> Ordering, select)
    }

    /// Create an empty tree ordered by `K`'s own `Ord`, with
    /// [`DEFAULT_MINIMUM_DEGREE`].
    pub fn keyed_default(select: S) -> Self {
        Self::with_order(
            DEFAULT_MINIMUM_DEGREE,
            KeyOrder {
                compare: <K as Ord>::cmp as fn(&K, &K) -> Ordering,
                select,
            },
        )
    }
}

impl<V, K, C, S> BTree<V, K, C, S> {
    /// The root node, absent exactly when the tree is empty.
    pub fn root(&self) -> Option<&Node<V>> {
        self.root.as_ref()
    }

    /// Minimum degree `t`, fixed at construction.
    pub fn minimum_degree(&self) -> usize {
        self.minimum_degree
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels (0 when empty, 1 for a lone leaf root).
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, Node::height)
    }

    /// Operation counters.
    pub fn stats(&self) -> &TreeStats {
        &self.stats
    }

    /// Iterate over all values in ascending key order.
    ///
    /// Each call starts a fresh, independent pass.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self.root.as_ref(), self.len)
    }

    /// Call `visitor` on every value in ascending key order.
    pub fn traverse<F: FnMut(&V)>(&self, mut visitor: F) {
        if let Some(root) = &self.root {
            root.traverse(&mut visitor);
        }
    }
}

impl<V, K, C, S> Extend<V> for BTree<V, K, C, S>
where
    C: Fn(&K, &K) -> Ordering,
    S: Fn(&V) -> K,
{
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, V, K, C, S> IntoIterator for &'a BTree<V, K, C, S> {
    type Item = &'a V;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

impl<V: fmt::Debug, K, C, S> fmt::Debug for BTree<V, K, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BTree")
            .field("minimum_degree", &self.minimum_degree)
            .field("len", &self.len)
            .field("root", &self.root)
            .finish()
    }
}
