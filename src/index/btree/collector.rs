//! Output containers for search results.

use std::collections::{BTreeSet, HashSet};
use std::hash::{BuildHasher, Hash};

/// Accumulates values produced by a search.
///
/// The tree adds matches in ascending key order, so an order-preserving
/// collector such as `Vec` sees sorted results. Set collectors discard that
/// order.
///
/// # Example
/// ```
/// use interchange_index::{BTree, Operator};
/// use std::collections::HashSet;
///
/// let mut tree = BTree::keyed(2, |v: &u32| *v).unwrap();
/// tree.extend([1, 2, 3]);
///
/// let found: HashSet<&u32> = tree.search_into(&2, Operator::Equal, HashSet::new());
/// assert!(found.contains(&2));
/// ```
pub trait Collector<T> {
    /// Add one matching item.
    fn add(&mut self, item: T);
}

impl<T> Collector<T> for Vec<T> {
    fn add(&mut self, item: T) {
        self.push(item);
    }
}

impl<T: Eq + Hash, S: BuildHasher> Collector<T> for HashSet<T, S> {
    fn add(&mut self, item: T) {
        self.insert(item);
    }
}

impl<T: Ord> Collector<T> for BTreeSet<T> {
    fn add(&mut self, item: T) {
        self.insert(item);
    }
}

/// Lend a collector to several searches in a row.
impl<T, C: Collector<T> + ?Sized> Collector<T> for &mut C {
    fn add(&mut self, item: T) {
        (**self).add(item);
    }
}
