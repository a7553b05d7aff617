//! Lazy in-order iteration over a B-tree.

use std::iter::FusedIterator;

use super::node::Node;

/// Iterator over the values of a [`BTree`](crate::BTree) in ascending key order.
///
/// Holds a stack of `(node, next slot)` frames, one per level of the
/// current descent, so each step resumes where the previous one stopped
/// instead of walking down from the root again.
///
/// The iterator borrows the tree, so the tree cannot be modified while
/// it is alive.
pub struct Iter<'a, V> {
    stack: Vec<(&'a Node<V>, usize)>,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(root: Option<&'a Node<V>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        if let Some(root) = root {
            iter.descend(root);
        }
        iter
    }

    /// Push `node` and its leftmost path down to a leaf.
    fn descend(&mut self, mut node: &'a Node<V>) {
        loop {
            self.stack.push((node, 0));
            match node.children().first() {
                Some(child) => node = child,
                None => break,
            }
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        loop {
            let (node, slot) = self.stack.last_mut()?;
            let node: &'a Node<V> = *node;
            if *slot < node.key_count() {
                let value = &node.values()[*slot];
                *slot += 1;
                let right = *slot;
                // The child right of this value comes next.
                if let Some(child) = node.children().get(right) {
                    self.descend(child);
                }
                self.remaining = self.remaining.saturating_sub(1);
                return Some(value);
            }
            self.stack.pop();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}
