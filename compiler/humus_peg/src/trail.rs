//! Persistent list used to accumulate repetition results.
//!
//! Each iteration of a repetition pushes onto a shared tail instead of
//! copying the values collected so far, so a repetition of `n` items does
//! `O(n)` work in total.

use std::rc::Rc;

struct Link<T> {
    item: T,
    prev: Trail<T>,
}

/// Immutable, newest-first list sharing its tail with earlier versions.
pub(crate) struct Trail<T> {
    head: Option<Rc<Link<T>>>,
    len: usize,
}

impl<T> Trail<T> {
    pub(crate) const fn new() -> Self {
        Trail { head: None, len: 0 }
    }

    #[must_use]
    pub(crate) fn push(&self, item: T) -> Self {
        Trail {
            head: Some(Rc::new(Link {
                item,
                prev: self.clone(),
            })),
            len: self.len + 1,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T: Clone> Trail<T> {
    /// Items oldest first. Links nobody else holds are moved out; only
    /// links still shared with another branch are cloned.
    pub(crate) fn into_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len);
        let mut next = self.head.take();
        while let Some(link) = next {
            match Rc::try_unwrap(link) {
                Ok(mut node) => {
                    next = node.prev.head.take();
                    out.push(node.item);
                }
                Err(shared) => {
                    out.push(shared.item.clone());
                    next = shared.prev.head.clone();
                }
            }
        }
        out.reverse();
        out
    }
}

impl<T> Clone for Trail<T> {
    fn clone(&self) -> Self {
        Trail {
            head: self.head.clone(),
            len: self.len,
        }
    }
}

impl<T> Default for Trail<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Unlink iteratively; the derived drop would recurse once per item.
impl<T> Drop for Trail<T> {
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(link) = next {
            match Rc::try_unwrap(link) {
                Ok(mut node) => next = node.prev.head.take(),
                Err(_) => break,
            }
        }
    }
}
