//! Ordered entity collections.
//!
//! Removal is never interleaved with forward iteration: callers collect the
//! indices they want gone and hand them to [`EntityStore::remove_indices`],
//! which drops them back-to-front so no survivor is skipped or revisited.

#[derive(Clone, Debug, PartialEq)]
pub struct EntityStore<T> {
    items: Vec<T>,
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> EntityStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Remove one entity, preserving the order of the rest.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Remove every listed index exactly once.  Duplicates and out-of-range
    /// indices are ignored.  Returns how many entities were removed.
    pub fn remove_indices(&mut self, indices: &[usize]) -> usize {
        let mut sorted = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let mut removed = 0;
        for &i in sorted.iter().rev() {
            if self.remove(i).is_some() {
                removed += 1;
            }
        }
        removed
    }

    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.items.retain(keep);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a, T> IntoIterator for &'a EntityStore<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> FromIterator<T> for EntityStore<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
