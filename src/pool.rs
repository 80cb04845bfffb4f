/// Dense, ordered collection of live entities of one kind.
///
/// Removals requested during a sweep are only recorded; [`EntityPool::apply_removals`]
/// performs them afterwards, highest index first, so indices handed out during the
/// frame stay valid until then.
#[derive(Debug, Clone)]
pub struct EntityPool<T> {
    items: Vec<T>,
    pending: Vec<usize>,
}

impl<T> Default for EntityPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EntityPool<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            pending: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Queues `index` for removal. Returns false if it is out of range
    /// or already queued, so nothing is ever removed twice.
    pub fn mark_for_removal(&mut self, index: usize) -> bool {
        if index >= self.items.len() || self.pending.contains(&index) {
            return false;
        }
        self.pending.push(index);
        true
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.pending.contains(&index)
    }

    pub fn pending_removals(&self) -> usize {
        self.pending.len()
    }

    /// Mutates every entity in order and queues those for which `f` returns true
    pub fn sweep(&mut self, mut f: impl FnMut(&mut T) -> bool) {
        for (index, item) in self.items.iter_mut().enumerate() {
            if f(item) && !self.pending.contains(&index) {
                self.pending.push(index);
            }
        }
    }

    /// Removes every queued entity, highest index first, and hands them back
    /// in that order. Survivors keep their relative order.
    pub fn apply_removals(&mut self) -> Vec<T> {
        self.pending.sort_unstable_by(|a, b| b.cmp(a));
        let mut removed = Vec::with_capacity(self.pending.len());
        for index in self.pending.drain(..) {
            debug_assert!(index < self.items.len());
            removed.push(self.items.remove(index));
        }
        removed
    }

    /// Releases every entity, queued or not
    pub fn clear(&mut self) -> Vec<T> {
        self.pending.clear();
        std::mem::take(&mut self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_of(values: &[u32]) -> EntityPool<u32> {
        let mut pool = EntityPool::new();
        for &value in values {
            pool.push(value);
        }
        pool
    }

    #[test]
    fn test_removals_are_deferred() {
        let mut pool = pool_of(&[10, 11, 12]);
        assert!(pool.mark_for_removal(1));
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.get(2), Some(&12));

        let removed = pool.apply_removals();
        assert_eq!(removed, vec![11]);
        assert_eq!(pool.as_slice(), &[10, 12]);
    }

    #[test]
    fn test_removal_applies_highest_index_first() {
        let mut pool = pool_of(&[0, 1, 2, 3, 4]);
        pool.mark_for_removal(1);
        pool.mark_for_removal(4);
        pool.mark_for_removal(2);

        let removed = pool.apply_removals();
        assert_eq!(removed, vec![4, 2, 1]);
        assert_eq!(pool.as_slice(), &[0, 3]);
        assert_eq!(pool.pending_removals(), 0);
    }

    #[test]
    fn test_double_mark_is_rejected() {
        let mut pool = pool_of(&[7, 8]);
        assert!(pool.mark_for_removal(0));
        assert!(!pool.mark_for_removal(0));
        assert!(!pool.mark_for_removal(5));
        assert_eq!(pool.apply_removals(), vec![7]);
        assert_eq!(pool.as_slice(), &[8]);
    }

    #[test]
    fn test_sweep_mutates_and_queues() {
        let mut pool = pool_of(&[1, 5, 2, 9]);
        pool.sweep(|value| {
            *value += 1;
            *value > 4
        });
        assert_eq!(pool.as_slice(), &[2, 6, 3, 10]);
        assert!(pool.is_marked(1) && pool.is_marked(3));
        pool.apply_removals();
        assert_eq!(pool.as_slice(), &[2, 3]);
    }

    #[test]
    fn test_sweep_does_not_requeue_marked() {
        let mut pool = pool_of(&[1, 2]);
        pool.mark_for_removal(0);
        pool.sweep(|_| true);
        assert_eq!(pool.pending_removals(), 2);
        assert_eq!(pool.apply_removals().len(), 2);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut pool = pool_of(&[1, 2, 3]);
        pool.mark_for_removal(0);
        assert_eq!(pool.clear(), vec![1, 2, 3]);
        assert!(pool.is_empty());
        assert!(pool.apply_removals().is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_each_marked_index_removed_once(
                len in 0usize..40,
                marks in prop::collection::vec(0usize..50, 0..60),
            ) {
                let values: Vec<u32> = (0..len as u32).collect();
                let mut pool = pool_of(&values);
                for &mark in &marks {
                    pool.mark_for_removal(mark);
                }

                let mut expected_removed: Vec<u32> = marks
                    .iter()
                    .filter(|&&m| m < len)
                    .map(|&m| m as u32)
                    .collect();
                expected_removed.sort_unstable();
                expected_removed.dedup();

                let mut removed = pool.apply_removals();
                removed.sort_unstable();
                prop_assert_eq!(&removed, &expected_removed);

                let survivors: Vec<u32> = values
                    .iter()
                    .copied()
                    .filter(|v| !expected_removed.contains(v))
                    .collect();
                prop_assert_eq!(pool.as_slice(), survivors.as_slice());
            }
        }
    }
}
