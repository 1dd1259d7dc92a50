//! Array-backed binary min-heap keyed on relevance score.
//!
//! Used by [`HeapEviction`](super::strategy::HeapEviction) to keep the K
//! highest-scoring bullets of a group: the root is always the weakest member
//! and is the one evicted when the heap grows past K.

/// Anything that carries a relevance score.
pub trait Scored {
    fn relevance_score(&self) -> f64;
}

impl Scored for f64 {
    fn relevance_score(&self) -> f64 {
        *self
    }
}

/// Min-heap ordered by [`Scored::relevance_score`], lowest at the root.
///
/// Equal scores are not kept in insertion order.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    items: Vec<T>,
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Scored> MinHeap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lowest-scoring item, or `None` when empty.
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// O(log n).
    pub fn insert(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// Remove and return the lowest-scoring item. `None` when empty.
    ///
    /// O(log n).
    pub fn extract_min(&mut self) -> Option<T> {
        match self.items.len() {
            0 => None,
            1 => self.items.pop(),
            _ => {
                // Moves the last item into the root slot.
                let min = self.items.swap_remove(0);
                self.sift_down(0);
                Some(min)
            }
        }
    }

    /// Drain the heap, highest score first.
    pub fn into_sorted_desc(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.items.len());
        while let Some(item) = self.extract_min() {
            out.push(item);
        }
        out.reverse();
        out
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.score(parent) > self.score(idx) {
                self.items.swap(parent, idx);
                idx = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut smallest = idx;

            if left < len && self.score(left) < self.score(smallest) {
                smallest = left;
            }
            if right < len && self.score(right) < self.score(smallest) {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.items.swap(idx, smallest);
            idx = smallest;
        }
    }

    #[inline]
    fn score(&self, idx: usize) -> f64 {
        self.items[idx].relevance_score()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_heap_returns_none() {
        let mut heap: MinHeap<f64> = MinHeap::new();
        assert!(heap.peek().is_none());
        assert!(heap.extract_min().is_none());
        assert_eq!(heap.len(), 0);
    }

    #[test]
    fn single_element_round_trip() {
        let mut heap = MinHeap::<f64>::new();
        heap.insert(42.0);
        assert_eq!(heap.peek(), Some(&42.0));
        assert_eq!(heap.extract_min(), Some(42.0));
        assert!(heap.is_empty());
    }

    #[test]
    fn extracts_in_non_decreasing_order() {
        let mut heap = MinHeap::<f64>::with_capacity(8);
        for score in [5.0, 3.5, 9.0, -1.0, 3.5, 0.0, 12.25, 7.0] {
            heap.insert(score);
        }
        assert_eq!(heap.peek(), Some(&-1.0));

        let mut drained = Vec::new();
        while let Some(score) = heap.extract_min() {
            drained.push(score);
        }
        assert_eq!(drained, vec![-1.0, 0.0, 3.5, 3.5, 5.0, 7.0, 9.0, 12.25]);
    }

    #[test]
    fn peek_does_not_mutate() {
        let mut heap = MinHeap::<f64>::new();
        heap.insert(2.0);
        heap.insert(1.0);
        assert_eq!(heap.peek(), Some(&1.0));
        assert_eq!(heap.peek(), Some(&1.0));
        assert_eq!(heap.len(), 2);
    }

    #[test]
    fn interleaved_insert_and_extract_keeps_heap_order() {
        let mut heap = MinHeap::<f64>::new();
        heap.insert(10.0);
        heap.insert(4.0);
        assert_eq!(heap.extract_min(), Some(4.0));
        heap.insert(1.0);
        heap.insert(8.0);
        assert_eq!(heap.extract_min(), Some(1.0));
        assert_eq!(heap.extract_min(), Some(8.0));
        assert_eq!(heap.extract_min(), Some(10.0));
        assert_eq!(heap.extract_min(), None);
    }

    #[test]
    fn into_sorted_desc_is_highest_first() {
        let mut heap = MinHeap::<f64>::new();
        for score in [3.0, 1.0, 2.0] {
            heap.insert(score);
        }
        assert_eq!(heap.into_sorted_desc(), vec![3.0, 2.0, 1.0]);
    }
}
