use std::collections::HashMap;

use crate::core::error::OError;

/// An indexed binary min-heap supporting `decrease_key`, generic over any
/// totally ordered key `K` (crowding-distance trimming uses a composite key:
/// a distance paired with a random tie-breaker, see [`crate::selection::select`]).
///
/// Nodes are kept in a flat vector in heap order, and an `id -> position` map
/// lets a caller look up and re-key a node by its stable id in `O(log n)`
/// without a linear scan.
#[derive(Debug, Default)]
pub struct IndexedMinHeap<K, I> {
    nodes: Vec<(K, I)>,
    positions: HashMap<I, usize>,
}

impl<K, I> IndexedMinHeap<K, I>
where
    K: Ord + Copy,
    I: Copy + Eq + std::hash::Hash,
{
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            positions: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: I) -> bool {
        self.positions.contains_key(&id)
    }

    /// Push a new `(key, id)` pair. Returns a precondition error if `id` is
    /// already present.
    pub fn push(&mut self, key: K, id: I) -> Result<(), OError> {
        if self.positions.contains_key(&id) {
            return Err(OError::precondition(
                "heap",
                "push called with an id already present in the heap",
            ));
        }
        let index = self.nodes.len();
        self.nodes.push((key, id));
        self.positions.insert(id, index);
        self.sift_up(index);
        Ok(())
    }

    /// Remove and return the `(id, key)` pair with the smallest key.
    pub fn extract_min(&mut self) -> Result<(I, K), OError> {
        let n = self.nodes.len();
        if n == 0 {
            return Err(OError::precondition("heap", "extract_min called on an empty heap"));
        }
        let (min_key, min_id) = self.nodes[0];
        self.positions.remove(&min_id);

        let last = self.nodes.pop().unwrap();
        if !self.nodes.is_empty() {
            self.nodes[0] = last;
            self.positions.insert(last.1, 0);
            self.sift_down(0);
        }
        Ok((min_id, min_key))
    }

    /// The current key for `id`. Returns a precondition error if `id` is not
    /// in the heap.
    pub fn get_key(&self, id: I) -> Result<K, OError> {
        let &index = self
            .positions
            .get(&id)
            .ok_or_else(|| OError::precondition("heap", "get_key called with an unknown id"))?;
        Ok(self.nodes[index].0)
    }

    /// Lower the key of `id` to `new_key`. `new_key` must not be larger than
    /// the element's current key (this is a min-heap: raising a key can only
    /// be done by removing and re-inserting).
    pub fn decrease_key(&mut self, id: I, new_key: K) -> Result<(), OError> {
        let &index = self.positions.get(&id).ok_or_else(|| {
            OError::precondition("heap", "decrease_key called with an unknown id")
        })?;
        let current = self.nodes[index].0;
        if new_key > current {
            return Err(OError::precondition(
                "heap",
                "decrease_key called with a key greater than the current one",
            ));
        }
        self.nodes[index].0 = new_key;
        self.sift_up(index);
        Ok(())
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.positions.insert(self.nodes[i].1, j);
        self.positions.insert(self.nodes[j].1, i);
        self.nodes.swap(i, j);
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.nodes[parent].0 <= self.nodes[index].0 {
                break;
            }
            self.swap(parent, index);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let n = self.nodes.len();
        loop {
            let c1 = 2 * index + 1;
            let c2 = c1 + 1;
            let mut smallest = index;
            if c1 < n && self.nodes[c1].0 < self.nodes[smallest].0 {
                smallest = c1;
            }
            if c2 < n && self.nodes[c2].0 < self.nodes[smallest].0 {
                smallest = c2;
            }
            if smallest == index {
                break;
            }
            self.swap(index, smallest);
            index = smallest;
        }
    }

    /// Sanity check: every node's key is `<=` both of its children's keys.
    pub fn has_heap_property(&self) -> bool {
        let n = self.nodes.len();
        for i in 0..n {
            let c1 = 2 * i + 1;
            let c2 = 2 * i + 2;
            if c1 < n && self.nodes[c1].0 < self.nodes[i].0 {
                return false;
            }
            if c2 < n && self.nodes[c2].0 < self.nodes[i].0 {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod test {
    use ordered_float::OrderedFloat;

    use super::*;

    fn key(v: f64) -> OrderedFloat<f64> {
        OrderedFloat(v)
    }

    #[test]
    fn extract_min_returns_ascending_order() {
        let mut heap: IndexedMinHeap<OrderedFloat<f64>, i32> = IndexedMinHeap::new();
        heap.push(key(5.0), 0).unwrap();
        heap.push(key(1.0), 1).unwrap();
        heap.push(key(3.0), 2).unwrap();
        heap.push(key(2.0), 3).unwrap();
        heap.push(key(4.0), 4).unwrap();
        assert!(heap.has_heap_property());

        let mut order = Vec::new();
        while !heap.is_empty() {
            let (id, k) = heap.extract_min().unwrap();
            order.push((id, k.0));
            assert!(heap.has_heap_property());
        }
        assert_eq!(
            order,
            vec![(1, 1.0), (3, 2.0), (2, 3.0), (4, 4.0), (0, 5.0)]
        );
    }

    #[test]
    fn decrease_key_reorders_the_heap() {
        let mut heap: IndexedMinHeap<OrderedFloat<f64>, i32> = IndexedMinHeap::new();
        heap.push(key(10.0), 0).unwrap();
        heap.push(key(20.0), 1).unwrap();
        heap.push(key(30.0), 2).unwrap();
        heap.decrease_key(2, key(5.0)).unwrap();
        assert!(heap.has_heap_property());
        let (id, k) = heap.extract_min().unwrap();
        assert_eq!((id, k.0), (2, 5.0));
    }

    #[test]
    fn decrease_key_rejects_a_raise() {
        let mut heap: IndexedMinHeap<OrderedFloat<f64>, i32> = IndexedMinHeap::new();
        heap.push(key(10.0), 0).unwrap();
        assert!(heap.decrease_key(0, key(20.0)).is_err());
    }

    #[test]
    fn push_rejects_duplicate_id() {
        let mut heap: IndexedMinHeap<OrderedFloat<f64>, i32> = IndexedMinHeap::new();
        heap.push(key(1.0), 0).unwrap();
        assert!(heap.push(key(2.0), 0).is_err());
    }

    #[test]
    fn extract_min_on_empty_heap_errors() {
        let mut heap: IndexedMinHeap<OrderedFloat<f64>, usize> = IndexedMinHeap::new();
        assert!(heap.extract_min().is_err());
    }

    #[test]
    fn composite_keys_break_ties_by_the_secondary_component() {
        let mut heap: IndexedMinHeap<(OrderedFloat<f64>, u64), i32> = IndexedMinHeap::new();
        heap.push((key(1.0), 7), 0).unwrap();
        heap.push((key(1.0), 3), 1).unwrap();
        heap.push((key(2.0), 0), 2).unwrap();
        let (id, _) = heap.extract_min().unwrap();
        assert_eq!(id, 1);
    }
}
