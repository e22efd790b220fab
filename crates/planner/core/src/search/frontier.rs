use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Min-priority open list.
///
/// Entries pop in ascending priority. Equal priorities pop in insertion order,
/// which keeps expansion deterministic when floating-point heuristics tie.
#[derive(Debug)]
pub struct Frontier<T> {
    heap: BinaryHeap<Entry<T>>,
    counter: u64,
}

#[derive(Debug)]
struct Entry<T> {
    priority: f64,
    order: u64,
    item: T,
}

// `BinaryHeap` is a max-heap, so both keys are compared in reverse.
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl<T> Eq for Entry<T> {}

impl<T> Frontier<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            counter: 0,
        }
    }

    pub fn push(&mut self, priority: f64, item: T) {
        let order = self.counter;
        self.counter += 1;
        self.heap.push(Entry {
            priority,
            order,
            item,
        });
    }

    /// Removes the entry with the lowest priority, returning it with its priority.
    pub fn pop(&mut self) -> Option<(f64, T)> {
        self.heap.pop().map(|entry| (entry.priority, entry.item))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T> Default for Frontier<T> {
    fn default() -> Self {
        Self::new()
    }
}
