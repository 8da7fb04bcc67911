/// Counts moved files and signals when progress should be reported
///
/// # Example
///
/// ```
/// use dicomsort_core::organize::MoveCounter;
///
/// let mut counter = MoveCounter::new(2);
/// assert_eq!(counter.record(), None);
/// assert_eq!(counter.record(), Some(2));
/// assert_eq!(counter.count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCounter {
    count: usize,
    interval: usize,
}

impl MoveCounter {
    /// Creates a counter reporting every `interval` moves (minimum 1)
    pub fn new(interval: usize) -> Self {
        Self {
            count: 0,
            interval: interval.max(1),
        }
    }

    /// Records one move
    ///
    /// Returns the running total when it reaches a multiple of the interval.
    pub fn record(&mut self) -> Option<usize> {
        self.count += 1;
        (self.count % self.interval == 0).then_some(self.count)
    }

    pub fn count(&self) -> usize {
        self.count
    }
}
