use crate::math::Size;

/// Maximum number of remembered fixed sizes
pub const RECENT_SIZE_CAPACITY: usize = 10;

/// Most-recent-first list of fixed sizes, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentSizeHistory {
    sizes: Vec<Size>,
}

impl RecentSizeHistory {
    pub fn new() -> Self {
        Self { sizes: Vec::new() }
    }

    /// Build from a most-recent-first sequence, dropping duplicates and
    /// anything past capacity
    pub fn from_sizes<I: IntoIterator<Item = Size>>(sizes: I) -> Self {
        let mut history = Self::new();
        for size in sizes {
            if history.sizes.len() == RECENT_SIZE_CAPACITY {
                break;
            }
            if !history.sizes.contains(&size) {
                history.sizes.push(size);
            }
        }
        history
    }

    /// Move `size` to the front
    pub fn record(&mut self, size: Size) {
        self.sizes.retain(|s| *s != size);
        self.sizes.insert(0, size);
        self.sizes.truncate(RECENT_SIZE_CAPACITY);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Size> {
        self.sizes.iter()
    }

    pub fn as_slice(&self) -> &[Size] {
        &self.sizes
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_inserts_at_front() {
        let mut history = RecentSizeHistory::new();
        history.record(Size::new(800, 600));
        history.record(Size::new(1024, 768));
        assert_eq!(history.as_slice(), &[Size::new(1024, 768), Size::new(800, 600)]);
    }

    #[test]
    fn test_record_existing_moves_to_front() {
        let mut history = RecentSizeHistory::new();
        history.record(Size::new(1, 1));
        history.record(Size::new(2, 2));
        history.record(Size::new(3, 3));
        history.record(Size::new(1, 1));
        assert_eq!(
            history.as_slice(),
            &[Size::new(1, 1), Size::new(3, 3), Size::new(2, 2)]
        );
    }

    #[test]
    fn test_record_is_idempotent() {
        let mut history = RecentSizeHistory::new();
        history.record(Size::new(640, 480));
        history.record(Size::new(640, 480));
        history.record(Size::new(640, 480));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_capacity_is_enforced() {
        let mut history = RecentSizeHistory::new();
        for i in 1..=25 {
            history.record(Size::new(i, i));
        }
        assert_eq!(history.len(), RECENT_SIZE_CAPACITY);
        assert_eq!(history.as_slice()[0], Size::new(25, 25));
        assert_eq!(history.as_slice()[9], Size::new(16, 16));
    }

    #[test]
    fn test_from_sizes_dedups_and_caps() {
        let sizes = (0..30).map(|i| Size::new(1 + i % 12, 1));
        let history = RecentSizeHistory::from_sizes(sizes);
        assert_eq!(history.len(), RECENT_SIZE_CAPACITY);
        assert_eq!(history.as_slice()[0], Size::new(1, 1));
    }
}
