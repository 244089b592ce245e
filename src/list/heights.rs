/// Prefix sums over item heights (Fenwick tree).
///
/// | Operation   | Time     |
/// |-------------|----------|
/// | `offset_of` | O(log n) |
/// | `index_at`  | O(log n) |
/// | `set`       | O(log n) |
/// | build       | O(n)     |
#[derive(Clone, Debug, Default)]
pub struct HeightIndex {
    heights: Vec<f64>,
    /// 1-based Fenwick array; `tree[0]` is unused.
    tree: Vec<f64>,
}

fn lowbit(i: usize) -> usize {
    i & i.wrapping_neg()
}

impl HeightIndex {
    pub fn from_heights(heights: Vec<f64>) -> Self {
        let n = heights.len();
        let mut tree = vec![0.0; n + 1];
        for i in 1..=n {
            tree[i] += heights[i - 1];
            let parent = i + lowbit(i);
            if parent <= n {
                tree[parent] += tree[i];
            }
        }
        Self { heights, tree }
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn get(&self, idx: usize) -> f64 {
        self.heights.get(idx).copied().unwrap_or(0.0)
    }

    /// Returns the change in height.
    pub fn set(&mut self, idx: usize, height: f64) -> f64 {
        let Some(slot) = self.heights.get_mut(idx) else {
            return 0.0;
        };
        let delta = height - *slot;
        *slot = height;
        let mut i = idx + 1;
        while i < self.tree.len() {
            self.tree[i] += delta;
            i += lowbit(i);
        }
        delta
    }

    /// Sum of the heights of items `[0, idx)`.
    pub fn offset_of(&self, idx: usize) -> f64 {
        let mut i = idx.min(self.len());
        let mut sum = 0.0;
        while i > 0 {
            sum += self.tree[i];
            i -= lowbit(i);
        }
        sum
    }

    pub fn total(&self) -> f64 {
        self.offset_of(self.len())
    }

    /// Index of the item covering `offset`, or `len()` past the end.
    pub fn index_at(&self, offset: f64) -> usize {
        let n = self.len();
        if n == 0 || offset <= 0.0 {
            return 0;
        }
        let mut pos = 0;
        let mut remaining = offset;
        let mut step = n.next_power_of_two();
        while step > 0 {
            let next = pos + step;
            if next <= n && self.tree[next] <= remaining {
                pos = next;
                remaining -= self.tree[next];
            }
            step >>= 1;
        }
        pos.min(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> HeightIndex {
        HeightIndex::from_heights(vec![10.0, 20.0, 30.0, 40.0, 50.0])
    }

    #[test]
    fn offsets_are_prefix_sums() {
        let idx = index();
        assert_eq!(idx.offset_of(0), 0.0);
        assert_eq!(idx.offset_of(1), 10.0);
        assert_eq!(idx.offset_of(3), 60.0);
        assert_eq!(idx.total(), 150.0);
        assert_eq!(idx.offset_of(99), 150.0);
    }

    #[test]
    fn index_at_finds_covering_item() {
        let idx = index();
        assert_eq!(idx.index_at(-5.0), 0);
        assert_eq!(idx.index_at(0.0), 0);
        assert_eq!(idx.index_at(9.9), 0);
        assert_eq!(idx.index_at(10.0), 1);
        assert_eq!(idx.index_at(59.0), 2);
        assert_eq!(idx.index_at(60.0), 3);
        assert_eq!(idx.index_at(149.0), 4);
        assert_eq!(idx.index_at(150.0), 5);
        assert_eq!(idx.index_at(1_000.0), 5);
    }

    #[test]
    fn set_updates_following_offsets() {
        let mut idx = index();
        assert_eq!(idx.set(1, 5.0), -15.0);
        assert_eq!(idx.get(1), 5.0);
        assert_eq!(idx.offset_of(2), 15.0);
        assert_eq!(idx.total(), 135.0);
        assert_eq!(idx.index_at(15.0), 2);
        assert_eq!(idx.set(42, 1.0), 0.0);
    }

    #[test]
    fn empty_index() {
        let idx = HeightIndex::default();
        assert!(idx.is_empty());
        assert_eq!(idx.total(), 0.0);
        assert_eq!(idx.index_at(10.0), 0);
    }
}
