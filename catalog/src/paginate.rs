use serde::Serialize;
use std::num::NonZeroUsize;

/// Page sizes offered to the user.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 20, 50];

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// The `index`-th window of `size` items, clamped to the slice. An index past
/// the end yields an empty slice.
pub fn paginate<T>(items: &[T], index: usize, size: NonZeroUsize) -> &[T] {
    let start = index.saturating_mul(size.get()).min(items.len());
    let end = start.saturating_add(size.get()).min(items.len());
    &items[start..end]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    index: usize,
    size: NonZeroUsize,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(NonZeroUsize::MIN.saturating_add(DEFAULT_PAGE_SIZE - 1))
    }
}

impl PageWindow {
    pub fn new(size: NonZeroUsize) -> Self {
        Self { index: 0, size }
    }

    pub fn index(self) -> usize {
        self.index
    }

    pub fn size(self) -> NonZeroUsize {
        self.size
    }

    pub fn has_prev(self) -> bool {
        self.index > 0
    }

    pub fn has_next(self, total: usize) -> bool {
        self.index
            .saturating_add(1)
            .saturating_mul(self.size.get())
            < total
    }

    pub fn page_count(self, total: usize) -> usize {
        total.div_ceil(self.size.get())
    }

    pub fn next(&mut self, total: usize) -> bool {
        if self.has_next(total) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    pub fn prev(&mut self) -> bool {
        if self.has_prev() {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Changing the size always returns to the first page.
    pub fn set_size(&mut self, size: NonZeroUsize) {
        self.size = size;
        self.index = 0;
    }

    pub fn slice<T>(self, items: &[T]) -> &[T] {
        paginate(items, self.index, self.size)
    }
}
