//! Wrap-around cursor over a fixed-length list.

/// Index into a list of `len` items.
///
/// Whenever `len > 0` the index stays in `0..len`; moving past either end
/// wraps to the other one. An empty list keeps the index at 0 and ignores
/// movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn up(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = self
            .index
            .checked_sub(1)
            .unwrap_or_else(|| self.len.saturating_sub(1));
    }

    #[allow(clippy::arithmetic_side_effects)]
    pub fn down(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = (self.index + 1) % self.len;
    }
}
