use std::ops::Range;

/// Cards shifted per scroll button press.
pub const CAROUSEL_STEP: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// The visible slice of a horizontally scrolling genre row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselWindow {
    offset: usize,
    len: usize,
    capacity: usize,
}

impl CarouselWindow {
    pub fn new(len: usize, capacity: usize) -> Self {
        Self {
            offset: 0,
            len,
            capacity: capacity.max(1),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// How many cards fit on screen. Re-clamps the offset.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.offset = self.offset.min(self.max_offset());
    }

    fn max_offset(&self) -> usize {
        self.len.saturating_sub(self.capacity)
    }

    pub fn scroll(&mut self, direction: Direction) {
        self.offset = match direction {
            Direction::Left => self.offset.saturating_sub(CAROUSEL_STEP),
            Direction::Right => (self.offset + CAROUSEL_STEP).min(self.max_offset()),
        };
    }

    pub fn can_scroll(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.offset > 0,
            Direction::Right => self.offset < self.max_offset(),
        }
    }

    /// Indices of the cards currently shown.
    pub fn range(&self) -> Range<usize> {
        self.offset..(self.offset + self.capacity).min(self.len)
    }
}
