//! Fixed-capacity block accumulator
//!
//! Holds the pending tail of the input between transform calls. The cursor
//! `pos` stays within `[0, capacity]`; the buffer is full exactly when
//! `pos == capacity` and empty exactly when `pos == 0`.

use zeroize::Zeroize;

/// Block accumulator owned by a streaming engine
#[derive(Clone)]
pub struct HashBuffer {
    data: Box<[u8]>,
    pos: usize,
}

impl HashBuffer {
    /// Create an empty accumulator holding `capacity` bytes
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity].into_boxed_slice(),
            pos: 0,
        }
    }

    /// Total number of bytes the accumulator holds when full
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Number of pending bytes
    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Whether no bytes are pending
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// Whether the accumulator holds a complete block
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.pos == self.data.len()
    }

    /// Pending bytes, without consuming them
    #[must_use]
    pub fn filled(&self) -> &[u8] {
        &self.data[..self.pos]
    }

    /// Zero the storage and reset the cursor
    pub fn initialize(&mut self) {
        self.data.zeroize();
        self.pos = 0;
    }

    /// Copy as much of `source` as fits; returns whether the buffer is now full
    ///
    /// An empty `source` is a no-op and reports `false`.
    pub fn feed(&mut self, source: &[u8]) -> bool {
        if source.is_empty() {
            return false;
        }
        let n = self.copy_in(source);
        self.pos += n;
        self.is_full()
    }

    /// Feed from `data[*index..*index + *length]`, advancing the caller's cursor
    ///
    /// `index` moves forward and `length` shrinks by the number of bytes copied,
    /// and the same count is added to `processed`. This is the variant the
    /// engine uses so buffering and direct block consumption share one pass.
    pub fn feed_tracked(
        &mut self,
        data: &[u8],
        index: &mut usize,
        length: &mut usize,
        processed: &mut u64,
    ) -> bool {
        if *length == 0 {
            return false;
        }
        let n = self.copy_in(&data[*index..*index + *length]);
        self.pos += n;
        *index += n;
        *length -= n;
        *processed = processed.wrapping_add(n as u64);
        self.is_full()
    }

    fn copy_in(&mut self, source: &[u8]) -> usize {
        let n = source.len().min(self.data.len() - self.pos);
        self.data[self.pos..self.pos + n].copy_from_slice(&source[..n]);
        n
    }

    /// Consuming read of the whole block: resets the cursor and returns the storage
    pub fn take(&mut self) -> &[u8] {
        self.pos = 0;
        &self.data
    }

    /// Consuming read of a final partial block with `[pos, capacity)` zeroed
    pub fn take_zero_padded(&mut self) -> &[u8] {
        self.data[self.pos..].fill(0);
        self.pos = 0;
        &self.data
    }
}

impl Drop for HashBuffer {
    fn drop(&mut self) {
        self.data.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_reports_full_exactly_at_capacity() {
        let mut buf = HashBuffer::new(4);
        assert!(buf.is_empty());
        assert!(!buf.feed(&[1, 2]));
        assert_eq!(buf.pos(), 2);
        assert!(buf.feed(&[3, 4, 5, 6]));
        assert!(buf.is_full());
        assert_eq!(buf.filled(), &[1, 2, 3, 4]);
    }

    #[test]
    fn feed_empty_is_noop() {
        let mut buf = HashBuffer::new(4);
        assert!(!buf.feed(&[]));
        assert!(buf.is_empty());
    }

    #[test]
    fn feed_never_writes_past_capacity() {
        let mut buf = HashBuffer::new(3);
        assert!(buf.feed(&[9; 10]));
        assert_eq!(buf.pos(), 3);
        assert!(buf.feed(&[7]));
        assert_eq!(buf.filled(), &[9, 9, 9]);
    }

    #[test]
    fn tracked_feed_moves_caller_cursor() {
        let data = [10u8, 11, 12, 13, 14, 15];
        let mut buf = HashBuffer::new(4);
        buf.feed(&[1]);

        let (mut index, mut length, mut processed) = (1usize, 5usize, 100u64);
        assert!(buf.feed_tracked(&data, &mut index, &mut length, &mut processed));
        assert_eq!((index, length, processed), (4, 2, 103));
        assert_eq!(buf.filled(), &[1, 11, 12, 13]);
    }

    #[test]
    fn tracked_feed_with_zero_length() {
        let mut buf = HashBuffer::new(4);
        let (mut index, mut length, mut processed) = (0usize, 0usize, 0u64);
        assert!(!buf.feed_tracked(&[1, 2], &mut index, &mut length, &mut processed));
        assert_eq!((index, processed), (0, 0));
    }

    #[test]
    fn take_resets_cursor() {
        let mut buf = HashBuffer::new(2);
        buf.feed(&[5, 6]);
        assert_eq!(buf.take(), &[5, 6]);
        assert!(buf.is_empty());
    }

    #[test]
    fn take_zero_padded_clears_stale_tail() {
        let mut buf = HashBuffer::new(4);
        buf.feed(&[1, 2, 3, 4]);
        let _ = buf.take();
        buf.feed(&[9]);
        assert_eq!(buf.take_zero_padded(), &[9, 0, 0, 0]);
        assert!(buf.is_empty());
    }

    #[test]
    fn initialize_zero_fills() {
        let mut buf = HashBuffer::new(3);
        buf.feed(&[1, 2, 3]);
        buf.initialize();
        assert!(buf.is_empty());
        buf.feed(&[4]);
        assert_eq!(buf.take_zero_padded(), &[4, 0, 0]);
    }

    #[test]
    fn clone_is_independent() {
        let mut a = HashBuffer::new(4);
        a.feed(&[1, 2]);
        let mut b = a.clone();
        b.feed(&[3]);
        assert_eq!(a.filled(), &[1, 2]);
        assert_eq!(b.filled(), &[1, 2, 3]);
    }
}
