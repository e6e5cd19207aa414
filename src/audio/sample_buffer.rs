use super::frame::StereoFrame;

// What a pad holds once something has been recorded into it. Lives in memory
// for the session only.
#[derive(Clone, Debug, Default)]
pub struct SampleBuffer {
    pub data: Vec<StereoFrame>,
    cap: usize, // max frames a recording may take
}

impl SampleBuffer {
    pub fn with_cap(cap: usize) -> Self {
        Self { data: Vec::new(), cap }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    // start a fresh take, keeps the allocation around
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Append captured frames, dropping whatever doesn't fit under the cap.
    /// Returns how many frames were kept.
    pub fn append(&mut self, frames: &[StereoFrame]) -> usize {
        let room = self.cap.saturating_sub(self.data.len());
        let take = frames.len().min(room);
        self.data.extend_from_slice(&frames[..take]);
        take
    }

    pub fn is_full(&self) -> bool {
        self.data.len() >= self.cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_respects_cap() {
        let mut buf = SampleBuffer::with_cap(4);
        assert_eq!(buf.append(&[StereoFrame::mono(0.1); 3]), 3);
        assert_eq!(buf.append(&[StereoFrame::mono(0.2); 3]), 1);
        assert_eq!(buf.len(), 4);
        assert!(buf.is_full());
        assert_eq!(buf.append(&[StereoFrame::mono(0.3)]), 0);
    }

    #[test]
    fn test_clear_starts_new_take() {
        let mut buf = SampleBuffer::with_cap(4);
        buf.append(&[StereoFrame::mono(0.5); 4]);
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.append(&[StereoFrame::mono(0.5); 2]), 2);
    }
}
