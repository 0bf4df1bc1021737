//! Identifier allocation
//!
//! Ids are drawn from per-kind monotonic counters, so a freshly allocated id
//! never collides with an earlier one and sorts after it by sequence number.

use crate::models::{CommentId, VideoId};

/// Allocates video and comment ids
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next_video: u64,
    next_comment: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    /// Create an allocator whose first ids are `v1` and `c1`
    pub fn new() -> Self {
        Self {
            next_video: 1,
            next_comment: 1,
        }
    }

    pub fn next_video_id(&mut self) -> VideoId {
        let id = VideoId(format!("v{}", self.next_video));
        self.next_video += 1;
        id
    }

    pub fn next_comment_id(&mut self) -> CommentId {
        let id = CommentId(format!("c{}", self.next_comment));
        self.next_comment += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_first_ids() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.next_video_id().as_str(), "v1");
        assert_eq!(ids.next_comment_id().as_str(), "c1");
        assert_eq!(ids.next_video_id().as_str(), "v2");
    }

    #[test]
    fn test_ids_never_repeat() {
        let mut ids = IdAllocator::new();
        let allocated: HashSet<_> = (0..500).map(|_| ids.next_video_id()).collect();
        assert_eq!(allocated.len(), 500);
    }

    #[test]
    fn test_counters_are_independent() {
        let mut ids = IdAllocator::new();
        ids.next_video_id();
        ids.next_video_id();
        assert_eq!(ids.next_comment_id().as_str(), "c1");
    }
}
