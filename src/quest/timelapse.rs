use crate::quest::photos::PhotoRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Finished,
    Cancelled,
}

/// Cursor over the ascending gallery sequence. Once a terminal transition
/// happens (last frame delivered, or an explicit cancel) further ticks are
/// no-ops, so a stray timer fire after teardown can never advance it.
#[derive(Debug)]
pub struct Timelapse {
    frames: Vec<PhotoRecord>,
    cursor: usize,
    state: PlaybackState,
}

impl Timelapse {
    pub fn new(mut frames: Vec<PhotoRecord>) -> Self {
        frames.sort_by_key(|r| r.milestone);
        let state = if frames.is_empty() {
            PlaybackState::Finished
        } else {
            PlaybackState::Playing
        };
        Self {
            frames,
            cursor: 0,
            state,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state != PlaybackState::Playing
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Deliver the next frame, or None once playback has terminated.
    pub fn advance(&mut self) -> Option<&PhotoRecord> {
        if self.state != PlaybackState::Playing {
            return None;
        }
        let frame = &self.frames[self.cursor];
        self.cursor += 1;
        if self.cursor == self.frames.len() {
            self.state = PlaybackState::Finished;
        }
        Some(frame)
    }

    pub fn cancel(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Cancelled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(milestone: u64) -> PhotoRecord {
        PhotoRecord {
            milestone,
            date: "2024-01-01T00:00:00+00:00".to_string(),
            sha256: "0".repeat(64),
            bytes: 1,
            payload_file: PathBuf::from(format!("/photos/ms-{milestone:06}.img")),
        }
    }

    #[test]
    fn plays_frames_in_milestone_order_then_finishes() {
        let mut lapse = Timelapse::new(vec![record(1_000), record(0), record(2_000)]);
        assert_eq!(lapse.advance().map(|f| f.milestone), Some(0));
        assert_eq!(lapse.advance().map(|f| f.milestone), Some(1_000));
        assert!(!lapse.is_done());
        assert_eq!(lapse.advance().map(|f| f.milestone), Some(2_000));
        assert_eq!(lapse.state(), PlaybackState::Finished);
        assert_eq!(lapse.advance().map(|f| f.milestone), None);
    }

    #[test]
    fn cancel_stops_further_ticks() {
        let mut lapse = Timelapse::new(vec![record(0), record(1_000)]);
        assert!(lapse.advance().is_some());
        lapse.cancel();
        assert_eq!(lapse.state(), PlaybackState::Cancelled);
        assert!(lapse.advance().is_none());
        // Cancelling again does not resurrect or re-terminate playback.
        lapse.cancel();
        assert_eq!(lapse.state(), PlaybackState::Cancelled);
    }

    #[test]
    fn empty_gallery_is_finished_immediately() {
        let mut lapse = Timelapse::new(Vec::new());
        assert!(lapse.is_done());
        assert!(lapse.advance().is_none());
    }
}
