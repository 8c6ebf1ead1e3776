//! Music directive change detection.
//!
//! The backend owns playback state: a frame presenting the same directive
//! as the previous one continues playback, a different song (or loop
//! flag) restarts it, and a missing directive stops it.

use tui_rooms_types::Music;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTransition {
    /// Start (or restart) playback of this song.
    Start(Music),
    /// Stop playback.
    Stop,
    /// Keep whatever is playing (or silence) going.
    Continue,
}

#[derive(Debug, Default)]
pub struct MusicTracker {
    current: Option<Music>,
}

impl MusicTracker {
    pub fn observe(&mut self, directive: Option<Music>) -> MusicTransition {
        match (self.current, directive) {
            (Some(prev), Some(next)) if prev == next => MusicTransition::Continue,
            (_, Some(next)) => {
                self.current = Some(next);
                MusicTransition::Start(next)
            }
            (Some(_), None) => {
                self.current = None;
                MusicTransition::Stop
            }
            (None, None) => MusicTransition::Continue,
        }
    }

    pub fn current(&self) -> Option<Music> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_song_and_loop_is_not_a_change() {
        let mut tracker = MusicTracker::default();
        assert_eq!(
            tracker.observe(Some(Music::new(21, true))),
            MusicTransition::Start(Music::new(21, true))
        );
        assert_eq!(
            tracker.observe(Some(Music::new(21, true))),
            MusicTransition::Continue
        );
    }

    #[test]
    fn different_song_restarts_playback() {
        let mut tracker = MusicTracker::default();
        tracker.observe(Some(Music::new(21, true)));
        assert_eq!(
            tracker.observe(Some(Music::new(27, true))),
            MusicTransition::Start(Music::new(27, true))
        );
    }

    #[test]
    fn loop_flag_alone_counts_as_a_change() {
        let mut tracker = MusicTracker::default();
        tracker.observe(Some(Music::new(6, true)));
        assert_eq!(
            tracker.observe(Some(Music::new(6, false))),
            MusicTransition::Start(Music::new(6, false))
        );
    }

    #[test]
    fn missing_directive_stops_playback_once() {
        let mut tracker = MusicTracker::default();
        tracker.observe(Some(Music::new(15, true)));
        assert_eq!(tracker.observe(None), MusicTransition::Stop);
        assert_eq!(tracker.observe(None), MusicTransition::Continue);
    }
}
