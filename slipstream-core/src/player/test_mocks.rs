//! Mock media player for exercising selection and detection flows.

use super::{MediaPlayer, MediaSource, TimeRanges};

/// Scriptable player that records the calls made against it.
///
/// Tests mutate the public fields to stage playback state and inspect the
/// recorded calls afterwards.
#[derive(Debug)]
pub(crate) struct MockPlayer {
    pub current_time: f64,
    pub paused: bool,
    pub autoplay: bool,
    pub source: Option<MediaSource>,
    pub buffered: TimeRanges,
    pub played: TimeRanges,
    pub loaded_sources: Vec<MediaSource>,
    pub seeks: Vec<f64>,
    pub play_calls: usize,
    pub pause_calls: usize,
}

impl MockPlayer {
    pub fn new() -> Self {
        Self {
            current_time: 0.0,
            paused: true,
            autoplay: false,
            source: None,
            buffered: TimeRanges::default(),
            played: TimeRanges::default(),
            loaded_sources: Vec::new(),
            seeks: Vec::new(),
            play_calls: 0,
            pause_calls: 0,
        }
    }

    /// Stages buffered/played progress as single `[0, end)` ranges.
    pub fn stage_progress(&mut self, buffered_secs: f64, played_secs: f64) {
        self.buffered = TimeRanges::from(vec![(0.0, buffered_secs)]);
        self.played = TimeRanges::from(vec![(0.0, played_secs)]);
    }
}

impl MediaPlayer for MockPlayer {
    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn seek_to(&mut self, position_secs: f64) {
        self.seeks.push(position_secs);
        self.current_time = position_secs;
    }

    fn play(&mut self) {
        self.paused = false;
        self.play_calls += 1;
    }

    fn pause(&mut self) {
        self.paused = true;
        self.pause_calls += 1;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn autoplay(&self) -> bool {
        self.autoplay
    }

    fn current_source(&self) -> Option<MediaSource> {
        self.source.clone()
    }

    fn load_source(&mut self, source: MediaSource) {
        self.source = Some(source.clone());
        self.loaded_sources.push(source);
    }

    fn buffered(&self) -> TimeRanges {
        self.buffered.clone()
    }

    fn played(&self) -> TimeRanges {
        self.played.clone()
    }
}
