//! Collaborator contract for the media player runtime.
//!
//! The core never talks to a real player directly. Hosts implement
//! [`MediaPlayer`] over whatever runtime they embed and forward its
//! lifecycle signals as [`PlayerEvent`] values.

pub mod provider;
#[cfg(test)]
pub(crate) mod test_mocks;

use serde::{Deserialize, Serialize};

/// One playable rendition of the current media.
///
/// Opaque to the core: it is captured at ring construction and handed back
/// to the player verbatim on a quality switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSource {
    /// Location the player can load.
    pub uri: String,
    /// Container/codec hint, when the host knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl MediaSource {
    /// Creates a source without a MIME hint.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            mime_type: None,
        }
    }

    /// Creates a source with a MIME hint.
    pub fn with_mime(uri: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            mime_type: Some(mime_type.into()),
        }
    }
}

/// Half-open `[start, end)` span of media time, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    /// Length of the span, clamped at zero for degenerate ranges.
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// Disjoint time ranges as reported by the player.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeRanges(Vec<TimeRange>);

impl TimeRanges {
    pub fn new(ranges: Vec<TimeRange>) -> Self {
        Self(ranges)
    }

    pub fn ranges(&self) -> &[TimeRange] {
        &self.0
    }

    /// Sum of the lengths of all ranges.
    pub fn total_seconds(&self) -> f64 {
        self.0.iter().map(TimeRange::duration).sum()
    }
}

impl From<Vec<(f64, f64)>> for TimeRanges {
    fn from(spans: Vec<(f64, f64)>) -> Self {
        Self(
            spans
                .into_iter()
                .map(|(start, end)| TimeRange { start, end })
                .collect(),
        )
    }
}

/// Player lifecycle signals the host forwards into the switcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    /// Metadata of the current source finished loading.
    LoadedMetadata,
    /// Periodic playback/buffering progress tick.
    Progress,
    /// A seek started.
    Seeking,
    /// A seek completed.
    Seeked,
    /// The player is ready after the most recently assigned source.
    Ready,
    /// External request to step one rank up.
    QualityUp,
    /// External request to step one rank down.
    QualityDown,
}

/// Abstraction over the embedded media player.
///
/// All methods are synchronous; the player is driven from the same logical
/// thread of control as the core.
pub trait MediaPlayer {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Moves the playback position.
    fn seek_to(&mut self, position_secs: f64);

    fn play(&mut self);

    fn pause(&mut self);

    fn is_paused(&self) -> bool;

    /// Whether the host asked for playback to start automatically.
    fn autoplay(&self) -> bool;

    /// The source currently assigned to the player, if any.
    fn current_source(&self) -> Option<MediaSource>;

    /// Assigns a new source. The player signals completion through
    /// [`PlayerEvent::Ready`].
    fn load_source(&mut self, source: MediaSource);

    /// Ranges of media the player has buffered so far.
    fn buffered(&self) -> TimeRanges;

    /// Ranges of media that have actually been played.
    fn played(&self) -> TimeRanges;
}

/// Composable on/off capability for a UI affordance.
///
/// The quality menu's manual toggle implements this; the switcher suspends
/// it while automatic detection drives the selection.
pub trait Toggleable {
    fn enable(&mut self);

    fn disable(&mut self);

    fn is_enabled(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_ranges_total_sums_disjoint_spans() {
        let ranges = TimeRanges::from(vec![(0.0, 4.5), (10.0, 12.0)]);
        assert_eq!(ranges.total_seconds(), 6.5);
    }

    #[test]
    fn test_time_ranges_empty_total_is_zero() {
        assert_eq!(TimeRanges::default().total_seconds(), 0.0);
    }

    #[test]
    fn test_degenerate_range_clamps_to_zero() {
        let ranges = TimeRanges::from(vec![(5.0, 3.0)]);
        assert_eq!(ranges.total_seconds(), 0.0);
    }

    #[test]
    fn test_media_source_serde_defaults_mime() {
        let source: MediaSource =
            serde_json::from_str(r#"{"uri": "https://cdn.example/v/720.mp4"}"#).unwrap();
        assert_eq!(source.uri, "https://cdn.example/v/720.mp4");
        assert_eq!(source.mime_type, None);
    }
}
