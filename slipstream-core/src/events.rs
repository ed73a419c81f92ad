//! Notifications produced for UI collaborators and diagnostics.

use serde::Serialize;

/// Diagnostic payload describing the sampler window on a progress tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressStat {
    /// Wall-clock span covered by the window, in milliseconds.
    pub elapsed_ms: u64,
    /// Cumulative buffered media at the newest sample, in seconds.
    pub buffered_secs: f64,
    /// Cumulative played media at the newest sample, in seconds.
    pub played_secs: f64,
    /// Number of samples currently in the window.
    pub samples: usize,
}

/// Event fanned out to switcher subscribers.
///
/// Serializable so hosts can forward events onto whatever bus they use.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SwitchEvent {
    /// The source set was replaced; menus should re-render.
    SourcesUpdated,
    /// A new level was applied. `name` is `None` when the source set
    /// became empty and the label should clear.
    QualityChanged { name: Option<String> },
    /// Periodic measurement diagnostic.
    ProgressStat { stat: ProgressStat },
    /// The detection engine asked for one rank up.
    QualityUp,
    /// The detection engine asked for one rank down.
    QualityDown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_serialize_tagged() {
        let event = SwitchEvent::QualityChanged {
            name: Some("720p".to_owned()),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "quality_changed");
        assert_eq!(json["name"], "720p");

        let event = SwitchEvent::SourcesUpdated;
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "sources_updated");
    }
}
