//! Ordered ring of selectable quality variants.
//!
//! Levels are kept in rank order (index 0 is the highest rank) and the two
//! navigation relations are computed over indices: `next` wraps around the
//! end forming a full cycle for the manual cycle action, while the
//! `higher`/`lower` rank chain stops at the two ends.

use serde::{Deserialize, Serialize};

use crate::player::MediaSource;

/// Input descriptor for one quality variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceOption {
    /// Display name, also the identity used for remembered preferences.
    pub name: String,
    /// Source the player loads when this variant is chosen.
    pub source: MediaSource,
    /// Pre-selection hint, honored only when no stored preference exists.
    #[serde(default)]
    pub selected: bool,
}

/// One selectable variant inside a [`QualityRing`].
///
/// Identity is immutable once the ring is built; only the selection flag
/// changes, and only through the ring.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityLevel {
    name: String,
    source: MediaSource,
    selected: bool,
}

impl QualityLevel {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &MediaSource {
        &self.source
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }
}

/// Quality variants for the current source set, in rank order.
///
/// A non-empty ring holds exactly one selected level from construction on.
/// Rebuilding for a new source set replaces every level; indices from an
/// older ring are meaningless afterwards.
#[derive(Debug, Clone, Default)]
pub struct QualityRing {
    levels: Vec<QualityLevel>,
}

impl QualityRing {
    /// The "no sources" terminal state: nothing to select.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a ring from descriptors, choosing the initial selection.
    ///
    /// Selection policy, in order:
    /// 1. A remembered name selects the first level matching it.
    /// 2. A remembered name matching nothing falls back to the first level.
    /// 3. With no remembered name, the first `selected` hint in list order
    ///    wins; later hints are cleared.
    /// 4. Otherwise the first level is selected.
    pub fn from_options(options: Vec<SourceOption>, remembered: Option<&str>) -> Self {
        let mut levels: Vec<QualityLevel> = options
            .into_iter()
            .map(|option| QualityLevel {
                name: option.name,
                source: option.source,
                selected: option.selected,
            })
            .collect();

        if levels.is_empty() {
            return Self { levels };
        }

        let chosen = match remembered {
            Some(name) => levels.iter().position(|level| level.name == name),
            None => levels.iter().position(|level| level.selected),
        }
        .unwrap_or(0);

        for (index, level) in levels.iter_mut().enumerate() {
            level.selected = index == chosen;
        }

        Self { levels }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[QualityLevel] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Option<&QualityLevel> {
        self.levels.get(index)
    }

    /// Index of the selected level. `None` only for an empty ring.
    pub fn selected_index(&self) -> Option<usize> {
        self.levels.iter().position(QualityLevel::is_selected)
    }

    pub fn selected(&self) -> Option<&QualityLevel> {
        self.selected_index().and_then(|index| self.level(index))
    }

    /// Cyclic successor used by the manual "cycle to next" action.
    pub fn next_index(&self, index: usize) -> Option<usize> {
        if self.levels.is_empty() || index >= self.levels.len() {
            return None;
        }
        Some((index + 1) % self.levels.len())
    }

    /// One rank up, or `None` at the top. Never wraps.
    pub fn higher_index(&self, index: usize) -> Option<usize> {
        if index >= self.levels.len() {
            return None;
        }
        index.checked_sub(1)
    }

    /// One rank down, or `None` at the bottom. Never wraps.
    pub fn lower_index(&self, index: usize) -> Option<usize> {
        if index + 1 < self.levels.len() {
            Some(index + 1)
        } else {
            None
        }
    }

    /// Marks `index` as the single selected level.
    ///
    /// Returns false (leaving the ring untouched) for an out-of-range index.
    pub(crate) fn mark_selected(&mut self, index: usize) -> bool {
        if index >= self.levels.len() {
            return false;
        }
        for (i, level) in self.levels.iter_mut().enumerate() {
            level.selected = i == index;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn options(names: &[&str]) -> Vec<SourceOption> {
        names
            .iter()
            .map(|name| SourceOption {
                name: (*name).to_owned(),
                source: MediaSource::new(format!("https://cdn.example/v/{name}.mp4")),
                selected: false,
            })
            .collect()
    }

    fn selected_count(ring: &QualityRing) -> usize {
        ring.levels()
            .iter()
            .filter(|level| level.is_selected())
            .count()
    }

    #[test]
    fn test_empty_ring_has_no_selection() {
        let ring = QualityRing::from_options(Vec::new(), None);
        assert!(ring.is_empty());
        assert_eq!(ring.selected_index(), None);
        assert!(ring.selected().is_none());
    }

    #[test]
    fn test_default_selection_is_first_level() {
        let ring = QualityRing::from_options(options(&["1080p", "720p", "480p"]), None);
        assert_eq!(ring.selected_index(), Some(0));
        assert_eq!(selected_count(&ring), 1);
    }

    #[test]
    fn test_remembered_name_wins() {
        let ring = QualityRing::from_options(options(&["1080p", "720p", "480p"]), Some("480p"));
        assert_eq!(ring.selected().unwrap().name(), "480p");
        assert_eq!(selected_count(&ring), 1);
    }

    #[test]
    fn test_unmatched_remembered_name_falls_back_to_first() {
        let mut opts = options(&["1080p", "720p"]);
        opts[1].selected = true;
        // Hint is ignored: the remembered-name path falls back to the first
        // level, not to hint-based selection.
        let ring = QualityRing::from_options(opts, Some("4k"));
        assert_eq!(ring.selected().unwrap().name(), "1080p");
        assert_eq!(selected_count(&ring), 1);
    }

    #[test]
    fn test_first_hint_wins_without_preference() {
        let mut opts = options(&["1080p", "720p", "480p"]);
        opts[1].selected = true;
        opts[2].selected = true;
        let ring = QualityRing::from_options(opts, None);
        assert_eq!(ring.selected().unwrap().name(), "720p");
        assert_eq!(selected_count(&ring), 1);
    }

    #[test]
    fn test_preference_overrides_hint() {
        let mut opts = options(&["1080p", "720p"]);
        opts[1].selected = true;
        let ring = QualityRing::from_options(opts, Some("1080p"));
        assert_eq!(ring.selected().unwrap().name(), "1080p");
    }

    #[test]
    fn test_mark_selected_replaces_previous() {
        let mut ring = QualityRing::from_options(options(&["1080p", "720p"]), None);
        assert!(ring.mark_selected(1));
        assert_eq!(ring.selected_index(), Some(1));
        assert_eq!(selected_count(&ring), 1);
    }

    #[test]
    fn test_mark_selected_out_of_range_is_rejected() {
        let mut ring = QualityRing::from_options(options(&["1080p"]), None);
        assert!(!ring.mark_selected(3));
        assert_eq!(ring.selected_index(), Some(0));
    }

    #[test]
    fn test_rank_chain_ends_do_not_wrap() {
        let ring = QualityRing::from_options(options(&["1080p", "720p", "480p"]), None);
        assert_eq!(ring.higher_index(0), None);
        assert_eq!(ring.lower_index(2), None);
        assert_eq!(ring.higher_index(2), Some(1));
        assert_eq!(ring.lower_index(0), Some(1));
    }

    #[test]
    fn test_next_wraps_around() {
        let ring = QualityRing::from_options(options(&["1080p", "720p"]), None);
        assert_eq!(ring.next_index(1), Some(0));
        assert_eq!(ring.next_index(0), Some(1));
    }

    #[test]
    fn test_serde_option_list() {
        let parsed: Vec<SourceOption> = serde_json::from_str(
            r#"[
                {"name": "1080p", "source": {"uri": "https://cdn.example/v/hi.mp4", "mime_type": "video/mp4"}},
                {"name": "480p", "source": {"uri": "https://cdn.example/v/lo.mp4"}, "selected": true}
            ]"#,
        )
        .unwrap();

        let ring = QualityRing::from_options(parsed, None);
        assert_eq!(ring.len(), 2);
        assert_eq!(ring.selected().unwrap().name(), "480p");
    }

    proptest! {
        #[test]
        fn prop_next_traversal_returns_to_start(
            names in proptest::collection::vec("[a-z0-9]{1,6}", 1..8),
            start in 0usize..8,
        ) {
            let opts: Vec<SourceOption> = names
                .iter()
                .map(|name| SourceOption {
                    name: name.clone(),
                    source: MediaSource::new(format!("https://cdn.example/v/{name}.mp4")),
                    selected: false,
                })
                .collect();
            let ring = QualityRing::from_options(opts, None);
            let start = start % ring.len();

            let mut index = start;
            for _ in 0..ring.len() {
                index = ring.next_index(index).unwrap();
            }
            prop_assert_eq!(index, start);
        }

        #[test]
        fn prop_rank_chain_is_mutual_inverse(
            names in proptest::collection::vec("[a-z0-9]{1,6}", 1..8),
        ) {
            let opts: Vec<SourceOption> = names
                .iter()
                .map(|name| SourceOption {
                    name: name.clone(),
                    source: MediaSource::new(format!("https://cdn.example/v/{name}.mp4")),
                    selected: false,
                })
                .collect();
            let ring = QualityRing::from_options(opts, None);

            for index in 0..ring.len() {
                if let Some(lower) = ring.lower_index(index) {
                    prop_assert_eq!(ring.higher_index(lower), Some(index));
                }
                if let Some(higher) = ring.higher_index(index) {
                    prop_assert_eq!(ring.lower_index(higher), Some(index));
                }
            }
        }

        #[test]
        fn prop_exactly_one_selected_after_build(
            names in proptest::collection::vec("[a-z0-9]{1,6}", 1..8),
            hints in proptest::collection::vec(proptest::bool::ANY, 1..8),
        ) {
            let opts: Vec<SourceOption> = names
                .iter()
                .zip(hints.iter().cycle())
                .map(|(name, hint)| SourceOption {
                    name: name.clone(),
                    source: MediaSource::new(format!("https://cdn.example/v/{name}.mp4")),
                    selected: *hint,
                })
                .collect();
            let ring = QualityRing::from_options(opts, None);
            prop_assert_eq!(selected_count(&ring), 1);
        }
    }
}
