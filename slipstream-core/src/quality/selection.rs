//! Applies quality selections to the player and remembers user choice.

use tracing::debug;

use super::ring::{QualityLevel, QualityRing, SourceOption};
use crate::player::MediaPlayer;
use crate::prefs::PreferenceSlot;

/// Playback state captured before a source swap, applied once the player
/// signals readiness for the new source.
#[derive(Debug, Clone, Copy)]
struct RestoreState {
    position_secs: f64,
    was_playing: bool,
}

/// Owns the current quality selection.
///
/// Holds the ring, persists user choices, and performs the source swap
/// dance: capture position and pause state, load the new source, restore
/// both on readiness. A controller built before any sources arrive is
/// valid; every operation is a no-op until [`update_sources`] supplies a
/// ring.
///
/// [`update_sources`]: SelectionController::update_sources
#[derive(Debug)]
pub struct SelectionController {
    ring: QualityRing,
    preference: PreferenceSlot,
    pending_restore: Option<RestoreState>,
}

impl SelectionController {
    /// Creates an empty controller persisting choices into `preference`.
    pub fn new(preference: PreferenceSlot) -> Self {
        Self {
            ring: QualityRing::empty(),
            preference,
            pending_restore: None,
        }
    }

    /// Rebuilds the ring for a new source set and applies the resulting
    /// selection.
    ///
    /// The remembered preference drives the initial selection (see
    /// [`QualityRing::from_options`]). Returns true when a source was
    /// pushed to the player, which is only the bootstrap case here: the
    /// freshly selected level counts as already selected.
    pub fn update_sources(
        &mut self,
        options: Vec<SourceOption>,
        player: &mut dyn MediaPlayer,
    ) -> bool {
        let remembered = self.preference.get();
        self.ring = QualityRing::from_options(options, remembered.as_deref());
        self.pending_restore = None;

        match self.ring.selected_index() {
            Some(index) => self.select(index, player),
            None => false,
        }
    }

    /// Applies the level at `index`.
    ///
    /// Re-applying the selected level is a no-op while a source is
    /// assigned; with no source assigned it still pushes one (bootstrap).
    /// Otherwise the selection moves, the current position and pause state
    /// are captured, and the player is handed the new source. Returns true
    /// when a source was pushed or swapped.
    pub fn select(&mut self, index: usize, player: &mut dyn MediaPlayer) -> bool {
        let Some(level) = self.ring.level(index) else {
            return false;
        };
        let source = level.source().clone();
        let name = level.name().to_owned();

        if self.ring.selected_index() == Some(index) {
            if player.current_source().is_some() {
                return false;
            }
            // Bootstrap: the player has nothing to play yet.
            player.load_source(source);
            debug!(quality = %name, "assigned initial quality source");
            return true;
        }

        self.ring.mark_selected(index);

        let position_secs = player.current_time();
        let was_playing = !player.is_paused();
        player.pause();
        player.load_source(source);
        self.pending_restore = Some(RestoreState {
            position_secs,
            was_playing,
        });
        debug!(quality = %name, position_secs, was_playing, "switched quality source");
        true
    }

    /// User clicked a specific level: persist it, then apply it.
    pub fn select_by_user(&mut self, index: usize, player: &mut dyn MediaPlayer) -> bool {
        if let Some(level) = self.ring.level(index) {
            self.preference.set(level.name());
        }
        self.select(index, player)
    }

    /// Cycles to the next level in ring order, persisting it as the user's
    /// choice.
    pub fn cycle_next(&mut self, player: &mut dyn MediaPlayer) -> bool {
        let Some(current) = self.ring.selected_index() else {
            return false;
        };
        let Some(next) = self.ring.next_index(current) else {
            return false;
        };
        self.select_by_user(next, player)
    }

    /// Steps one rank up. Already at the top is a silent no-op.
    pub fn step_up(&mut self, player: &mut dyn MediaPlayer) -> bool {
        let Some(current) = self.ring.selected_index() else {
            return false;
        };
        match self.ring.higher_index(current) {
            Some(higher) => self.select(higher, player),
            None => false,
        }
    }

    /// Steps one rank down. Already at the bottom is a silent no-op.
    pub fn step_down(&mut self, player: &mut dyn MediaPlayer) -> bool {
        let Some(current) = self.ring.selected_index() else {
            return false;
        };
        match self.ring.lower_index(current) {
            Some(lower) => self.select(lower, player),
            None => false,
        }
    }

    /// Jumps straight to the highest rank.
    pub fn select_highest(&mut self, player: &mut dyn MediaPlayer) -> bool {
        if self.ring.is_empty() {
            return false;
        }
        self.select(0, player)
    }

    /// Applies the captured position and resume state after the player
    /// reports readiness for a swapped source.
    pub fn handle_ready(&mut self, player: &mut dyn MediaPlayer) {
        if let Some(restore) = self.pending_restore.take() {
            player.seek_to(restore.position_secs);
            if restore.was_playing {
                player.play();
            }
        }
    }

    pub fn levels(&self) -> &[QualityLevel] {
        self.ring.levels()
    }

    pub fn current(&self) -> Option<&QualityLevel> {
        self.ring.selected()
    }

    /// Label of the current selection; empty in the "no sources" state.
    pub fn current_label(&self) -> &str {
        self.current().map(QualityLevel::name).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }
}
