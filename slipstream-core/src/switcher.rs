//! Facade wiring the quality components to a media player.
//!
//! Hosts construct one [`SourceSwitcher`] per player, forward player
//! lifecycle signals into [`handle_event`], and drive the menu-facing
//! methods from their UI collaborator. Everything runs synchronously on
//! the caller's thread of control; the one async seam is the lazy source
//! provider consulted before first play.
//!
//! [`handle_event`]: SourceSwitcher::handle_event

use std::time::{Duration, Instant};

use crate::config::SlipstreamConfig;
use crate::detection::{AutoQualityEngine, ProgressSampler, StepIntent};
use crate::events::{ProgressStat, SwitchEvent};
use crate::player::provider::{ProvidedSources, ProviderResult, SourceProvider};
use crate::player::{MediaPlayer, PlayerEvent, Toggleable};
use crate::prefs::{PreferenceSlot, StorageProvider};
use crate::quality::{QualityLevel, SelectionController, SourceOption};

type Listener = Box<dyn FnMut(&SwitchEvent) + Send>;

/// Quality switching engine bound to one player.
pub struct SourceSwitcher<P: MediaPlayer> {
    player: P,
    selection: SelectionController,
    sampler: ProgressSampler,
    detector: Option<AutoQualityEngine>,
    start_delay: Duration,
    provider: Option<Box<dyn SourceProvider>>,
    manual_toggle: Option<Box<dyn Toggleable + Send>>,
    listeners: Vec<Listener>,
}

impl<P: MediaPlayer> SourceSwitcher<P> {
    /// Builds a switcher from config, resolving both preference slots
    /// through the host's storage provider.
    pub fn new(player: P, config: SlipstreamConfig, storage: &dyn StorageProvider) -> Self {
        let preference = PreferenceSlot::resolve(
            config.preference.storage.clone(),
            storage,
            config.preference.key.clone(),
            None,
        );
        let detector = config.detection.enabled.then(|| {
            let flag = PreferenceSlot::resolve(
                config.detection.state_storage.clone(),
                storage,
                config.detection.state_key.clone(),
                None,
            );
            AutoQualityEngine::new(&config.detection, flag)
        });

        Self {
            player,
            selection: SelectionController::new(preference),
            sampler: ProgressSampler::new(config.detection.window),
            detector,
            start_delay: config.detection.effective_start_delay(),
            provider: None,
            manual_toggle: None,
            listeners: Vec::new(),
        }
    }

    /// Registers the lazy source resolver consulted before first play.
    pub fn with_provider(mut self, provider: Box<dyn SourceProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Registers the manual quality toggle affordance so it can be
    /// suspended while detection drives the selection.
    pub fn register_manual_toggle(&mut self, toggle: Box<dyn Toggleable + Send>) {
        self.manual_toggle = Some(toggle);
    }

    /// Subscribes to produced events.
    pub fn subscribe(&mut self, listener: impl FnMut(&SwitchEvent) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    /// Handles a player lifecycle signal, stamped with the current time.
    pub fn handle_event(&mut self, event: PlayerEvent) {
        self.handle_event_at(event, Instant::now());
    }

    /// Handles a player lifecycle signal with an explicit timestamp, for
    /// hosts that stamp events themselves.
    pub fn handle_event_at(&mut self, event: PlayerEvent, now: Instant) {
        match event {
            PlayerEvent::LoadedMetadata => self.sampler.arm_with_delay(now, self.start_delay),
            PlayerEvent::Progress => self.on_progress(now),
            PlayerEvent::Seeking => self.sampler.reset(),
            PlayerEvent::Seeked => self.sampler.arm_with_delay(now, self.start_delay),
            PlayerEvent::Ready => self.selection.handle_ready(&mut self.player),
            PlayerEvent::QualityUp => {
                self.step(StepIntent::Up, now);
            }
            PlayerEvent::QualityDown => {
                self.step(StepIntent::Down, now);
            }
        }
    }

    /// Replaces the source set, re-rendering state for the UI collaborator.
    pub fn update_sources(&mut self, options: Vec<SourceOption>) {
        self.update_sources_at(options, Instant::now());
    }

    fn update_sources_at(&mut self, options: Vec<SourceOption>, now: Instant) {
        let changed = self.selection.update_sources(options, &mut self.player);
        self.emit(SwitchEvent::SourcesUpdated);

        if changed {
            if self.player.autoplay() && self.player.is_paused() {
                self.player.play();
            }
            self.after_quality_change(now);
        } else if self.selection.is_empty() {
            // Terminal "no sources" state: clear the label.
            self.emit(SwitchEvent::QualityChanged { name: None });
        }
    }

    /// Resolves sources lazily, then starts playback.
    ///
    /// The provider is consulted only while the player has no source
    /// assigned. A single fallback source clears the variant set and loads
    /// directly.
    pub async fn resolve_and_play(&mut self) -> ProviderResult<()> {
        let provided = match self.provider.as_ref() {
            Some(provider) if self.player.current_source().is_none() => {
                Some(provider.provide().await?)
            }
            _ => None,
        };

        match provided {
            Some(ProvidedSources::Variants(options)) => self.update_sources(options),
            Some(ProvidedSources::Single(source)) => {
                self.update_sources(Vec::new());
                self.player.load_source(source);
            }
            None => {}
        }

        self.player.play();
        Ok(())
    }

    // Menu-facing surface.

    /// Levels in rank order, for menu rendering.
    pub fn ordered_levels(&self) -> &[QualityLevel] {
        self.selection.levels()
    }

    pub fn current(&self) -> Option<&QualityLevel> {
        self.selection.current()
    }

    /// Label of the current selection; empty in the "no sources" state.
    pub fn current_label(&self) -> &str {
        self.selection.current_label()
    }

    /// User clicked a specific level in the menu.
    pub fn select_by_user_click(&mut self, index: usize) {
        self.select_by_user_click_at(index, Instant::now());
    }

    fn select_by_user_click_at(&mut self, index: usize, now: Instant) {
        self.release_to_user();
        if self.selection.select_by_user(index, &mut self.player) {
            self.after_quality_change(now);
        }
    }

    /// User pressed the cycle button: advance to the next level in ring
    /// order.
    pub fn cycle_next(&mut self) {
        self.cycle_next_at(Instant::now());
    }

    fn cycle_next_at(&mut self, now: Instant) {
        self.release_to_user();
        if self.selection.cycle_next(&mut self.player) {
            self.after_quality_change(now);
        }
    }

    /// Flips automatic detection. Entering enabled jumps to the highest
    /// rank and suspends the manual toggle. Returns the new state.
    pub fn toggle_auto(&mut self) -> bool {
        self.toggle_auto_at(Instant::now())
    }

    fn toggle_auto_at(&mut self, now: Instant) -> bool {
        let Some(detector) = self.detector.as_mut() else {
            return false;
        };

        if detector.toggle() {
            if let Some(toggle) = self.manual_toggle.as_mut() {
                toggle.disable();
            }
            if self.selection.select_highest(&mut self.player) {
                self.after_quality_change(now);
            }
            true
        } else {
            if let Some(toggle) = self.manual_toggle.as_mut() {
                toggle.enable();
            }
            false
        }
    }

    pub fn is_auto_enabled(&self) -> bool {
        self.detector.as_ref().is_some_and(AutoQualityEngine::is_enabled)
    }

    /// Current detection window, when detection is configured.
    pub fn detection_window(&self) -> Option<Duration> {
        self.detector.as_ref().map(AutoQualityEngine::window)
    }

    // Internal plumbing.

    fn on_progress(&mut self, now: Instant) {
        let buffered_secs = self.player.buffered().total_seconds();
        let played_secs = self.player.played().total_seconds();

        if !self.sampler.record(now, buffered_secs, played_secs) {
            return;
        }

        let elapsed_ms = match (self.sampler.oldest(), self.sampler.newest()) {
            (Some(oldest), Some(newest)) => {
                newest.at.duration_since(oldest.at).as_millis() as u64
            }
            _ => 0,
        };
        self.emit(SwitchEvent::ProgressStat {
            stat: ProgressStat {
                elapsed_ms,
                buffered_secs,
                played_secs,
                samples: self.sampler.sample_count(),
            },
        });

        if !self.sampler.window_rolled() {
            return;
        }

        let intent = match (self.detector.as_mut(), self.sampler.oldest().copied()) {
            (Some(detector), Some(oldest)) if detector.is_enabled() => {
                let newest = match self.sampler.newest().copied() {
                    Some(newest) => newest,
                    None => return,
                };
                let intent = detector.evaluate(&oldest, &newest);
                let window = detector.window();
                self.sampler.set_window(window);
                intent
            }
            _ => None,
        };

        if let Some(intent) = intent {
            self.emit(match intent {
                StepIntent::Up => SwitchEvent::QualityUp,
                StepIntent::Down => SwitchEvent::QualityDown,
            });
            self.step(intent, now);
        }
    }

    fn step(&mut self, intent: StepIntent, now: Instant) -> bool {
        let changed = match intent {
            StepIntent::Up => self.selection.step_up(&mut self.player),
            StepIntent::Down => self.selection.step_down(&mut self.player),
        };
        if changed {
            self.after_quality_change(now);
        }
        changed
    }

    /// A user action takes over the selection: detection stops driving it
    /// and the manual toggle comes back.
    fn release_to_user(&mut self) {
        if let Some(detector) = self.detector.as_mut() {
            detector.disable_for_user_override();
        }
        if let Some(toggle) = self.manual_toggle.as_mut() {
            toggle.enable();
        }
    }

    fn after_quality_change(&mut self, now: Instant) {
        let name = self.selection.current().map(|level| level.name().to_owned());
        self.emit(SwitchEvent::QualityChanged { name });
        self.sampler.reset();
        self.sampler.arm_with_delay(now, self.start_delay);
    }

    fn emit(&mut self, event: SwitchEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}
