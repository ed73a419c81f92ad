//! Bandwidth-adaptive quality stepping heuristic.
//!
//! The engine never measures network throughput. It compares how far
//! playback and the buffered horizon advanced against wall-clock time over
//! the sampler window: playback falling behind the clock means the
//! pipeline is starved (step down), while a buffer growing much faster
//! than playback leaves headroom to spare (step up). After each decision
//! the window is resized (widened on the way down, narrowed back toward
//! the base on the way up) so the next verdict waits for fresh evidence
//! instead of oscillating (hysteresis).

use std::time::Duration;

use tracing::{debug, info};

use super::sampler::ProgressSample;
use crate::config::DetectionConfig;
use crate::prefs::PreferenceSlot;

/// Direction the engine wants the selection to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepIntent {
    Up,
    Down,
}

/// Decides when to step quality up or down.
///
/// The enabled flag mirrors a persisted preference: toggling persists the
/// new value, and a manual user override forces it off so the engine does
/// not fight the user.
#[derive(Debug)]
pub struct AutoQualityEngine {
    enabled: bool,
    base_window: Duration,
    window: Duration,
    step_down_played_rate: f64,
    step_up_buffered_rate: f64,
    widen_factor: f64,
    narrow_factor: f64,
    max_window_multiplier: f64,
    flag: PreferenceSlot,
}

impl AutoQualityEngine {
    /// Creates an engine from config, restoring the persisted enabled flag.
    /// Absent any persisted value the engine starts disabled.
    pub fn new(config: &DetectionConfig, flag: PreferenceSlot) -> Self {
        let enabled = flag.get_flag();
        Self {
            enabled,
            base_window: config.window,
            window: config.window,
            step_down_played_rate: config.step_down_played_rate,
            step_up_buffered_rate: config.step_up_buffered_rate,
            widen_factor: config.widen_factor,
            narrow_factor: config.narrow_factor,
            max_window_multiplier: config.max_window_multiplier,
            flag,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current detection window, adapted by past decisions.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Flips the enabled flag and persists the new value.
    pub fn toggle(&mut self) -> bool {
        self.set_enabled(!self.enabled);
        self.enabled
    }

    /// The user chose a quality by hand: stop driving the selection and
    /// remember that across sessions.
    pub fn disable_for_user_override(&mut self) {
        if self.enabled {
            self.set_enabled(false);
        }
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.flag.set_flag(enabled);
        info!(enabled, "quality detection toggled");
    }

    /// Evaluates one rolled window and returns the step to take, if any.
    ///
    /// Rates are media seconds advanced per wall-clock second over
    /// `[oldest, newest]`. A step decision also resizes the detection
    /// window; the caller propagates the new size to the sampler.
    pub fn evaluate(
        &mut self,
        oldest: &ProgressSample,
        newest: &ProgressSample,
    ) -> Option<StepIntent> {
        let elapsed = newest.at.duration_since(oldest.at);
        if elapsed.is_zero() {
            return None;
        }
        let elapsed_secs = elapsed.as_secs_f64();
        let played_rate = (newest.played_secs - oldest.played_secs) / elapsed_secs;
        let buffered_rate = (newest.buffered_secs - oldest.buffered_secs) / elapsed_secs;

        if played_rate < self.step_down_played_rate {
            self.widen_window();
            debug!(
                played_rate,
                window_ms = self.window.as_millis() as u64,
                "playback falling behind wall clock, stepping down"
            );
            Some(StepIntent::Down)
        } else if buffered_rate > self.step_up_buffered_rate {
            self.narrow_window();
            debug!(
                buffered_rate,
                window_ms = self.window.as_millis() as u64,
                "buffer outpacing playback, stepping up"
            );
            Some(StepIntent::Up)
        } else {
            None
        }
    }

    fn widen_window(&mut self) {
        let ceiling = self.base_window.mul_f64(self.max_window_multiplier);
        self.window = self.window.mul_f64(self.widen_factor).min(ceiling);
    }

    fn narrow_window(&mut self) {
        self.window = self.window.mul_f64(self.narrow_factor).max(self.base_window);
    }
}
