//! Sliding window of playback progress samples.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// One playback progress observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSample {
    /// Wall-clock time the observation was taken.
    pub at: Instant,
    /// Cumulative buffered media, in seconds.
    pub buffered_secs: f64,
    /// Cumulative played media, in seconds.
    pub played_secs: f64,
}

/// Time-windowed buffer of progress samples with cooperative suspension.
///
/// Samples accumulate in arrival order; anything older than the current
/// window relative to the newest sample is evicted from the front.
/// Measurement suspends around disruptive events (seeks, source swaps,
/// metadata loads). The delayed resume is a stored deadline, which models
/// the single cooperative one-shot timer: arming again replaces the
/// pending deadline, and [`reset`] cancels it outright.
///
/// [`reset`]: ProgressSampler::reset
#[derive(Debug)]
pub struct ProgressSampler {
    samples: VecDeque<ProgressSample>,
    window: Duration,
    suspended: bool,
    resume_at: Option<Instant>,
    rolled: bool,
}

impl ProgressSampler {
    /// Creates a suspended sampler; measurement starts after the first
    /// [`arm_with_delay`] deadline passes.
    ///
    /// [`arm_with_delay`]: ProgressSampler::arm_with_delay
    pub fn new(window: Duration) -> Self {
        Self {
            samples: VecDeque::new(),
            window,
            suspended: true,
            resume_at: None,
            rolled: false,
        }
    }

    /// Current eviction horizon.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Updates the eviction horizon after the engine resizes its window.
    pub fn set_window(&mut self, window: Duration) {
        self.window = window;
    }

    /// Records one progress tick.
    ///
    /// Ticks arriving while suspended are dropped until the resume deadline
    /// passes; the tick that crosses the deadline resumes measurement and
    /// is recorded. Returns whether the tick was recorded.
    pub fn record(&mut self, now: Instant, buffered_secs: f64, played_secs: f64) -> bool {
        self.rolled = false;

        if self.suspended {
            match self.resume_at {
                Some(deadline) if now >= deadline => {
                    self.suspended = false;
                    self.resume_at = None;
                }
                _ => return false,
            }
        }

        self.samples.push_back(ProgressSample {
            at: now,
            buffered_secs,
            played_secs,
        });

        while let (Some(oldest), Some(newest)) = (self.samples.front(), self.samples.back()) {
            if newest.at.duration_since(oldest.at) > self.window {
                self.samples.pop_front();
                self.rolled = true;
            } else {
                break;
            }
        }

        true
    }

    /// Whether the last recorded tick evicted anything from the front.
    pub fn window_rolled(&self) -> bool {
        self.rolled
    }

    pub fn oldest(&self) -> Option<&ProgressSample> {
        self.samples.front()
    }

    pub fn newest(&self) -> Option<&ProgressSample> {
        self.samples.back()
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Drops every sample and suspends measurement until the next re-arm.
    /// Any pending resume deadline is cancelled.
    pub fn reset(&mut self) {
        self.samples.clear();
        self.suspended = true;
        self.resume_at = None;
        self.rolled = false;
    }

    /// Suspends measurement and schedules its resume after `delay`.
    ///
    /// Only one deadline is outstanding at a time; re-arming replaces any
    /// pending one.
    pub fn arm_with_delay(&mut self, now: Instant, delay: Duration) {
        self.suspended = true;
        self.resume_at = Some(now + delay);
    }

    pub fn is_measuring(&self) -> bool {
        !self.suspended
    }
}
