//! Bandwidth-adaptive quality detection.
//!
//! The sampler keeps a sliding window of playback progress; the engine
//! turns rolled windows into step-up/step-down intents.

pub mod engine;
pub mod sampler;

pub use engine::{AutoQualityEngine, StepIntent};
pub use sampler::{ProgressSample, ProgressSampler};
