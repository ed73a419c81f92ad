//! Slipstream Core - Multi-quality source switching for media players
//!
//! This crate augments an embedded media player with selectable quality
//! variants and automatic bandwidth-adaptive quality selection. It owns
//! the quality ring, preference persistence, the progress sampler, and
//! the step-up/step-down heuristic; rendering and the player runtime stay
//! with the host, reached only through the collaborator traits in
//! [`player`].

pub mod config;
pub mod detection;
pub mod events;
pub mod player;
pub mod prefs;
pub mod quality;
pub mod switcher;

// Re-export main types for convenient access
pub use config::{DetectionConfig, PreferenceConfig, SlipstreamConfig};
pub use detection::{AutoQualityEngine, ProgressSample, ProgressSampler, StepIntent};
pub use events::{ProgressStat, SwitchEvent};
pub use player::provider::{ProvidedSources, ProviderResult, SourceProvider, SourceProviderError};
pub use player::{MediaPlayer, MediaSource, PlayerEvent, TimeRange, TimeRanges, Toggleable};
pub use prefs::{
    KeyValueStore, MemoryStore, NopStore, NoStorageProvider, PreferenceSlot, StorageArea,
    StorageProvider, StorageSelection,
};
pub use quality::{QualityLevel, QualityRing, SelectionController, SourceOption};
pub use switcher::SourceSwitcher;
