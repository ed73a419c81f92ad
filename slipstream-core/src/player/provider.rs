//! Lazy source resolution invoked before first playback.
//!
//! Hosts that do not know their source list up front register a provider;
//! the switcher consults it once, when playback is requested and the player
//! still has no source assigned.

use async_trait::async_trait;

use super::MediaSource;
use crate::quality::SourceOption;

/// Result type for source provider operations.
pub type ProviderResult<T> = Result<T, SourceProviderError>;

/// Errors a source provider may surface to the host.
#[derive(Debug, thiserror::Error)]
pub enum SourceProviderError {
    #[error("source provider unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("source provider returned no playable sources")]
    Empty,
}

/// What a provider resolved for the current media.
#[derive(Debug, Clone, PartialEq)]
pub enum ProvidedSources {
    /// A selectable variant list; feeds the quality ring.
    Variants(Vec<SourceOption>),
    /// A single fallback source with no quality choice. The variant set is
    /// cleared and the source loads directly.
    Single(MediaSource),
}

/// Asynchronous source resolver, consulted lazily on first play.
#[async_trait]
pub trait SourceProvider: Send + Sync {
    async fn provide(&self) -> ProviderResult<ProvidedSources>;
}
