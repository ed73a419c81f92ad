//! Quality variants and selection.

pub mod ring;
pub mod selection;

pub use ring::{QualityLevel, QualityRing, SourceOption};
pub use selection::SelectionController;
