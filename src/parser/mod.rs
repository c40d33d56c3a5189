//! Structure inference: paragraph classification and outline building.

mod chapters;
mod classifier;
mod options;
mod outline;
pub(crate) mod patterns;

pub use chapters::{scan_chapters, ChapterScan};
pub use classifier::ParagraphClassifier;
pub use options::{DuplicatePolicy, EngineOptions, Thresholds};
pub use outline::OutlineBuilder;
