//! Data model for structure inference.
//!
//! Paragraph records come in from the document reader; outlines and content
//! blocks go out to downstream generators and renderers. All types are
//! serde-serializable so results can be handed over as JSON.

mod block;
mod outline;
mod paragraph;
mod stats;
mod table;

pub use block::{BlockKind, CodeBlock, CodeLanguage, ContentBlock, DefinitionEntry};
pub use outline::{Chapter, DeclaredUnit, Outline, Section, Subsection, Unit};
pub use paragraph::{Classification, ParagraphKind, ParagraphRecord};
pub use stats::AnalysisStats;
pub use table::Table;
