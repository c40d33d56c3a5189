//! Block classification and rendering to output formats.

mod blocks;
mod cleanup;
mod code;
mod json;
mod markdown;
mod options;
mod text;

pub use blocks::{classify_blocks, BlockClassifier};
pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use code::{detect_code, CodeDetector};
pub use json::{to_json, JsonFormat};
pub use markdown::{blocks_to_markdown, to_markdown, MarkdownRenderer};
pub use options::{RenderOptions, UnitSelection};
pub use text::{paginate, to_text, unit_to_text};
