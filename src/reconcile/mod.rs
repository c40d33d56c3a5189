//! Reconciliation of the inferred outline with size limits and with
//! externally declared units.

mod matcher;
mod normalize;
mod sections;

pub use matcher::{match_units, MatchOutcome, MatchTier};
pub use normalize::{clean_source_name, document_char_count, UnitSizeNormalizer};
pub use sections::SectionBuilder;

/// Contiguous chunks of `ceil(len / parts)` items, so at most `parts`
/// chunks and never more than needed.
pub(crate) fn even_chunks<T>(items: &[T], parts: usize) -> std::slice::Chunks<'_, T> {
    let size = items.len().div_ceil(parts.max(1)).max(1);
    items.chunks(size)
}
