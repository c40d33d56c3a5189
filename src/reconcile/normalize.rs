//! Unit size normalization.
//!
//! Documents often number every topic as its own unit. A unit should carry
//! a substantial amount of text, so short documents are merged down to
//! fewer, larger units.

use crate::model::{Outline, ParagraphRecord, Section, Subsection, Unit};
use crate::parser::{EngineOptions, Thresholds};
use std::path::Path;

/// Merges outline units down to a count the document size can support.
#[derive(Debug, Clone)]
pub struct UnitSizeNormalizer {
    thresholds: Thresholds,
    source_name: Option<String>,
    fallback_title: String,
}

impl UnitSizeNormalizer {
    /// Create a normalizer from engine options.
    pub fn new(options: &EngineOptions) -> Self {
        Self {
            thresholds: options.thresholds.clone(),
            source_name: options.source_name.clone(),
            fallback_title: options.fallback_unit_title.clone(),
        }
    }

    /// Largest unit count a document of `total_chars` characters supports.
    pub fn max_units(&self, total_chars: usize) -> usize {
        if total_chars < self.thresholds.small_document_chars {
            return 1;
        }
        (total_chars / self.thresholds.unit_density_chars.max(1)).max(1)
    }

    /// Build the normalized unit list. The outline is left untouched.
    ///
    /// Units are returned as-is when their count is within the limit;
    /// otherwise contiguous runs of `ceil(count / max_units)` units are merged
    /// and renumbered from 1.
    pub fn normalize(&self, outline: &Outline, total_chars: usize) -> Vec<Unit> {
        let detected = outline.units.len();
        let max_units = self.max_units(total_chars);
        if detected <= max_units {
            return outline.units.clone();
        }

        let chunk_size = detected.div_ceil(max_units);
        let chunks: Vec<&[Unit]> = outline.units.chunks(chunk_size).collect();
        log::debug!(
            "Merging {} units into {} ({} chars, max {})",
            detected,
            chunks.len(),
            total_chars,
            max_units
        );

        let single = chunks.len() == 1;
        chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| {
                let number = i as u32 + 1;
                let title = if single {
                    self.single_unit_title(outline)
                } else {
                    chunk
                        .iter()
                        .map(|u| u.title.trim())
                        .filter(|t| !t.is_empty())
                        .collect::<Vec<_>>()
                        .join(" - ")
                };
                merge_chunk(number, title, chunk)
            })
            .collect()
    }

    /// Module title, document title, cleaned source name, then the
    /// fallback. Candidates shorter than `min_title_chars` are skipped.
    fn single_unit_title(&self, outline: &Outline) -> String {
        let source = self.source_name.as_deref().map(clean_source_name);
        [
            Some(outline.module_title.trim().to_string()),
            Some(outline.document_title.trim().to_string()),
            source,
        ]
        .into_iter()
        .flatten()
        .find(|t| t.chars().count() >= self.thresholds.min_title_chars)
        .unwrap_or_else(|| self.fallback_title.clone())
    }
}

impl Default for UnitSizeNormalizer {
    fn default() -> Self {
        Self::new(&EngineOptions::default())
    }
}

/// Concatenate content and sections of a run of units. Section ids are
/// reassigned so they stay prefixed by the new unit number.
fn merge_chunk(number: u32, title: String, chunk: &[Unit]) -> Unit {
    let mut merged = Unit::new(number, title);
    for unit in chunk {
        merged.content.extend(unit.content.iter().cloned());
    }

    let sections = chunk.iter().flat_map(|u| &u.sections);
    for (i, section) in sections.enumerate() {
        let id = format!("{}.{}", number, i + 1);
        let subsections = section
            .subsections
            .iter()
            .map(|sub| {
                let letter = sub.id.rsplit('.').next().unwrap_or_default();
                Subsection {
                    id: format!("{}.{}", id, letter),
                    title: sub.title.clone(),
                    content: sub.content.clone(),
                }
            })
            .collect();
        merged.sections.push(Section {
            id,
            title: section.title.clone(),
            content: section.content.clone(),
            subsections,
        });
    }
    merged
}

/// Character count of the document text (non-empty paragraphs joined by
/// blank lines).
pub fn document_char_count(records: &[ParagraphRecord]) -> usize {
    let texts: Vec<&str> = records.iter().map(|r| r.trimmed()).filter(|t| !t.is_empty()).collect();
    let chars: usize = texts.iter().map(|t| t.chars().count()).sum();
    chars + texts.len().saturating_sub(1) * 2
}

/// Turn a file name into a title: directory and extension dropped,
/// underscores and hyphens become spaces, first letter capitalized.
pub fn clean_source_name(name: &str) -> String {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);

    let spaced = stem.replace(['_', '-'], " ");
    let words: Vec<&str> = spaced.split_whitespace().collect();
    let joined = words.join(" ");

    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
