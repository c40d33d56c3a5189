//! Engine options and tunable thresholds.

use crate::render::CleanupPreset;
use serde::{Deserialize, Serialize};

/// Options for structure inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Heuristic thresholds
    pub thresholds: Thresholds,

    /// What to do when a unit number repeats
    pub duplicate_policy: DuplicatePolicy,

    /// Text cleanup applied to paragraphs before classification
    pub cleanup: Option<CleanupPreset>,

    /// Source identifier (usually the file name) used as a last-resort title
    pub source_name: Option<String>,

    /// Title for a single unit built when nothing better is known
    pub fallback_unit_title: String,

    /// Whether to merge units down to a sensible count
    pub normalize_units: bool,

    /// Whether normalized units without sections get inferred ones
    pub infer_sections: bool,

    /// Whether batch analysis may use parallel processing
    pub parallel: bool,
}

impl EngineOptions {
    /// Create new engine options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set thresholds.
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set duplicate unit policy.
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.cleanup = Some(preset);
        self
    }

    /// Set the source identifier.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// Set the fallback unit title.
    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_unit_title = title.into();
        self
    }

    /// Enable or disable unit size normalization.
    pub fn with_normalization(mut self, enabled: bool) -> Self {
        self.normalize_units = enabled;
        self
    }

    /// Enable or disable section inference for units without sections.
    pub fn with_section_inference(mut self, enabled: bool) -> Self {
        self.infer_sections = enabled;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Load options from a JSON string; missing fields take defaults.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            duplicate_policy: DuplicatePolicy::LastWins,
            cleanup: None,
            source_name: None,
            fallback_unit_title: "Module content".to_string(),
            normalize_units: true,
            infer_sections: false,
            parallel: true,
        }
    }
}

/// Policy for unit numbers that appear more than once.
///
/// Documents usually list every unit header in a table of contents before
/// the real content, so the default keeps the last copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Discard the earlier copy and keep the later one
    #[default]
    LastWins,
    /// Keep the first copy and discard later ones
    FirstWins,
}

/// Empirically tuned limits used by the heuristics. All lengths are in
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Upper bound (exclusive) for an all-caps line to count as a heading
    pub heading_max_chars: usize,

    /// Upper bound (inclusive) for unit/section/subsection header lines
    pub structural_heading_max_chars: usize,

    /// Shortest heading accepted as module title
    pub module_title_min_chars: usize,

    /// Longest heading accepted as module title
    pub module_title_max_chars: usize,

    /// Upper bound (exclusive) for the structural document title
    pub document_title_max_chars: usize,

    /// Shortest chapter title after "<n>. "
    pub chapter_title_min_chars: usize,

    /// Longest chapter title after "<n>. "
    pub chapter_title_max_chars: usize,

    /// Minimum characters of source text per unit
    pub unit_density_chars: usize,

    /// Documents below this size always become a single unit
    pub small_document_chars: usize,

    /// Shortest title accepted when naming a merged unit
    pub min_title_chars: usize,

    /// Direct number matches need more content than this
    pub direct_match_min_chars: usize,

    /// Paragraphs at or below this length are left out of the flat split
    pub pool_paragraph_min_chars: usize,

    /// Upper bound (inclusive) for a numbered subtitle block
    pub subtitle_max_chars: usize,

    /// Longest definition term
    pub definition_term_max_chars: usize,

    /// Shortest definition explanation
    pub definition_min_explanation_chars: usize,

    /// Lower bound (exclusive) for an unpunctuated bullet line
    pub bullet_min_chars: usize,

    /// Upper bound (exclusive) for an unpunctuated bullet line
    pub bullet_max_chars: usize,

    /// Upper bound (exclusive) for an all-caps line to open an inferred section
    pub inferred_heading_max_chars: usize,

    /// Units longer than this are split into chunks when no headings are found
    pub inferred_sections_min_chars: usize,

    /// Number of chunks when splitting a unit without headings
    pub inferred_section_count: usize,

    /// Paragraphs at or below this length are left out of chunked sections
    pub section_fragment_min_chars: usize,

    /// Shortest paragraph distributed into declared sections
    pub section_paragraph_min_chars: usize,

    /// Shortest code snippet
    pub code_min_chars: usize,

    /// Fewest lines in a code snippet
    pub code_min_lines: usize,

    /// Most code snippets reported per text
    pub code_max_blocks: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            heading_max_chars: 100,
            structural_heading_max_chars: 120,
            module_title_min_chars: 15,
            module_title_max_chars: 200,
            document_title_max_chars: 120,
            chapter_title_min_chars: 4,
            chapter_title_max_chars: 81,
            unit_density_chars: 5000,
            small_document_chars: 8000,
            min_title_chars: 5,
            direct_match_min_chars: 50,
            pool_paragraph_min_chars: 20,
            subtitle_max_chars: 120,
            definition_term_max_chars: 41,
            definition_min_explanation_chars: 30,
            bullet_min_chars: 15,
            bullet_max_chars: 120,
            inferred_heading_max_chars: 80,
            inferred_sections_min_chars: 500,
            inferred_section_count: 3,
            section_fragment_min_chars: 50,
            section_paragraph_min_chars: 20,
            code_min_chars: 40,
            code_min_lines: 2,
            code_max_blocks: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_options_builder() {
        let options = EngineOptions::new()
            .with_duplicate_policy(DuplicatePolicy::FirstWins)
            .with_cleanup(CleanupPreset::Standard)
            .with_source_name("redes_locales.docx")
            .sequential();

        assert_eq!(options.duplicate_policy, DuplicatePolicy::FirstWins);
        assert_eq!(options.cleanup, Some(CleanupPreset::Standard));
        assert_eq!(options.source_name.as_deref(), Some("redes_locales.docx"));
        assert!(!options.parallel);
    }

    #[test]
    fn test_default_options() {
        let options = EngineOptions::default();
        assert_eq!(options.duplicate_policy, DuplicatePolicy::LastWins);
        assert!(options.parallel);
        assert!(options.normalize_units);
        assert!(!options.infer_sections);
        assert_eq!(options.thresholds.unit_density_chars, 5000);
        assert_eq!(options.thresholds.small_document_chars, 8000);
    }

    #[test]
    fn test_options_from_partial_json() {
        let options = EngineOptions::from_json(
            r#"{"duplicate_policy":"first_wins","thresholds":{"unit_density_chars":1000}}"#,
        )
        .unwrap();
        assert_eq!(options.duplicate_policy, DuplicatePolicy::FirstWins);
        assert_eq!(options.thresholds.unit_density_chars, 1000);
        assert_eq!(options.thresholds.small_document_chars, 8000);
        assert!(options.parallel);
    }

    #[test]
    fn test_options_from_bad_json() {
        assert!(EngineOptions::from_json("{").is_err());
    }
}
