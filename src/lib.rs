//! # docoutline
//!
//! Document structure inference for instructional material.
//!
//! This library takes the ordered paragraphs of a word-processor document
//! and recovers its latent outline (module, units, sections, subsections),
//! normalizes the number of units, reconciles content with externally
//! declared units and classifies unit text into typed content blocks.
//!
//! ## Quick Start
//!
//! ```
//! use docoutline::{analyze, ParagraphRecord};
//!
//! let records = vec![
//!     ParagraphRecord::new("MODULE 1"),
//!     ParagraphRecord::new("UNIT 1: Basics"),
//!     ParagraphRecord::new("Intro text."),
//!     ParagraphRecord::new("1.1 Fundamentals"),
//!     ParagraphRecord::new("Body text."),
//! ];
//!
//! let analysis = analyze(&records);
//! assert_eq!(analysis.outline.units[0].title, "Basics");
//! assert_eq!(analysis.outline.units[0].sections[0].id, "1.1");
//! ```
//!
//! ## Features
//!
//! - **Outline inference**: keyword headers, decimal numbering, heading styles
//! - **TOC suppression**: repeated unit headers keep one copy
//! - **Fallbacks**: flat numbered chapters, then a single unit
//! - **Unit normalization**: merges over-segmented documents
//! - **Declared unit matching**: three tiers from exact numbers to flat split
//! - **Block classification**: subtitles, definitions, lists, tips, tables
//! - **Section inference**: sections for units without decimal headings
//! - **Code detection**: Python, SQL, JavaScript and HTML listings
//! - **Parallel processing**: uses Rayon for document batches

pub mod error;
pub mod input;
pub mod model;
pub mod parser;
pub mod reconcile;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result, Warning};
pub use model::{
    AnalysisStats, BlockKind, Chapter, Classification, CodeBlock, CodeLanguage, ContentBlock,
    DeclaredUnit, DefinitionEntry, Outline, ParagraphKind, ParagraphRecord, Section, Subsection,
    Table, Unit,
};
pub use parser::{DuplicatePolicy, EngineOptions, OutlineBuilder, ParagraphClassifier, Thresholds};
pub use reconcile::{match_units, MatchOutcome, MatchTier, SectionBuilder, UnitSizeNormalizer};
pub use render::{
    BlockClassifier, CleanupOptions, CleanupPipeline, CleanupPreset, CodeDetector, JsonFormat,
    RenderOptions, UnitSelection,
};

use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;

/// Analyze paragraphs with default options.
///
/// # Example
///
/// ```
/// use docoutline::{analyze, ParagraphRecord};
///
/// let analysis = analyze(&[ParagraphRecord::new("Just one paragraph.")]);
/// assert_eq!(analysis.units.len(), 1);
/// ```
pub fn analyze(records: &[ParagraphRecord]) -> Analysis {
    analyze_with_options(records, &EngineOptions::default())
}

/// Analyze paragraphs with custom options.
///
/// Runs cleanup (when configured), outline building, statistics, unit
/// normalization and section inference (when enabled). Never fails;
/// problems are reported in [`Analysis::warnings`].
pub fn analyze_with_options(records: &[ParagraphRecord], options: &EngineOptions) -> Analysis {
    let paragraphs = match options.cleanup {
        Some(preset) => CleanupPipeline::from_preset(preset).process_records(records),
        None => records.to_vec(),
    };

    let (outline, warnings) = OutlineBuilder::new(options).build(&paragraphs);

    let classifier = ParagraphClassifier::new(&options.thresholds);
    let mut stats = AnalysisStats::new();
    for (record, classification) in paragraphs.iter().zip(classifier.classify_all(&paragraphs)) {
        if !record.is_empty() {
            stats.add_paragraph(record.trimmed(), classification);
        }
    }
    stats.record_outline(&outline);

    let mut units = if options.normalize_units {
        let total_chars = reconcile::document_char_count(&paragraphs);
        UnitSizeNormalizer::new(options).normalize(&outline, total_chars)
    } else {
        outline.units.clone()
    };
    stats.normalized_unit_count = units.len() as u32;

    if options.infer_sections {
        let builder = SectionBuilder::new(&options.thresholds);
        for unit in units.iter_mut().filter(|u| u.sections.is_empty()) {
            unit.sections = builder.infer(unit.number, &unit.content);
            unit.content.clear();
        }
    }

    for warning in &warnings {
        log::warn!("{}", warning);
    }
    log::debug!(
        "Analyzed {} paragraphs: {} units ({} after normalization)",
        stats.paragraph_count,
        stats.unit_count,
        stats.normalized_unit_count
    );

    Analysis {
        outline,
        units,
        stats,
        warnings,
        paragraphs,
        thresholds: options.thresholds.clone(),
    }
}

/// Analyze several independent documents.
///
/// Documents are processed in parallel unless `options.parallel` is off;
/// results keep the input order.
pub fn analyze_batch(documents: &[Vec<ParagraphRecord>], options: &EngineOptions) -> Vec<Analysis> {
    if options.parallel {
        documents
            .par_iter()
            .map(|records| analyze_with_options(records, options))
            .collect()
    } else {
        documents
            .iter()
            .map(|records| analyze_with_options(records, options))
            .collect()
    }
}

/// Sum the statistics of several analyses.
pub fn total_stats(analyses: &[Analysis]) -> AnalysisStats {
    let mut total = AnalysisStats::new();
    for analysis in analyses {
        total.merge(&analysis.stats);
    }
    total
}

/// Read a paragraph file and analyze it with default options.
///
/// # Example
///
/// ```no_run
/// use docoutline::analyze_file;
///
/// let analysis = analyze_file("paragraphs.json")?;
/// println!("Units: {}", analysis.units.len());
/// # Ok::<(), docoutline::Error>(())
/// ```
pub fn analyze_file<P: AsRef<Path>>(path: P) -> Result<Analysis> {
    Engine::new().analyze_file(path)
}

/// Result of analyzing one document.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Outline as detected, before size normalization
    pub outline: Outline,

    /// Units after size normalization
    pub units: Vec<Unit>,

    /// Document statistics
    pub stats: AnalysisStats,

    /// Recoverable problems found while building the outline
    pub warnings: Vec<Warning>,

    /// Paragraphs the outline was built from (after cleanup)
    #[serde(skip)]
    pub paragraphs: Vec<ParagraphRecord>,

    #[serde(skip)]
    thresholds: Thresholds,
}

impl Analysis {
    /// Outline with the detected units replaced by the normalized ones.
    pub fn normalized_outline(&self) -> Outline {
        Outline {
            units: self.units.clone(),
            ..self.outline.clone()
        }
    }

    /// Find a normalized unit by number.
    pub fn unit(&self, number: u32) -> Option<&Unit> {
        self.units.iter().find(|u| u.number == number)
    }

    /// Classify the flattened text of a normalized unit into blocks.
    pub fn unit_blocks(&self, number: u32) -> Option<Vec<ContentBlock>> {
        let unit = self.unit(number)?;
        Some(BlockClassifier::new(&self.thresholds).classify(&render::unit_to_text(unit)))
    }

    /// Sections of a normalized unit, inferred from its paragraphs when it
    /// has none.
    pub fn unit_sections(&self, number: u32) -> Option<Vec<Section>> {
        let unit = self.unit(number)?;
        Some(SectionBuilder::new(&self.thresholds).sections(unit))
    }

    /// Code listings found anywhere in the document.
    pub fn code_blocks(&self) -> Vec<CodeBlock> {
        let text = self
            .paragraphs
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| r.trimmed())
            .collect::<Vec<_>>()
            .join("\n\n");
        CodeDetector::new(&self.thresholds).detect(&text)
    }

    /// Code listings found in a normalized unit.
    pub fn unit_code(&self, number: u32) -> Option<Vec<CodeBlock>> {
        let unit = self.unit(number)?;
        Some(CodeDetector::new(&self.thresholds).detect(&unit.flatten()))
    }

    /// Reconcile the detected outline with externally declared units.
    ///
    /// The flat-split pool is every non-empty paragraph of the document.
    pub fn match_declared(&self, declared: &[DeclaredUnit]) -> MatchOutcome {
        let pool: Vec<String> = self
            .paragraphs
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| r.trimmed().to_string())
            .collect();
        let outcome = match_units(declared, &self.outline, &pool, &self.thresholds);
        for warning in &outcome.warnings {
            log::warn!("{}", warning);
        }
        outcome
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(self, format)
    }

    /// Convert the normalized outline to Markdown.
    pub fn to_markdown(&self, options: &RenderOptions) -> String {
        render::MarkdownRenderer::new(options.clone())
            .with_classifier(BlockClassifier::new(&self.thresholds))
            .render(&self.normalized_outline())
    }

    /// Convert the normalized outline to plain text.
    pub fn to_text(&self) -> String {
        render::to_text(&self.normalized_outline())
    }

    /// Check if any warnings were raised.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Builder for analyzing documents.
///
/// # Example
///
/// ```no_run
/// use docoutline::{CleanupPreset, DuplicatePolicy, Engine, JsonFormat};
///
/// let json = Engine::new()
///     .with_cleanup(CleanupPreset::Standard)
///     .with_duplicate_policy(DuplicatePolicy::LastWins)
///     .analyze_file("paragraphs.json")?
///     .to_json(JsonFormat::Pretty)?;
/// # Ok::<(), docoutline::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: EngineOptions,
}

impl Engine {
    /// Create a new engine with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all engine options.
    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Set heuristic thresholds.
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.options = self.options.with_thresholds(thresholds);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.options = self.options.with_cleanup(preset);
        self
    }

    /// Set the source identifier used as a last-resort title.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.options = self.options.with_source_name(name);
        self
    }

    /// Set duplicate unit policy.
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.options = self.options.with_duplicate_policy(policy);
        self
    }

    /// Infer sections for units that have none.
    pub fn with_section_inference(mut self) -> Self {
        self.options = self.options.with_section_inference(true);
        self
    }

    /// Keep the detected units as they are.
    pub fn without_normalization(mut self) -> Self {
        self.options = self.options.with_normalization(false);
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Get the engine options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Analyze paragraph records.
    pub fn analyze(&self, records: &[ParagraphRecord]) -> Analysis {
        analyze_with_options(records, &self.options)
    }

    /// Analyze blank-line separated plain text.
    pub fn analyze_text(&self, text: &str) -> Analysis {
        self.analyze(&input::parse_text(text))
    }

    /// Read and analyze a paragraph file.
    ///
    /// The file name becomes the source identifier unless one was set.
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> Result<Analysis> {
        let path = path.as_ref();
        let records = input::parse_file(path)?;

        let mut options = self.options.clone();
        if options.source_name.is_none() {
            options.source_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned());
        }
        Ok(analyze_with_options(&records, &options))
    }

    /// Analyze several documents.
    pub fn analyze_batch(&self, documents: &[Vec<ParagraphRecord>]) -> Vec<Analysis> {
        analyze_batch(documents, &self.options)
    }
}
