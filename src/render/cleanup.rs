//! Text cleanup pipeline for extracted paragraphs.
//!
//! Word processors leave ligatures, decorative bullets, soft hyphens and
//! stray page numbers in the paragraph stream. Cleanup runs before
//! classification so the structural patterns see plain text.

use crate::model::ParagraphRecord;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static PAGE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:p[áa]g(?:ina)?\.?|page)?\s*[-–—]?\s*\d{1,4}\s*[-–—]?\s*$").expect("valid page number regex")
});

static LINE_HYPHEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\p{L})-\s*\n\s*(\p{Ll})").expect("valid hyphenation regex"));

static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t\u{00A0}]+").expect("valid spaces regex"));

static NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid newlines regex"));

const LIGATURES: &[(&str, &str)] = &[
    ("\u{FB00}", "ff"),
    ("\u{FB01}", "fi"),
    ("\u{FB02}", "fl"),
    ("\u{FB03}", "ffi"),
    ("\u{FB04}", "ffl"),
    ("\u{FB05}", "st"),
    ("\u{FB06}", "st"),
];

const BULLETS: &[char] = &['●', '○', '■', '□', '◆', '◇', '▪', '▫', '►', '▻', '➤', '\u{F0B7}'];

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanupPreset {
    /// Unicode NFC normalization and whitespace only
    Minimal,
    /// NFC, ligatures, bullets, soft hyphens and replacement characters
    #[default]
    Standard,
    /// Standard plus page-number removal and hyphenation repair
    Aggressive,
}

/// Options for text cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Fix ligatures (fi, fl, etc.)
    pub fix_ligatures: bool,

    /// Standardize bullet characters (●, ○, ■ → •)
    pub standardize_bullets: bool,

    /// Remove soft hyphens and zero-width characters
    pub remove_invisible: bool,

    /// Remove Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Join words hyphenated across line breaks
    pub fix_hyphenation: bool,

    /// Blank out paragraphs that are only a page number
    pub remove_page_numbers: bool,

    /// Collapse runs of spaces and tabs
    pub normalize_whitespace: bool,

    /// Collapse three or more newlines into a blank line
    pub limit_newlines: bool,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
            CleanupPreset::Aggressive => Self::aggressive(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            fix_ligatures: false,
            standardize_bullets: false,
            remove_invisible: false,
            remove_replacement_char: false,
            fix_hyphenation: false,
            remove_page_numbers: false,
            normalize_whitespace: true,
            limit_newlines: false,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            fix_ligatures: true,
            standardize_bullets: true,
            remove_invisible: true,
            remove_replacement_char: true,
            fix_hyphenation: false,
            remove_page_numbers: false,
            normalize_whitespace: true,
            limit_newlines: true,
        }
    }

    /// Aggressive cleanup options.
    pub fn aggressive() -> Self {
        Self {
            fix_hyphenation: true,
            remove_page_numbers: true,
            ..Self::standard()
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Text cleanup pipeline.
#[derive(Debug, Clone, Default)]
pub struct CleanupPipeline {
    options: CleanupOptions,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self { options }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Clean every record, producing new records in the same order.
    ///
    /// Paragraphs reduced to nothing stay in place with empty text; the
    /// outline builder skips them.
    pub fn process_records(&self, records: &[ParagraphRecord]) -> Vec<ParagraphRecord> {
        records
            .iter()
            .map(|record| ParagraphRecord {
                text: self.process(&record.text),
                ..record.clone()
            })
            .collect()
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let opts = &self.options;
        let mut result = text.replace("\r\n", "\n");

        // Stage 1: character level
        if opts.normalize_unicode {
            result = result.nfc().collect();
        }

        if opts.fix_ligatures {
            for (ligature, replacement) in LIGATURES {
                result = result.replace(ligature, replacement);
            }
        }

        if opts.standardize_bullets {
            result = result
                .chars()
                .map(|c| if BULLETS.contains(&c) { '•' } else { c })
                .collect();
        }

        if opts.remove_invisible {
            result.retain(|c| !matches!(c, '\u{00AD}' | '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}'));
        }

        if opts.remove_replacement_char {
            result.retain(|c| c != '\u{FFFD}');
        }

        // Stage 2: line level
        if opts.fix_hyphenation {
            result = LINE_HYPHEN.replace_all(&result, "$1$2").into_owned();
        }

        if opts.remove_page_numbers && PAGE_NUMBER.is_match(result.trim()) {
            return String::new();
        }

        // Stage 3: whitespace
        if opts.normalize_whitespace {
            result = result
                .lines()
                .map(|line| SPACES.replace_all(line.trim(), " ").into_owned())
                .collect::<Vec<_>>()
                .join("\n");
        }

        if opts.limit_newlines {
            result = NEWLINES.replace_all(&result, "\n\n").into_owned();
        }

        result.trim().to_string()
    }
}
