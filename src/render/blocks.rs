//! Block classification for the flattened text of one unit or section.
//!
//! Each blank-line separated candidate is classified exactly once, in
//! order, by shape alone. A grouping pass then folds consecutive
//! definitions and list items into composite blocks.

use crate::model::{ContentBlock, DefinitionEntry, Table};
use crate::parser::Thresholds;
use regex::Regex;
use std::sync::LazyLock;

static BLANK_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid blank line regex"));

static SUBTITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+(?:\.[a-z])?[.)]?\s+(\S.*)$").expect("valid subtitle regex"));

static TIP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)^(nota|note|importante|important|recuerda|remember|atenci[oó]n|attention|tip|consejo|advertencia|warning)[:\s]+(.+)$",
    )
    .expect("valid tip regex")
});

static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*•]\s+|\d+[.)]\s+)").expect("valid list marker regex"));

static LIST_STRIP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*•\d.)]+\s+").expect("valid list strip regex"));

/// One candidate after classification, before grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Candidate {
    Table(Vec<Vec<String>>),
    Subtitle(String),
    Definition(DefinitionEntry),
    Tip { label: String, text: String },
    ListItem(String),
    Paragraph(String),
}

/// Segments flattened text into typed content blocks.
#[derive(Debug, Clone)]
pub struct BlockClassifier {
    thresholds: Thresholds,
}

impl BlockClassifier {
    /// Create a classifier using the given thresholds.
    pub fn new(thresholds: &Thresholds) -> Self {
        Self {
            thresholds: thresholds.clone(),
        }
    }

    /// Classify text into blocks. Output order follows input order.
    pub fn classify(&self, text: &str) -> Vec<ContentBlock> {
        let normalized = text.replace("\r\n", "\n");
        let paragraphs: Vec<&str> = BLANK_LINE
            .split(&normalized)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        let mut candidates: Vec<Candidate> = Vec::with_capacity(paragraphs.len());
        for (i, paragraph) in paragraphs.iter().enumerate() {
            let previous_is_list = matches!(candidates.last(), Some(Candidate::ListItem(_)));
            let next = paragraphs.get(i + 1).copied();
            let candidate = self.classify_one(paragraph, previous_is_list, next);
            candidates.push(candidate);
        }

        let mut blocks = group(candidates);
        while matches!(blocks.last(), Some(ContentBlock::Subtitle { .. })) {
            blocks.pop();
        }
        blocks
    }

    fn classify_one(&self, text: &str, previous_is_list: bool, next: Option<&str>) -> Candidate {
        if Table::is_flattened(text) {
            if let Some(table) = Table::parse_flattened(text) {
                return Candidate::Table(table.rows);
            }
        }

        if text.chars().count() <= self.thresholds.subtitle_max_chars {
            if let Some(caps) = SUBTITLE.captures(text) {
                return Candidate::Subtitle(caps[1].trim().to_string());
            }
        }

        if let Some(entry) = self.definition(text) {
            return Candidate::Definition(entry);
        }

        if let Some(caps) = TIP.captures(text) {
            return Candidate::Tip {
                label: capitalize(&caps[1]),
                text: caps[2].trim().to_string(),
            };
        }

        if LIST_MARKER.is_match(text) {
            return Candidate::ListItem(LIST_STRIP.replace(text, "").trim().to_string());
        }

        if self.is_short_unpunctuated(text) && (previous_is_list || next.is_some_and(|n| self.is_short_unpunctuated(n)))
        {
            return Candidate::ListItem(text.to_string());
        }

        Candidate::Paragraph(text.to_string())
    }

    /// "Term: explanation" on a single line with an upper-case term.
    fn definition(&self, text: &str) -> Option<DefinitionEntry> {
        let (term, explanation) = text.split_once(':')?;
        if term.contains('\n') || !term.chars().next()?.is_uppercase() {
            return None;
        }

        let term_len = term.chars().count();
        if !(3..=self.thresholds.definition_term_max_chars).contains(&term_len) {
            return None;
        }

        let explanation = explanation.trim();
        if explanation.contains('\n')
            || explanation.chars().count() < self.thresholds.definition_min_explanation_chars
        {
            return None;
        }

        Some(DefinitionEntry::new(term.trim(), explanation))
    }

    fn is_short_unpunctuated(&self, text: &str) -> bool {
        let len = text.chars().count();
        len > self.thresholds.bullet_min_chars
            && len < self.thresholds.bullet_max_chars
            && !text.trim_end().ends_with(['.', '!', '?'])
    }
}

impl Default for BlockClassifier {
    fn default() -> Self {
        Self::new(&Thresholds::default())
    }
}

/// Classify text with default thresholds.
pub fn classify_blocks(text: &str) -> Vec<ContentBlock> {
    BlockClassifier::default().classify(text)
}

fn group(candidates: Vec<Candidate>) -> Vec<ContentBlock> {
    let mut blocks: Vec<ContentBlock> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match candidate {
            Candidate::Definition(entry) => {
                if let Some(ContentBlock::Definition { entries }) = blocks.last_mut() {
                    entries.push(entry);
                } else {
                    blocks.push(ContentBlock::Definition { entries: vec![entry] });
                }
            }
            Candidate::ListItem(item) => {
                if let Some(ContentBlock::List { items }) = blocks.last_mut() {
                    items.push(item);
                } else {
                    blocks.push(ContentBlock::List { items: vec![item] });
                }
            }
            Candidate::Table(rows) => blocks.push(ContentBlock::Table { rows }),
            Candidate::Subtitle(text) => blocks.push(ContentBlock::Subtitle { text }),
            Candidate::Tip { label, text } => blocks.push(ContentBlock::Tip { label, text }),
            Candidate::Paragraph(text) => blocks.push(ContentBlock::Paragraph { text }),
        }
    }
    blocks
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
