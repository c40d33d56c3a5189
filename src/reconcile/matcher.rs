//! Content-to-unit matching.
//!
//! Declared units arrive with numbers and titles only. Three tiers try to
//! back them with document text, from most to least confident; the first
//! tier that covers every declared unit wins. Content order is never
//! changed.

use super::even_chunks;
use crate::error::Warning;
use super::sections::SectionBuilder;
use crate::model::{DeclaredUnit, Outline, Section};
use crate::parser::Thresholds;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tier that produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Outline units with the same numbers
    DirectNumber,
    /// Chapters (or units) distributed in contiguous chunks
    Redistribution,
    /// All meaningful paragraphs split evenly
    FlatSplit,
    /// Nothing was declared
    Unmatched,
}

/// Content for each declared unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Unit number to content; keys equal the declared numbers
    pub contents: BTreeMap<u32, String>,

    /// Tier whose result was used
    pub tier: MatchTier,

    /// Declared units left without content
    pub warnings: Vec<Warning>,

    /// Declared sections of each unit, filled from its content
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sections: BTreeMap<u32, Vec<Section>>,
}

impl MatchOutcome {
    /// Content for a declared unit number.
    pub fn content(&self, number: u32) -> Option<&str> {
        self.contents.get(&number).map(String::as_str)
    }

    /// Check if every declared unit received content.
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Back each declared unit with content from the outline or the raw
/// paragraph pool.
///
/// `pool` is every paragraph of the document in order; it feeds the last
/// tier.
pub fn match_units(
    declared: &[DeclaredUnit],
    outline: &Outline,
    pool: &[String],
    thresholds: &Thresholds,
) -> MatchOutcome {
    let mut numbers: Vec<u32> = Vec::with_capacity(declared.len());
    for unit in declared {
        if !numbers.contains(&unit.number) {
            numbers.push(unit.number);
        }
    }

    if numbers.is_empty() {
        return complete(BTreeMap::new(), MatchTier::Unmatched);
    }

    let mut outcome = match_numbers(&numbers, outline, pool, thresholds);

    let builder = SectionBuilder::new(thresholds);
    for unit in declared.iter().filter(|u| !u.sections.is_empty()) {
        if outcome.sections.contains_key(&unit.number) {
            continue;
        }
        let content = outcome.content(unit.number).unwrap_or_default();
        let sections = builder.declared(unit.number, &unit.sections, content);
        outcome.sections.insert(unit.number, sections);
    }
    outcome
}

fn match_numbers(numbers: &[u32], outline: &Outline, pool: &[String], thresholds: &Thresholds) -> MatchOutcome {
    let direct = direct_match(numbers, outline, thresholds);
    if direct.len() == numbers.len() {
        log::debug!("Matched {} declared units by number", numbers.len());
        return complete(direct, MatchTier::DirectNumber);
    }

    let redistributed = redistribute(numbers, outline);
    if redistributed.len() == numbers.len() {
        log::debug!("Matched {} declared units by redistribution", numbers.len());
        return complete(redistributed, MatchTier::Redistribution);
    }

    let meaningful: Vec<String> = pool
        .iter()
        .map(|p| p.trim())
        .filter(|p| p.chars().count() > thresholds.pool_paragraph_min_chars)
        .map(str::to_string)
        .collect();
    let mut contents = split_evenly(numbers, &meaningful);
    log::debug!(
        "Flat split of {} paragraphs over {} declared units",
        meaningful.len(),
        numbers.len()
    );

    let mut warnings = Vec::new();
    for &number in numbers {
        if contents.contains_key(&number) {
            continue;
        }
        let earlier = redistributed.get(&number).or_else(|| direct.get(&number)).cloned();
        match earlier {
            Some(text) => {
                contents.insert(number, text);
            }
            None => {
                contents.insert(number, String::new());
                warnings.push(Warning::UnbackedUnit { number });
            }
        }
    }

    MatchOutcome {
        contents,
        tier: MatchTier::FlatSplit,
        warnings,
        sections: BTreeMap::new(),
    }
}

fn complete(contents: BTreeMap<u32, String>, tier: MatchTier) -> MatchOutcome {
    MatchOutcome {
        contents,
        tier,
        warnings: Vec::new(),
        sections: BTreeMap::new(),
    }
}

/// Outline units with the declared number and non-trivial content.
fn direct_match(numbers: &[u32], outline: &Outline, thresholds: &Thresholds) -> BTreeMap<u32, String> {
    numbers
        .iter()
        .filter_map(|&number| {
            let text = outline.unit(number)?.flatten();
            (text.chars().count() > thresholds.direct_match_min_chars).then_some((number, text))
        })
        .collect()
}

/// Chapters, or outline units when there are none, in contiguous chunks.
/// Only applies when there are more pieces than declared units.
fn redistribute(numbers: &[u32], outline: &Outline) -> BTreeMap<u32, String> {
    let pieces: Vec<String> = if outline.chapters.is_empty() {
        outline
            .units
            .iter()
            .map(|u| {
                let mut paragraphs = vec![u.title.clone()];
                paragraphs.extend(u.paragraphs());
                paragraphs.join("\n\n")
            })
            .collect()
    } else {
        outline.chapters.iter().map(|c| c.paragraphs().join("\n\n")).collect()
    };

    if pieces.len() <= numbers.len() {
        return BTreeMap::new();
    }
    split_evenly(numbers, &pieces)
}

/// Assign contiguous chunks of `ceil(pieces / numbers)` to the numbers in
/// order. Trailing numbers stay unassigned when the pieces run out.
fn split_evenly(numbers: &[u32], pieces: &[String]) -> BTreeMap<u32, String> {
    numbers
        .iter()
        .zip(even_chunks(pieces, numbers.len()))
        .map(|(&number, chunk)| (number, chunk.join("\n\n")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Chapter, Unit};

    const LONG: &str = "This paragraph is comfortably longer than fifty characters in total.";

    fn declared(numbers: &[u32]) -> Vec<DeclaredUnit> {
        numbers.iter().map(|&n| DeclaredUnit::new(n, format!("Declared {}", n))).collect()
    }

    fn unit(number: u32, text: &str) -> Unit {
        let mut unit = Unit::new(number, format!("Unit {}", number));
        unit.content.push(text.to_string());
        unit
    }

    #[test]
    fn test_direct_number_match() {
        let mut outline = Outline::new();
        outline.units = vec![unit(1, LONG), unit(2, LONG)];

        let outcome = match_units(&declared(&[1, 2]), &outline, &[], &Thresholds::default());
        assert_eq!(outcome.tier, MatchTier::DirectNumber);
        assert_eq!(outcome.content(2), Some(LONG));
        assert!(outcome.is_complete());
    }

    #[test]
    fn test_short_unit_fails_direct_match() {
        let mut outline = Outline::new();
        outline.units = vec![unit(1, LONG), unit(2, "short")];
        let pool: Vec<String> = vec![LONG.to_string(), "Another paragraph that is long enough.".to_string()];

        let outcome = match_units(&declared(&[1, 2]), &outline, &pool, &Thresholds::default());
        assert_eq!(outcome.tier, MatchTier::FlatSplit);
        assert_eq!(outcome.content(1), Some(LONG));
        assert_eq!(outcome.content(2), Some("Another paragraph that is long enough."));
    }

    #[test]
    fn test_chapter_redistribution() {
        let mut outline = Outline::new();
        outline.chapters = (1..=5)
            .map(|n| Chapter {
                number: n,
                title: format!("Chapter {}", n),
                content: vec![format!("Text {}", n)],
            })
            .collect();

        let outcome = match_units(&declared(&[7, 8]), &outline, &[], &Thresholds::default());
        assert_eq!(outcome.tier, MatchTier::Redistribution);
        assert_eq!(
            outcome.content(7),
            Some("Chapter 1\n\nText 1\n\nChapter 2\n\nText 2\n\nChapter 3\n\nText 3")
        );
        assert_eq!(outcome.content(8), Some("Chapter 4\n\nText 4\n\nChapter 5\n\nText 5"));
    }

    #[test]
    fn test_units_redistributed_when_no_chapters() {
        let mut outline = Outline::new();
        outline.units = vec![unit(1, "a"), unit(2, "b"), unit(3, "c")];

        let outcome = match_units(&declared(&[10]), &outline, &[], &Thresholds::default());
        assert_eq!(outcome.tier, MatchTier::Redistribution);
        assert_eq!(outcome.content(10), Some("Unit 1\n\na\n\nUnit 2\n\nb\n\nUnit 3\n\nc"));
    }

    #[test]
    fn test_unbacked_units_get_empty_content() {
        let outcome = match_units(&declared(&[1, 2, 3]), &Outline::new(), &[], &Thresholds::default());
        assert_eq!(outcome.contents.len(), 3);
        assert_eq!(outcome.content(3), Some(""));
        assert_eq!(outcome.warnings.len(), 3);
        assert!(!outcome.is_complete());
    }

    #[test]
    fn test_gap_filled_from_direct_partial() {
        let mut outline = Outline::new();
        outline.units = vec![unit(1, "tiny"), unit(3, LONG)];
        let pool = vec![LONG.to_string()];

        let outcome = match_units(&declared(&[1, 3]), &outline, &pool, &Thresholds::default());
        assert_eq!(outcome.tier, MatchTier::FlatSplit);
        assert_eq!(outcome.content(1), Some(LONG));
        assert_eq!(outcome.content(3), Some(LONG));
        assert!(outcome.is_complete());
    }

    #[test]
    fn test_declared_sections_filled_from_content() {
        let mut outline = Outline::new();
        let mut first = unit(1, LONG);
        first.content.push("Second paragraph of the first unit, also long enough.".to_string());
        outline.units = vec![first, unit(2, LONG)];
        let declared = vec![
            DeclaredUnit::new(1, "Basics").with_sections(["Concepts", "Practice"]),
            DeclaredUnit::new(2, "Advanced"),
        ];

        let outcome = match_units(&declared, &outline, &[], &Thresholds::default());
        assert_eq!(outcome.tier, MatchTier::DirectNumber);
        assert_eq!(outcome.sections.len(), 1);
        let sections = &outcome.sections[&1];
        assert_eq!(sections[0].id, "1.1");
        assert_eq!(sections[0].title, "Concepts");
        assert_eq!(sections[0].content, vec![LONG]);
        assert_eq!(
            sections[1].content,
            vec!["Second paragraph of the first unit, also long enough."]
        );
    }

    #[test]
    fn test_empty_and_duplicate_declarations() {
        let outcome = match_units(&[], &Outline::new(), &[], &Thresholds::default());
        assert_eq!(outcome.tier, MatchTier::Unmatched);
        assert!(outcome.contents.is_empty());

        let outcome = match_units(&declared(&[4, 4]), &Outline::new(), &[], &Thresholds::default());
        assert_eq!(outcome.contents.len(), 1);
        assert_eq!(outcome.warnings, vec![Warning::UnbackedUnit { number: 4 }]);
    }
}
