//! Flat chapter detection ("3. Seguridad en redes").
//!
//! Chapters are a coarser signal than unit headers. They back the outline
//! when no unit headers exist and give the matcher finer-grained pieces to
//! redistribute.

use super::patterns::{clean_title, CHAPTER_HEADER};
use super::{DuplicatePolicy, Thresholds};
use crate::model::Chapter;
use std::collections::HashSet;

/// Result of a chapter scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterScan {
    /// Chapters in document order, one per number
    pub chapters: Vec<Chapter>,

    /// Paragraphs before the first chapter header
    pub preamble: Vec<String>,

    /// Chapter copies removed because their number repeated
    pub suppressed: Vec<Chapter>,

    /// Number of paragraphs consumed as chapter headers
    pub header_lines: usize,

    /// Numbers that appeared more than once, in order of repetition
    pub duplicates: Vec<u32>,
}

impl ChapterScan {
    /// Check if no chapter was found.
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    fn close(&mut self, open: Option<(Chapter, bool)>) {
        match open {
            Some((chapter, true)) => self.suppressed.push(chapter),
            Some((chapter, false)) => self.chapters.push(chapter),
            None => {}
        }
    }
}

/// Scan paragraphs for "<n>. Title" chapter headers.
///
/// Blank paragraphs are skipped. Repeated numbers follow the duplicate
/// policy the same way unit headers do.
pub fn scan_chapters<'a, I>(paragraphs: I, thresholds: &Thresholds, policy: DuplicatePolicy) -> ChapterScan
where
    I: IntoIterator<Item = &'a str>,
{
    let mut scan = ChapterScan::default();
    let mut seen = HashSet::new();
    let mut open: Option<(Chapter, bool)> = None;

    for text in paragraphs {
        let text = text.trim();
        if text.is_empty() {
            continue;
        }

        let Some((number, title)) = chapter_header(text, thresholds) else {
            match open.as_mut() {
                Some((chapter, _)) => chapter.content.push(text.to_string()),
                None => scan.preamble.push(text.to_string()),
            }
            continue;
        };

        scan.close(open.take());
        scan.header_lines += 1;

        let discard = if seen.insert(number) {
            false
        } else {
            scan.duplicates.push(number);
            match policy {
                DuplicatePolicy::LastWins => {
                    if let Some(pos) = scan.chapters.iter().position(|c| c.number == number) {
                        let earlier = scan.chapters.remove(pos);
                        scan.suppressed.push(earlier);
                    }
                    false
                }
                DuplicatePolicy::FirstWins => true,
            }
        };

        open = Some((
            Chapter {
                number,
                title,
                content: Vec::new(),
            },
            discard,
        ));
    }

    scan.close(open.take());
    scan
}

/// Parse a chapter header line into number and cleaned title.
pub(crate) fn chapter_header(text: &str, thresholds: &Thresholds) -> Option<(u32, String)> {
    let caps = CHAPTER_HEADER.captures(text)?;
    let number = caps.get(1)?.as_str().parse().ok()?;
    let raw_title = caps.get(2)?.as_str();

    let len = raw_title.chars().count();
    if len < thresholds.chapter_title_min_chars || len > thresholds.chapter_title_max_chars {
        return None;
    }

    let title = clean_title(raw_title);
    if title.is_empty() {
        return None;
    }
    Some((number, title))
}
