//! Outline builder.
//!
//! One streaming pass over the classified paragraphs. Open nodes are kept
//! in one slot per depth (unit, section, subsection); opening a node at any
//! depth flushes the deeper slots into their parents first, so a node is
//! never touched again once closed.

use super::chapters::{scan_chapters, ChapterScan};
use super::classifier::{has_heading_style, ParagraphClassifier};
use super::patterns::{
    clean_title, is_all_caps, starts_like_title, CHAPTER_HEADER, MODULE_LABEL, SECTION_HEADER,
    SUBSECTION_HEADER, UNIT_HEADER,
};
use super::{DuplicatePolicy, EngineOptions, Thresholds};
use crate::error::Warning;
use crate::model::{Outline, ParagraphRecord, Section, Subsection, Unit};
use std::collections::HashSet;

/// Builds an [`Outline`] from paragraph records.
#[derive(Debug, Clone)]
pub struct OutlineBuilder {
    thresholds: Thresholds,
    policy: DuplicatePolicy,
    fallback_title: String,
}

/// A non-empty paragraph with its heading flag.
struct Line<'a> {
    text: &'a str,
    record: &'a ParagraphRecord,
    heading: bool,
}

/// Structural role of a line.
enum Header<'a> {
    Unit { number: u32, title: &'a str },
    Section { minor: u32, title: &'a str },
    Subsection { minor: u32, letter: char, title: &'a str },
}

impl OutlineBuilder {
    /// Create a builder from engine options.
    pub fn new(options: &EngineOptions) -> Self {
        Self {
            thresholds: options.thresholds.clone(),
            policy: options.duplicate_policy,
            fallback_title: options.fallback_unit_title.clone(),
        }
    }

    /// Build the outline, returning it with any warnings raised.
    ///
    /// Never fails: documents without unit headers fall back to flat
    /// chapters and then to a single unit holding everything.
    pub fn build(&self, records: &[ParagraphRecord]) -> (Outline, Vec<Warning>) {
        let classifier = ParagraphClassifier::new(&self.thresholds);
        let lines: Vec<Line<'_>> = records
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| Line {
                text: r.trimmed(),
                record: r,
                heading: classifier.classify(r).heading,
            })
            .collect();

        if lines.is_empty() {
            return (Outline::new(), vec![Warning::NoUnitsDetected]);
        }

        let mut outline = Outline::new();
        let mut warnings = Vec::new();
        let mut tree = Tree::default();
        let mut seen = HashSet::new();

        let mut i = 0;
        while i < lines.len() {
            let line = &lines[i];
            i += 1;

            let header = self.header(line);
            let unit_number = tree.unit.as_ref().map(|u| u.unit.number);

            match (header, unit_number) {
                (Some(Header::Unit { number, title }), _) => {
                    let mut title = clean_title(title);
                    if title.is_empty() {
                        match lines.get(i).filter(|next| self.is_title_line(next)) {
                            Some(next) => {
                                title = clean_title(next.text);
                                outline.heading_lines += 1;
                                i += 1;
                            }
                            None => title = format!("Unit {}", number),
                        }
                    }
                    outline.heading_lines += 1;
                    tree.close_unit();

                    let discard = if seen.insert(number) {
                        false
                    } else {
                        warnings.push(Warning::DuplicateUnit { number });
                        self.resolve_duplicate(&mut tree, number)
                    };
                    tree.unit = Some(OpenUnit {
                        unit: Unit::new(number, title),
                        discard,
                    });
                }
                (Some(Header::Section { minor, title }), Some(unit)) => {
                    outline.heading_lines += 1;
                    tree.close_section();
                    tree.section = Some(Section::new(format!("{}.{}", unit, minor), clean_title(title)));
                }
                (
                    Some(Header::Subsection {
                        minor,
                        letter,
                        title,
                    }),
                    Some(unit),
                ) => {
                    outline.heading_lines += 1;
                    tree.open_subsection(format!("{}.{}", unit, minor), letter, clean_title(title));
                }
                _ => {
                    if tree.unit.is_none() && seen.is_empty() {
                        self.discover_title(line, &mut outline);
                    }
                    tree.push_content(line.text);
                }
            }
        }
        tree.close_unit();

        outline.units = tree.units;
        outline.suppressed = tree.suppressed;
        outline.front_matter = tree.front_matter;
        outline.document_title = self.document_title(&lines);

        let chapters = scan_chapters(lines.iter().map(|l| l.text), &self.thresholds, self.policy);
        outline.chapters = chapters.chapters.clone();

        if outline.units.is_empty() {
            self.fallback(&mut outline, chapters, &lines, &mut warnings);
        }

        log::debug!(
            "Built outline: {} units, {} sections, {} suppressed, {} chapters",
            outline.units.len(),
            outline.section_count(),
            outline.suppressed.len(),
            outline.chapters.len()
        );

        (outline, warnings)
    }

    /// Apply the duplicate policy to a repeated unit number. Returns whether
    /// the copy about to open should be discarded.
    fn resolve_duplicate(&self, tree: &mut Tree, number: u32) -> bool {
        match self.policy {
            DuplicatePolicy::LastWins => {
                if let Some(pos) = tree.units.iter().position(|u| u.number == number) {
                    let earlier = tree.units.remove(pos);
                    log::debug!("Suppressing earlier copy of unit {} ({})", number, earlier.title);
                    tree.suppressed.push(earlier);
                }
                false
            }
            DuplicatePolicy::FirstWins => {
                log::debug!("Suppressing later copy of unit {}", number);
                true
            }
        }
    }

    fn fallback(&self, outline: &mut Outline, chapters: ChapterScan, lines: &[Line<'_>], warnings: &mut Vec<Warning>) {
        if !chapters.is_empty() {
            log::debug!("No unit headers; using {} flat chapters", chapters.chapters.len());
            warnings.push(Warning::ChapterFallback);
            warnings.extend(
                chapters
                    .duplicates
                    .iter()
                    .map(|&number| Warning::DuplicateUnit { number }),
            );
            outline.units = chapters.chapters.into_iter().map(Unit::from).collect();
            outline.suppressed = chapters.suppressed.into_iter().map(Unit::from).collect();
            outline.front_matter = chapters.preamble;
            outline.heading_lines = chapters.header_lines;
            return;
        }

        log::debug!("No unit or chapter headers; using a single unit");
        warnings.push(Warning::SingleUnitFallback);
        let title = outline.title().unwrap_or(self.fallback_title.as_str()).to_string();
        let mut unit = Unit::new(1, title);
        unit.content = lines.iter().map(|l| l.text.to_string()).collect();
        outline.units = vec![unit];
        outline.suppressed.clear();
        outline.front_matter.clear();
        outline.heading_lines = 0;
    }

    /// Most specific pattern first; a match commits.
    fn header<'a>(&self, line: &Line<'a>) -> Option<Header<'a>> {
        if line.text.chars().count() > self.thresholds.structural_heading_max_chars {
            return None;
        }

        if let Some(caps) = UNIT_HEADER.captures(line.text) {
            let keyword = caps.get(1)?.as_str();
            let number = caps.get(2)?.as_str().parse().ok()?;
            let title = caps.get(4).map_or("", |m| m.as_str()).trim();

            let accepted = is_all_caps(keyword)
                || caps.get(3).is_some()
                || title.is_empty()
                || starts_like_title(title)
                || has_heading_style(line.record);
            return accepted.then_some(Header::Unit { number, title });
        }

        if let Some(caps) = SUBSECTION_HEADER.captures(line.text) {
            let title = caps.get(4)?.as_str();
            if !starts_like_title(title) {
                return None;
            }
            return Some(Header::Subsection {
                minor: caps.get(2)?.as_str().parse().ok()?,
                letter: caps.get(3)?.as_str().chars().next()?,
                title,
            });
        }

        if let Some(caps) = SECTION_HEADER.captures(line.text) {
            let title = caps.get(3)?.as_str();
            if !starts_like_title(title) {
                return None;
            }
            return Some(Header::Section {
                minor: caps.get(2)?.as_str().parse().ok()?,
                title,
            });
        }

        None
    }

    /// A heading line that can serve as the title of a bare unit header.
    fn is_title_line(&self, line: &Line<'_>) -> bool {
        line.heading && self.header(line).is_none() && module_label(line.text).is_none()
    }

    fn discover_title(&self, line: &Line<'_>, outline: &mut Outline) {
        if let Some((code, inline)) = module_label(line.text) {
            if outline.module_code.is_none() {
                outline.module_code = Some(code.to_string());
            }
            if outline.module_title.is_empty() && !inline.is_empty() {
                outline.module_title = inline;
            }
            return;
        }

        if !outline.module_title.is_empty() || !line.heading {
            return;
        }

        let len = line.text.chars().count();
        let t = &self.thresholds;
        if len >= t.module_title_min_chars
            && len <= t.module_title_max_chars
            && !UNIT_HEADER.is_match(line.text)
            && !CHAPTER_HEADER.is_match(line.text)
            && !MODULE_LABEL.is_match(line.text)
        {
            outline.module_title = clean_title(line.text);
        }
    }

    /// First title-like heading anywhere in the document.
    fn document_title(&self, lines: &[Line<'_>]) -> String {
        for line in lines {
            if let Some((_, inline)) = module_label(line.text) {
                if !inline.is_empty() {
                    return inline;
                }
                continue;
            }

            if line.heading
                && line.text.chars().count() < self.thresholds.document_title_max_chars
                && !line.text.ends_with('.')
                && !starts_with_item_number(line.text)
                && !UNIT_HEADER.is_match(line.text)
            {
                let title = clean_title(line.text);
                if !title.is_empty() {
                    return title;
                }
            }
        }
        String::new()
    }
}

impl Default for OutlineBuilder {
    fn default() -> Self {
        Self::new(&EngineOptions::default())
    }
}

/// "MODULE <code>[: title]" with a code containing a digit. Without a
/// separator the inline title must start like a title, so sentences such
/// as "Module 2 covers ..." are not labels.
fn module_label(text: &str) -> Option<(&str, String)> {
    let caps = MODULE_LABEL.captures(text)?;
    let code = caps.get(1)?.as_str();
    if !code.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    let inline = caps.get(3).map(|m| clean_title(m.as_str())).unwrap_or_default();
    if caps.get(2).is_none() && !inline.is_empty() && !starts_like_title(&inline) {
        return None;
    }
    Some((code, inline))
}

/// "12. " style prefix.
fn starts_with_item_number(text: &str) -> bool {
    let rest = text.trim_start_matches(|c: char| c.is_ascii_digit());
    rest.len() < text.len() && rest.starts_with('.') && rest[1..].starts_with(char::is_whitespace)
}

struct OpenUnit {
    unit: Unit,
    discard: bool,
}

/// Finished nodes plus the open slot for each depth.
#[derive(Default)]
struct Tree {
    units: Vec<Unit>,
    suppressed: Vec<Unit>,
    front_matter: Vec<String>,
    unit: Option<OpenUnit>,
    section: Option<Section>,
    subsection: Option<Subsection>,
}

impl Tree {
    /// Append to the deepest open node, or front matter before any unit.
    fn push_content(&mut self, text: &str) {
        let text = text.to_string();
        if let Some(sub) = self.subsection.as_mut() {
            sub.content.push(text);
        } else if let Some(section) = self.section.as_mut() {
            section.content.push(text);
        } else if let Some(open) = self.unit.as_mut() {
            open.unit.content.push(text);
        } else {
            self.front_matter.push(text);
        }
    }

    fn open_subsection(&mut self, section_id: String, letter: char, title: String) {
        let same_section = self.section.as_ref().is_some_and(|s| s.id == section_id);
        if same_section {
            self.close_subsection();
        } else {
            self.close_section();
            self.section = Some(Section::new(section_id.clone(), ""));
        }
        self.subsection = Some(Subsection::new(format!("{}.{}", section_id, letter), title));
    }

    fn close_subsection(&mut self) {
        if let Some(sub) = self.subsection.take() {
            if let Some(section) = self.section.as_mut() {
                section.subsections.push(sub);
            }
        }
    }

    fn close_section(&mut self) {
        self.close_subsection();
        if let Some(section) = self.section.take() {
            if let Some(open) = self.unit.as_mut() {
                open.unit.sections.push(section);
            }
        }
    }

    fn close_unit(&mut self) {
        self.close_section();
        if let Some(open) = self.unit.take() {
            if open.discard {
                self.suppressed.push(open.unit);
            } else {
                self.units.push(open.unit);
            }
        }
    }
}
