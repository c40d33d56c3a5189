//! Pre-compiled patterns for structural detection.
//!
//! Keywords cover the Spanish and English forms found in course material.

use regex::Regex;
use std::sync::LazyLock;

/// Style names of the heading family ("Heading1", "Title", "Título2").
pub(crate) static HEADING_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:heading|t[íi]tulo|title)").expect("valid heading style regex"));

/// Structural keyword followed by a number ("UNIDAD 3", "Chapter 2").
pub(crate) static STRUCTURAL_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:unidad(?:\s+did[áa]ctica)?|unit|m[óo]dulo|module|cap[íi]tulo|chapter|secci[óo]n|section)\s+\d+",
    )
    .expect("valid structural keyword regex")
});

/// "MODULE <code>[: title]" or "MODULE <code> title". The code must contain
/// a digit; checked by callers.
///
/// Groups: code, separator, title.
pub(crate) static MODULE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:m[óo]dulo|module)\s+(\w+)(?:\s*([:.\-–—])\s*|\s+|$)(.*)$")
        .expect("valid module label regex")
});

/// "UNIT <n>[: title]" and its chapter/Spanish variants.
///
/// Groups: keyword, number, separator, title.
pub(crate) static UNIT_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?i:(unidad(?:\s+did[áa]ctica)?|unit|cap[íi]tulo|chapter))\s+(\d+)\b\s*(?:([:.\-–—])\s*)?(.*)$",
    )
    .expect("valid unit header regex")
});

/// "<n>.<m>.<letter> title"
pub(crate) static SUBSECTION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\.(\d+)\.([a-z])[.)]?\s+(\S.*)$").expect("valid subsection header regex")
});

/// "<n>.<m> title"
pub(crate) static SECTION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\.(\d+)\.?\s+(\S.*)$").expect("valid section header regex")
});

/// "<n>. Title" with at most two digits and an upper-case initial.
pub(crate) static CHAPTER_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})\.\s+(\p{Lu}.*)$").expect("valid chapter header regex")
});

/// Table-of-contents leaders and page numbers at the end of a title.
static TOC_LEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*(?:\.{3,}|…+|_{3,}|\t)[\s.…_]*\d*\s*$").expect("valid toc leader regex")
});

/// Remove TOC leaders ("Basics ........ 12") and surrounding whitespace.
pub(crate) fn clean_title(title: &str) -> String {
    TOC_LEADER.replace(title.trim(), "").trim().to_string()
}

/// True when the text does not start with a lower-case letter.
pub(crate) fn starts_like_title(text: &str) -> bool {
    text.chars().next().is_some_and(|c| !c.is_lowercase())
}

/// True when every cased letter is upper case and at least one exists.
pub(crate) fn is_all_caps(text: &str) -> bool {
    let mut has_upper = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_upper = true;
        } else if !(c.is_numeric() || c.is_whitespace() || is_punctuation(c)) {
            return false;
        }
    }
    has_upper
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || matches!(c, '¿' | '¡' | '–' | '—' | '«' | '»' | '“' | '”' | '…' | 'º' | 'ª')
}
