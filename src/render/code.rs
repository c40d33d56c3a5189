//! Source code detection in unit text.
//!
//! Course material embeds Python, SQL, JavaScript and HTML listings as
//! ordinary paragraphs. Each language has one pattern that starts at a
//! paragraph boundary; matches shorter than the configured size are prose
//! that happens to open with a keyword.

use crate::model::{CodeBlock, CodeLanguage};
use crate::parser::Thresholds;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Keyword line followed by indented or blank lines.
static PYTHON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)(?:^|\n\n)((?:(?:def|class|import|from|if|for|while|with|try|async)\s+.+\n)(?:(?:[ \t]+.+|\s*)\n)*)",
    )
    .expect("valid python code regex")
});

/// Statement keyword through the first semicolon.
static SQL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)(?:^|\n\n)((?:SELECT|INSERT|UPDATE|DELETE|CREATE\s+TABLE|ALTER\s+TABLE)\b[\s\S]+?;)")
        .expect("valid sql code regex")
});

static JAVASCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)(?:^|\n\n)((?:(?:function|const|let|var|class|async)\s+.+\n)(?:(?:[ \t]+.+|\s*)\n)*)",
    )
    .expect("valid javascript code regex")
});

/// Block-level element through the first closing block tag.
static HTML: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?mi)(?:^|\n\n)(<(?:div|section|article|form|table|ul|ol|nav|header|footer|template)\b[\s\S]+?</(?:div|section|article|form|table|ul|ol|nav|header|footer|template)>)",
    )
    .expect("valid html code regex")
});

/// Finds code snippets in text.
#[derive(Debug, Clone)]
pub struct CodeDetector {
    min_chars: usize,
    min_lines: usize,
    max_blocks: usize,
}

impl CodeDetector {
    /// Create a detector using the given thresholds.
    pub fn new(thresholds: &Thresholds) -> Self {
        Self {
            min_chars: thresholds.code_min_chars,
            min_lines: thresholds.code_min_lines,
            max_blocks: thresholds.code_max_blocks,
        }
    }

    /// Detect code snippets in document order.
    ///
    /// Identical snippets are reported once, under the first language
    /// whose pattern matched them. At most `code_max_blocks` are returned.
    pub fn detect(&self, text: &str) -> Vec<CodeBlock> {
        // Line patterns need every line terminated, including the last.
        let text = format!("{}\n", text.trim_end());
        let patterns: [(CodeLanguage, &Regex); 4] = [
            (CodeLanguage::Python, &*PYTHON),
            (CodeLanguage::Sql, &*SQL),
            (CodeLanguage::JavaScript, &*JAVASCRIPT),
            (CodeLanguage::Html, &*HTML),
        ];

        let mut seen = HashSet::new();
        let mut found: Vec<(usize, CodeBlock)> = Vec::new();
        for (language, pattern) in patterns {
            for caps in pattern.captures_iter(&text) {
                let Some(m) = caps.get(1) else { continue };
                let code = m.as_str().trim();
                if !self.is_code_sized(code) || !seen.insert(code.to_string()) {
                    continue;
                }
                found.push((m.start(), CodeBlock::new(language, code)));
            }
        }

        found.sort_by_key(|(start, _)| *start);
        found.truncate(self.max_blocks);
        log::debug!("Detected {} code blocks", found.len());
        found.into_iter().map(|(_, block)| block).collect()
    }

    fn is_code_sized(&self, code: &str) -> bool {
        code.lines().count() >= self.min_lines && code.len() >= self.min_chars
    }
}

impl Default for CodeDetector {
    fn default() -> Self {
        Self::new(&Thresholds::default())
    }
}

/// Detect code with default thresholds.
pub fn detect_code(text: &str) -> Vec<CodeBlock> {
    CodeDetector::default().detect(text)
}
