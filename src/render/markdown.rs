//! Markdown rendering for outlines and content blocks.

use crate::model::{ContentBlock, Outline, Section, Subsection, Unit};

use super::{BlockClassifier, RenderOptions};

/// Convert an outline to Markdown.
pub fn to_markdown(outline: &Outline, options: &RenderOptions) -> String {
    MarkdownRenderer::new(options.clone()).render(outline)
}

/// Convert a block list to Markdown.
pub fn blocks_to_markdown(blocks: &[ContentBlock], options: &RenderOptions) -> String {
    let renderer = MarkdownRenderer::new(options.clone());
    let mut output = String::new();
    renderer.render_blocks(&mut output, blocks);
    output.trim().to_string()
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
    classifier: BlockClassifier,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer with default block thresholds.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            classifier: BlockClassifier::default(),
        }
    }

    /// Use a specific block classifier for node content.
    pub fn with_classifier(mut self, classifier: BlockClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Render an outline to Markdown.
    pub fn render(&self, outline: &Outline) -> String {
        let mut output = String::new();

        if let Some(title) = outline.title() {
            self.push_heading(&mut output, 0, title);
        }

        if self.options.include_front_matter && !outline.front_matter.is_empty() {
            self.render_content(&mut output, &outline.front_matter);
        }

        for unit in &outline.units {
            if self.options.unit_selection.includes(unit.number) {
                self.render_unit(&mut output, unit);
            }
        }

        output.trim().to_string()
    }

    fn render_unit(&self, output: &mut String, unit: &Unit) {
        self.push_heading(output, 1, &format!("Unit {}: {}", unit.number, unit.title));
        self.render_content(output, &unit.content);
        for section in &unit.sections {
            self.render_section(output, section);
        }
    }

    fn render_section(&self, output: &mut String, section: &Section) {
        if !section.title.is_empty() {
            self.push_heading(output, 2, &format!("{} {}", section.id, section.title));
        }
        self.render_content(output, &section.content);
        for sub in &section.subsections {
            self.render_subsection(output, sub);
        }
    }

    fn render_subsection(&self, output: &mut String, sub: &Subsection) {
        self.push_heading(output, 3, &format!("{} {}", sub.id, sub.title));
        self.render_content(output, &sub.content);
    }

    fn render_content(&self, output: &mut String, paragraphs: &[String]) {
        if paragraphs.is_empty() {
            return;
        }

        if self.options.include_blocks {
            let blocks = self.classifier.classify(&paragraphs.join("\n\n"));
            self.render_blocks(output, &blocks);
        } else {
            for paragraph in paragraphs {
                output.push_str(&self.escape(paragraph));
                output.push_str("\n\n");
            }
        }
    }

    fn render_blocks(&self, output: &mut String, blocks: &[ContentBlock]) {
        for block in blocks {
            self.render_block(output, block);
        }
    }

    fn render_block(&self, output: &mut String, block: &ContentBlock) {
        match block {
            ContentBlock::Paragraph { text } => {
                output.push_str(&self.escape(text));
                output.push_str("\n\n");
            }
            ContentBlock::Subtitle { text } => {
                output.push_str(&format!("**{}**\n\n", self.escape(text)));
            }
            ContentBlock::Definition { entries } if block.is_accordion() => {
                for entry in entries {
                    output.push_str(&format!(
                        "{} **{}**: {}\n",
                        self.options.list_marker,
                        self.escape(&entry.term),
                        self.escape(&entry.text)
                    ));
                }
                output.push('\n');
            }
            ContentBlock::Definition { entries } => {
                for entry in entries {
                    output.push_str(&format!(
                        "> **{}**: {}\n\n",
                        self.escape(&entry.term),
                        self.escape(&entry.text)
                    ));
                }
            }
            ContentBlock::List { items } => {
                for item in items {
                    output.push_str(&format!("{} {}\n", self.options.list_marker, self.escape(item)));
                }
                output.push('\n');
            }
            ContentBlock::Tip { label, text } => {
                output.push_str(&format!("> **{}:** {}\n\n", label, self.escape(text)));
            }
            ContentBlock::Table { rows } => self.render_table(output, rows),
        }
    }

    fn render_table(&self, output: &mut String, rows: &[Vec<String>]) {
        let col_count = rows.iter().map(Vec::len).max().unwrap_or(0);
        if col_count == 0 {
            return;
        }

        for (i, row) in rows.iter().enumerate() {
            output.push('|');
            for c in 0..col_count {
                let cell = row.get(c).map(String::as_str).unwrap_or("");
                output.push_str(&format!(" {} |", cell.replace('|', "\\|").trim()));
            }
            output.push('\n');

            if i == 0 {
                output.push('|');
                for _ in 0..col_count {
                    output.push_str(" --- |");
                }
                output.push('\n');
            }
        }
        output.push('\n');
    }

    /// Push a heading `depth` levels below the base level.
    fn push_heading(&self, output: &mut String, depth: u8, text: &str) {
        let level = (self.options.base_heading_level + depth).min(6);
        output.push_str(&"#".repeat(level as usize));
        output.push(' ');
        output.push_str(&self.escape(text));
        output.push_str("\n\n");
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}

/// Escape special Markdown characters.
/// Only characters that could be misread as inline syntax are escaped.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
