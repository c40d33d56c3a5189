//! Plain text rendering and pagination.

use crate::model::{Outline, Unit};

/// Render an outline as plain text: module title, then each unit with its
/// header line and flattened content.
pub fn to_text(outline: &Outline) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(title) = outline.title() {
        parts.push(title.to_string());
    }
    for unit in &outline.units {
        parts.push(format!("Unit {}: {}", unit.number, unit.title));
        let body = unit_to_text(unit);
        if !body.is_empty() {
            parts.push(body);
        }
    }
    parts.join("\n\n")
}

/// Flattened unit text: the input of the block classifier.
pub fn unit_to_text(unit: &Unit) -> String {
    unit.flatten()
}

/// Split text into pages of at most `max_chars` characters at paragraph
/// boundaries. A paragraph longer than a page gets a page of its own and is
/// never split.
pub fn paginate(text: &str, max_chars: usize) -> Vec<String> {
    let text = text.trim();
    if max_chars == 0 || text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut pages = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for paragraph in text.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
        let len = paragraph.chars().count();
        if !current.is_empty() && current_len + 2 + len > max_chars {
            pages.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push_str("\n\n");
            current_len += 2;
        }
        current.push_str(paragraph);
        current_len += len;
    }

    if !current.is_empty() {
        pages.push(current);
    }
    pages
}
