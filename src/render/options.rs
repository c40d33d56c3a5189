//! Rendering options and configuration.

use std::ops::RangeInclusive;

/// Options for rendering outlines and blocks.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Heading level used for the module title (1-6); units, sections and
    /// subsections go one level deeper each
    pub base_heading_level: u8,

    /// Include paragraphs that precede the first unit
    pub include_front_matter: bool,

    /// Render node content as classified blocks instead of raw paragraphs
    pub include_blocks: bool,

    /// Character to use for unordered list markers
    pub list_marker: char,

    /// Escape special Markdown characters
    pub escape_special_chars: bool,

    /// Maximum characters per page when paginating (0 = no pagination)
    pub page_chars: usize,

    /// Units to render
    pub unit_selection: UnitSelection,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading level of the module title.
    pub fn with_base_heading(mut self, level: u8) -> Self {
        self.base_heading_level = level.clamp(1, 6);
        self
    }

    /// Enable or disable front matter output.
    pub fn with_front_matter(mut self, include: bool) -> Self {
        self.include_front_matter = include;
        self
    }

    /// Enable or disable block classification of content.
    pub fn with_blocks(mut self, include: bool) -> Self {
        self.include_blocks = include;
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Set the page size for pagination.
    pub fn with_page_chars(mut self, chars: usize) -> Self {
        self.page_chars = chars;
        self
    }

    /// Set unit selection.
    pub fn with_units(mut self, selection: UnitSelection) -> Self {
        self.unit_selection = selection;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            base_heading_level: 1,
            include_front_matter: false,
            include_blocks: true,
            list_marker: '-',
            escape_special_chars: false,
            page_chars: 3000,
            unit_selection: UnitSelection::All,
        }
    }
}

/// Unit selection for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UnitSelection {
    /// Render all units
    #[default]
    All,
    /// Render a range of unit numbers (inclusive)
    Range(RangeInclusive<u32>),
    /// Render specific unit numbers
    Units(Vec<u32>),
    /// Render several inclusive ranges, sorted by start
    Ranges(Vec<RangeInclusive<u32>>),
}

impl UnitSelection {
    /// Check if a unit number should be included.
    pub fn includes(&self, number: u32) -> bool {
        match self {
            UnitSelection::All => true,
            UnitSelection::Range(range) => range.contains(&number),
            UnitSelection::Units(units) => units.contains(&number),
            UnitSelection::Ranges(ranges) => ranges.iter().any(|r| r.contains(&number)),
        }
    }

    /// Parse a selection string (e.g., "1-3", "1,3,5-7").
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(UnitSelection::All);
        }

        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let start: u32 = start.trim().parse().map_err(|_| "Invalid start unit")?;
                let end: u32 = end.trim().parse().map_err(|_| "Invalid end unit")?;
                return Ok(UnitSelection::Range(start..=end));
            }
        }

        let mut ranges = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            let range = match part.split_once('-') {
                Some((start, end)) => {
                    let start: u32 = start.trim().parse().map_err(|_| "Invalid unit number")?;
                    let end: u32 = end.trim().parse().map_err(|_| "Invalid unit number")?;
                    start..=end
                }
                None => {
                    let n: u32 = part.parse().map_err(|_| "Invalid unit number")?;
                    n..=n
                }
            };
            ranges.push(range);
        }

        ranges.sort_by_key(|r| (*r.start(), *r.end()));
        ranges.dedup();
        Ok(UnitSelection::Ranges(ranges))
    }
}
