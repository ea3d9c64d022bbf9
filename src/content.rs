//! Page content – what the bundled engine places on each page.
//!
//! Coordinates are in the document's configured unit with the origin at the
//! top-left corner of the page; font sizes are in points.

use serde::{Deserialize, Serialize};

use crate::config::DocumentConfig;

/// Margin used by [`flow_text`], in points.
pub const FLOW_MARGIN_PT: f32 = 40.0;
/// Font size used by [`flow_text`], in points.
pub const FLOW_FONT_SIZE_PT: f32 = 11.0;
/// Baseline-to-baseline distance used by [`flow_text`], in points.
pub const FLOW_LINE_HEIGHT_PT: f32 = 14.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentContent {
    /// Ordered list of pages.
    pub pages: Vec<PageContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    pub texts: Vec<TextRun>,
}

/// A single line of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// Left edge, in user units.
    pub x: f32,
    /// Top of the line box, in user units.
    pub y: f32,
    #[serde(default = "TextRun::default_font_size")]
    pub font_size: f32,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    pub text: String,
}

impl TextRun {
    pub fn new(x: f32, y: f32, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            font_size: Self::default_font_size(),
            bold: false,
            italic: false,
            text: text.into(),
        }
    }

    fn default_font_size() -> f32 {
        FLOW_FONT_SIZE_PT
    }
}

impl DocumentContent {
    /// Serialise to JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialise from JSON.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }
}

/// Lay plain text out one input line per output line, starting a new page
/// whenever the next line would cross the bottom margin.
pub fn flow_text(text: &str, config: &DocumentConfig) -> DocumentContent {
    let k = config.unit().points_per_unit();
    let (_, page_height_pt) = config.page_size_pt();
    let bottom = page_height_pt - FLOW_MARGIN_PT;

    let mut content = DocumentContent::default();
    let mut page = PageContent::default();
    let mut cursor = FLOW_MARGIN_PT;

    for line in text.lines() {
        if cursor + FLOW_LINE_HEIGHT_PT > bottom {
            if !page.texts.is_empty() {
                content.pages.push(std::mem::take(&mut page));
            }
            cursor = FLOW_MARGIN_PT;
        }
        let line = line.trim_end();
        if !line.is_empty() {
            page.texts
                .push(TextRun::new(FLOW_MARGIN_PT / k, cursor / k, line));
        }
        cursor += FLOW_LINE_HEIGHT_PT;
    }

    if !page.texts.is_empty() || content.pages.is_empty() {
        content.pages.push(page);
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DocumentOptions;

    #[test]
    fn single_line_fits_one_page() {
        let content = flow_text("Hello", &DocumentConfig::default());
        assert_eq!(content.pages.len(), 1);
        assert_eq!(content.pages[0].texts[0].text, "Hello");
    }

    #[test]
    fn coordinates_are_in_user_units() {
        let config = DocumentOptions {
            unit: "pt".into(),
            ..DocumentOptions::default()
        }
        .validate()
        .unwrap();
        let content = flow_text("a\nb", &config);
        let texts = &content.pages[0].texts;
        assert_eq!(texts[0].x, FLOW_MARGIN_PT);
        assert_eq!(texts[1].y - texts[0].y, FLOW_LINE_HEIGHT_PT);
    }

    #[test]
    fn blank_lines_advance_without_runs() {
        let content = flow_text("a\n\nb", &DocumentConfig::default());
        let texts = &content.pages[0].texts;
        assert_eq!(texts.len(), 2);
        assert!(texts[1].y > texts[0].y);
    }

    #[test]
    fn long_text_spans_pages() {
        let text = "line\n".repeat(200);
        let content = flow_text(&text, &DocumentConfig::default());
        assert!(content.pages.len() > 1);
        let total: usize = content.pages.iter().map(|p| p.texts.len()).sum();
        assert_eq!(total, 200);
    }

    #[test]
    fn empty_text_yields_one_empty_page() {
        let content = flow_text("", &DocumentConfig::default());
        assert_eq!(content.pages.len(), 1);
        assert!(content.pages[0].texts.is_empty());
    }

    #[test]
    fn json_roundtrip_fills_defaults() {
        let content =
            DocumentContent::from_json(r#"{"pages":[{"texts":[{"x":1,"y":2,"text":"hi"}]}]}"#)
                .unwrap();
        let run = &content.pages[0].texts[0];
        assert_eq!(run.font_size, FLOW_FONT_SIZE_PT);
        assert!(!run.bold);
        assert_eq!(DocumentContent::from_json(&content.to_json()).unwrap(), content);
    }
}
