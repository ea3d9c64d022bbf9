//! Bundled rendering engine – places [`DocumentContent`] on pages and emits
//! PDF bytes using `printpdf` (v0.8 ops-based API).
//!
//! Only the builtin Helvetica faces are used, so every run is written as
//! single-byte WinAnsi text. `use_unicode` and `encoding` are validated and
//! carried in the config but do not change what this engine writes.

use printpdf::{
    BuiltinFont, Color, Mm, Op, PdfConformance, PdfDocument, PdfPage, PdfSaveOptions, Point, Pt,
    Rgb, TextItem,
};

use crate::config::{ConformanceMode, DocumentConfig};
use crate::content::{DocumentContent, PageContent, TextRun};
use crate::engine::{OutputMode, RenderEngine};
use crate::error::RenderError;

const PT_TO_MM: f32 = 0.352778;

/// [`RenderEngine`] backed by printpdf's builtin Helvetica faces.
#[derive(Debug, Clone)]
pub struct PrintPdfEngine {
    config: DocumentConfig,
    author: String,
    creator: String,
    title: String,
    content: DocumentContent,
}

impl PrintPdfEngine {
    /// Append an empty page and return its index.
    pub fn add_page(&mut self) -> usize {
        self.content.pages.push(PageContent::default());
        self.content.pages.len() - 1
    }

    /// Add a text run to the last page, creating a page if there is none.
    pub fn add_text(&mut self, run: TextRun) {
        if self.content.pages.is_empty() {
            self.add_page();
        }
        if let Some(page) = self.content.pages.last_mut() {
            page.texts.push(run);
        }
    }

    pub fn set_content(&mut self, content: DocumentContent) {
        self.content = content;
    }

    pub fn content(&self) -> &DocumentContent {
        &self.content
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// Metadata slots as last set: `(author, creator, title)`.
    pub fn metadata_slots(&self) -> (&str, &str, &str) {
        (&self.author, &self.creator, &self.title)
    }

    fn render(&self) -> Result<Vec<u8>, RenderError> {
        let (page_w_pt, page_h_pt) = self.config.page_size_pt();
        let page_w = Mm(page_w_pt * PT_TO_MM);
        let page_h = Mm(page_h_pt * PT_TO_MM);
        let k = self.config.unit().points_per_unit();

        let mut doc = PdfDocument::new(&self.title);
        doc.metadata.info.author = self.author.clone();
        doc.metadata.info.creator = self.creator.clone();
        doc.metadata.info.producer = self.creator.clone();
        if let Some(conformance) = pdf_conformance(self.config.conformance()) {
            doc.metadata.info.conformance = conformance;
        }

        let mut pages = Vec::with_capacity(self.content.pages.len().max(1));
        for (index, page) in self.content.pages.iter().enumerate() {
            let mut ops = Vec::new();
            for run in &page.texts {
                if run.font_size <= 0.0 {
                    return Err(RenderError::InvalidContent(format!(
                        "font size {} on page {} must be positive",
                        run.font_size,
                        index + 1
                    )));
                }
                let (x_pt, y_pt) = (run.x * k, run.y * k);
                if x_pt > page_w_pt || y_pt > page_h_pt || x_pt < 0.0 || y_pt < 0.0 {
                    log::warn!(
                        "Text run at ({}, {}) lies outside page {}",
                        run.x,
                        run.y,
                        index + 1
                    );
                }
                render_run(&mut ops, run, x_pt, y_pt, page_h_pt);
            }
            pages.push(PdfPage::new(page_w, page_h, ops));
        }

        // Ensure at least one page.
        if pages.is_empty() {
            pages.push(PdfPage::new(page_w, page_h, Vec::new()));
        }

        doc.with_pages(pages);
        Ok(doc.save(&PdfSaveOptions::default(), &mut Vec::new()))
    }
}

impl RenderEngine for PrintPdfEngine {
    fn from_config(config: &DocumentConfig) -> Self {
        log::debug!(
            "Creating printpdf engine: {} {:?} {:?}",
            config.page_format(),
            config.orientation(),
            config.unit()
        );
        Self {
            config: config.clone(),
            author: String::new(),
            creator: String::new(),
            title: String::new(),
            content: DocumentContent::default(),
        }
    }

    fn set_author(&mut self, author: &str) {
        self.author = author.to_string();
    }

    fn set_creator(&mut self, creator: &str) {
        self.creator = creator.to_string();
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn produce_output(&mut self, mode: OutputMode) -> Result<Vec<u8>, RenderError> {
        log::debug!(
            "Rendering {} page(s) for {:?}",
            self.content.pages.len().max(1),
            mode
        );
        self.render()
    }
}

fn pdf_conformance(mode: ConformanceMode) -> Option<PdfConformance> {
    match mode {
        ConformanceMode::None => None,
        ConformanceMode::PdfA1b => Some(PdfConformance::A1B_2005_PDF_1_4),
        ConformanceMode::PdfA2 => Some(PdfConformance::A2B_2011_PDF_1_7),
        ConformanceMode::PdfA3 => Some(PdfConformance::A3_2012_PDF_1_7),
    }
}

fn render_run(ops: &mut Vec<Op>, run: &TextRun, x_pt: f32, y_pt: f32, page_height: f32) {
    let font = match (run.bold, run.italic) {
        (true, true) => BuiltinFont::HelveticaBoldOblique,
        (true, false) => BuiltinFont::HelveticaBold,
        (false, true) => BuiltinFont::HelveticaOblique,
        (false, false) => BuiltinFont::Helvetica,
    };

    // PDF origin is bottom-left; content origin is top-left.
    // Baseline ≈ top of line + ascender (approx 0.75 × font_size)
    let baseline = page_height - y_pt - run.font_size * 0.75;
    // Builtin faces only carry WinAnsiEncoding, whatever the input encoding.
    let text = to_winlatin(&run.text);

    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor {
        pos: Point {
            x: Pt(x_pt),
            y: Pt(baseline),
        },
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        size: Pt(run.font_size),
        font,
    });
    ops.push(Op::SetFillColor {
        col: Color::Rgb(Rgb {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            icc_profile: None,
        }),
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(text)],
        font,
    });
    ops.push(Op::EndTextSection);
}

/// Convert a UTF-8 string to raw Windows-1252 bytes then wrap in a String so
/// printpdf writes the bytes unchanged into the PDF stream (builtin fonts use
/// WinAnsiEncoding, so each glyph is one byte 0x00–0xFF).
fn to_winlatin(s: &str) -> String {
    let bytes: Vec<u8> = s
        .chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80, // euro
            '\u{201A}' => 0x82, // single low-9 quote
            '\u{201E}' => 0x84, // double low-9 quote
            '\u{2026}' => 0x85, // ellipsis
            '\u{2018}' => 0x91, // left single quote
            '\u{2019}' => 0x92, // right single quote
            '\u{201C}' => 0x93, // left double quote
            '\u{201D}' => 0x94, // right double quote
            '\u{2022}' => 0x95, // bullet
            '\u{2013}' => 0x96, // en-dash
            '\u{2014}' => 0x97, // em-dash
            '\u{2122}' => 0x99, // trademark
            '\u{00A0}' => 0x20, // non-breaking space -> space
            c if (c as u32) < 256 => c as u8,
            _ => b'?',
        })
        .collect();
    // SAFETY: intentionally non-UTF-8 for 0x80-0xFF. Relies on printpdf 0.8
    // copying builtin-font text into the content stream via `as_bytes()`
    // without ever reading it back as chars; the only consumer of the
    // returned String is `TextItem::Text` in `render_run`, and printpdf
    // offers no byte-level text item for builtin fonts.
    #[allow(unsafe_code)]
    unsafe {
        String::from_utf8_unchecked(bytes)
    }
}
